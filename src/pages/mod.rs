pub mod graph_create;
pub mod graph_layout;
pub mod graph_list;
pub mod home;
pub mod not_found;
