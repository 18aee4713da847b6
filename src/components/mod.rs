pub mod error_fallback;
pub mod force_graph;
pub mod graph_table;
pub mod nav_bar;
pub mod notification;
pub mod options_form;
pub mod progress;
pub mod render_dialog;
pub mod sidebar;
