//! Canvas widget that lays a graph out with a force simulation.

mod component;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::Layout;
pub use types::{GraphData, GraphLink, GraphNode};
