use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Fill for nodes whose payload names no color.
const NODE_COLOR: &str = "#1976d2";

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Arc length between neighbours on the initial circle.
const NODE_SPACING: f64 = 28.0;
const MIN_CIRCLE_RADIUS: f64 = 60.0;
const FIT_MARGIN: f64 = 30.0;

/// How nodes are placed once the canvas mounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
	/// Nodes stay pinned on a circle in id order until dragged.
	#[default]
	Circle,
	/// Nodes start on the circle and then settle under the simulation.
	Force,
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Stays set while the highlight fades out after the pointer leaves.
	pub node: Option<DefaultNodeIdx>,
	pub pointer_over: bool,
	/// 0 when nothing is highlighted, eases towards 1 while hovering.
	pub highlight_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub directed: bool,
	pub layout: Layout,
	neighbors: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>>,
}

/// Radius of the starting circle for `n` nodes.
pub fn circle_radius(n: usize) -> f64 {
	(n as f64 * NODE_SPACING / (2.0 * PI)).max(MIN_CIRCLE_RADIUS)
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, layout: Layout) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 250.0,
			force_spring: 0.02,
			force_max: 80.0,
			node_speed: 2000.0,
			damping_factor: 0.85,
		});
		let mut id_to_idx = HashMap::new();
		let radius = circle_radius(data.nodes.len());

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| NODE_COLOR.to_owned());
			// Start at 12 o'clock and go clockwise, like a clock face.
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64 - PI / 2.0;
			let idx = graph.add_node(NodeData {
				x: (radius * angle.cos()) as f32,
				y: (radius * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: layout == Layout::Circle,
				user_data: NodeInfo {
					label: node.label.clone(),
					color,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut neighbors: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>> = HashMap::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(link.source.as_str()), id_to_idx.get(link.target.as_str()))
			else {
				continue;
			};
			if src == tgt || neighbors.get(&src).is_some_and(|n| n.contains(&tgt)) {
				continue;
			}
			graph.add_edge(src, tgt, EdgeData::default());
			neighbors.entry(src).or_default().insert(tgt);
			neighbors.entry(tgt).or_default().insert(src);
		}

		let fit = ((width.min(height) / 2.0 - FIT_MARGIN) / (radius + NODE_RADIUS)).clamp(0.1, 1.0);

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: fit,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			directed: data.directed,
			layout,
			neighbors,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Closest node under a screen point, if any is within [`HIT_RADIUS`].
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut best: Option<(f64, DefaultNodeIdx)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < HIT_RADIUS && best.is_none_or(|(d, _)| dist < d) {
				best = Some((dist, node.index()));
			}
		});
		best.map(|(_, idx)| idx)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hover.pointer_over = node.is_some();
		if node.is_some() {
			self.hover.node = node;
		}
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	pub fn is_neighbor(&self, idx: DefaultNodeIdx) -> bool {
		self.hover
			.node
			.and_then(|hovered| self.neighbors.get(&hovered))
			.is_some_and(|n| n.contains(&idx))
	}

	pub fn degree(&self, idx: DefaultNodeIdx) -> usize {
		self.neighbors.get(&idx).map_or(0, HashSet::len)
	}

	/// Advance the simulation and the hover fade.
	pub fn tick(&mut self, dt: f32) {
		if self.layout == Layout::Force {
			self.graph.update(dt);
		}
		let hovering = self.hover.pointer_over;
		let target = if hovering { 1.0 } else { 0.0 };
		let speed = if hovering { 8.0 } else { 5.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt as f64).min(1.0);
		if !hovering && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.node = None;
		}
	}

	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag.node_idx = Some(idx);
		self.drag.start_x = x;
		self.drag.start_y = y;
		let drag = &mut self.drag;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				drag.node_start_x = node.x();
				drag.node_start_y = node.y();
			}
		});
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let nx = self.drag.node_start_x + ((x - self.drag.start_x) / self.transform.k) as f32;
		let ny = self.drag.node_start_y + ((y - self.drag.start_y) / self.transform.k) as f32;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn end_gestures(&mut self) {
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Zoom by `factor` keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
