use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

const BACKGROUND: &str = "#ffffff";
const EDGE_RGB: &str = "97, 97, 97";
const LABEL_COLOR: &str = "#212121";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let base_width = 1.0 / k;
	let arrow_size = 7.0 / k;

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		// An edge is lit when it touches the hovered node.
		let lit = state.is_hovered(n1.index()) || state.is_hovered(n2.index());
		let (alpha, width) = if lit {
			(0.5 + 0.4 * t, base_width * (1.0 + t))
		} else {
			(0.5 - 0.4 * t, base_width)
		};
		let color = format!("rgba({EDGE_RGB}, {alpha})");

		let (ux, uy) = (dx / dist, dy / dist);
		let head = if state.directed { arrow_size } else { 0.0 };
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * (NODE_RADIUS + head), y2 - uy * (NODE_RADIUS + head));
		ctx.stroke();

		if state.directed {
			let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.set_fill_style_str(&color);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = if state.is_hovered(idx) {
			(1.0, NODE_RADIUS * (1.0 + 0.4 * t))
		} else if state.is_neighbor(idx) {
			(1.0, NODE_RADIUS * (1.0 + 0.2 * t))
		} else {
			(1.0 - 0.6 * t, NODE_RADIUS)
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		if state.is_hovered(idx) && t > 0.01 {
			ctx.set_stroke_style_str(LABEL_COLOR);
			ctx.set_line_width(1.5 / k);
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.stroke();
		}

		if let Some(label) = &node.data.user_data.label {
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 4.0);
		}
		ctx.set_global_alpha(1.0);
	});

	// Show the degree of the hovered vertex next to it.
	if let Some(idx) = state.hover.node.filter(|_| t > 0.01) {
		state.graph.visit_nodes(|node| {
			if node.index() != idx {
				return;
			}
			ctx.set_global_alpha(t);
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&font);
			let _ = ctx.fill_text(
				&format!("deg {}", state.degree(idx)),
				node.x() as f64 + NODE_RADIUS * 2.0,
				node.y() as f64 - NODE_RADIUS * 2.0,
			);
			ctx.set_global_alpha(1.0);
		});
	}
}
