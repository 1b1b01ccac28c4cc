use std::f64::consts::PI;
use std::time::Duration;

use super::types::{Frame, Rect};

/// Overlay region in which links are drawn, between the two tables.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPane {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
	pub cx: f64,
	pub cy: f64,
}

impl MapPane {
	/// The left table occupies the band left of the pane, the (rotated) right
	/// table the band above it.
	pub fn compute(frame: Frame, left_expand_width: f64, right_expand_width: f64) -> Self {
		let left = left_expand_width;
		let top = right_expand_width;
		let width = frame.width - left_expand_width;
		let height = frame.height - right_expand_width;
		Self {
			left,
			top,
			width,
			height,
			cx: left + width * 0.5,
			cy: top + height * 0.5,
		}
	}

	pub fn rect(&self) -> Rect {
		Rect::new(self.left, self.top, self.width, self.height)
	}
}

/// Where a table should go, and how fast.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TablePlacement {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
	/// Radians; the right table is rotated by `-PI / 2`.
	pub rotation: f64,
	pub duration: Option<Duration>,
	pub scroll_min: f64,
	pub scroll_max: f64,
}

impl TablePlacement {
	pub fn is_rotated(&self) -> bool {
		self.rotation.abs() > f64::EPSILON
	}
}

/// Cached table widths and the map pane derived from them.
///
/// Every setter recomputes the pane, so a read never sees a stale value.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutFrame {
	frame: Frame,
	left_expand_width: f64,
	right_expand_width: f64,
	map_pane: MapPane,
}

impl LayoutFrame {
	pub fn new(frame: Frame, left_expand_width: f64, right_expand_width: f64) -> Self {
		let frame = frame.clamped();
		let (left_expand_width, right_expand_width) =
			(left_expand_width.max(0.0), right_expand_width.max(0.0));
		Self {
			frame,
			left_expand_width,
			right_expand_width,
			map_pane: MapPane::compute(frame, left_expand_width, right_expand_width),
		}
	}

	pub fn frame(&self) -> Frame {
		self.frame
	}

	pub fn left_expand_width(&self) -> f64 {
		self.left_expand_width
	}

	pub fn right_expand_width(&self) -> f64 {
		self.right_expand_width
	}

	pub fn map_pane(&self) -> MapPane {
		self.map_pane
	}

	pub fn set_frame(&mut self, frame: Frame) {
		self.frame = frame.clamped();
		self.recompute();
	}

	pub fn set_left_expand_width(&mut self, width: f64) {
		self.left_expand_width = width.max(0.0);
		self.recompute();
	}

	pub fn set_right_expand_width(&mut self, width: f64) {
		self.right_expand_width = width.max(0.0);
		self.recompute();
	}

	fn recompute(&mut self) {
		self.map_pane = MapPane::compute(
			self.frame,
			self.left_expand_width,
			self.right_expand_width,
		);
	}

	/// Placements for the left and right tables. `overlap` is how far each
	/// table reaches under the other one at the shared corner.
	pub fn table_placements(
		&self,
		overlap: f64,
		duration: Option<Duration>,
	) -> (TablePlacement, TablePlacement) {
		let (l, r) = (self.left_expand_width, self.right_expand_width);
		let Frame { width, height } = self.frame;
		let left = TablePlacement {
			left: 0.0,
			top: r - overlap,
			width: l,
			height: height - r + overlap,
			rotation: 0.0,
			duration,
			scroll_min: 0.0,
			scroll_max: width,
		};
		let right = TablePlacement {
			left: l - overlap,
			top: r,
			width: r,
			height: width - l + overlap,
			rotation: -PI * 0.5,
			duration,
			scroll_min: r - height,
			scroll_max: height,
		};
		(left, right)
	}

	/// Overlay surface position: offset so it keeps outer-frame coordinates
	/// while the container clips it to the map pane.
	pub fn surface_rect(&self) -> Rect {
		Rect::new(
			-self.map_pane.left,
			-self.map_pane.top,
			self.frame.width,
			self.frame.height,
		)
	}
}
