use std::time::Duration;

use super::config::GridConfig;
use super::path::RoutedPath;
use super::types::{PathHandle, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
	Round,
}

impl LineJoin {
	pub fn as_str(&self) -> &'static str {
		match self {
			LineJoin::Round => "round",
		}
	}
}

/// Presentation attributes of a link path.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkStyle {
	/// Arrow head at the path end; grid links never have one.
	pub arrow_end: Option<String>,
	pub line_join: LineJoin,
	pub stroke_width: f64,
	pub stroke: String,
	pub fill: String,
	pub fill_opacity: f64,
}

impl LinkStyle {
	pub fn for_link(selected: bool, config: &GridConfig) -> Self {
		Self {
			arrow_end: None,
			line_join: LineJoin::Round,
			stroke_width: config.stroke_width,
			stroke: config.stroke.clone(),
			fill: if selected {
				config.selected_fill.clone()
			} else {
				config.fill.clone()
			},
			fill_opacity: 1.0,
		}
	}
}

/// Renders routed links.
pub trait MapPainter {
	/// Create the link's element, or update `existing` in place.
	fn paint(
		&mut self,
		existing: Option<PathHandle>,
		path: &RoutedPath,
		style: &LinkStyle,
		duration: Option<Duration>,
	) -> PathHandle;
	fn remove(&mut self, handle: PathHandle);
	/// Remove every element not listed in `live`.
	fn retain(&mut self, live: &[PathHandle]);
	fn clear(&mut self);
}

/// The overlay container (clipped to the map pane) and the drawing surface
/// inside it.
pub trait OverlaySurface {
	fn set_container(&mut self, rect: Rect);
	fn set_surface(&mut self, rect: Rect);
	/// Stacking order of the container relative to the tables.
	fn set_stack_order(&mut self, z: i32);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn selection_only_changes_fill() {
		let config = GridConfig::default();
		let plain = LinkStyle::for_link(false, &config);
		let selected = LinkStyle::for_link(true, &config);

		assert_eq!(plain.fill, "white");
		assert_eq!(selected.fill, "red");
		assert_eq!(
			LinkStyle {
				fill: plain.fill.clone(),
				..selected
			},
			plain
		);
		assert_eq!(plain.arrow_end, None);
		assert_eq!(plain.line_join.as_str(), "round");
		assert_eq!(plain.stroke_width, 2.0);
		assert_eq!(plain.fill_opacity, 1.0);
	}
}
