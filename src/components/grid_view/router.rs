//! Routing between the two tables.
//!
//! A routed link is a "wedge": `source -> mid -> end -> mid`, closed. The
//! repeated `mid` collapses one edge so a filled path renders as an elbow
//! rather than a quadrilateral. When the destination is a table row a small
//! cap is added where the link meets that row.

use super::path::{RoutedPath, SubPath};
use super::types::{Endpoint, Point};

/// Route a link from `src` to `dst`. Pure: identical inputs give identical paths.
pub fn route(src: &Endpoint, dst: &Endpoint, stroke: f64) -> RoutedPath {
	let forward = src.is_forward();
	let (mid, end) = if forward {
		(
			Point::new(dst.x, src.y),
			Point::new(dst.x, dst.y.min(src.y)),
		)
	} else {
		(
			Point::new(src.x, dst.y),
			Point::new(dst.x.min(src.x), dst.y),
		)
	};

	let wedge = SubPath::new()
		.move_to(src.point())
		.line_to(mid)
		.line_to(end)
		.line_to(mid)
		.close();

	let Some(dst_row) = dst.bounds else {
		return RoutedPath { wedge, cap: None };
	};

	// The cap spans the source row's band, not the destination's.
	let band = src.band();
	let cap = if forward {
		SubPath::new()
			.move_to(Point::new(dst.x, band.top + stroke + 1.0))
			.line_to(Point::new(
				dst_row.left + stroke,
				band.top + band.height - stroke + 2.0,
			))
			.line_by(dst_row.width - stroke - 2.0, 0.0)
			.close()
	} else {
		SubPath::new()
			.move_to(Point::new(band.left + stroke, dst.y))
			.line_to(Point::new(
				band.left + band.width - stroke + 2.0,
				dst_row.top + stroke,
			))
			.line_by(0.0, dst_row.height - stroke - 2.0)
			.close()
	};

	RoutedPath {
		wedge,
		cap: Some(cap),
	}
}
