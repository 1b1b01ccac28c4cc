//! Path commands produced by the router and their SVG path-data form.

use std::fmt;

use super::types::Point;

/// One drawing command of a sub-path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
	MoveTo(Point),
	LineTo(Point),
	/// Relative line from the current point.
	LineBy { dx: f64, dy: f64 },
	Close,
}

/// An ordered list of commands forming one closed shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubPath {
	pub commands: Vec<PathCommand>,
}

impl SubPath {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn move_to(mut self, p: Point) -> Self {
		self.commands.push(PathCommand::MoveTo(p));
		self
	}

	pub fn line_to(mut self, p: Point) -> Self {
		self.commands.push(PathCommand::LineTo(p));
		self
	}

	pub fn line_by(mut self, dx: f64, dy: f64) -> Self {
		self.commands.push(PathCommand::LineBy { dx, dy });
		self
	}

	pub fn close(mut self) -> Self {
		self.commands.push(PathCommand::Close);
		self
	}

	/// Absolute vertices visited by the sub-path, relative moves resolved.
	pub fn vertices(&self) -> Vec<Point> {
		let mut out = Vec::with_capacity(self.commands.len());
		let mut cursor = Point::default();
		for cmd in &self.commands {
			match *cmd {
				PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
					cursor = p;
					out.push(p);
				}
				PathCommand::LineBy { dx, dy } => {
					cursor = Point::new(cursor.x + dx, cursor.y + dy);
					out.push(cursor);
				}
				PathCommand::Close => {}
			}
		}
		out
	}

	pub fn is_closed(&self) -> bool {
		matches!(self.commands.last(), Some(PathCommand::Close))
	}
}

impl fmt::Display for SubPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, cmd) in self.commands.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			match *cmd {
				PathCommand::MoveTo(p) => {
					write!(f, "M{},{}", format_coord(p.x), format_coord(p.y))?
				}
				PathCommand::LineTo(p) => {
					write!(f, "L{},{}", format_coord(p.x), format_coord(p.y))?
				}
				PathCommand::LineBy { dx, dy } => {
					write!(f, "l{},{}", format_coord(dx), format_coord(dy))?
				}
				PathCommand::Close => f.write_str("Z")?,
			}
		}
		Ok(())
	}
}

/// Router output: the wedge, plus a cap when the destination is a table row.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutedPath {
	pub wedge: SubPath,
	pub cap: Option<SubPath>,
}

impl RoutedPath {
	/// Both sub-paths joined into a single SVG `d` attribute.
	pub fn to_path_data(&self) -> String {
		match &self.cap {
			Some(cap) => format!("{} {}", self.wedge, cap),
			None => self.wedge.to_string(),
		}
	}
}

fn format_coord(v: f64) -> String {
	let s = format!("{:.3}", v);
	let s = s.trim_end_matches('0').trim_end_matches('.');
	if s == "-0" {
		"0".to_string()
	} else {
		s.to_string()
	}
}
