/// A point in outer-frame coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// An axis-aligned rectangle. Width and height may be zero or negative after
/// extreme collapses; nothing here rejects them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.left + self.width
	}

	pub fn center(&self) -> Point {
		Point::new(
			self.left + self.width * 0.5,
			self.top + self.height * 0.5,
		)
	}
}

/// Outer size of the whole grid view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
	pub width: f64,
	pub height: f64,
}

impl Frame {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Negative dimensions are clamped to zero.
	pub fn clamped(self) -> Self {
		Self {
			width: self.width.max(0.0),
			height: self.height.max(0.0),
		}
	}

	pub fn rect(&self) -> Rect {
		Rect::new(0.0, 0.0, self.width, self.height)
	}
}

/// Which of the two tables an endpoint belongs to.
///
/// Rows of the left table point right (`vx == 1`), so a path leaving the
/// left table is routed horizontally first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	Left,
	Right,
}

/// Signal direction. The left table lists outputs, the right table inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	Input,
	Output,
}

/// A link attachment: either a table row (with bounds) or a bare anchor point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoint {
	pub x: f64,
	pub y: f64,
	pub bounds: Option<Rect>,
	pub side: Side,
}

impl Endpoint {
	pub fn row(anchor: Point, bounds: Rect, side: Side) -> Self {
		Self {
			x: anchor.x,
			y: anchor.y,
			bounds: Some(bounds),
			side,
		}
	}

	pub fn anchor(anchor: Point, side: Side) -> Self {
		Self {
			x: anchor.x,
			y: anchor.y,
			bounds: None,
			side,
		}
	}

	pub fn point(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Whether routing treats this endpoint as the forward (`vx == 1`) side.
	pub fn is_forward(&self) -> bool {
		self.side == Side::Left
	}

	/// Row band of this endpoint; a bare anchor yields a zero-size band at its point.
	pub fn band(&self) -> Rect {
		self.bounds
			.unwrap_or_else(|| Rect::new(self.x, self.y, 0.0, 0.0))
	}
}

/// Back-reference from a signal to the table row currently rendering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRef {
	pub side: Side,
	pub row: usize,
}

/// Handle to a painter-owned link element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathHandle(pub u64);
