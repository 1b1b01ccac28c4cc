//! Side tables listing devices and their signals.
//!
//! [`Table`] is what the controller needs from a table widget.
//! [`SignalTable`] is a small implementation of it: it lays rows out along
//! its placement and leaves drawing to an optional [`TableHost`].

use std::rc::Rc;

use super::config::TableConfig;
use super::events::{Callback, Scheduler};
use super::layout::TablePlacement;
use super::store::Device;
use super::types::{Direction, Endpoint, Point, Rect, Side};

/// Edge a table's rows stick to when they do not fill it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Snap {
	#[default]
	Top,
	Bottom,
}

/// Display flags. Opaque to the controller beyond setting them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableDisplay {
	pub expand: bool,
	pub scrolled: f64,
	pub zoomed: f64,
	pub snap: Snap,
}

impl Default for TableDisplay {
	fn default() -> Self {
		Self {
			expand: true,
			scrolled: 0.0,
			zoomed: 1.0,
			snap: Snap::Top,
		}
	}
}

pub trait Table {
	/// Current pixel width when expanded (or the collapsed width).
	fn expand_width(&self) -> f64;
	/// Move/reflow the table. `on_complete` runs once the move has finished.
	fn adjust(&mut self, placement: TablePlacement, on_complete: Option<Callback>);
	/// Invoked every time an expand/collapse animation completes.
	fn set_collapse_handler(&mut self, handler: Rc<dyn Fn()>);
	fn filter_by_direction(&mut self, direction: Direction);
	fn show_detail(&mut self, show: bool);
	fn display(&self) -> TableDisplay;
	fn set_display(&mut self, display: TableDisplay);
	/// Rebuild rows from the store.
	fn update_rows(&mut self, devices: &[Device]);
	fn row_index(&self, device: &str, signal: &str) -> Option<usize>;
	/// Attachment for a row; `None` if the row does not exist.
	fn row_endpoint(&self, row: usize) -> Option<Endpoint>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowKind {
	Device { collapsed: bool },
	Signal { device_row: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
	pub label: String,
	pub kind: RowKind,
}

/// A row as drawn: `slot` is its index among visible rows, `along` its
/// offset from the table's leading edge after snapping and scrolling.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleRow {
	pub row: usize,
	pub slot: usize,
	pub along: f64,
	pub label: String,
	pub kind: RowKind,
}

/// Draws a table. Implemented over the DOM in the browser.
pub trait TableHost {
	fn place(&mut self, side: Side, placement: &TablePlacement);
	fn render_rows(&mut self, side: Side, rows: &[VisibleRow], display: &TableDisplay);
}

pub struct SignalTable {
	side: Side,
	direction: Direction,
	config: TableConfig,
	display: TableDisplay,
	detail: bool,
	rows: Vec<Row>,
	placement: TablePlacement,
	collapse_handler: Option<Rc<dyn Fn()>>,
	scheduler: Rc<dyn Scheduler>,
	host: Option<Box<dyn TableHost>>,
}

impl SignalTable {
	pub fn new(side: Side, config: TableConfig, scheduler: Rc<dyn Scheduler>) -> Self {
		let direction = match side {
			Side::Left => Direction::Output,
			Side::Right => Direction::Input,
		};
		Self {
			side,
			direction,
			config,
			display: TableDisplay::default(),
			detail: true,
			rows: Vec::new(),
			placement: TablePlacement::default(),
			collapse_handler: None,
			scheduler,
			host: None,
		}
	}

	pub fn with_host(mut self, host: Box<dyn TableHost>) -> Self {
		self.host = Some(host);
		self
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	pub fn is_detailed(&self) -> bool {
		self.detail
	}

	/// Collapse or expand one device's signals.
	pub fn toggle_device(&mut self, row: usize) {
		let Some(Row {
			kind: RowKind::Device { collapsed },
			..
		}) = self.rows.get_mut(row)
		else {
			return;
		};
		*collapsed = !*collapsed;
		self.render();
		self.schedule_collapse();
	}

	/// Collapse or expand the whole table.
	pub fn set_expand(&mut self, expand: bool) {
		if self.display.expand == expand {
			return;
		}
		self.display.expand = expand;
		self.render();
		self.schedule_collapse();
	}

	pub fn visible_rows(&self) -> Vec<VisibleRow> {
		let mut out = Vec::with_capacity(self.rows.len());
		for (row, r) in self.rows.iter().enumerate() {
			if self.is_hidden(r) {
				continue;
			}
			out.push(VisibleRow {
				row,
				slot: out.len(),
				along: 0.0,
				label: r.label.clone(),
				kind: r.kind.clone(),
			});
		}
		let lead = self.lead(out.len());
		let h = self.row_extent();
		for r in &mut out {
			r.along = lead + r.slot as f64 * h - self.display.scrolled;
		}
		out
	}

	fn is_hidden(&self, row: &Row) -> bool {
		match row.kind {
			RowKind::Device { .. } => false,
			RowKind::Signal { device_row } => matches!(
				self.rows.get(device_row).map(|d| &d.kind),
				Some(RowKind::Device { collapsed: true })
			),
		}
	}

	fn slot_of(&self, row: usize) -> usize {
		self.rows[..row]
			.iter()
			.filter(|r| !self.is_hidden(r))
			.count()
	}

	fn row_extent(&self) -> f64 {
		self.config.row_height * self.display.zoomed
	}

	/// Free space ahead of the first row: rows snapped to the bottom sit
	/// against the far end of the table when they do not fill it.
	fn lead(&self, visible: usize) -> f64 {
		match self.display.snap {
			Snap::Top => 0.0,
			Snap::Bottom => (self.placement.height - visible as f64 * self.row_extent()).max(0.0),
		}
	}

	/// Bounds of a slot and the point on the edge facing the map pane.
	fn slot_geometry(&self, slot: usize) -> (Rect, Point) {
		let p = &self.placement;
		let h = self.row_extent();
		let visible = self.rows.iter().filter(|r| !self.is_hidden(r)).count();
		let along = self.lead(visible) + slot as f64 * h - self.display.scrolled;
		if p.is_rotated() {
			// rotated about its top-left corner: rows run left to right above `p.top`
			let rect = Rect::new(p.left + along, p.top - p.width, h, p.width);
			let anchor = Point::new(rect.center().x, p.top);
			(rect, anchor)
		} else {
			let rect = Rect::new(p.left, p.top + along, p.width, h);
			let anchor = Point::new(rect.right(), rect.center().y);
			(rect, anchor)
		}
	}

	fn render(&mut self) {
		if self.host.is_none() {
			return;
		}
		let rows = self.visible_rows();
		if let Some(host) = self.host.as_mut() {
			host.render_rows(self.side, &rows, &self.display);
		}
	}

	fn schedule_collapse(&self) {
		if let Some(handler) = &self.collapse_handler {
			let handler = handler.clone();
			self.scheduler
				.schedule(self.config.collapse_duration, Box::new(move || handler()));
		}
	}
}

impl Table for SignalTable {
	fn expand_width(&self) -> f64 {
		if !self.display.expand {
			return self.config.collapsed_width;
		}
		let longest = self
			.rows
			.iter()
			.map(|r| r.label.chars().count())
			.max()
			.unwrap_or(0);
		let mut width = longest as f64 * self.config.char_width + self.config.padding;
		if self.detail {
			width += self.config.detail_width;
		}
		width.max(self.config.min_width)
	}

	fn adjust(&mut self, placement: TablePlacement, on_complete: Option<Callback>) {
		self.placement = placement;
		self.display.scrolled = self
			.display
			.scrolled
			.clamp(placement.scroll_min.min(0.0), placement.scroll_max.max(0.0));
		if let Some(host) = self.host.as_mut() {
			host.place(self.side, &placement);
		}
		self.render();
		if let Some(done) = on_complete {
			match placement.duration {
				Some(delay) if !delay.is_zero() => self.scheduler.schedule(delay, done),
				_ => done(),
			}
		}
	}

	fn set_collapse_handler(&mut self, handler: Rc<dyn Fn()>) {
		self.collapse_handler = Some(handler);
	}

	fn filter_by_direction(&mut self, direction: Direction) {
		self.direction = direction;
	}

	fn show_detail(&mut self, show: bool) {
		self.detail = show;
		self.render();
	}

	fn display(&self) -> TableDisplay {
		self.display
	}

	fn set_display(&mut self, display: TableDisplay) {
		self.display = display;
		self.render();
	}

	fn update_rows(&mut self, devices: &[Device]) {
		let previous = std::mem::take(&mut self.rows);
		let was_collapsed = |name: &str| {
			previous.iter().any(|r| {
				r.label == name && r.kind == RowKind::Device { collapsed: true }
			})
		};
		for device in devices {
			let mut signals = device.signals_in(self.direction).peekable();
			if signals.peek().is_none() {
				continue;
			}
			let device_row = self.rows.len();
			self.rows.push(Row {
				label: device.name.clone(),
				kind: RowKind::Device {
					collapsed: was_collapsed(&device.name),
				},
			});
			self.rows.extend(signals.map(|s| Row {
				label: s.name.clone(),
				kind: RowKind::Signal { device_row },
			}));
		}
		self.render();
	}

	fn row_index(&self, device: &str, signal: &str) -> Option<usize> {
		self.rows.iter().position(|r| {
			matches!(r.kind, RowKind::Signal { device_row }
				if r.label == signal && self.rows[device_row].label == device)
		})
	}

	fn row_endpoint(&self, row: usize) -> Option<Endpoint> {
		let r = self.rows.get(row)?;
		match r.kind {
			RowKind::Signal { device_row } if self.is_hidden(r) => {
				let (_, anchor) = self.slot_geometry(self.slot_of(device_row));
				Some(Endpoint::anchor(anchor, self.side))
			}
			_ => {
				let (rect, anchor) = self.slot_geometry(self.slot_of(row));
				Some(Endpoint::row(anchor, rect, self.side))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;
	use crate::components::grid_view::test_utils::{ImmediateScheduler, ManualScheduler, sample_database};

	fn table(side: Side) -> SignalTable {
		let mut t = SignalTable::new(side, TableConfig::default(), Rc::new(ImmediateScheduler));
		t.show_detail(false);
		t.update_rows(&sample_database().devices);
		t
	}

	fn placed(side: Side) -> SignalTable {
		let mut t = table(side);
		let placement = match side {
			Side::Left => TablePlacement {
				left: 0.0,
				top: 130.0,
				width: 200.0,
				height: 470.0,
				..Default::default()
			},
			Side::Right => TablePlacement {
				left: 180.0,
				top: 150.0,
				width: 150.0,
				height: 620.0,
				rotation: -PI * 0.5,
				..Default::default()
			},
		};
		t.adjust(placement, None);
		t
	}

	#[test]
	fn rows_follow_direction() {
		let left = table(Side::Left);
		let labels: Vec<_> = left.rows().iter().map(|r| r.label.as_str()).collect();
		assert_eq!(labels, ["synth", "out", "lfo", "wave", "phase"]);

		let right = table(Side::Right);
		let labels: Vec<_> = right.rows().iter().map(|r| r.label.as_str()).collect();
		assert_eq!(labels, ["synth", "freq", "gain", "mixer", "in1", "in2"]);
	}

	#[test]
	fn row_index_matches_device_and_signal() {
		let left = table(Side::Left);
		assert_eq!(left.row_index("lfo", "phase"), Some(4));
		assert_eq!(left.row_index("synth", "phase"), None);
		assert_eq!(left.row_index("synth", "freq"), None);
	}

	#[test]
	fn unrotated_rows_anchor_on_right_edge() {
		let left = placed(Side::Left);
		let ep = left.row_endpoint(1).unwrap();
		assert_eq!(ep.bounds, Some(Rect::new(0.0, 150.0, 200.0, 20.0)));
		assert_eq!(ep.point(), Point::new(200.0, 160.0));
		assert_eq!(ep.side, Side::Left);
	}

	#[test]
	fn rotated_rows_anchor_on_bottom_edge() {
		let right = placed(Side::Right);
		let ep = right.row_endpoint(2).unwrap();
		assert_eq!(ep.bounds, Some(Rect::new(220.0, 0.0, 20.0, 150.0)));
		assert_eq!(ep.point(), Point::new(230.0, 150.0));
		assert_eq!(ep.side, Side::Right);
	}

	#[test]
	fn collapsed_device_hides_signals_behind_an_anchor() {
		let mut left = placed(Side::Left);
		left.toggle_device(0);

		let hidden = left.row_endpoint(1).unwrap();
		assert!(hidden.bounds.is_none());
		assert_eq!(hidden.point(), Point::new(200.0, 140.0));

		// rows after the collapsed device move up
		let lfo = left.row_endpoint(3).unwrap();
		assert_eq!(lfo.point(), Point::new(200.0, 180.0));

		let slots: Vec<_> = left.visible_rows().iter().map(|r| r.row).collect();
		assert_eq!(slots, [0, 2, 3, 4]);
	}

	#[test]
	fn collapse_state_survives_row_updates() {
		let mut left = placed(Side::Left);
		left.toggle_device(2);
		left.update_rows(&sample_database().devices);
		assert_eq!(left.rows()[2].kind, RowKind::Device { collapsed: true });
	}

	#[test]
	fn expand_width_tracks_labels_and_detail() {
		let mut left = table(Side::Left);
		assert_eq!(left.expand_width(), 120.0);

		left.show_detail(true);
		assert_eq!(left.expand_width(), 5.0 * 7.0 + 40.0 + 160.0);

		left.show_detail(false);
		let mut db = sample_database();
		db.devices[0].signals[2].name = "a_very_long_output_name".into();
		left.update_rows(&db.devices);
		assert_eq!(left.expand_width(), 23.0 * 7.0 + 40.0);

		left.set_expand(false);
		assert_eq!(left.expand_width(), 40.0);
	}

	#[test]
	fn completion_waits_for_the_animation() {
		let scheduler = Rc::new(ManualScheduler::default());
		let mut t = SignalTable::new(Side::Right, TableConfig::default(), scheduler.clone());
		let fired = Rc::new(std::cell::Cell::new(0));

		let f = fired.clone();
		t.adjust(
			TablePlacement {
				duration: Some(std::time::Duration::from_millis(1000)),
				..Default::default()
			},
			Some(Box::new(move || f.set(f.get() + 1))),
		);
		assert_eq!(fired.get(), 0);
		scheduler.run_all();
		assert_eq!(fired.get(), 1);

		let f = fired.clone();
		t.adjust(TablePlacement::default(), Some(Box::new(move || f.set(f.get() + 1))));
		assert_eq!(fired.get(), 2);
	}

	#[test]
	fn collapse_handler_runs_after_toggle() {
		let scheduler = Rc::new(ManualScheduler::default());
		let mut t = SignalTable::new(Side::Left, TableConfig::default(), scheduler.clone());
		t.update_rows(&sample_database().devices);
		let fired = Rc::new(std::cell::Cell::new(0));
		let f = fired.clone();
		t.set_collapse_handler(Rc::new(move || f.set(f.get() + 1)));

		t.toggle_device(0);
		t.set_expand(false);
		t.set_expand(false);
		assert_eq!(scheduler.pending(), 2);
		scheduler.run_all();
		assert_eq!(fired.get(), 2);

		// toggling a signal row is ignored
		t.toggle_device(1);
		assert_eq!(scheduler.pending(), 0);
	}

	#[test]
	fn scroll_offsets_rows() {
		let mut left = placed(Side::Left);
		left.set_display(TableDisplay {
			scrolled: 20.0,
			..left.display()
		});
		assert_eq!(left.row_endpoint(1).unwrap().point(), Point::new(200.0, 140.0));
		assert!(left.row_endpoint(42).is_none());
	}

	#[test]
	fn bottom_snap_pushes_rows_to_the_far_end() {
		let mut right = placed(Side::Right);
		let top = right.row_endpoint(0).unwrap();
		right.set_display(TableDisplay {
			snap: Snap::Bottom,
			..right.display()
		});
		// six rows of 20 in a 620 long table leave 500 ahead of the first row
		let bottom = right.row_endpoint(0).unwrap();
		assert_ne!(top, bottom);
		assert_eq!(bottom.bounds, Some(Rect::new(680.0, 0.0, 20.0, 150.0)));
		assert_eq!(bottom.point(), Point::new(690.0, 150.0));
		assert_eq!(right.visible_rows()[0].along, 500.0);

		// collapsing a device frees space, so the remaining rows slide along
		right.toggle_device(3);
		assert_eq!(right.row_endpoint(3).unwrap().point(), Point::new(790.0, 150.0));
	}

	#[test]
	fn bottom_snap_is_ignored_when_rows_overflow() {
		let mut left = table(Side::Left);
		left.adjust(
			TablePlacement {
				top: 130.0,
				width: 200.0,
				height: 60.0,
				..Default::default()
			},
			None,
		);
		left.set_display(TableDisplay {
			snap: Snap::Bottom,
			..left.display()
		});
		assert_eq!(left.row_endpoint(1).unwrap().point(), Point::new(200.0, 160.0));
	}
}
