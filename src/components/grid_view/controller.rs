//! The grid layout controller.
//!
//! Owns the layout frame and every collaborator of the grid view. External
//! resize and update calls recompute table placements and the map pane, then
//! re-route every visible link through [`route`].

use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};

use super::config::GridConfig;
use super::events::{EventQueue, LayoutEvent};
use super::layout::{LayoutFrame, MapPane};
use super::painter::{LinkStyle, MapPainter, OverlaySurface};
use super::router::route;
use super::store::{Database, SignalKey};
use super::table::{Snap, Table, TableDisplay};
use super::types::{Direction, Endpoint, Frame, PathHandle, RowRef, Side};

/// Overlay stack order while the grid view is active.
const FRONT: i32 = 2;
/// Overlay stack order once the view is torn down.
const BACK: i32 = 0;

/// What [`GridLayoutController::update`] should refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateSet {
	pub devices: bool,
	pub maps: bool,
}

impl UpdateSet {
	pub fn all() -> Self {
		Self {
			devices: true,
			maps: true,
		}
	}

	pub fn devices() -> Self {
		Self {
			devices: true,
			maps: false,
		}
	}

	pub fn maps() -> Self {
		Self {
			devices: false,
			maps: true,
		}
	}
}

impl Default for UpdateSet {
	fn default() -> Self {
		Self::all()
	}
}

pub struct GridLayoutController<T, P, O> {
	config: GridConfig,
	layout: LayoutFrame,
	left: T,
	right: T,
	store: Database,
	painter: P,
	overlay: O,
	events: EventQueue,
}

impl<T, P, O> GridLayoutController<T, P, O>
where
	T: Table,
	P: MapPainter,
	O: OverlaySurface,
{
	/// Take over both tables and the overlay, draw the current store and bring
	/// the overlay to the front.
	pub fn new(
		frame: Frame,
		left: T,
		right: T,
		store: Database,
		painter: P,
		overlay: O,
		config: GridConfig,
	) -> Self {
		let initial = config.initial_expand_width;
		let mut this = Self {
			layout: LayoutFrame::new(frame, initial, initial),
			config,
			left,
			right,
			store,
			painter,
			overlay,
			events: EventQueue::new(),
		};

		this.left.filter_by_direction(Direction::Output);
		this.right.filter_by_direction(Direction::Input);
		for (table, snap) in [(&mut this.left, Snap::Top), (&mut this.right, Snap::Bottom)] {
			table.show_detail(false);
			table.set_display(TableDisplay {
				expand: true,
				scrolled: 0.0,
				zoomed: 1.0,
				snap,
			});
		}

		// elements left behind by a previous view
		this.painter.clear();
		this.store.clear_views();

		for side in [Side::Left, Side::Right] {
			let events = this.events.clone();
			this.table_mut(side)
				.set_collapse_handler(Rc::new(move || events.push(LayoutEvent::Collapsed(side))));
		}

		this.update(UpdateSet::all());
		this.resize(None, Some(this.config.animation));
		this.overlay.set_stack_order(FRONT);
		info!(
			"grid view ready: {} devices, {} links",
			this.store.devices.len(),
			this.store.links.len()
		);
		this
	}

	pub fn map_pane(&self) -> MapPane {
		self.layout.map_pane()
	}

	pub fn layout(&self) -> &LayoutFrame {
		&self.layout
	}

	pub fn events(&self) -> &EventQueue {
		&self.events
	}

	pub fn store(&self) -> &Database {
		&self.store
	}

	/// Mutate the store; call [`update`](Self::update) afterwards.
	pub fn store_mut(&mut self) -> &mut Database {
		&mut self.store
	}

	pub fn painter(&self) -> &P {
		&self.painter
	}

	pub fn overlay(&self) -> &O {
		&self.overlay
	}

	pub fn table(&self, side: Side) -> &T {
		match side {
			Side::Left => &self.left,
			Side::Right => &self.right,
		}
	}

	pub fn table_mut(&mut self, side: Side) -> &mut T {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}

	/// Re-place both tables and the overlay for the current widths, then
	/// redraw immediately. The right table's completion schedules a second,
	/// animated draw.
	pub fn resize(&mut self, frame: Option<Frame>, duration: Option<Duration>) {
		if let Some(frame) = frame {
			self.layout.set_frame(frame);
		}

		let (left, right) = self
			.layout
			.table_placements(self.config.table_overlap, duration);
		self.left.adjust(left, None);
		let redraw = self.events.callback(LayoutEvent::Draw(Some(self.config.animation)));
		self.right.adjust(right, Some(redraw));

		let pane = self.layout.map_pane();
		self.overlay.set_container(pane.rect());
		self.overlay.set_surface(self.layout.surface_rect());
		debug!(
			"resize: frame {:?}, widths {}/{}, map pane {:?}",
			self.layout.frame(),
			self.layout.left_expand_width(),
			self.layout.right_expand_width(),
			pane
		);

		self.draw(None);
	}

	/// Route every link whose endpoints both resolve and hand it to the
	/// painter; links that no longer resolve lose their element.
	pub fn draw(&mut self, duration: Option<Duration>) {
		let stroke = self.config.stroke_width;
		let routes: Vec<_> = self
			.store
			.links
			.iter()
			.map(|link| {
				let src = self.resolve(&link.source)?;
				let dst = self.resolve(&link.destination)?;
				Some(route(&src, &dst, stroke))
			})
			.collect();

		let mut drawn = 0;
		for (link, routed) in self.store.links.iter_mut().zip(routes) {
			match routed {
				Some(path) => {
					let style = LinkStyle::for_link(link.selected, &self.config);
					link.view = Some(self.painter.paint(link.view, &path, &style, duration));
					drawn += 1;
				}
				None => {
					if let Some(handle) = link.view.take() {
						self.painter.remove(handle);
					}
				}
			}
		}
		debug!("draw: {drawn}/{} links visible", self.store.links.len());
	}

	pub fn update(&mut self, set: UpdateSet) {
		if set.devices {
			self.refresh_devices();
			let mut grow = false;
			let left = self.left.expand_width();
			if left != self.layout.left_expand_width() {
				self.layout.set_left_expand_width(left);
				grow = true;
			}
			let right = self.right.expand_width();
			if right != self.layout.right_expand_width() {
				self.layout.set_right_expand_width(right);
				grow = true;
			}
			if grow {
				self.resize(None, Some(self.config.animation));
			}
		}
		if set.maps {
			self.refresh_maps();
		}
		if set.devices || set.maps {
			self.draw(Some(self.config.animation));
		}
	}

	/// A table finished expanding or collapsing.
	pub fn handle_collapse(&mut self, side: Side) {
		let width = self.table(side).expand_width();
		let cached = match side {
			Side::Left => self.layout.left_expand_width(),
			Side::Right => self.layout.right_expand_width(),
		};
		if width != cached {
			match side {
				Side::Left => self.layout.set_left_expand_width(width),
				Side::Right => self.layout.set_right_expand_width(width),
			}
			debug!("{side:?} table collapsed to {width}");
			self.resize(None, Some(self.config.animation));
		}
		self.draw(None);
	}

	/// Drain queued completions. Returns how many events were handled.
	pub fn process_events(&mut self) -> usize {
		let mut handled = 0;
		while let Some(event) = self.events.pop() {
			match event {
				LayoutEvent::Draw(duration) => self.draw(duration),
				LayoutEvent::Collapsed(side) => self.handle_collapse(side),
			}
			handled += 1;
		}
		handled
	}

	/// Remove drawn links, send the overlay back over the full frame and drop
	/// every back-reference into this view.
	pub fn teardown(&mut self) {
		self.painter.clear();
		let full = self.layout.frame().rect();
		self.overlay.set_stack_order(BACK);
		self.overlay.set_container(full);
		self.overlay.set_surface(full);
		self.store.clear_views();
		info!("grid view torn down");
	}

	fn resolve(&self, key: &SignalKey) -> Option<Endpoint> {
		let view = self.store.signal(key)?.view?;
		self.table(view.side).row_endpoint(view.row)
	}

	fn refresh_devices(&mut self) {
		self.left.update_rows(&self.store.devices);
		self.right.update_rows(&self.store.devices);
		let (left, right) = (&self.left, &self.right);
		self.store.each_signal_mut(|device, signal| {
			signal.view = left
				.row_index(device, &signal.name)
				.map(|row| RowRef {
					side: Side::Left,
					row,
				})
				.or_else(|| {
					right.row_index(device, &signal.name).map(|row| RowRef {
						side: Side::Right,
						row,
					})
				});
		});
	}

	fn refresh_maps(&mut self) {
		let live: Vec<PathHandle> = self.store.links.iter().filter_map(|l| l.view).collect();
		self.painter.retain(&live);
	}
}
