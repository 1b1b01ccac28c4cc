//! Browser implementations of the grid view collaborators.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::set_timeout;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, MouseEvent, SvgElement};

use super::error::GridError;
use super::events::{Callback, Scheduler};
use super::layout::TablePlacement;
use super::painter::{LinkStyle, MapPainter, OverlaySurface};
use super::path::RoutedPath;
use super::table::{RowKind, TableDisplay, TableHost, VisibleRow};
use super::types::{PathHandle, Rect, Side};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn document() -> Result<Document, GridError> {
	web_sys::window()
		.ok_or(GridError::NoWindow)?
		.document()
		.ok_or(GridError::NoDocument)
}

fn px(v: f64) -> String {
	format!("{v}px")
}

fn set_styles(style: &CssStyleDeclaration, props: &[(&str, String)]) -> Result<(), GridError> {
	for (name, value) in props {
		style.set_property(name, value)?;
	}
	Ok(())
}

fn rect_styles(rect: Rect) -> [(&'static str, String); 4] {
	[
		("left", px(rect.left)),
		("top", px(rect.top)),
		("width", px(rect.width.max(0.0))),
		("height", px(rect.height.max(0.0))),
	]
}

fn transition(property: &str, duration: Option<Duration>) -> String {
	match duration {
		Some(d) => format!("{property} {}ms ease-in-out", d.as_millis()),
		None => "none".into(),
	}
}

/// Overlay `<div>` clipped to the map pane, with the `<svg>` surface inside.
pub struct DomOverlay {
	container: HtmlElement,
	surface: SvgElement,
}

impl DomOverlay {
	pub fn new(document: &Document, container: HtmlElement) -> Result<Self, GridError> {
		let surface: SvgElement = document
			.create_element_ns(Some(SVG_NS), "svg")?
			.dyn_into()
			.map_err(|_| GridError::WrongElement("svg element"))?;
		container.append_child(&surface)?;
		set_styles(
			&container.style(),
			&[
				("position", "absolute".into()),
				("overflow", "hidden".into()),
				("pointer-events", "none".into()),
			],
		)?;
		set_styles(&surface.style(), &[("position", "absolute".into())])?;
		Ok(Self { container, surface })
	}

	pub fn surface(&self) -> &SvgElement {
		&self.surface
	}
}

impl OverlaySurface for DomOverlay {
	fn set_container(&mut self, rect: Rect) {
		if let Err(e) = set_styles(&self.container.style(), &rect_styles(rect)) {
			warn!("overlay container: {e}");
		}
	}

	fn set_surface(&mut self, rect: Rect) {
		if let Err(e) = set_styles(&self.surface.style(), &rect_styles(rect)) {
			warn!("overlay surface: {e}");
		}
	}

	fn set_stack_order(&mut self, z: i32) {
		if let Err(e) = set_styles(&self.container.style(), &[("z-index", z.to_string())]) {
			warn!("overlay stack order: {e}");
		}
	}
}

/// One `<path>` per link inside the overlay surface.
pub struct SvgPainter {
	document: Document,
	surface: SvgElement,
	paths: HashMap<PathHandle, Element>,
	next: u64,
}

impl SvgPainter {
	pub fn new(document: Document, surface: SvgElement) -> Self {
		Self {
			document,
			surface,
			paths: HashMap::new(),
			next: 0,
		}
	}

	fn element(&mut self, existing: Option<PathHandle>) -> Result<(PathHandle, Element), GridError> {
		if let Some(el) = existing.and_then(|h| self.paths.get(&h).map(|el| (h, el.clone()))) {
			return Ok(el);
		}
		let el = self.document.create_element_ns(Some(SVG_NS), "path")?;
		self.surface.append_child(&el)?;
		self.next += 1;
		let handle = PathHandle(self.next);
		self.paths.insert(handle, el.clone());
		Ok((handle, el))
	}

	fn apply(
		el: &Element,
		path: &RoutedPath,
		style: &LinkStyle,
		duration: Option<Duration>,
	) -> Result<(), GridError> {
		el.set_attribute("style", &format!("transition: {}", transition("d", duration)))?;
		el.set_attribute("d", &path.to_path_data())?;
		el.set_attribute("marker-end", style.arrow_end.as_deref().unwrap_or("none"))?;
		el.set_attribute("stroke-linejoin", style.line_join.as_str())?;
		el.set_attribute("stroke-width", &style.stroke_width.to_string())?;
		el.set_attribute("stroke", &style.stroke)?;
		el.set_attribute("fill", &style.fill)?;
		el.set_attribute("fill-opacity", &style.fill_opacity.to_string())?;
		Ok(())
	}
}

impl MapPainter for SvgPainter {
	fn paint(
		&mut self,
		existing: Option<PathHandle>,
		path: &RoutedPath,
		style: &LinkStyle,
		duration: Option<Duration>,
	) -> PathHandle {
		let (handle, el) = match self.element(existing) {
			Ok(found) => found,
			Err(e) => {
				warn!("link element: {e}");
				return existing.unwrap_or(PathHandle(0));
			}
		};
		if let Err(e) = Self::apply(&el, path, style, duration) {
			warn!("link attributes: {e}");
		}
		handle
	}

	fn remove(&mut self, handle: PathHandle) {
		if let Some(el) = self.paths.remove(&handle) {
			el.remove();
		}
	}

	fn retain(&mut self, live: &[PathHandle]) {
		let stale: Vec<_> = self
			.paths
			.keys()
			.filter(|h| !live.contains(h))
			.copied()
			.collect();
		for handle in stale {
			self.remove(handle);
		}
	}

	fn clear(&mut self) {
		for (_, el) in self.paths.drain() {
			el.remove();
		}
	}
}

/// User actions forwarded from a table's rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableAction {
	ToggleDevice(usize),
	ToggleExpand,
}

/// Draws a [`SignalTable`](super::table::SignalTable) as absolutely
/// positioned rows inside its element.
pub struct DomTableHost {
	document: Document,
	element: HtmlElement,
	row_height: f64,
	on_action: Rc<dyn Fn(Side, TableAction)>,
	listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomTableHost {
	pub fn new(
		document: Document,
		element: HtmlElement,
		row_height: f64,
		on_action: Rc<dyn Fn(Side, TableAction)>,
	) -> Self {
		Self {
			document,
			element,
			row_height,
			on_action,
			listeners: Vec::new(),
		}
	}

	fn listen(&mut self, target: &HtmlElement, event: &str, side: Side, action: TableAction) -> Result<(), GridError> {
		let on_action = self.on_action.clone();
		let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| on_action(side, action));
		target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
		self.listeners.push(cb);
		Ok(())
	}

	fn try_render(&mut self, side: Side, rows: &[VisibleRow], display: &TableDisplay) -> Result<(), GridError> {
		self.element.set_inner_html("");
		self.listeners.clear();
		let h = self.row_height * display.zoomed;
		for row in rows {
			let div: HtmlElement = self
				.document
				.create_element("div")?
				.dyn_into()
				.map_err(|_| GridError::WrongElement("html element"))?;
			let class = match row.kind {
				RowKind::Device { collapsed: true } => "grid-row grid-device collapsed",
				RowKind::Device { collapsed: false } => "grid-row grid-device",
				RowKind::Signal { .. } => "grid-row grid-signal",
			};
			div.set_class_name(class);
			div.set_text_content(Some(&row.label));
			set_styles(
				&div.style(),
				&[
					("position", "absolute".into()),
					("left", "0".into()),
					("top", px(row.along)),
					("width", "100%".into()),
					("height", px(h)),
					("line-height", px(h)),
				],
			)?;
			if let RowKind::Device { .. } = row.kind {
				self.listen(&div, "click", side, TableAction::ToggleDevice(row.row))?;
			}
			self.listen(&div, "dblclick", side, TableAction::ToggleExpand)?;
			self.element.append_child(&div)?;
		}
		Ok(())
	}
}

impl TableHost for DomTableHost {
	fn place(&mut self, side: Side, placement: &TablePlacement) {
		let props = [
			("position", "absolute".to_string()),
			("left", px(placement.left)),
			("top", px(placement.top)),
			("width", px(placement.width.max(0.0))),
			("height", px(placement.height.max(0.0))),
			("transform-origin", "0 0".into()),
			("transform", format!("rotate({}rad)", placement.rotation)),
			("transition", transition("all", placement.duration)),
		];
		if let Err(e) = set_styles(&self.element.style(), &props) {
			warn!("{side:?} table placement: {e}");
		}
	}

	fn render_rows(&mut self, side: Side, rows: &[VisibleRow], display: &TableDisplay) {
		if let Err(e) = self.try_render(side, rows, display) {
			warn!("{side:?} table rows: {e}");
		}
	}
}

/// Runs completions on the browser's timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
	fn schedule(&self, delay: Duration, task: Callback) {
		set_timeout(task, delay);
	}
}
