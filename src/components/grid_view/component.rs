use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::config::GridConfig;
use super::controller::{GridLayoutController, UpdateSet};
use super::dom::{self, DomOverlay, DomTableHost, SvgPainter, TableAction, TimeoutScheduler};
use super::error::GridError;
use super::events::Scheduler;
use super::painter::{MapPainter, OverlaySurface};
use super::store::Database;
use super::table::{SignalTable, Table};
use super::types::{Frame, Side};

/// The controller as wired up in the browser.
pub type BrowserController = GridLayoutController<SignalTable, SvgPainter, DomOverlay>;

type SharedController = Rc<RefCell<Option<BrowserController>>>;

const FALLBACK_FRAME: Frame = Frame {
	width: 800.0,
	height: 600.0,
};

fn frame_of(root: &HtmlElement) -> Frame {
	match (root.client_width(), root.client_height()) {
		(w, h) if w > 0 && h > 0 => Frame::new(w as f64, h as f64),
		_ => FALLBACK_FRAME,
	}
}

/// Run `f` on the controller unless it is busy or gone; a busy controller
/// drains its own queue before returning.
fn with_controller<T, P, O>(
	weak: &Weak<RefCell<Option<GridLayoutController<T, P, O>>>>,
	f: impl FnOnce(&mut GridLayoutController<T, P, O>),
) where
	T: Table,
	P: MapPainter,
	O: OverlaySurface,
{
	let Some(shared) = weak.upgrade() else {
		return;
	};
	let Ok(mut guard) = shared.try_borrow_mut() else {
		return;
	};
	if let Some(c) = guard.as_mut() {
		f(c);
		c.process_events();
	}
}

/// Take the controller out of its slot and tear it down. Completions still
/// pending afterwards find an empty slot.
fn release<T, P, O>(
	shared: &RefCell<Option<GridLayoutController<T, P, O>>>,
) -> Option<GridLayoutController<T, P, O>>
where
	T: Table,
	P: MapPainter,
	O: OverlaySurface,
{
	let mut taken = shared.borrow_mut().take()?;
	taken.teardown();
	Some(taken)
}

struct Mount {
	root: HtmlElement,
	left: HtmlElement,
	right: HtmlElement,
	overlay: HtmlElement,
}

fn mount(
	elements: Mount,
	store: Database,
	config: GridConfig,
	shared: &SharedController,
) -> Result<BrowserController, GridError> {
	let document = dom::document()?;
	let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);

	let weak = Rc::downgrade(shared);
	let on_action: Rc<dyn Fn(Side, TableAction)> = Rc::new(move |side: Side, action: TableAction| {
		// run outside the listener: re-rendering rows drops the listener itself
		let weak = weak.clone();
		set_timeout(
			move || {
				with_controller(&weak, |c| {
					let table = c.table_mut(side);
					match action {
						TableAction::ToggleDevice(row) => table.toggle_device(row),
						TableAction::ToggleExpand => {
							let expand = table.display().expand;
							table.set_expand(!expand);
						}
					}
				})
			},
			Duration::ZERO,
		);
	});

	let row_height = config.table.row_height;
	let left = SignalTable::new(Side::Left, config.table.clone(), scheduler.clone()).with_host(
		Box::new(DomTableHost::new(
			document.clone(),
			elements.left,
			row_height,
			on_action.clone(),
		)),
	);
	let right = SignalTable::new(Side::Right, config.table.clone(), scheduler).with_host(
		Box::new(DomTableHost::new(
			document.clone(),
			elements.right,
			row_height,
			on_action,
		)),
	);

	let overlay = DomOverlay::new(&document, elements.overlay)?;
	let painter = SvgPainter::new(document, overlay.surface().clone());
	let controller = GridLayoutController::new(
		frame_of(&elements.root),
		left,
		right,
		store,
		painter,
		overlay,
		config,
	);

	let weak = Rc::downgrade(shared);
	controller
		.events()
		.set_waker(move || with_controller(&weak, |_| {}));
	Ok(controller)
}

/// Two signal tables and the links between them.
#[component]
pub fn GridView(
	#[prop(into)] data: Signal<Database>,
	#[prop(optional)] config: GridConfig,
) -> impl IntoView {
	let root_ref = NodeRef::<leptos::html::Div>::new();
	let left_ref = NodeRef::<leptos::html::Div>::new();
	let right_ref = NodeRef::<leptos::html::Div>::new();
	let overlay_ref = NodeRef::<leptos::html::Div>::new();
	let controller: SharedController = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (controller_init, resize_cb_init) = (controller.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let store = data.get();
		if let Some(c) = controller_init.borrow_mut().as_mut() {
			*c.store_mut() = store;
			c.update(UpdateSet::all());
			c.process_events();
			return;
		}

		let (Some(root), Some(left), Some(right), Some(overlay)) =
			(root_ref.get(), left_ref.get(), right_ref.get(), overlay_ref.get())
		else {
			return;
		};
		let elements = Mount {
			root: root.into(),
			left: left.into(),
			right: right.into(),
			overlay: overlay.into(),
		};
		let root = elements.root.clone();

		match mount(elements, store, config.clone(), &controller_init) {
			Ok(mut c) => {
				c.process_events();
				*controller_init.borrow_mut() = Some(c);
			}
			Err(e) => {
				error!("grid view failed to mount: {e}");
				return;
			}
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let weak = Rc::downgrade(&controller_init);
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let frame = frame_of(&root);
			with_controller(&weak, |c| c.resize(Some(frame), None));
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let cleanup = StoredValue::new_local((controller, resize_cb));
	on_cleanup(move || {
		cleanup.try_with_value(|(controller, resize_cb)| {
			if let (Some(cb), Some(window)) = (resize_cb.borrow_mut().take(), web_sys::window()) {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			release(controller);
		});
	});

	view! {
		<div
			node_ref=root_ref
			class="grid-view"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<div node_ref=left_ref class="grid-table grid-table-left" />
			<div node_ref=right_ref class="grid-table grid-table-right" />
			<div node_ref=overlay_ref class="grid-overlay" />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::grid_view::config::TableConfig;
	use crate::components::grid_view::test_utils::{
		ManualScheduler, OverlayCall, RecordingOverlay, RecordingPainter, sample_database,
	};
	use crate::components::grid_view::types::Rect;

	type TestController = GridLayoutController<SignalTable, RecordingPainter, RecordingOverlay>;

	#[test]
	fn released_controller_ignores_late_completions() {
		let scheduler = Rc::new(ManualScheduler::default());
		let left = SignalTable::new(Side::Left, TableConfig::default(), scheduler.clone());
		let right = SignalTable::new(Side::Right, TableConfig::default(), scheduler.clone());
		let controller = GridLayoutController::new(
			Frame::new(800.0, 600.0),
			left,
			right,
			sample_database(),
			RecordingPainter::default(),
			RecordingOverlay::default(),
			GridConfig::default(),
		);
		let shared: Rc<RefCell<Option<TestController>>> = Rc::new(RefCell::new(Some(controller)));
		let weak = Rc::downgrade(&shared);
		if let Some(c) = shared.borrow().as_ref() {
			let weak = weak.clone();
			c.events().set_waker(move || with_controller(&weak, |_| {}));
		}
		scheduler.run_all();
		with_controller(&weak, |c| c.table_mut(Side::Left).set_expand(false));
		assert_eq!(scheduler.pending(), 1);

		let released = release(&shared);
		assert!(shared.borrow().is_none());
		let released = released.unwrap();

		// the collapse completion lands after teardown and is never handled
		scheduler.run_all();
		let full = Rect::new(0.0, 0.0, 800.0, 600.0);
		assert_eq!(released.overlay().last(), Some(&OverlayCall::Surface(full)));
		assert_eq!(released.events().len(), 1);
		assert!(release(&shared).is_none());
	}
}
