//! Deferred work between collaborators and the controller.
//!
//! Animation completions and collapse handlers may fire at any time,
//! including synchronously from inside a `resize`. They never call into the
//! controller directly: they push a [`LayoutEvent`] and wake the host, which
//! drains the queue through `GridLayoutController::process_events`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use super::types::Side;

/// One-shot completion callback.
pub type Callback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutEvent {
	/// Re-route and repaint every visible link.
	Draw(Option<Duration>),
	/// A table finished expanding or collapsing.
	Collapsed(Side),
}

#[derive(Default)]
struct QueueInner {
	events: RefCell<VecDeque<LayoutEvent>>,
	waker: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Shared FIFO of layout events. Clones share the same queue.
#[derive(Clone, Default)]
pub struct EventQueue {
	inner: Rc<QueueInner>,
}

impl EventQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Called after every push. The host uses it to schedule a drain.
	pub fn set_waker(&self, waker: impl Fn() + 'static) {
		*self.inner.waker.borrow_mut() = Some(Rc::new(waker));
	}

	pub fn push(&self, event: LayoutEvent) {
		self.inner.events.borrow_mut().push_back(event);
		let waker = self.inner.waker.borrow().clone();
		if let Some(wake) = waker {
			wake();
		}
	}

	pub fn pop(&self) -> Option<LayoutEvent> {
		self.inner.events.borrow_mut().pop_front()
	}

	pub fn len(&self) -> usize {
		self.inner.events.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// A callback that pushes `event` when invoked.
	pub fn callback(&self, event: LayoutEvent) -> Callback {
		let queue = self.clone();
		Box::new(move || queue.push(event))
	}
}

/// Runs a callback once an animation of the given length has finished.
///
/// Implementations may run it late or more than once; callers must not
/// depend on ordering between independent schedules.
pub trait Scheduler {
	fn schedule(&self, delay: Duration, task: Callback);
}
