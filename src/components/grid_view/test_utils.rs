use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use super::events::{Callback, Scheduler};
use super::painter::{LinkStyle, MapPainter, OverlaySurface};
use super::path::RoutedPath;
use super::store::{Database, Device, Link, SignalKey};
use super::types::{Direction, PathHandle, Rect};

/// Runs every task immediately, ignoring the delay.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
	fn schedule(&self, _delay: Duration, task: Callback) {
		task();
	}
}

/// Holds scheduled tasks until the test runs them.
#[derive(Default)]
pub(crate) struct ManualScheduler {
	tasks: RefCell<Vec<(Duration, Callback)>>,
}

impl ManualScheduler {
	pub(crate) fn pending(&self) -> usize {
		self.tasks.borrow().len()
	}

	/// Run everything scheduled so far, including tasks scheduled while running.
	pub(crate) fn run_all(&self) {
		loop {
			let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
			if tasks.is_empty() {
				break;
			}
			for (_, task) in tasks {
				task();
			}
		}
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, delay: Duration, task: Callback) {
		self.tasks.borrow_mut().push((delay, task));
	}
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Painted {
	pub handle: PathHandle,
	pub path: RoutedPath,
	pub style: LinkStyle,
	pub duration: Option<Duration>,
}

/// Keeps every paint call and the set of live elements.
#[derive(Default)]
pub(crate) struct RecordingPainter {
	next: u64,
	pub live: BTreeMap<PathHandle, RoutedPath>,
	pub painted: Vec<Painted>,
	pub removed: Vec<PathHandle>,
}

impl MapPainter for RecordingPainter {
	fn paint(
		&mut self,
		existing: Option<PathHandle>,
		path: &RoutedPath,
		style: &LinkStyle,
		duration: Option<Duration>,
	) -> PathHandle {
		let handle = match existing {
			Some(h) if self.live.contains_key(&h) => h,
			_ => {
				self.next += 1;
				PathHandle(self.next)
			}
		};
		self.live.insert(handle, path.clone());
		self.painted.push(Painted {
			handle,
			path: path.clone(),
			style: style.clone(),
			duration,
		});
		handle
	}

	fn remove(&mut self, handle: PathHandle) {
		if self.live.remove(&handle).is_some() {
			self.removed.push(handle);
		}
	}

	fn retain(&mut self, live: &[PathHandle]) {
		let stale: Vec<_> = self
			.live
			.keys()
			.filter(|h| !live.contains(h))
			.copied()
			.collect();
		for h in stale {
			self.remove(h);
		}
	}

	fn clear(&mut self) {
		let all: Vec<_> = self.live.keys().copied().collect();
		for h in all {
			self.remove(h);
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum OverlayCall {
	Container(Rect),
	Surface(Rect),
	StackOrder(i32),
}

#[derive(Default)]
pub(crate) struct RecordingOverlay {
	pub calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
	pub(crate) fn containers(&self) -> Vec<Rect> {
		self.calls
			.iter()
			.filter_map(|c| match c {
				OverlayCall::Container(r) => Some(*r),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn last(&self) -> Option<&OverlayCall> {
		self.calls.last()
	}
}

impl OverlaySurface for RecordingOverlay {
	fn set_container(&mut self, rect: Rect) {
		self.calls.push(OverlayCall::Container(rect));
	}

	fn set_surface(&mut self, rect: Rect) {
		self.calls.push(OverlayCall::Surface(rect));
	}

	fn set_stack_order(&mut self, z: i32) {
		self.calls.push(OverlayCall::StackOrder(z));
	}
}

/// Three devices, two links: `synth.out -> mixer.in1` and `lfo.wave -> synth.freq`.
pub(crate) fn sample_database() -> Database {
	let mut db = Database::new();
	db.devices.push(
		Device::new("synth")
			.with_signal("freq", Direction::Input)
			.with_signal("gain", Direction::Input)
			.with_signal("out", Direction::Output),
	);
	db.devices.push(
		Device::new("lfo")
			.with_signal("wave", Direction::Output)
			.with_signal("phase", Direction::Output),
	);
	db.devices.push(
		Device::new("mixer")
			.with_signal("in1", Direction::Input)
			.with_signal("in2", Direction::Input),
	);
	db.links.push(Link::new(
		SignalKey::new("synth", "out"),
		SignalKey::new("mixer", "in1"),
	));
	db.links.push(Link::new(
		SignalKey::new("lfo", "wave"),
		SignalKey::new("synth", "freq"),
	));
	db
}
