//! Devices, signals and links shown by the grid view.
//!
//! The `view` fields are cached back-references into the current view. They
//! are set and cleared by the controller and never own anything.

use super::types::{Direction, PathHandle, RowRef};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignalKey {
	pub device: String,
	pub signal: String,
}

impl SignalKey {
	pub fn new(device: impl Into<String>, signal: impl Into<String>) -> Self {
		Self {
			device: device.into(),
			signal: signal.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
	pub name: String,
	pub direction: Direction,
	pub view: Option<RowRef>,
}

impl Signal {
	pub fn new(name: impl Into<String>, direction: Direction) -> Self {
		Self {
			name: name.into(),
			direction,
			view: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Device {
	pub name: String,
	pub signals: Vec<Signal>,
}

impl Device {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			signals: Vec::new(),
		}
	}

	pub fn with_signal(mut self, name: impl Into<String>, direction: Direction) -> Self {
		self.signals.push(Signal::new(name, direction));
		self
	}

	pub fn signals_in(&self, direction: Direction) -> impl Iterator<Item = &Signal> {
		self.signals.iter().filter(move |s| s.direction == direction)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub source: SignalKey,
	pub destination: SignalKey,
	pub selected: bool,
	pub view: Option<PathHandle>,
}

impl Link {
	pub fn new(source: SignalKey, destination: SignalKey) -> Self {
		Self {
			source,
			destination,
			selected: false,
			view: None,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Database {
	pub devices: Vec<Device>,
	pub links: Vec<Link>,
}

impl Database {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn signal(&self, key: &SignalKey) -> Option<&Signal> {
		self.devices
			.iter()
			.find(|d| d.name == key.device)?
			.signals
			.iter()
			.find(|s| s.name == key.signal)
	}

	pub fn each_signal_mut(&mut self, mut f: impl FnMut(&str, &mut Signal)) {
		for device in &mut self.devices {
			for signal in &mut device.signals {
				f(&device.name, signal);
			}
		}
	}

	pub fn each_link_mut(&mut self, f: impl FnMut(&mut Link)) {
		self.links.iter_mut().for_each(f);
	}

	/// Drop every cached view reference, on signals and links alike.
	pub fn clear_views(&mut self) {
		self.each_signal_mut(|_, signal| signal.view = None);
		self.each_link_mut(|link| link.view = None);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::grid_view::types::Side;

	fn sample() -> Database {
		let mut db = Database::new();
		db.devices.push(
			Device::new("synth")
				.with_signal("freq", Direction::Input)
				.with_signal("out", Direction::Output),
		);
		db.links.push(Link::new(
			SignalKey::new("synth", "out"),
			SignalKey::new("synth", "freq"),
		));
		db
	}

	#[test]
	fn signal_lookup_by_key() {
		let db = sample();
		let out = db.signal(&SignalKey::new("synth", "out"));
		assert_eq!(out.map(|s| s.direction), Some(Direction::Output));
		assert!(db.signal(&SignalKey::new("synth", "missing")).is_none());
		assert!(db.signal(&SignalKey::new("nope", "out")).is_none());
	}

	#[test]
	fn signals_filter_by_direction() {
		let db = sample();
		let names: Vec<_> = db.devices[0]
			.signals_in(Direction::Input)
			.map(|s| s.name.as_str())
			.collect();
		assert_eq!(names, ["freq"]);
	}

	#[test]
	fn clear_views_drops_back_references() {
		let mut db = sample();
		db.each_signal_mut(|_, s| {
			s.view = Some(RowRef {
				side: Side::Left,
				row: 1,
			})
		});
		db.links[0].view = Some(PathHandle(7));

		db.clear_views();
		assert!(db.devices[0].signals.iter().all(|s| s.view.is_none()));
		assert!(db.links[0].view.is_none());
	}
}
