use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::components::grid_view::{Database, Device, Direction, GridView, Link, SignalKey};

/// Generate a sample network of devices, each with a few inputs and outputs.
fn generate_sample_data(n: usize) -> Database {
	let mut db = Database::new();
	for i in 0..n {
		let mut device = Device::new(format!("device_{i}"));
		for o in 0..=(i % 3) {
			device = device.with_signal(format!("out_{o}"), Direction::Output);
		}
		for j in 0..=((i + 1) % 2) {
			device = device.with_signal(format!("in_{j}"), Direction::Input);
		}
		db.devices.push(device);
	}

	for (i, device) in db.devices.iter().enumerate() {
		let target = (rand_simple(i) * n as f64) as usize;
		if target == i {
			continue;
		}
		let mut link = Link::new(
			SignalKey::new(&device.name, "out_0"),
			SignalKey::new(format!("device_{target}"), "in_0"),
		);
		link.selected = i % 5 == 0;
		db.links.push(link);
	}
	db
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let data = RwSignal::new(generate_sample_data(8));

	// a device with a long name widens the tables and reflows the grid
	let add_device = move |_: MouseEvent| {
		data.update(|db| {
			let i = db.devices.len();
			db.devices.push(
				Device::new(format!("device_with_a_longer_name_{i}"))
					.with_signal("out_0", Direction::Output)
					.with_signal("in_0", Direction::Input),
			);
			db.links.push(Link::new(
				SignalKey::new(format!("device_with_a_longer_name_{i}"), "out_0"),
				SignalKey::new("device_0", "in_0"),
			));
		})
	};

	let toggle_selection = move |_: MouseEvent| {
		data.update(|db| {
			for link in &mut db.links {
				link.selected = !link.selected;
			}
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-grid">
				<GridView data=data />
				<div class="grid-toolbar">
					<h1>"Signal Grid"</h1>
					<p class="subtitle">"Click a device to collapse it. Double-click a table to fold it away."</p>
					<button on:click=add_device>"Add device"</button>
					<button on:click=toggle_selection>"Toggle selection"</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
