//! Grid view: two signal tables with links routed between them.

mod component;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod layout;
pub mod painter;
pub mod path;
pub mod router;
pub mod store;
pub mod table;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use component::{BrowserController, GridView};
pub use config::{GridConfig, TableConfig};
pub use controller::{GridLayoutController, UpdateSet};
pub use layout::{LayoutFrame, MapPane};
pub use path::RoutedPath;
pub use router::route;
pub use store::{Database, Device, Link, Signal, SignalKey};
pub use types::{Direction, Endpoint, Frame, Point, Rect, Side};
