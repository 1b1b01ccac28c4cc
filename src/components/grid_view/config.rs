use std::time::Duration;

/// Grid view settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
	/// Width both tables are assumed to have before they report their own.
	pub initial_expand_width: f64,
	/// How far each table reaches under the other at the shared corner.
	pub table_overlap: f64,
	/// Duration of animated resizes and redraws.
	pub animation: Duration,
	pub stroke_width: f64,
	pub stroke: String,
	pub fill: String,
	pub selected_fill: String,
	pub table: TableConfig,
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			initial_expand_width: 200.0,
			table_overlap: 20.0,
			animation: Duration::from_millis(1000),
			stroke_width: 2.0,
			stroke: "black".into(),
			fill: "white".into(),
			selected_fill: "red".into(),
			table: TableConfig::default(),
		}
	}
}

/// Row metrics for [`SignalTable`](super::table::SignalTable).
#[derive(Clone, Debug, PartialEq)]
pub struct TableConfig {
	pub row_height: f64,
	/// Estimated label width per character.
	pub char_width: f64,
	pub padding: f64,
	pub min_width: f64,
	/// Width reported while the table is collapsed.
	pub collapsed_width: f64,
	/// Extra width added while the detail columns are shown.
	pub detail_width: f64,
	pub collapse_duration: Duration,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			row_height: 20.0,
			char_width: 7.0,
			padding: 40.0,
			min_width: 120.0,
			collapsed_width: 40.0,
			detail_width: 160.0,
			collapse_duration: Duration::from_millis(300),
		}
	}
}
