use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser plumbing around the grid view.
#[derive(Debug, Error)]
pub enum GridError {
	#[error("no browser window available")]
	NoWindow,
	#[error("window has no document")]
	NoDocument,
	#[error("element is not a {0}")]
	WrongElement(&'static str),
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

impl From<JsValue> for GridError {
	fn from(value: JsValue) -> Self {
		GridError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
