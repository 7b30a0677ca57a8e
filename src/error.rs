use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("invalid selector {selector:?}")]
    InvalidSelector { selector: String },
    #[error("nothing matches {selector:?}")]
    MissingElement { selector: String },
    #[error("intersection observer unavailable: {0}")]
    ObserverUnavailable(String),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        EnhanceError::Js(describe(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
