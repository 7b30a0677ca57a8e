use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::EnhanceError;
use crate::viewport::Rect;

/// The window and document every enhancement works against. Passed in
/// explicitly instead of reaching for globals inside each component.
#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
}

impl PageContext {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn from_global() -> Result<Self, EnhanceError> {
        let window = web_sys::window().ok_or(EnhanceError::MissingWindow)?;
        let document = window.document().ok_or(EnhanceError::MissingDocument)?;
        Ok(Self::new(window, document))
    }

    pub fn query(&self, selector: &str) -> Result<Option<Element>, EnhanceError> {
        self.document
            .query_selector(selector)
            .map_err(|_| EnhanceError::InvalidSelector {
                selector: selector.to_string(),
            })
    }

    /// Like [`query`](Self::query) but treats no match as an error.
    pub fn require(&self, selector: &str) -> Result<Element, EnhanceError> {
        self.query(selector)?.ok_or_else(|| EnhanceError::MissingElement {
            selector: selector.to_string(),
        })
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>, EnhanceError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|_| EnhanceError::InvalidSelector {
                selector: selector.to_string(),
            })?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    pub fn body_attribute(&self, name: &str) -> Option<String> {
        self.document.body().and_then(|body| body.get_attribute(name))
    }

    pub fn page_y_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    pub fn viewport(&self) -> Rect {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        Rect::viewport(width, height)
    }

    pub fn navigate(&self, href: &str) -> Result<(), EnhanceError> {
        self.window.location().set_href(href)?;
        Ok(())
    }
}
