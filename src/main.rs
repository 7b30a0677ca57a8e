use std::cell::RefCell;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

mod config;
mod context;
mod counter;
mod error;
mod header;
mod image_fallback;
mod listener;
mod menu;
mod navigation;
mod page;
mod reveal;
mod smooth_scroll;
mod viewport;

use config::{PageConfig, CONFIG_ATTRIBUTE};
use context::PageContext;
use page::Page;

thread_local! {
    // Lives as long as the document does, or until teardown.
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

fn boot(ctx: &PageContext) {
    let config = PageConfig::from_attribute(ctx.body_attribute(CONFIG_ATTRIBUTE).as_deref());
    let page = Page::boot(ctx, &config);
    PAGE.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(page) {
            previous.teardown();
        }
    });
}

/// Removes every listener and observer the page enhancements installed.
#[wasm_bindgen(js_name = teardownPage)]
pub fn teardown_page() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if let Some(mut page) = page {
        page.teardown();
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page enhancements");
    let ctx = match PageContext::from_global() {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!("Page enhancements disabled: {}", e);
            return;
        }
    };

    if ctx.document.ready_state() == "loading" {
        let document = ctx.document.clone();
        let on_ready = Closure::once_into_js(move || boot(&ctx));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
            warn!("Could not wait for DOMContentLoaded: {}", error::describe(&e));
        }
    } else {
        boot(&ctx);
    }
}
