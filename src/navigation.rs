use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::config::NavigationConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::listener::Listener;

pub const HREF_ATTRIBUTE: &str = "data-href";

/// Keys that follow a focused card, matching native link and button behaviour.
pub fn activates_link(key: &str) -> bool {
    key == "Enter" || key == " "
}

pub fn link_target(href: Option<String>) -> Option<String> {
    href.filter(|href| !href.is_empty())
}

/// Makes every card a keyboard-reachable link to its `data-href`.
pub fn attach(ctx: &PageContext, config: &NavigationConfig) -> Result<Vec<Listener>, EnhanceError> {
    let mut listeners = Vec::new();
    for card in ctx.query_all(&config.selector)? {
        let _ = card.set_attribute("tabindex", "0");
        let _ = card.set_attribute("role", "link");

        let click = {
            let (ctx, target) = (ctx.clone(), card.clone());
            Listener::new(&card, "click", move |_| follow(&ctx, &target))?
        };
        let keypress = {
            let (ctx, target) = (ctx.clone(), card.clone());
            Listener::new(&card, "keypress", move |event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if activates_link(&key_event.key()) {
                    event.prevent_default();
                    follow(&ctx, &target);
                }
            })?
        };
        listeners.push(click);
        listeners.push(keypress);
    }
    Ok(listeners)
}

fn follow(ctx: &PageContext, card: &Element) {
    if let Some(href) = link_target(card.get_attribute(HREF_ATTRIBUTE)) {
        if let Err(e) = ctx.navigate(&href) {
            warn!("Failed to navigate to {}: {}", href, e);
        }
    }
}
