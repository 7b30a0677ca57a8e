use log::debug;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::config::SmoothScrollConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::listener::Listener;
use crate::viewport::scroll_offset;

/// Selector for an in-page anchor, or `None` for a bare `#`.
pub fn anchor_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href != "#").then_some(href)
}

/// Smooth-scrolls in-page anchor links, leaving room for the fixed header.
pub fn attach(ctx: &PageContext, config: &SmoothScrollConfig) -> Result<Vec<Listener>, EnhanceError> {
    let mut listeners = Vec::new();
    for anchor in ctx.query_all(&config.selector)? {
        let (ctx, link) = (ctx.clone(), anchor.clone());
        let header_offset = config.header_offset;
        let listener = Listener::new(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            let target = match ctx.query(selector) {
                Ok(Some(target)) => target,
                Ok(None) => return,
                Err(e) => {
                    debug!("Not scrolling: {}", e);
                    return;
                }
            };
            event.prevent_default();

            let top = target.get_bounding_client_rect().top();
            let options = ScrollToOptions::new();
            options.set_top(scroll_offset(top, ctx.page_y_offset(), header_offset));
            options.set_behavior(ScrollBehavior::Smooth);
            ctx.window.scroll_to_with_scroll_to_options(&options);
        })?;
        listeners.push(listener);
    }
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_hash_is_ignored() {
        assert_eq!(anchor_selector("#"), None);
    }

    #[test]
    fn test_fragment_is_its_own_selector() {
        assert_eq!(anchor_selector("#investment-tiers"), Some("#investment-tiers"));
    }

    #[test]
    fn test_rewritten_href_is_ignored() {
        assert_eq!(anchor_selector("/about#team"), None);
        assert_eq!(anchor_selector(""), None);
    }
}
