use std::rc::Rc;

use log::{debug, info, warn};

use crate::config::{CounterConfig, PageConfig, RevealConfig, RevealOptions};
use crate::context::PageContext;
use crate::counter::{CounterClock, CounterTarget};
use crate::error::EnhanceError;
use crate::listener::Listener;
use crate::reveal::dom::{shared_controller, FadeTarget, SharedController};
use crate::{header, image_fallback, menu, navigation, smooth_scroll};

/// Every enhancement wired onto the current document. Dropping or tearing
/// down the page removes all listeners and observers.
#[derive(Default)]
pub struct Page {
    listeners: Vec<Listener>,
    reveals: Option<SharedController<FadeTarget>>,
    counters: Option<SharedController<CounterTarget>>,
    clock: CounterClock,
}

impl Page {
    /// Wires each enhancement independently; one failing leaves the rest working.
    pub fn boot(ctx: &PageContext, config: &PageConfig) -> Self {
        let mut page = Page::default();

        page.listeners.extend(report("navigation", navigation::attach(ctx, &config.navigation)));
        page.listeners.extend(report("header", header::attach(ctx, &config.header)));
        page.listeners.extend(report("mobile menu", menu::attach(ctx, &config.menu)));
        page.listeners.extend(report("smooth scroll", smooth_scroll::attach(ctx, &config.smooth_scroll)));
        page.listeners.extend(report("image fallback", image_fallback::attach(ctx, &config.image_fallback)));
        page.reveals = report("reveal", reveal_elements(ctx, &config.reveal).map(Some));
        page.counters = report(
            "counters",
            reveal_counters(ctx, &config.counter, &config.reveal.options(), &page.clock).map(Some),
        );

        info!("Page enhanced with {} listeners", page.listeners.len());
        page
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        if let Some(reveals) = self.reveals.take() {
            reveals.borrow_mut().teardown();
        }
        if let Some(counters) = self.counters.take() {
            counters.borrow_mut().teardown();
        }
        self.clock.stop();
        info!("Page enhancements removed");
    }
}

fn reveal_elements(ctx: &PageContext, config: &RevealConfig) -> Result<SharedController<FadeTarget>, EnhanceError> {
    let class: Rc<str> = Rc::from(config.class.as_str());
    let targets = ctx
        .query_all(&config.selector)?
        .into_iter()
        .map(|element| FadeTarget::new(element, class.clone()));

    let controller = shared_controller(ctx);
    let registered = controller.borrow_mut().register(targets, &config.options());
    let pending = controller.borrow().pending();
    debug!(
        "Watching {} elements for reveal, {} revealed on arrival",
        pending,
        registered.saturating_sub(pending)
    );
    Ok(controller)
}

fn reveal_counters(
    ctx: &PageContext,
    config: &CounterConfig,
    options: &RevealOptions,
    clock: &CounterClock,
) -> Result<SharedController<CounterTarget>, EnhanceError> {
    let targets = ctx
        .query_all(&config.selector)?
        .into_iter()
        .map(|element| CounterTarget::new(element, config.duration_ms, config.frame_ms, clock.clone()));

    let controller = shared_controller(ctx);
    let registered = controller.borrow_mut().register(targets, options);
    debug!("Watching {} counters", registered);
    Ok(controller)
}

/// Unwraps a feature's result, logging why it was skipped. Markup without a
/// given section is normal, so a missing element only logs at debug.
fn report<T: Default>(feature: &str, result: Result<T, EnhanceError>) -> T {
    match result {
        Ok(value) => value,
        Err(EnhanceError::MissingElement { selector }) => {
            debug!("Skipping {}: nothing matches {:?}", feature, selector);
            T::default()
        }
        Err(e) => {
            warn!("Skipping {}: {}", feature, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_passes_values_through() {
        let value: Vec<u32> = report("test", Ok(vec![1, 2]));
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_report_defaults_on_missing_element() {
        let value: Vec<u32> = report(
            "test",
            Err(EnhanceError::MissingElement {
                selector: ".header".to_string(),
            }),
        );
        assert!(value.is_empty());
    }

    #[test]
    fn test_report_defaults_on_failure() {
        let value: Option<u32> = report("test", Err(EnhanceError::MissingWindow));
        assert_eq!(value, None);
    }

    #[test]
    fn test_empty_page_tears_down() {
        let mut page = Page::default();
        page.teardown();
        assert!(page.listeners.is_empty());
        assert!(page.reveals.is_none());
        assert!(page.counters.is_none());
    }

    #[test]
    fn test_teardown_stops_running_counters() {
        let mut page = Page::default();
        let clock = page.clock.clone();
        assert!(!clock.is_stopped());

        page.teardown();

        assert!(clock.is_stopped());
    }
}
