//! One-shot reveal of elements as they scroll into view.
//!
//! The controller keeps the set of elements it is still waiting on. The
//! viewport facility is injected through [`IntersectionHost`], so the page
//! wires in the browser's `IntersectionObserver` while tests drive it by hand.

pub mod dom;

use log::debug;

use crate::config::RevealOptions;
use crate::error::EnhanceError;

/// Something that can be faded in. The revealed flag lives on the element
/// itself, so it survives the element leaving the controller.
pub trait Revealable: Clone + PartialEq {
    fn is_revealed(&self) -> bool;

    /// Presentation while waiting to be revealed.
    fn conceal(&self) {}

    fn reveal(&self);
}

/// Viewport-intersection facility of the host environment.
///
/// Implementations report crossings back through
/// [`RevealController::on_visibility_change`], never from inside `observe`.
pub trait IntersectionHost<E> {
    fn observe(&mut self, element: &E, options: &RevealOptions) -> Result<(), EnhanceError>;

    fn unobserve(&mut self, element: &E);

    /// Stops every observation at once.
    fn disconnect(&mut self);

    /// Synchronous probe used at registration time.
    fn is_visible_now(&self, _element: &E, _options: &RevealOptions) -> bool {
        false
    }
}

pub struct RevealController<E, H> {
    host: H,
    watched: Vec<E>,
}

impl<E: Revealable, H: IntersectionHost<E>> RevealController<E, H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            watched: Vec::new(),
        }
    }

    /// Starts watching every element that is neither revealed nor already
    /// watched. Returns how many elements were newly registered.
    pub fn register<I>(&mut self, elements: I, options: &RevealOptions) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        let mut registered = 0;
        for element in elements {
            if element.is_revealed() || self.watched.contains(&element) {
                continue;
            }
            if let Err(e) = self.host.observe(&element, options) {
                // Without the facility the element keeps its default look.
                debug!("Not watching element: {}", e);
                continue;
            }
            element.conceal();
            registered += 1;

            if self.host.is_visible_now(&element, options) {
                self.host.unobserve(&element);
                element.reveal();
            } else {
                self.watched.push(element);
            }
        }
        registered
    }

    /// Handles a visibility crossing reported by the host. Returns whether
    /// the element was revealed by this call.
    pub fn on_visibility_change(&mut self, element: &E, is_visible: bool) -> bool {
        if !is_visible {
            return false;
        }
        let Some(index) = self.watched.iter().position(|watched| watched == element) else {
            return false;
        };
        let element = self.watched.swap_remove(index);
        self.host.unobserve(&element);
        if element.is_revealed() {
            return false;
        }
        element.reveal();
        debug!("Revealed element, {} still pending", self.watched.len());
        true
    }

    /// Drops every pending element and disconnects the host.
    pub fn teardown(&mut self) {
        self.host.disconnect();
        self.watched.clear();
    }

    pub fn pending(&self) -> usize {
        self.watched.len()
    }

    #[cfg(test)]
    pub fn is_watching(&self, element: &E) -> bool {
        self.watched.contains(element)
    }

    pub fn find_watched(&self, matches: impl Fn(&E) -> bool) -> Option<&E> {
        self.watched.iter().find(|element| matches(element))
    }
}
