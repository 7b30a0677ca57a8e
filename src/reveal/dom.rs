use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{IntersectionHost, RevealController, Revealable};
use crate::config::RevealOptions;
use crate::context::PageContext;
use crate::error::{describe, EnhanceError};
use crate::viewport::{self, Rect, RootMargin};

/// A revealable wrapper around a DOM element.
pub trait DomHandle {
    fn element(&self) -> &Element;
}

/// Plain fade-in target: hidden with inline `opacity: 0`, revealed by adding a class.
#[derive(Clone, PartialEq)]
pub struct FadeTarget {
    element: Element,
    class: Rc<str>,
}

impl FadeTarget {
    pub fn new(element: Element, class: Rc<str>) -> Self {
        Self { element, class }
    }
}

impl DomHandle for FadeTarget {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl Revealable for FadeTarget {
    fn is_revealed(&self) -> bool {
        self.element.class_list().contains(&self.class)
    }

    fn conceal(&self) {
        if let Some(html) = self.element.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("opacity", "0");
        }
    }

    fn reveal(&self) {
        let _ = self.element.class_list().add_1(&self.class);
    }
}

type VisibilitySink = Rc<dyn Fn(Element, bool)>;

struct ObserverSlot {
    options: RevealOptions,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// [`IntersectionHost`] backed by the browser's `IntersectionObserver`,
/// one observer per distinct set of options.
pub struct DomIntersectionHost {
    ctx: PageContext,
    sink: VisibilitySink,
    observers: Vec<ObserverSlot>,
}

impl DomIntersectionHost {
    fn new(ctx: PageContext, sink: VisibilitySink) -> Self {
        Self {
            ctx,
            sink,
            observers: Vec::new(),
        }
    }

    fn observer_for(&mut self, options: &RevealOptions) -> Result<&IntersectionObserver, EnhanceError> {
        if let Some(index) = self.observers.iter().position(|slot| slot.options == *options) {
            return Ok(&self.observers[index].observer);
        }

        let sink = self.sink.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    sink(entry.target(), entry.is_intersecting());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| EnhanceError::ObserverUnavailable(describe(&e)))?;

        self.observers.push(ObserverSlot {
            options: options.clone(),
            observer,
            _callback: callback,
        });
        let slot = self.observers.len() - 1;
        Ok(&self.observers[slot].observer)
    }
}

impl<E: DomHandle> IntersectionHost<E> for DomIntersectionHost {
    fn observe(&mut self, element: &E, options: &RevealOptions) -> Result<(), EnhanceError> {
        self.observer_for(options)?.observe(element.element());
        Ok(())
    }

    fn unobserve(&mut self, element: &E) {
        for slot in &self.observers {
            slot.observer.unobserve(element.element());
        }
    }

    fn disconnect(&mut self) {
        for slot in self.observers.drain(..) {
            slot.observer.disconnect();
        }
    }

    fn is_visible_now(&self, element: &E, options: &RevealOptions) -> bool {
        let rect = element.element().get_bounding_client_rect();
        let target = Rect::new(rect.top(), rect.left(), rect.bottom(), rect.right());
        let margin = RootMargin::parse(&options.root_margin).unwrap_or_default();
        viewport::is_visible(&target, &self.ctx.viewport(), &margin, options.threshold)
    }
}

impl Drop for DomIntersectionHost {
    fn drop(&mut self) {
        for slot in &self.observers {
            slot.observer.disconnect();
        }
    }
}

pub type SharedController<E> = Rc<RefCell<RevealController<E, DomIntersectionHost>>>;

/// Builds a controller whose observer callbacks route back into it. The
/// callbacks only hold a weak reference, dropping the returned handle frees everything.
pub fn shared_controller<E>(ctx: &PageContext) -> SharedController<E>
where
    E: Revealable + DomHandle + 'static,
{
    Rc::new_cyclic(|weak: &Weak<RefCell<RevealController<E, DomIntersectionHost>>>| {
        let weak = weak.clone();
        let sink: VisibilitySink = Rc::new(move |element: Element, visible: bool| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = shared.try_borrow_mut() else {
                warn!("Reveal controller busy, dropping visibility change");
                return;
            };
            let target = controller
                .find_watched(|target| target.element() == &element)
                .cloned();
            if let Some(target) = target {
                controller.on_visibility_change(&target, visible);
            }
        });
        RefCell::new(RevealController::new(DomIntersectionHost::new(ctx.clone(), sink)))
    })
}
