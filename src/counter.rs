use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use web_sys::Element;

use crate::reveal::dom::DomHandle;
use crate::reveal::Revealable;

/// Attribute holding the number a counter animates up to.
pub const TARGET_ATTRIBUTE: &str = "data-count-to";
const STATE_ATTRIBUTE: &str = "data-counter-state";

/// Inserts a comma between every group of three digits, counted from the right.
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// Reads a counter target, tolerating commas already present in the markup.
pub fn parse_target(raw: &str) -> Option<u64> {
    raw.trim().replace(',', "").parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Running(u64),
    Done(u64),
}

/// Linear count from zero to `target`, one step per frame.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(frame_ms.max(1));
        let increment = target as f64 / frames;
        Self {
            target,
            // Zero duration jumps straight to the target.
            increment: if increment.is_finite() { increment } else { target as f64 },
            current: 0.0,
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            Tick::Done(self.target)
        } else {
            Tick::Running(self.current.floor() as u64)
        }
    }
}

/// Shared stop switch for every running counter on the page. Pending frames
/// still fire once after `stop`, but do nothing.
#[derive(Clone, Default)]
pub struct CounterClock {
    stopped: Rc<Cell<bool>>,
}

impl CounterClock {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Advances `animation` one frame, or `None` once the clock is stopped.
    pub fn tick(&self, animation: &mut CounterAnimation) -> Option<Tick> {
        (!self.is_stopped()).then(|| animation.tick())
    }
}

/// A number on the page that counts up the first time it scrolls into view.
#[derive(Clone)]
pub struct CounterTarget {
    element: Element,
    duration_ms: u32,
    frame_ms: u32,
    clock: CounterClock,
}

impl CounterTarget {
    pub fn new(element: Element, duration_ms: u32, frame_ms: u32, clock: CounterClock) -> Self {
        Self {
            element,
            duration_ms,
            frame_ms,
            clock,
        }
    }
}

impl PartialEq for CounterTarget {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl DomHandle for CounterTarget {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl Revealable for CounterTarget {
    fn is_revealed(&self) -> bool {
        self.element.has_attribute(STATE_ATTRIBUTE)
    }

    fn reveal(&self) {
        let target = self
            .element
            .get_attribute(TARGET_ATTRIBUTE)
            .and_then(|raw| parse_target(&raw));
        let Some(target) = target else {
            warn!("Counter without a numeric {}", TARGET_ATTRIBUTE);
            let _ = self.element.set_attribute(STATE_ATTRIBUTE, "invalid");
            return;
        };
        debug!("Counting up to {}", target);
        let _ = self.element.set_attribute(STATE_ATTRIBUTE, "running");
        schedule_frame(
            self.element.clone(),
            CounterAnimation::new(target, self.duration_ms, self.frame_ms),
            self.frame_ms,
            self.clock.clone(),
        );
    }
}

fn schedule_frame(element: Element, mut animation: CounterAnimation, frame_ms: u32, clock: CounterClock) {
    let timeout = Timeout::new(frame_ms, move || match clock.tick(&mut animation) {
        Some(Tick::Running(value)) => {
            element.set_text_content(Some(&format_number(value)));
            schedule_frame(element, animation, frame_ms, clock);
        }
        Some(Tick::Done(value)) => {
            element.set_text_content(Some(&format_number(value)));
            let _ = element.set_attribute(STATE_ATTRIBUTE, "done");
        }
        None => debug!("Counter stopped at teardown"),
    });
    timeout.forget();
}
