use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use crate::config::MenuConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::listener::Listener;

pub fn aria_expanded(open: bool) -> &'static str {
    if open {
        "true"
    } else {
        "false"
    }
}

/// A document click closes the menu unless it landed on the nav or its button.
pub fn closes_menu(inside_nav: bool, inside_button: bool) -> bool {
    !inside_nav && !inside_button
}

/// Mobile menu toggle plus click-outside-to-close.
pub fn attach(ctx: &PageContext, config: &MenuConfig) -> Result<Vec<Listener>, EnhanceError> {
    let button = ctx.require(&config.button_selector)?;
    let nav = ctx.require(&config.nav_selector)?;

    let toggle = {
        let (menu_button, nav) = (button.clone(), nav.clone());
        let class = config.active_class.clone();
        Listener::new(&button, "click", move |_| {
            let open = nav.class_list().toggle(&class).unwrap_or(false);
            let _ = menu_button.set_attribute("aria-expanded", aria_expanded(open));
        })?
    };

    let close = {
        let class = config.active_class.clone();
        Listener::new(&ctx.document, "click", move |event| {
            let target = event.target();
            let target = target.as_ref().and_then(|t| t.dyn_ref::<Node>());
            if closes_menu(nav.contains(target), button.contains(target)) {
                close_menu(&nav, &button, &class);
            }
        })?
    };

    Ok(vec![toggle, close])
}

fn close_menu(nav: &Element, button: &Element, class: &str) {
    let _ = nav.class_list().remove_1(class);
    let _ = button.set_attribute("aria-expanded", aria_expanded(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aria_expanded_values() {
        assert_eq!(aria_expanded(true), "true");
        assert_eq!(aria_expanded(false), "false");
    }

    #[test]
    fn test_click_outside_closes() {
        assert!(closes_menu(false, false));
    }

    #[test]
    fn test_click_on_nav_or_button_keeps_menu() {
        assert!(!closes_menu(true, false));
        assert!(!closes_menu(false, true));
    }
}
