use web_sys::Element;

use crate::config::HeaderConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::listener::Listener;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > 0.0
}

/// Keeps the header's scrolled class in step with the window scroll position.
pub fn attach(ctx: &PageContext, config: &HeaderConfig) -> Result<Vec<Listener>, EnhanceError> {
    let header = ctx.require(&config.selector)?;
    let class = config.scrolled_class.clone();

    // The page may be restored mid-scroll, so sync before the first event.
    sync(&header, &class, ctx.page_y_offset());

    let scroll_ctx = ctx.clone();
    let listener = Listener::new(&ctx.window, "scroll", move |_| {
        sync(&header, &class, scroll_ctx.page_y_offset());
    })?;
    Ok(vec![listener])
}

fn sync(header: &Element, class: &str, scroll_y: f64) {
    let classes = header.class_list();
    let _ = if is_scrolled(scroll_y) {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}
