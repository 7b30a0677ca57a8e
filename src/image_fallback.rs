use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlImageElement};

use crate::config::ImageFallbackConfig;
use crate::context::PageContext;
use crate::error::EnhanceError;
use crate::listener::Listener;

/// A finished image with no natural width may have failed before the error
/// listener existed, or may be an SVG without intrinsic size. Only a decode
/// attempt tells the two apart.
pub fn needs_decode_check(complete: bool, natural_width: u32) -> bool {
    complete && natural_width == 0
}

/// Hides the co-founder section when its portrait fails to load.
pub fn attach(ctx: &PageContext, config: &ImageFallbackConfig) -> Result<Vec<Listener>, EnhanceError> {
    let image = ctx.require(&config.image_selector)?;
    let section = ctx.query(&config.section_selector)?;
    let class = config.hidden_class.clone();

    if let Some(img) = image.dyn_ref::<HtmlImageElement>() {
        // The error may have fired before the module finished loading.
        if needs_decode_check(img.complete(), img.natural_width()) {
            let decode = JsFuture::from(img.decode());
            let (section, class) = (section.clone(), class.clone());
            spawn_local(async move {
                if decode.await.is_err() {
                    hide(section.as_ref(), &class);
                }
            });
        }
    }

    let listener = Listener::new(&image, "error", move |_| hide(section.as_ref(), &class))?;
    Ok(vec![listener])
}

fn hide(section: Option<&Element>, class: &str) {
    if let Some(section) = section {
        debug!("Hiding section with a broken image");
        let _ = section.class_list().add_1(class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_raster_image_skips_decode() {
        assert!(!needs_decode_check(true, 480));
    }

    #[test]
    fn test_pending_image_waits_for_error_event() {
        assert!(!needs_decode_check(false, 0));
    }

    #[test]
    fn test_zero_width_image_is_decoded_before_hiding() {
        // Broken images and size-less SVGs both land here.
        assert!(needs_decode_check(true, 0));
    }
}
