use log::{warn, Level};
use serde::Deserialize;

use crate::viewport::RootMargin;

/// Attribute on `<body>` holding an optional JSON [`PageConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub header: HeaderConfig,
    pub menu: MenuConfig,
    pub navigation: NavigationConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub image_fallback: ImageFallbackConfig,
    pub counter: CounterConfig,
}

impl PageConfig {
    /// Parses the body attribute. Anything unreadable falls back to defaults,
    /// the page should still be enhanced with a typo in its config.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<PageConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(e) => {
                warn!("Ignoring invalid {}: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.reveal.threshold = clamp_threshold(self.reveal.threshold);
        if RootMargin::parse(&self.reveal.root_margin).is_none() {
            warn!(
                "Invalid root margin {:?}, using {:?}",
                self.reveal.root_margin,
                RevealConfig::default().root_margin
            );
            self.reveal.root_margin = RevealConfig::default().root_margin;
        }
        if self.counter.frame_ms == 0 {
            self.counter.frame_ms = CounterConfig::default().frame_ms;
        }
        self
    }
}

fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        RevealConfig::default().threshold
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Observation options handed to the reveal controller on registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            root_margin: "0px".to_string(),
            threshold: 0.1,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub root_margin: String,
    pub threshold: f64,
    pub class: String,
}

impl RevealConfig {
    pub fn options(&self) -> RevealOptions {
        RevealOptions {
            root_margin: self.root_margin.clone(),
            threshold: self.threshold,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        let options = RevealOptions::default();
        Self {
            selector: ".nav-card, .info-card, .tier-card, .pillar-card, .timeline-item, .stat-card"
                .to_string(),
            root_margin: options.root_margin,
            threshold: options.threshold,
            class: "animate-fade-in".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    pub scrolled_class: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".header".to_string(),
            scrolled_class: "scrolled".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MenuConfig {
    pub button_selector: String,
    pub nav_selector: String,
    pub active_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            button_selector: ".mobile-menu-btn".to_string(),
            nav_selector: ".nav".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub selector: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            selector: ".nav-card[data-href]".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub selector: String,
    /// Height of the fixed header, subtracted from the scroll target.
    pub header_offset: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            selector: "a[href^=\"#\"]".to_string(),
            header_offset: 100.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageFallbackConfig {
    pub section_selector: String,
    pub image_selector: String,
    pub hidden_class: String,
}

impl Default for ImageFallbackConfig {
    fn default() -> Self {
        Self {
            section_selector: ".cofounder-section".to_string(),
            image_selector: ".cofounder-section .founder-image".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    pub duration_ms: u32,
    pub frame_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: "[data-count-to]".to_string(),
            duration_ms: 2000,
            frame_ms: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_attribute_uses_defaults() {
        assert_eq!(PageConfig::from_attribute(None), PageConfig::default());
        assert_eq!(PageConfig::from_attribute(Some("   ")), PageConfig::default());
    }

    #[test]
    fn test_defaults_match_page_markup() {
        let config = PageConfig::default();
        assert_eq!(config.reveal.root_margin, "0px");
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.class, "animate-fade-in");
        assert_eq!(config.smooth_scroll.header_offset, 100.0);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.frame_ms, 16);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = PageConfig::from_attribute(Some(
            r#"{"reveal": {"threshold": 0.5}, "header": {"scrolled_class": "is-scrolled"}}"#,
        ));
        assert_eq!(config.reveal.threshold, 0.5);
        assert_eq!(config.reveal.class, "animate-fade-in");
        assert_eq!(config.header.scrolled_class, "is-scrolled");
        assert_eq!(config.header.selector, ".header");
        assert_eq!(config.menu, MenuConfig::default());
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        assert_eq!(
            PageConfig::from_attribute(Some("{not json")),
            PageConfig::default()
        );
    }

    #[test]
    fn test_threshold_is_clamped() {
        let high = PageConfig::from_attribute(Some(r#"{"reveal": {"threshold": 3.0}}"#));
        assert_eq!(high.reveal.threshold, 1.0);
        let low = PageConfig::from_attribute(Some(r#"{"reveal": {"threshold": -0.5}}"#));
        assert_eq!(low.reveal.threshold, 0.0);
    }

    #[test]
    fn test_bad_root_margin_is_replaced() {
        let config = PageConfig::from_attribute(Some(r#"{"reveal": {"root_margin": "ten px"}}"#));
        assert_eq!(config.reveal.root_margin, "0px");

        let config = PageConfig::from_attribute(Some(r#"{"reveal": {"root_margin": "0px 0px -50px"}}"#));
        assert_eq!(config.reveal.root_margin, "0px 0px -50px");
    }

    #[test]
    fn test_zero_frame_interval_is_replaced() {
        let config = PageConfig::from_attribute(Some(r#"{"counter": {"frame_ms": 0}}"#));
        assert_eq!(config.counter.frame_ms, 16);
    }

    #[test]
    fn test_reveal_options_follow_config() {
        let config = PageConfig::from_attribute(Some(
            r#"{"reveal": {"root_margin": "20px", "threshold": 0.25}}"#,
        ));
        assert_eq!(
            config.reveal.options(),
            RevealOptions {
                root_margin: "20px".to_string(),
                threshold: 0.25,
            }
        );
    }
}
