/// Axis-aligned box in viewport coordinates, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    /// The visible window area, origin at the top-left corner.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, height, width)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Overlap of two boxes. Boxes that only touch still intersect, with zero area.
    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let overlap = Rect::new(
            self.top.max(other.top),
            self.left.max(other.left),
            self.bottom.min(other.bottom),
            self.right.min(other.right),
        );
        (overlap.width() >= 0.0 && overlap.height() >= 0.0).then_some(overlap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    fn parse(token: &str) -> Option<Self> {
        if let Some(value) = token.strip_suffix("px") {
            return value.parse::<f64>().ok().filter(|v| v.is_finite()).map(Length::Px);
        }
        if let Some(value) = token.strip_suffix('%') {
            return value.parse::<f64>().ok().filter(|v| v.is_finite()).map(Length::Percent);
        }
        // A bare zero is the only unitless length CSS accepts.
        match token.parse::<f64>() {
            Ok(v) if v == 0.0 => Some(Length::Px(0.0)),
            _ => None,
        }
    }

    fn resolve(&self, basis: f64) -> f64 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => basis * pct / 100.0,
        }
    }
}

/// `rootMargin` in CSS margin shorthand: one to four lengths, top/right/bottom/left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub fn parse(raw: &str) -> Option<Self> {
        let lengths = raw
            .split_whitespace()
            .map(Length::parse)
            .collect::<Option<Vec<_>>>()?;
        let (top, right, bottom, left) = match lengths.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return None,
        };
        Some(Self { top, right, bottom, left })
    }

    /// Grows (or with negative lengths shrinks) the root box. Percentages
    /// resolve against the root's own width for left/right and height for top/bottom.
    pub fn expand(&self, root: &Rect) -> Rect {
        Rect::new(
            root.top - self.top.resolve(root.height()),
            root.left - self.left.resolve(root.width()),
            root.bottom + self.bottom.resolve(root.height()),
            root.right + self.right.resolve(root.width()),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        let zero = Length::Px(0.0);
        Self { top: zero, right: zero, bottom: zero, left: zero }
    }
}

/// Share of `target` that lies inside `root`, or `None` when they don't touch.
/// Zero-area targets count as fully visible once they touch the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> Option<f64> {
    let overlap = target.intersection(root)?;
    let area = target.area();
    if area == 0.0 {
        return Some(1.0);
    }
    Some((overlap.area() / area).min(1.0))
}

/// Whether `target` counts as visible inside `root` expanded by `margin`.
///
/// A target without area has no layout to judge from (`display: none` reports
/// an all-zero box), so it is never visible here; the observer decides later.
pub fn is_visible(target: &Rect, root: &Rect, margin: &RootMargin, threshold: f64) -> bool {
    if target.area() == 0.0 {
        return false;
    }
    match intersection_ratio(target, &margin.expand(root)) {
        Some(ratio) => ratio > 0.0 && ratio >= threshold,
        None => false,
    }
}

/// Absolute document offset for a smooth scroll that leaves room for the fixed header.
pub fn scroll_offset(element_top: f64, page_y_offset: f64, header_offset: f64) -> f64 {
    element_top + page_y_offset - header_offset
}
