/// Vertical gap between a tooltip and its target, in CSS pixels.
pub const TOOLTIP_GAP: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// `(left, top)` for a tooltip of the given size: above the target,
/// horizontally centered on it.
pub fn tooltip_position(target: Rect, tooltip_width: f64, tooltip_height: f64) -> (f64, f64) {
    let left = target.left + (target.width - tooltip_width) / 2.0;
    let top = target.top - tooltip_height - TOOLTIP_GAP;
    (left, top)
}
