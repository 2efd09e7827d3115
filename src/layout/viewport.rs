//! Fit-to-window scale composed with a user zoom multiplier.

/// Clamp range of the fit-to-window scale.
pub const FIT_MIN: f64 = 0.35;
pub const FIT_MAX: f64 = 1.0;
/// Clamp range of the accumulated user zoom.
pub const ZOOM_MIN: f64 = 0.35;
pub const ZOOM_MAX: f64 = 2.5;
/// Clamp range of the effective render scale.
pub const SCALE_MIN: f64 = 0.2;
pub const SCALE_MAX: f64 = 3.0;
/// Multiplicative step per wheel notch.
pub const ZOOM_STEP: f64 = 0.08;

/// Viewport state: the only component that looks at window dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Scale at which one page fits the available height.
    pub base_fit_scale: f64,
    /// Zoom accumulated from modifier+wheel input.
    pub user_zoom: f64,
    /// Fixed height of toolbar/navigation chrome in pixels.
    pub chrome_height: f64,
    /// Unscaled page height in pixels.
    pub page_height: f64,
    /// Last window height seen, reused when refitting on page switch.
    pub window_height: f64,
}

impl Viewport {
    pub fn new(page_height: f64, chrome_height: f64) -> Self {
        Self {
            base_fit_scale: FIT_MAX,
            user_zoom: 1.0,
            chrome_height,
            page_height,
            window_height: 0.0,
        }
    }

    /// Record a new window height and recompute the fit scale.
    pub fn resize(&mut self, window_height: f64) {
        self.window_height = window_height;
        self.refit();
    }

    /// Recompute the fit scale from the last known window height.
    pub fn refit(&mut self) {
        let available = self.window_height - self.chrome_height;
        let fit = if self.page_height > 0.0 && available.is_finite() {
            available / self.page_height
        } else {
            FIT_MAX
        };
        self.base_fit_scale = fit.clamp(FIT_MIN, FIT_MAX);
    }

    /// Apply a wheel delta. Returns `false` (not consumed) unless the zoom
    /// modifier is held and the delta is non-zero.
    pub fn wheel(&mut self, delta_y: f64, modifier: bool) -> bool {
        if !modifier || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 {
            1.0 + ZOOM_STEP
        } else {
            1.0 - ZOOM_STEP
        };
        self.user_zoom = (self.user_zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        true
    }

    pub fn reset_zoom(&mut self) {
        self.user_zoom = 1.0;
    }

    /// Effective render scale consumed by the paint step.
    pub fn scale(&self) -> f64 {
        (self.base_fit_scale * self.user_zoom).clamp(SCALE_MIN, SCALE_MAX)
    }
}
