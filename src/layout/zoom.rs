/// Default chart scale when the app starts.
pub const DEFAULT_PIXELS_PER_DAY: f32 = 50.0;
/// Fixed zoom increment.
pub const ZOOM_STEP: f32 = 10.0;
/// Lower bound for the fixed scale.
pub const MIN_PIXELS_PER_DAY: f32 = 20.0;
/// Upper bound for the fixed scale, keeping fixed-mode chart widths sane
/// for long projects.
pub const MAX_PIXELS_PER_DAY: f32 = 200.0;

/// Zoom state machine: either a fixed pixels-per-day scale or
/// fit-to-container.
///
/// Zooming in or out always returns to fixed-scale mode; fit mode is a
/// manual toggle only. The last fixed scale is kept across a fit round
/// trip so zooming out of fit resumes where the user left off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub fit: bool,
    pub pixels_per_day: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            fit: false,
            pixels_per_day: DEFAULT_PIXELS_PER_DAY,
        }
    }
}

impl ZoomState {
    pub fn zoom_in(&mut self) {
        self.fit = false;
        self.pixels_per_day = (self.pixels_per_day + ZOOM_STEP).min(MAX_PIXELS_PER_DAY);
    }

    pub fn zoom_out(&mut self) {
        self.fit = false;
        self.pixels_per_day = (self.pixels_per_day - ZOOM_STEP).max(MIN_PIXELS_PER_DAY);
    }

    pub fn toggle_fit(&mut self) {
        self.fit = !self.fit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fixed_at_default_scale() {
        let zoom = ZoomState::default();
        assert!(!zoom.fit);
        assert_eq!(zoom.pixels_per_day, DEFAULT_PIXELS_PER_DAY);
    }

    #[test]
    fn zoom_steps_are_fixed_and_floored() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in();
        assert_eq!(zoom.pixels_per_day, 60.0);
        for _ in 0..10 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.pixels_per_day, MIN_PIXELS_PER_DAY);
    }

    #[test]
    fn zoom_in_is_capped() {
        let mut zoom = ZoomState::default();
        for _ in 0..30 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.pixels_per_day, MAX_PIXELS_PER_DAY);
    }

    #[test]
    fn zooming_leaves_fit_mode() {
        let mut zoom = ZoomState::default();
        zoom.toggle_fit();
        assert!(zoom.fit);
        zoom.zoom_in();
        assert!(!zoom.fit);

        zoom.toggle_fit();
        zoom.zoom_out();
        assert!(!zoom.fit);
    }

    #[test]
    fn fit_round_trip_keeps_the_fixed_scale() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in();
        zoom.toggle_fit();
        zoom.toggle_fit();
        assert_eq!(zoom.pixels_per_day, 60.0);
    }
}
