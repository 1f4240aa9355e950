use crate::ui::event::{Effect, HeaderState};

pub const DEFAULT_SCROLL_THRESHOLD: f64 = 1.0;
pub const DEFAULT_HIDE_OFFSET: f64 = 0.0;

/// Hides the site header while scrolling down and reveals it on the way up.
///
/// Scroll positions are coalesced to one evaluation per animation frame, and
/// `SetHeader` is only emitted when the visible state actually changes.
#[derive(Debug, Clone)]
pub struct HeaderVisibility {
    state: HeaderState,
    last_y: f64,
    last_touch_y: f64,
    pending_y: Option<f64>,
    threshold: f64,
    hide_offset: f64,
}

impl HeaderVisibility {
    pub fn new(initial_y: f64, threshold: f64, hide_offset: f64) -> Self {
        Self {
            state: HeaderState::Shown,
            last_y: initial_y,
            last_touch_y: initial_y,
            pending_y: None,
            threshold,
            hide_offset,
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn frame_pending(&self) -> bool {
        self.pending_y.is_some()
    }

    pub fn show(&mut self) -> Option<Effect> {
        self.set(HeaderState::Shown)
    }

    pub fn hide(&mut self) -> Option<Effect> {
        self.set(HeaderState::Hidden)
    }

    fn set(&mut self, state: HeaderState) -> Option<Effect> {
        if self.state == state {
            return None;
        }
        self.state = state;
        Some(Effect::SetHeader { state })
    }

    pub fn on_scroll(&mut self, y: f64, menu_open: bool) -> Vec<Effect> {
        if menu_open {
            self.last_y = y;
            return self.show().into_iter().collect();
        }

        if self.pending_y.is_some() {
            return Vec::new();
        }
        self.pending_y = Some(y);
        vec![Effect::RequestFrame]
    }

    /// Evaluate the position recorded since the last frame. A frame that
    /// lands after the menu opened only records the position.
    pub fn on_frame(&mut self, menu_open: bool) -> Vec<Effect> {
        let Some(y) = self.pending_y.take() else {
            return Vec::new();
        };

        if menu_open {
            self.last_y = y;
            return self.show().into_iter().collect();
        }

        if (y - self.last_y).abs() < self.threshold {
            return Vec::new();
        }

        let effect = if y > self.last_y && y > self.hide_offset {
            self.hide()
        } else {
            self.show()
        };
        self.last_y = y.max(0.0);
        effect.into_iter().collect()
    }

    pub fn on_wheel(&mut self, delta_y: f64, menu_open: bool) -> Vec<Effect> {
        if menu_open {
            return Vec::new();
        }
        let effect = if delta_y < 0.0 {
            self.show()
        } else if delta_y > 0.0 {
            self.hide()
        } else {
            None
        };
        effect.into_iter().collect()
    }

    pub fn on_touch_move(&mut self, y: f64, menu_open: bool) -> Vec<Effect> {
        if menu_open {
            return Vec::new();
        }
        let effect = if y < self.last_touch_y {
            self.show()
        } else if y > self.last_touch_y {
            self.hide()
        } else {
            None
        };
        self.last_touch_y = y;
        effect.into_iter().collect()
    }
}

impl Default for HeaderVisibility {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_SCROLL_THRESHOLD, DEFAULT_HIDE_OFFSET)
    }
}
