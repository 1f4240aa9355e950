use crate::ui::event::{Effect, SlideRequest, TimerId};
use tokio::sync::mpsc;

pub const DEFAULT_INTERVAL_MS: u64 = 5500;

/// Slide carousel with auto-advance.
///
/// The repeating timer is identified by a generation number. Starting a new
/// timer always cancels the previous one first, so at most one is live and
/// ticks carrying an older [`TimerId`] are dropped.
#[derive(Debug, Clone)]
pub struct Carousel {
    count: usize,
    current: usize,
    interval_ms: u64,
    anchor: String,
    has_prev: bool,
    has_next: bool,
    generation: u64,
    running: Option<TimerId>,
    hovered: bool,
}

impl Carousel {
    /// `None` when there are no slides to cycle through. A zero interval
    /// falls back to [`DEFAULT_INTERVAL_MS`].
    pub fn new(count: usize, interval_ms: u64, anchor: impl Into<String>) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let interval_ms = if interval_ms == 0 {
            tracing::warn!(
                "Carousel interval of 0ms ignored, using {}ms",
                DEFAULT_INTERVAL_MS
            );
            DEFAULT_INTERVAL_MS
        } else {
            interval_ms
        };
        Some(Self {
            count,
            current: 0,
            interval_ms,
            anchor: anchor.into(),
            has_prev: true,
            has_next: true,
            generation: 0,
            running: None,
            hovered: false,
        })
    }

    pub fn with_buttons(mut self, has_prev: bool, has_next: bool) -> Self {
        self.has_prev = has_prev;
        self.has_next = has_next;
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn running_timer(&self) -> Option<TimerId> {
        self.running
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn show(&mut self, index: i64) -> Effect {
        self.current = index.rem_euclid(self.count as i64) as usize;
        Effect::ShowSlide {
            index: self.current,
        }
    }

    pub fn step(&mut self, delta: i64) -> Effect {
        self.show(self.current as i64 + delta)
    }

    /// Show the first slide and begin auto-advance.
    pub fn init(&mut self) -> Vec<Effect> {
        let mut effects = vec![self.show(0)];
        effects.extend(self.start_timer());
        effects
    }

    pub fn start_timer(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.stop_timer().into_iter().collect();
        self.generation += 1;
        let timer = TimerId(self.generation);
        self.running = Some(timer);
        effects.push(Effect::StartTimer {
            timer,
            period_ms: self.interval_ms,
        });
        effects
    }

    pub fn stop_timer(&mut self) -> Option<Effect> {
        self.running
            .take()
            .map(|timer| Effect::CancelTimer { timer })
    }

    /// Restart the countdown after manual navigation. Stays paused while hovered.
    pub fn reset_timer(&mut self) -> Vec<Effect> {
        if self.hovered {
            return Vec::new();
        }
        self.start_timer()
    }

    /// Move by `delta` slides as a manual action.
    pub fn navigate(&mut self, delta: i64) -> Vec<Effect> {
        let mut effects = vec![self.step(delta)];
        effects.extend(self.reset_timer());
        effects
    }

    pub fn go_to(&mut self, index: i64) -> Vec<Effect> {
        let mut effects = vec![self.show(index)];
        effects.extend(self.reset_timer());
        effects
    }

    pub fn on_tick(&mut self, timer: TimerId) -> Vec<Effect> {
        if self.running != Some(timer) {
            tracing::trace!("Dropping stale carousel tick {:?}", timer);
            return Vec::new();
        }
        vec![self.step(1)]
    }

    pub fn pointer_enter(&mut self) -> Vec<Effect> {
        self.hovered = true;
        self.stop_timer().into_iter().collect()
    }

    pub fn pointer_leave(&mut self) -> Vec<Effect> {
        if !self.hovered {
            return Vec::new();
        }
        self.hovered = false;
        self.start_timer()
    }

    /// Show a slide and bring the carousel into view.
    pub fn jump(&mut self, index: i64) -> Vec<Effect> {
        vec![
            self.show(index),
            Effect::ScrollIntoView {
                element: self.anchor.clone(),
                delay_ms: 0,
            },
        ]
    }
}

/// Handle other pages (or scripts) use to jump to a carousel slide.
///
/// A page without a carousel hands out a disconnected link whose
/// [`SlideLink::jump`] does nothing.
#[derive(Debug, Clone)]
pub struct SlideLink {
    tx: Option<mpsc::UnboundedSender<SlideRequest>>,
}

impl SlideLink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SlideRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    pub fn is_connected(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queue a jump. Returns `false` if nothing is listening.
    pub fn jump(&self, request: impl Into<SlideRequest>) -> bool {
        match &self.tx {
            Some(tx) => tx.send(request.into()).is_ok(),
            None => false,
        }
    }
}
