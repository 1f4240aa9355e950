//! Async runtime for an [`InteractionController`].
//!
//! The driver owns the browser-side scheduling the controller asks for:
//! repeating timers, animation frames and slide-link requests. Everything
//! else is forwarded to a [`Surface`].

use crate::ui::controller::InteractionController;
use crate::ui::event::{Effect, SlideRequest, TimerId, UiEvent};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delay standing in for the next animation frame (about 60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Applies effects to whatever renders the page.
pub trait Surface: Send {
    fn apply(&mut self, effect: Effect);
}

/// Run until `events` closes. Returns the controller and surface so callers
/// can inspect final state.
pub async fn run<S: Surface>(
    mut controller: InteractionController,
    mut surface: S,
    mut events: mpsc::UnboundedReceiver<UiEvent>,
) -> (InteractionController, S) {
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel::<UiEvent>();
    let mut links = controller.take_link_inbox();
    let mut timers: HashMap<TimerId, JoinHandle<()>> = HashMap::new();

    loop {
        let event = tokio::select! {
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
            Some(event) = internal_rx.recv() => event,
            Some(request) = next_link_request(&mut links) => UiEvent::JumpToSlide { request },
        };

        for effect in controller.dispatch(event) {
            match effect {
                Effect::StartTimer { timer, period_ms } => {
                    let handle = spawn_timer(timer, period_ms, internal_tx.clone());
                    if let Some(previous) = timers.insert(timer, handle) {
                        previous.abort();
                    }
                }
                Effect::CancelTimer { timer } => {
                    if let Some(handle) = timers.remove(&timer) {
                        handle.abort();
                    }
                }
                Effect::RequestFrame => {
                    let tx = internal_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(FRAME_INTERVAL).await;
                        let _ = tx.send(UiEvent::AnimationFrame);
                    });
                }
                other => surface.apply(other),
            }
        }
    }

    for (_, handle) in timers.drain() {
        handle.abort();
    }
    tracing::debug!("Interaction driver stopped");
    (controller, surface)
}

fn spawn_timer(
    timer: TimerId,
    period_ms: u64,
    tx: mpsc::UnboundedSender<UiEvent>,
) -> JoinHandle<()> {
    let period = Duration::from_millis(period_ms);
    tokio::spawn(async move {
        // 第一次觸發在一個週期之後，與 setInterval 相同
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if tx.send(UiEvent::TimerTick { timer }).is_err() {
                break;
            }
        }
    })
}

async fn next_link_request(
    links: &mut Option<mpsc::UnboundedReceiver<SlideRequest>>,
) -> Option<SlideRequest> {
    match links {
        Some(inbox) => inbox.recv().await,
        None => std::future::pending().await,
    }
}
