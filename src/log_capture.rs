//! Test-only subscriber that counts emitted events by level.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Default)]
struct CountingLayer {
    errors: Arc<AtomicUsize>,
    warnings: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for CountingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level == Level::ERROR {
            self.errors.fetch_add(1, Ordering::SeqCst);
        } else if level == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` under a counting subscriber; returns (errors, warnings).
pub(crate) fn count_logs(f: impl FnOnce()) -> (usize, usize) {
    let layer = CountingLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    (
        layer.errors.load(Ordering::SeqCst),
        layer.warnings.load(Ordering::SeqCst),
    )
}
