//! End-of-list visibility detection.
//!
//! The presentation layer attaches a sentinel to the last rendered item; when
//! it scrolls into view the loader fetches the next page. Rendering surfaces
//! differ, so the capability is a trait, and the shared piece is the edge
//! trigger that turns raw visibility samples into one event per transition.

/// Capability for watching the end-of-list sentinel.
///
/// `on_visible` must fire once per transition into visibility, not on every
/// intersection frame; [`EdgeTrigger`] does that conversion for surfaces that
/// only provide raw samples.
pub trait VisibilityObserver {
    fn observe(&mut self, on_visible: Box<dyn FnMut() + Send>);
    fn disconnect(&mut self);
}

/// Converts a stream of visible/hidden samples into edge-triggered events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    visible: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample; true exactly when this is the hidden-to-visible
    /// transition.
    pub fn sample(&mut self, visible: bool) -> bool {
        let fired = visible && !self.visible;
        self.visible = visible;
        fired
    }

    /// Re-arm after the list re-rendered and the sentinel moved to a new
    /// last item.
    pub fn reset(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Observer fed by synthetic events instead of a rendering surface.
    #[derive(Default)]
    struct ManualObserver {
        callback: Option<Box<dyn FnMut() + Send>>,
    }

    impl ManualObserver {
        fn emit(&mut self) {
            if let Some(callback) = &mut self.callback {
                callback();
            }
        }
    }

    impl VisibilityObserver for ManualObserver {
        fn observe(&mut self, on_visible: Box<dyn FnMut() + Send>) {
            self.callback = Some(on_visible);
        }

        fn disconnect(&mut self) {
            self.callback = None;
        }
    }

    #[test]
    fn observer_delivers_until_disconnected() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();

        let mut observer = ManualObserver::default();
        observer.observe(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        observer.emit();
        observer.emit();
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        observer.disconnect();
        observer.emit();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fires_once_per_transition() {
        let mut trigger = EdgeTrigger::new();
        assert!(trigger.sample(true));
        assert!(!trigger.sample(true));
        assert!(!trigger.sample(false));
        assert!(trigger.sample(true));
    }

    #[test]
    fn reset_rearms_while_still_visible() {
        let mut trigger = EdgeTrigger::new();
        assert!(trigger.sample(true));
        trigger.reset();
        assert!(trigger.sample(true));
    }
}
