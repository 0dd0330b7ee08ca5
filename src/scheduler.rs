use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Opaque handle for a callback posted to a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Animation-frame callback queue.
///
/// The scheduler only tracks tokens. When a token comes due the host frame
/// loop hands it back to whoever posted it (for the bouncer that is
/// [`crate::KeyguardBouncer::on_frame`]). Everything runs on the UI thread, so
/// a `remove` always wins against a callback that has not been dispatched yet.
pub trait FrameScheduler {
    /// Queue a callback for the first animation frame at least `delay` from now.
    fn post_delayed(&mut self, delay: Duration) -> FrameToken;
    /// Drop a queued callback. Removing an unknown or already-fired token is a no-op.
    fn remove(&mut self, token: FrameToken);
}

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    next_token: u64,
    queue: Vec<(Duration, FrameToken)>,
}

/// Deterministic frame clock driven by explicit [`ManualFrameClock::advance`]
/// calls. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of callbacks queued and not yet due.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Move time forward and return the tokens that came due, earliest first.
    pub fn advance(&self, by: Duration) -> Vec<FrameToken> {
        let mut state = self.state.borrow_mut();
        state.now += by;
        let now = state.now;
        let mut due: Vec<(Duration, FrameToken)> = Vec::new();
        state.queue.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl FrameScheduler for ManualFrameClock {
    fn post_delayed(&mut self, delay: Duration) -> FrameToken {
        let mut state = self.state.borrow_mut();
        state.next_token += 1;
        let token = FrameToken(state.next_token);
        let due = state.now + delay;
        state.queue.push((due, token));
        tracing::trace!(token = token.0, ?due, "frame callback posted");
        token
    }

    fn remove(&mut self, token: FrameToken) {
        self.state.borrow_mut().queue.retain(|(_, t)| *t != token);
    }
}
