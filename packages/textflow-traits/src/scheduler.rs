//! The scheduling seam between the direction engine and its host.
//!
//! The engine never talks to a real clock. It asks a [`Scheduler`] for frame
//! callbacks (debounced update cycles) and timeouts (guard release,
//! announcement cleanup), and the host decides what those mean: a shell can
//! map them onto its repaint loop, while tests drive a virtual scheduler by
//! hand and get fully deterministic timing.

/// Opaque handle to a scheduled-but-not-yet-run update cycle.
///
/// At most one is outstanding at a time: requesting a new frame while an
/// older token is pending invalidates the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Handle to a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Work to perform when a timeout fires.
///
/// Timeouts carry data rather than callbacks so a scheduler can stay a plain
/// queue: whoever drains due tasks interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedTask {
    /// Clear the reentrancy guard's in-progress flag, letting the next
    /// genuine change start an update cycle.
    ReleaseGuard,
    /// Remove a transient node (an accessibility announcement) from the
    /// document.
    RemoveNode(usize),
}

/// Frame and timeout scheduling for the update loop.
pub trait Scheduler {
    /// Request an update cycle on the next frame. The returned token
    /// replaces any previously pending frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a previously requested frame. Cancelling a token that already
    /// fired or was replaced is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);

    /// Run `task` after `delay_ms` milliseconds of scheduler time.
    fn set_timeout(&mut self, task: TimedTask, delay_ms: u64) -> TimerId;
}

/// Scheduler that hands out tokens but never runs anything.
///
/// Useful for tests that exercise coalescing behaviour without driving a
/// full event loop.
#[derive(Debug, Default)]
pub struct NoopScheduler {
    next_token: u64,
    next_timer: u64,
}

impl Scheduler for NoopScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        FrameToken(self.next_token)
    }

    fn cancel_frame(&mut self, _token: FrameToken) {}

    fn set_timeout(&mut self, _task: TimedTask, _delay_ms: u64) -> TimerId {
        self.next_timer += 1;
        TimerId(self.next_timer)
    }
}
