use textflow_traits::{FrameToken, Scheduler, TimedTask, TimerId};

/// Deterministic, single-threaded scheduler over a virtual clock.
///
/// Frames model the per-paint scheduling primitive: at most one is pending
/// at a time and requesting a new one replaces the old token, so a burst of
/// requests collapses to a single due frame. Timeouts are plain data keyed
/// by virtual milliseconds; [`advance`](VirtualScheduler::advance) moves the
/// clock and yields due tasks in firing order.
///
/// No real time is involved anywhere, which makes the debounce and guard
/// contracts testable without a rendering clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_token: u64,
    next_timer: u64,
    pending_frame: Option<FrameToken>,
    timers: Vec<TimerEntry>,
}

#[derive(Debug)]
struct TimerEntry {
    due_ms: u64,
    id: TimerId,
    task: TimedTask,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Whether a frame is waiting to run.
    pub fn frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Number of outstanding timeouts.
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Takes the due frame, if any. The returned token is no longer
    /// pending: a cycle already handed out cannot be cancelled.
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        self.pending_frame.take()
    }

    /// Advances the clock by `ms`, returning every task that came due, in
    /// firing order (ties break by scheduling order).
    pub fn advance(&mut self, ms: u64) -> Vec<TimedTask> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<TimerEntry> = Vec::new();
        let mut remaining: Vec<TimerEntry> = Vec::new();
        for entry in self.timers.drain(..) {
            if entry.due_ms <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.timers = remaining;

        due.sort_by_key(|entry| (entry.due_ms, entry.id));
        due.into_iter().map(|entry| entry.task).collect()
    }
}

impl Scheduler for VirtualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.pending_frame = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending_frame == Some(token) {
            self.pending_frame = None;
        }
    }

    fn set_timeout(&mut self, task: TimedTask, delay_ms: u64) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.push(TimerEntry {
            due_ms: self.now_ms + delay_ms,
            id,
            task,
        });
        id
    }
}
