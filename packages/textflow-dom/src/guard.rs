use textflow_traits::Direction;

/// Reentrancy and redundancy guard around the applicator.
///
/// The applicator's own attribute and class writes loop back into the
/// change observer; without a guard that feedback would schedule update
/// cycles forever. The guard holds two facts: whether an update is
/// currently in flight, and the last direction actually applied.
///
/// A cycle that arrives while an update is in flight is dropped, not
/// queued. The in-flight window is extended slightly past the apply itself
/// (the guard is released by a scheduled [`TimedTask::ReleaseGuard`](textflow_traits::TimedTask))
/// so the self-triggered mutations drain through the observer while the
/// guard still holds.
#[derive(Debug, Default)]
pub struct UpdateGuard {
    in_progress: bool,
    last_applied: Option<Direction>,
}

impl UpdateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to start an update. Returns `false` (and changes nothing)
    /// if one is already in flight.
    pub fn try_enter(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        true
    }

    /// Clears the in-flight flag.
    pub fn leave(&mut self) {
        self.in_progress = false;
    }

    /// Whether a requested direction equals the last applied one, making
    /// the cycle a no-op.
    pub fn should_skip(&self, direction: Direction) -> bool {
        self.last_applied == Some(direction)
    }

    /// Records a direction as applied.
    pub fn record(&mut self, direction: Direction) {
        self.last_applied = Some(direction);
    }

    /// Forgets the last applied direction, forcing the next cycle to apply
    /// even if it resolves the same value. Used when applied state may be
    /// incomplete, e.g. after the container appears late.
    pub fn clear_last_applied(&mut self) {
        self.last_applied = None;
    }

    pub fn last_applied(&self) -> Option<Direction> {
        self.last_applied
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }
}
