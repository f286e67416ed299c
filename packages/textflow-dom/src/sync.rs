use textflow_traits::{Direction, FrameToken, Scheduler, TimedTask};

use crate::apply::apply;
use crate::config::SyncConfig;
use crate::detect::resolve;
use crate::document::Document;
use crate::guard::UpdateGuard;
use crate::observer::MutationWatcher;

/// The controller wiring detection, guarding, application and announcement
/// into one debounced update loop.
///
/// All state (guard fields, the pending frame token, the watcher's
/// attachment) is owned by the instance, so independent instances (separate
/// documents, parallel tests) never contaminate each other.
///
/// The flow per cycle: drained mutations → [`MutationWatcher`] →
/// [`request_update`](DirectionSync::request_update) (coalesced to one
/// frame) → [`detect`] → guard checks → [`apply`] → announcement, guard
/// release timer. The applicator's own writes loop back through the
/// watcher; the guard breaks that cycle.
pub struct DirectionSync {
    config: SyncConfig,
    guard: UpdateGuard,
    watcher: MutationWatcher,
    pending: Option<FrameToken>,
    /// The direction currently in effect. Kept apart from the guard's
    /// applied-state memory: that memory may be cleared to force a
    /// rewrite (late container), which is not a direction change.
    direction: Option<Direction>,
    cycles_run: u64,
}

impl DirectionSync {
    pub fn new(config: SyncConfig) -> Self {
        DirectionSync {
            config,
            guard: UpdateGuard::new(),
            watcher: MutationWatcher::new(),
            pending: None,
            direction: None,
            cycles_run: 0,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The direction currently applied, if a cycle has completed yet.
    pub fn current_direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Number of detection cycles that have actually run (not been
    /// coalesced away or arrived with a stale token).
    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    /// Whether an update cycle is scheduled but has not run yet.
    pub fn update_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Delivers one mutation batch from the document.
    ///
    /// Attaches the watcher to the container lazily the first time the
    /// container exists (requesting an update so the container picks up
    /// the applied state it missed), then requests at most one update for
    /// the whole batch if any record qualifies.
    pub fn pump(&mut self, doc: &mut Document, scheduler: &mut impl Scheduler) {
        if self.watcher.container().is_none() {
            if let Some(container) = doc.container_id() {
                self.watcher.attach_container(container);
                // The container missed any applied state from earlier
                // cycles; force the next cycle to write it out in full.
                self.guard.clear_last_applied();
                self.request_update(scheduler);
            }
        }

        let batch = doc.take_mutations();
        if batch.is_empty() {
            return;
        }
        if self.watcher.batch_triggers(doc, &batch) {
            self.request_update(scheduler);
        }
    }

    /// Schedules a detect+apply cycle for the next frame, replacing any
    /// cycle already scheduled. This is the externally callable
    /// "re-check now" entry point: collaborators that change the locale
    /// programmatically call it rather than relying on observation timing.
    pub fn request_update(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(stale) = self.pending.take() {
            scheduler.cancel_frame(stale);
            #[cfg(feature = "tracing")]
            tracing::trace!(?stale, "coalescing update request");
        }
        self.pending = Some(scheduler.request_frame());
    }

    /// Runs the scheduled cycle for `token`.
    ///
    /// A stale token (replaced by a later request) is ignored. Detection
    /// always runs against the document as it is *now*; intermediate
    /// states between two rapid mutations may never be observed.
    pub fn run_frame(
        &mut self,
        token: FrameToken,
        doc: &mut Document,
        scheduler: &mut impl Scheduler,
    ) {
        if self.pending != Some(token) {
            return;
        }
        self.pending = None;
        self.cycles_run += 1;

        let resolution = resolve(doc, &self.config);
        let direction = resolution.direction;
        if self.guard.should_skip(direction) {
            return;
        }
        if !self.guard.try_enter() {
            #[cfg(feature = "tracing")]
            tracing::debug!(%direction, "update already in flight, dropping cycle");
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            %direction,
            signal = ?resolution.signal,
            previous = ?self.guard.last_applied(),
            "applying direction"
        );

        apply(doc, &self.config, resolution);
        self.guard.record(direction);

        // A forced rewrite of the same direction is not a change and is
        // not announced.
        let changed = self.direction != Some(direction);
        self.direction = Some(direction);
        if changed {
            let message = match direction {
                Direction::Rtl => "Text direction changed to right-to-left",
                Direction::Ltr => "Text direction changed to left-to-right",
            };
            let region = doc.announce(message);
            scheduler.set_timeout(TimedTask::RemoveNode(region), self.config.announcement_ttl_ms);
        }
        scheduler.set_timeout(TimedTask::ReleaseGuard, self.config.guard_release_ms);
    }

    /// Handles a due timeout.
    pub fn on_timeout(&mut self, task: TimedTask, doc: &mut Document) {
        match task {
            TimedTask::ReleaseGuard => self.guard.leave(),
            // The slot may have been freed and reused since the timer was
            // set; only ever remove an actual live region.
            TimedTask::RemoveNode(id) => {
                if doc.is_live_region(id) {
                    doc.remove_node(id);
                }
            }
        }
    }
}
