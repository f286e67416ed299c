use textflow_traits::Direction;

use crate::config::SyncConfig;
use crate::document::Document;
use crate::runtime::VirtualScheduler;
use crate::sync::DirectionSync;

/// Event-loop harness owning a document, its [`DirectionSync`] controller
/// and a [`VirtualScheduler`].
///
/// Hosts embedding the engine drive it in turns: mutate the document, call
/// [`turn`](DocumentDriver::turn) to deliver mutations and run any due
/// cycle, and [`advance`](DocumentDriver::advance) to move virtual time for
/// guard release and announcement cleanup. [`settle`](DocumentDriver::settle)
/// loops until the system is quiescent, which is guaranteed to terminate:
/// the guard stops self-triggered feedback, and a cycle whose detected
/// direction matches the applied one is a no-op.
///
/// An initial detection cycle is scheduled at construction, so the first
/// turn resolves the document's starting direction.
pub struct DocumentDriver {
    doc: Document,
    sync: DirectionSync,
    scheduler: VirtualScheduler,
}

impl DocumentDriver {
    pub fn new(doc: Document, config: SyncConfig) -> Self {
        let mut driver = DocumentDriver {
            doc,
            sync: DirectionSync::new(config),
            scheduler: VirtualScheduler::new(),
        };
        driver.sync.request_update(&mut driver.scheduler);
        driver
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable document access. Changes made here are observed on the next
    /// [`turn`](Self::turn).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn controller(&self) -> &DirectionSync {
        &self.sync
    }

    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }

    /// The currently applied direction, once the first cycle has run.
    pub fn direction(&self) -> Option<Direction> {
        self.sync.current_direction()
    }

    /// Collaborator-facing "re-check now": schedules a detection cycle
    /// without waiting for mutation observation.
    pub fn recheck(&mut self) {
        self.sync.request_update(&mut self.scheduler);
    }

    /// Delivers pending mutations and runs the due update cycle, if any.
    /// Returns `true` if a cycle ran.
    pub fn turn(&mut self) -> bool {
        self.sync.pump(&mut self.doc, &mut self.scheduler);
        match self.scheduler.take_frame() {
            Some(token) => {
                self.sync
                    .run_frame(token, &mut self.doc, &mut self.scheduler);
                true
            }
            None => false,
        }
    }

    /// Advances virtual time, firing due timeouts (guard release,
    /// announcement removal).
    pub fn advance(&mut self, ms: u64) {
        for task in self.scheduler.advance(ms) {
            self.sync.on_timeout(task, &mut self.doc);
        }
    }

    /// Runs turns (releasing the guard between them) until no cycle runs
    /// and nothing is pending. Returns the number of turns taken.
    pub fn settle(&mut self) -> usize {
        let guard_release = self.sync.config().guard_release_ms;
        let mut turns = 0;
        loop {
            let ran = self.turn();
            self.advance(guard_release);
            turns += 1;
            let quiescent = !ran
                && !self.doc.has_pending_mutations()
                && !self.scheduler.frame_pending();
            if quiescent {
                return turns;
            }
        }
    }
}
