//! The direction-synchronization core of Textflow
//!
//! This crate keeps a document's text-flow orientation (left-to-right vs
//! right-to-left) in sync with its declared or inferred language, even when
//! that language changes underneath it: manual attribute edits, a
//! third-party translation widget rewriting the page, or script-driven
//! locale switches.
//!
//! It is built around a small headless [`Document`] (a slab-backed element
//! tree with attribute, class and child-list mutation recording) and a
//! pipeline of narrowly scoped pieces:
//!
//! - [`detect`]: pure priority-chain inspection of the document, always
//!   resolving to a [`Direction`].
//! - [`UpdateGuard`]: reentrancy and no-op suppression, so the engine's own
//!   writes cannot re-trigger it.
//! - [`apply`]: the only code that mutates applied direction state: the
//!   root `dir` attribute, the `is-ltr`/`is-rtl` marker classes, and the RTL
//!   stylesheet link in `<head>`.
//! - [`MutationWatcher`]: filters drained mutation batches down to the
//!   attribute and subtree changes that can affect direction.
//! - [`DirectionSync`]: the controller tying the above together with
//!   frame-debounced update cycles and assistive-technology announcements.
//! - [`DocumentDriver`]: an event-loop harness that owns a document, a
//!   controller and a [`VirtualScheduler`], for hosts (and tests) that want
//!   the whole loop driven deterministically.
//!
//! All timing goes through the [`Scheduler`] trait from
//! [`textflow-traits`](textflow_traits), so nothing in here touches a real
//! clock.
//!
//! ## Feature flags
//!  - `default`: Enables the features listed below.
//!  - `tracing`: Enables tracing support.

mod apply;
mod config;
mod detect;
mod driver;
mod guard;
mod observer;
mod runtime;
mod sync;

/// The headless document the engine runs against.
mod document;

/// The nodes themselves, and their data.
pub mod node;

mod accessibility;

pub use apply::apply;
pub use config::SyncConfig;
pub use detect::{MarkerSource, RTL_LOCALES, Resolution, Signal, detect, resolve};
pub use document::Document;
pub use driver::DocumentDriver;
pub use guard::UpdateGuard;
pub use node::{Attribute, ElementData, Node, NodeData, NodeFlags, TextData};
pub use observer::MutationWatcher;
pub use runtime::VirtualScheduler;
pub use sync::DirectionSync;
pub use textflow_traits::{
    Direction, DirectionParseError, FrameToken, Interest, MutationKind, MutationRecord,
    NoopScheduler, Scheduler, TimedTask, TimerId,
};
