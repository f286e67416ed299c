//! Shared traits and types for Textflow
//!
//! This crate defines the types that cross the boundary between the
//! [`textflow-dom`](https://docs.rs/textflow-dom) document model and the code
//! that drives it: the [`Direction`] value the whole system revolves around,
//! the mutation records a document emits, and the [`Scheduler`](crate::scheduler::Scheduler)
//! seam that lets the update loop be driven by a real frame clock in
//! production and by a deterministic virtual clock in tests.

pub mod direction;
pub mod events;
pub mod scheduler;

pub use direction::{Direction, DirectionParseError};
pub use events::{Interest, MutationKind, MutationRecord};
pub use scheduler::{FrameToken, NoopScheduler, Scheduler, TimedTask, TimerId};
