use bitflags::bitflags;
use smol_str::SmolStr;

bitflags! {
    /// What kinds of document mutations an observer wants delivered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interest: u8 {
        /// Attribute changes on the observed elements themselves.
        const ATTRIBUTES = 0b001;
        /// Child insertions/removals under the observed subtree.
        const CHILD_LIST = 0b010;
        /// Extend attribute/child-list interest to descendants of the
        /// observed container (catches third-party injected elements).
        const SUBTREE = 0b100;
    }
}

/// One recorded document mutation.
///
/// Records are accumulated by the document as its mutation API is used and
/// drained in batches: everything that happened since the last drain is
/// delivered as a single batch, so a burst of simultaneous changes produces
/// one observer notification, not one per change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Node the mutation happened on. For child-list records this is the
    /// parent whose child list changed.
    pub target: usize,
    pub kind: MutationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// An attribute changed value, was added, or was removed.
    /// Class-list edits are reported as a change to the `class` attribute.
    Attribute { name: SmolStr },
    /// A child was appended to or removed from the target.
    ChildList,
}

impl MutationRecord {
    pub fn attribute(target: usize, name: impl Into<SmolStr>) -> Self {
        Self {
            target,
            kind: MutationKind::Attribute { name: name.into() },
        }
    }

    pub fn child_list(target: usize) -> Self {
        Self {
            target,
            kind: MutationKind::ChildList,
        }
    }
}
