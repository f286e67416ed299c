use smol_str::SmolStr;
use textflow_traits::{Interest, MutationKind, MutationRecord};

use crate::document::Document;

/// The attributes that can carry a direction signal.
const WATCHED_ATTRIBUTES: [&str; 3] = ["lang", "dir", "class"];

/// Filters drained mutation batches down to the changes that can affect
/// direction.
///
/// Watches attribute changes for `lang`, `dir` and `class` on the root and
/// the container, plus the container's subtree: child-list changes (a
/// third-party translation banner or frame being injected) and `class`
/// changes on injected descendants. Other mutations are noise.
///
/// The container may not exist when the watcher is created; it is attached
/// lazily via [`attach_container`](MutationWatcher::attach_container) once
/// it does. Until then only the root is observed.
#[derive(Debug)]
pub struct MutationWatcher {
    interest: Interest,
    attribute_filter: [SmolStr; 3],
    container: Option<usize>,
}

impl Default for MutationWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationWatcher {
    pub fn new() -> Self {
        MutationWatcher {
            interest: Interest::ATTRIBUTES | Interest::CHILD_LIST | Interest::SUBTREE,
            attribute_filter: WATCHED_ATTRIBUTES.map(SmolStr::new_static),
            container: None,
        }
    }

    /// Begins observing the container's subtree.
    pub fn attach_container(&mut self, id: usize) {
        self.container = Some(id);
    }

    pub fn container(&self) -> Option<usize> {
        self.container
    }

    /// Whether any record in the batch qualifies as a direction signal.
    /// A qualifying batch triggers exactly one update request regardless
    /// of how many records it holds.
    pub fn batch_triggers(&self, doc: &Document, batch: &[MutationRecord]) -> bool {
        batch.iter().any(|record| self.wants(doc, record))
    }

    fn wants(&self, doc: &Document, record: &MutationRecord) -> bool {
        let root = doc.root_id();
        let observed_directly =
            record.target == root || self.container == Some(record.target);

        match &record.kind {
            MutationKind::Attribute { name } => {
                if observed_directly {
                    return self.interest.contains(Interest::ATTRIBUTES)
                        && self.attribute_filter.iter().any(|a| a == name);
                }
                // Injected descendants of the container only matter for
                // class changes (translation widgets signal via classes).
                self.interest.contains(Interest::SUBTREE)
                    && name == "class"
                    && self.in_container_subtree(doc, record.target)
            }
            MutationKind::ChildList => {
                self.interest.contains(Interest::CHILD_LIST)
                    && (self.container == Some(record.target)
                        || self.in_container_subtree(doc, record.target))
            }
        }
    }

    fn in_container_subtree(&self, doc: &Document, id: usize) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        doc.contains(id) && doc.is_descendant_of(id, container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher_for(doc: &Document) -> MutationWatcher {
        let mut watcher = MutationWatcher::new();
        if let Some(container) = doc.container_id() {
            watcher.attach_container(container);
        }
        watcher
    }

    #[test]
    fn watched_attributes_on_root_and_container_qualify() {
        let mut doc = Document::new();
        let watcher = watcher_for(&doc);
        let root = doc.root_id();
        let body = doc.container_id().unwrap();

        doc.set_attribute(root, "lang", "ar");
        doc.set_attribute(body, "dir", "rtl");
        let batch = doc.take_mutations();
        assert!(watcher.batch_triggers(&doc, &batch));
    }

    #[test]
    fn unrelated_attributes_are_noise() {
        let mut doc = Document::new();
        let watcher = watcher_for(&doc);
        doc.set_attribute(doc.root_id(), "data-theme", "dark");
        let batch = doc.take_mutations();
        assert!(!watcher.batch_triggers(&doc, &batch));
    }

    #[test]
    fn injected_banner_in_container_qualifies() {
        let mut doc = Document::new();
        let watcher = watcher_for(&doc);
        let body = doc.container_id().unwrap();
        let banner = doc.create_element("iframe");
        doc.append_child(body, banner);
        let batch = doc.take_mutations();
        assert!(watcher.batch_triggers(&doc, &batch));

        // Class change on the injected element also qualifies.
        doc.add_class(banner, "translated-rtl");
        let batch = doc.take_mutations();
        assert!(watcher.batch_triggers(&doc, &batch));
    }

    #[test]
    fn head_subtree_is_not_observed() {
        let mut doc = Document::new();
        let watcher = watcher_for(&doc);
        let link = doc.create_element("link");
        doc.set_attribute(link, "rel", "stylesheet");
        doc.append_child(doc.head_id(), link);
        let batch = doc.take_mutations();
        assert!(!watcher.batch_triggers(&doc, &batch));
    }

    #[test]
    fn nothing_qualifies_before_container_attach() {
        let mut doc = Document::without_container();
        let watcher = MutationWatcher::new();
        let div = doc.create_element("div");
        doc.append_child(doc.root_id(), div);
        let batch = doc.take_mutations();
        assert!(!watcher.batch_triggers(&doc, &batch));

        // The root's own watched attributes still qualify.
        doc.set_attribute(doc.root_id(), "lang", "he");
        let batch = doc.take_mutations();
        assert!(watcher.batch_triggers(&doc, &batch));
    }
}
