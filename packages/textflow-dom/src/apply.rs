use crate::config::SyncConfig;
use crate::detect::{MANAGED_ATTR, MarkerSource, Resolution, Signal};
use crate::document::Document;

/// Writes a resolved direction into the document's applied state.
///
/// In order: sets the root `dir` attribute (flagging it as engine-managed
/// unless the direction came from an author-set marker on the root
/// itself), swaps the
/// `is-ltr`/`is-rtl` marker classes on root and container, and toggles the
/// RTL stylesheet link in `<head>` (inserted idempotently for rtl, removed
/// for ltr).
///
/// Callers are expected to hold the [`UpdateGuard`](crate::UpdateGuard)
/// and to have checked `should_skip` first; calling again with the same
/// resolution is still harmless, since every step is idempotent.
///
/// If the container does not exist yet, the container-targeted steps are
/// skipped silently.
pub fn apply(doc: &mut Document, config: &SyncConfig, resolution: Resolution) {
    let direction = resolution.direction;
    let root = doc.root_id();
    doc.set_attribute(root, "dir", direction.as_str());
    if resolution.signal == Signal::ExplicitMarker(MarkerSource::Root) {
        // The root marker is author-owned: leave it authoritative for
        // future detection cycles. A container marker is only mirrored
        // here, so its write-back stays flagged like any other.
        doc.remove_attribute(root, MANAGED_ATTR);
    } else {
        doc.set_attribute(root, MANAGED_ATTR, "");
    }

    doc.add_class(root, direction.marker_class());
    doc.remove_class(root, direction.opposite().marker_class());
    if let Some(container) = doc.container_id() {
        doc.add_class(container, direction.marker_class());
        doc.remove_class(container, direction.opposite().marker_class());
    }

    if direction.is_rtl() {
        ensure_rtl_stylesheet(doc, config);
    } else {
        remove_rtl_stylesheet(doc, config);
    }
}

/// Inserts the RTL stylesheet link unless one with the configured id is
/// already present.
fn ensure_rtl_stylesheet(doc: &mut Document, config: &SyncConfig) {
    if doc.element_by_id(&config.rtl_stylesheet_id).is_some() {
        return;
    }
    let link = doc.create_element("link");
    doc.set_attribute(link, "id", &config.rtl_stylesheet_id);
    doc.set_attribute(link, "rel", "stylesheet");
    doc.set_attribute(link, "href", &config.rtl_stylesheet_href);
    let head = doc.head_id();
    doc.append_child(head, link);
}

fn remove_rtl_stylesheet(doc: &mut Document, config: &SyncConfig) {
    if let Some(link) = doc.element_by_id(&config.rtl_stylesheet_id) {
        doc.remove_node(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textflow_traits::Direction;

    fn inferred(direction: Direction) -> Resolution {
        Resolution {
            direction,
            signal: Signal::Locale,
        }
    }

    fn link_count(doc: &Document, config: &SyncConfig) -> usize {
        doc.node(doc.head_id())
            .children
            .iter()
            .filter(|&&child| doc.attr(child, "id") == Some(config.rtl_stylesheet_id.as_str()))
            .count()
    }

    #[test]
    fn rtl_sets_marker_attribute_classes_and_stylesheet() {
        let mut doc = Document::new();
        let config = SyncConfig::default();
        apply(&mut doc, &config, inferred(Direction::Rtl));

        let root = doc.root_id();
        let body = doc.container_id().unwrap();
        assert_eq!(doc.attr(root, "dir"), Some("rtl"));
        assert!(doc.attr(root, MANAGED_ATTR).is_some());
        assert!(doc.has_class(root, "is-rtl"));
        assert!(!doc.has_class(root, "is-ltr"));
        assert!(doc.has_class(body, "is-rtl"));
        assert_eq!(link_count(&doc, &config), 1);
    }

    #[test]
    fn ltr_removes_the_stylesheet_and_swaps_classes() {
        let mut doc = Document::new();
        let config = SyncConfig::default();
        apply(&mut doc, &config, inferred(Direction::Rtl));
        apply(&mut doc, &config, inferred(Direction::Ltr));

        let root = doc.root_id();
        assert_eq!(doc.attr(root, "dir"), Some("ltr"));
        assert!(doc.has_class(root, "is-ltr"));
        assert!(!doc.has_class(root, "is-rtl"));
        assert_eq!(link_count(&doc, &config), 0);
    }

    #[test]
    fn root_marker_sourced_direction_stays_author_owned() {
        let mut doc = Document::new();
        doc.set_attribute(doc.root_id(), "dir", "rtl");
        let config = SyncConfig::default();
        apply(
            &mut doc,
            &config,
            Resolution {
                direction: Direction::Rtl,
                signal: Signal::ExplicitMarker(MarkerSource::Root),
            },
        );
        assert!(doc.attr(doc.root_id(), MANAGED_ATTR).is_none());
    }

    #[test]
    fn container_marker_mirror_stays_flagged_as_managed() {
        let mut doc = Document::new();
        let body = doc.container_id().unwrap();
        doc.set_attribute(body, "dir", "rtl");
        let config = SyncConfig::default();
        apply(
            &mut doc,
            &config,
            Resolution {
                direction: Direction::Rtl,
                signal: Signal::ExplicitMarker(MarkerSource::Container),
            },
        );
        // The root write is the engine's mirror, not the author's marker;
        // leaving it unflagged would shadow later container changes.
        assert!(doc.attr(doc.root_id(), MANAGED_ATTR).is_some());
    }

    #[test]
    fn apply_is_idempotent() {
        let mut doc = Document::new();
        let config = SyncConfig::default();
        apply(&mut doc, &config, inferred(Direction::Rtl));
        let class_after_first = doc.attr(doc.root_id(), "class").map(str::to_string);
        doc.take_mutations();

        apply(&mut doc, &config, inferred(Direction::Rtl));
        assert_eq!(link_count(&doc, &config), 1, "no duplicate stylesheet link");
        assert_eq!(
            doc.attr(doc.root_id(), "class").map(str::to_string),
            class_after_first,
            "no class thrashing"
        );
        assert!(
            !doc.has_pending_mutations(),
            "second apply should not dirty the document"
        );
    }

    #[test]
    fn missing_container_skips_container_steps() {
        let mut doc = Document::without_container();
        let config = SyncConfig::default();
        apply(&mut doc, &config, inferred(Direction::Rtl));
        assert_eq!(doc.attr(doc.root_id(), "dir"), Some("rtl"));
        assert!(doc.has_class(doc.root_id(), "is-rtl"));
        assert_eq!(link_count(&doc, &config), 1);
    }
}
