use crate::document::Document;
use crate::node::NodeFlags;

impl Document {
    /// Emits a transient assistive-technology status message.
    ///
    /// Appends a visually-hidden element with polite live-region semantics
    /// holding `message`, under the container if it exists, else under the
    /// root. Returns the new node's id so the caller can schedule its
    /// removal once screen readers have had time to announce it.
    ///
    /// Overlapping announcements may coexist; there is no single-instance
    /// constraint here.
    pub fn announce(&mut self, message: &str) -> usize {
        let region = self.create_element("div");
        self.set_attribute(region, "role", "status");
        self.set_attribute(region, "aria-live", "polite");
        self.set_attribute(region, "class", "visually-hidden");
        self.set_node_flags(region, NodeFlags::LIVE_REGION);

        let text = self.create_text(message);
        self.append_child(region, text);

        let parent = self.container_id().unwrap_or(self.root_id());
        self.append_child(parent, region);
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_is_a_polite_live_region() {
        let mut doc = Document::new();
        let region = doc.announce("Text direction changed to right-to-left");
        assert_eq!(doc.attr(region, "role"), Some("status"));
        assert_eq!(doc.attr(region, "aria-live"), Some("polite"));
        assert_eq!(
            doc.text_content(region),
            "Text direction changed to right-to-left"
        );
        assert_eq!(doc.live_region_count(), 1);
    }

    #[test]
    fn announcements_may_overlap() {
        let mut doc = Document::new();
        let first = doc.announce("one");
        let second = doc.announce("two");
        assert_ne!(first, second);
        assert_eq!(doc.live_region_count(), 2);

        doc.remove_node(first);
        assert_eq!(doc.live_region_count(), 1);
    }

    #[test]
    fn falls_back_to_root_without_container() {
        let mut doc = Document::without_container();
        let region = doc.announce("hello");
        assert_eq!(doc.node(region).parent, Some(doc.root_id()));
    }
}
