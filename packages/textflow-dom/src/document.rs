use slab::Slab;
use smol_str::SmolStr;
use textflow_traits::{Direction, MutationRecord};

use crate::node::{ElementData, Node, NodeData, NodeFlags, TextData};

/// A minimal headless document: a slab-backed element tree with attribute,
/// class-list and child-list mutation recording.
///
/// The tree always contains a root (`html`) element with a `head` child.
/// The secondary container (`body`) may be absent early in the document's
/// life and created later; code that targets it must tolerate its absence.
///
/// Every mutating operation that actually changes state pushes a
/// [`MutationRecord`] into a pending queue. [`take_mutations`](Document::take_mutations)
/// drains the queue as one batch, the analogue of a mutation-observer
/// delivery at a microtask checkpoint.
pub struct Document {
    nodes: Slab<Node>,
    root_id: usize,
    head_id: usize,
    container_id: Option<usize>,
    /// The container's rendered direction as resolved by the host's style
    /// system, when it has recorded one. Detection input only.
    computed_direction: Option<Direction>,
    pending_mutations: Vec<MutationRecord>,
}

impl Document {
    /// Creates a document with root, head and the body container.
    pub fn new() -> Self {
        let mut doc = Self::without_container();
        doc.create_container();
        doc.pending_mutations.clear();
        doc
    }

    /// Creates a document whose body container does not exist yet, as very
    /// early in a page's lifecycle. Use [`create_container`](Self::create_container)
    /// to add it later.
    pub fn without_container() -> Self {
        let mut nodes = Slab::new();
        let root_id = nodes.insert(Node {
            id: 0,
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new("html")),
        });
        nodes[root_id].id = root_id;

        let mut doc = Document {
            nodes,
            root_id,
            head_id: 0,
            container_id: None,
            computed_direction: None,
            pending_mutations: Vec::new(),
        };
        let head_id = doc.create_element("head");
        doc.head_id = head_id;
        doc.append_child(root_id, head_id);
        doc.pending_mutations.clear();
        doc
    }

    pub fn root_id(&self) -> usize {
        self.root_id
    }

    pub fn head_id(&self) -> usize {
        self.head_id
    }

    /// The secondary container (`body`), if it exists yet.
    pub fn container_id(&self) -> Option<usize> {
        self.container_id
    }

    /// Creates the body container under the root. Returns the existing id
    /// if the container was already created.
    pub fn create_container(&mut self) -> usize {
        if let Some(id) = self.container_id {
            return id;
        }
        let id = self.create_element("body");
        self.append_child(self.root_id, id);
        self.container_id = Some(id);
        id
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub fn contains(&self, id: usize) -> bool {
        self.nodes.contains(id)
    }

    /// Creates a detached element node.
    pub fn create_element(&mut self, name: &str) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node {
            id,
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(name)),
        });
        id
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, content: &str) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node {
            id,
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(TextData {
                content: content.to_string(),
            }),
        });
        id
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: usize, child: usize) {
        debug_assert!(self.nodes[child].parent.is_none());
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        self.record(MutationRecord::child_list(parent));
    }

    /// Detaches `id` from its parent and frees it and its whole subtree.
    pub fn remove_node(&mut self, id: usize) {
        if !self.nodes.contains(id) {
            return;
        }
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&child| child != id);
            self.record(MutationRecord::child_list(parent));
        }
        if self.container_id == Some(id) {
            self.container_id = None;
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.nodes.remove(next);
            stack.extend(node.children);
        }
    }

    pub fn attr(&self, id: usize, name: &str) -> Option<&str> {
        self.nodes[id].element_data()?.attr(name)
    }

    pub fn set_attribute(&mut self, id: usize, name: &str, value: &str) {
        let Some(element) = self.nodes[id].element_data_mut() else {
            return;
        };
        if element.set_attr(name, value) {
            self.record(MutationRecord::attribute(id, SmolStr::new(name)));
        }
    }

    pub fn remove_attribute(&mut self, id: usize, name: &str) {
        let Some(element) = self.nodes[id].element_data_mut() else {
            return;
        };
        if element.remove_attr(name) {
            self.record(MutationRecord::attribute(id, SmolStr::new(name)));
        }
    }

    pub fn has_class(&self, id: usize, class: &str) -> bool {
        self.nodes[id]
            .element_data()
            .is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: usize, class: &str) {
        let Some(element) = self.nodes[id].element_data_mut() else {
            return;
        };
        if element.add_class(class) {
            self.record(MutationRecord::attribute(id, "class"));
        }
    }

    pub fn remove_class(&mut self, id: usize, class: &str) {
        let Some(element) = self.nodes[id].element_data_mut() else {
            return;
        };
        if element.remove_class(class) {
            self.record(MutationRecord::attribute(id, "class"));
        }
    }

    /// Finds the element whose `id` attribute equals `id_value`.
    pub fn element_by_id(&self, id_value: &str) -> Option<usize> {
        self.nodes
            .iter()
            .find(|(_, node)| {
                node.element_data()
                    .is_some_and(|el| el.attr("id") == Some(id_value))
            })
            .map(|(id, _)| id)
    }

    /// Whether `id` is a strict descendant of `ancestor`.
    pub fn is_descendant_of(&self, id: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    /// Concatenated text content of `id`'s subtree.
    pub fn text_content(&self, id: usize) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = &self.nodes[next];
            match &node.data {
                NodeData::Text(text) => out.push_str(&text.content),
                NodeData::Element(_) => {
                    stack.extend(node.children.iter().rev().copied());
                }
            }
        }
        out
    }

    /// Ids of the live-region (announcement) nodes currently in the tree.
    pub fn live_regions(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|(_, node)| {
                node.element_data()
                    .is_some_and(|el| el.flags.contains(NodeFlags::LIVE_REGION))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of live-region (announcement) nodes currently in the tree.
    pub fn live_region_count(&self) -> usize {
        self.live_regions().len()
    }

    /// Whether `id` currently holds a live-region node.
    pub fn is_live_region(&self, id: usize) -> bool {
        self.contains(id)
            && self.nodes[id]
                .element_data()
                .is_some_and(|el| el.flags.contains(NodeFlags::LIVE_REGION))
    }

    /// Records the container's rendered direction, standing in for the
    /// host's style resolution. `None` means not determinable.
    pub fn set_computed_direction(&mut self, direction: Option<Direction>) {
        self.computed_direction = direction;
    }

    pub fn computed_direction(&self) -> Option<Direction> {
        self.computed_direction
    }

    pub fn has_pending_mutations(&self) -> bool {
        !self.pending_mutations.is_empty()
    }

    /// Drains all mutations recorded since the last drain, as one batch.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending_mutations)
    }

    pub(crate) fn set_node_flags(&mut self, id: usize, flags: NodeFlags) {
        if let Some(element) = self.nodes[id].element_data_mut() {
            element.flags |= flags;
        }
    }

    fn record(&mut self, record: MutationRecord) {
        self.pending_mutations.push(record);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
