mod element;

pub use element::{Attribute, ElementData, NodeFlags};

/// A node in the document tree.
///
/// Nodes are stored in the document's slab and refer to each other by id.
#[derive(Debug, Clone)]
pub struct Node {
    /// This node's id in the document's slab.
    pub id: usize,
    /// Parent node id, if attached.
    pub parent: Option<usize>,
    /// Child node ids, in document order.
    pub children: Vec<usize>,
    /// Element- or text-specific data.
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Element(ElementData),
    Text(TextData),
}

#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

impl Node {
    pub fn element_data(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_text_node(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
}
