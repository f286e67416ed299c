use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;
use smol_str::SmolStr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Transient assistive-technology status element. These are created
        /// by announcements and removed again after a short lifetime.
        const LIVE_REGION = 0b0001;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub value: SmolStr,
}

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's tag name.
    pub name: SmolStr,

    /// The element's attributes.
    pub attrs: SmallVec<[Attribute; 4]>,

    pub flags: NodeFlags,
}

impl ElementData {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        ElementData {
            name: name.into(),
            attrs: SmallVec::new(),
            flags: NodeFlags::empty(),
        }
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        let attr = self.attrs.iter().find(|attr| attr.name == name)?;
        Some(&attr.value)
    }

    pub fn attr_parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        let attr = self.attrs.iter().find(|attr| attr.name == name)?;
        attr.value.parse::<T>().ok()
    }

    /// Detects the presence of the attribute, treating *any* value as truthy.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|attr| attr.name == name)
    }

    /// Sets an attribute, returning `true` if the stored value changed
    /// (the attribute was added or had a different value before).
    pub fn set_attr(&mut self, name: &str, value: &str) -> bool {
        match self.attrs.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => {
                if attr.value == value {
                    false
                } else {
                    attr.value = SmolStr::new(value);
                    true
                }
            }
            None => {
                self.attrs.push(Attribute {
                    name: SmolStr::new(name),
                    value: SmolStr::new(value),
                });
                true
            }
        }
    }

    /// Removes an attribute, returning `true` if it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let len_before = self.attrs.len();
        self.attrs.retain(|attr| attr.name != name);
        self.attrs.len() != len_before
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Adds a class token, returning `true` if the class list changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let current = self.attr("class").unwrap_or("");
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_attr("class", &updated)
    }

    /// Removes a class token, returning `true` if the class list changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let updated = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &updated)
    }
}
