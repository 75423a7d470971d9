//! Tree nodes and child access.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::dataset::Dataset;
use crate::error::StoreError;

/// Kind of a named child within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildKind {
    Group,
    Dataset,
}

/// A child of a group: either a nested group or a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
}

/// A group: the container tree node.
///
/// Children and attributes preserve insertion order, which keeps error
/// reporting and traversal deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Attribute>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute attachment.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Builder-style group child attachment.
    pub fn with_group(mut self, name: impl Into<String>, group: Group) -> Self {
        self.children.insert(name.into(), Node::Group(group));
        self
    }

    /// Builder-style dataset child attachment.
    pub fn with_dataset(mut self, name: impl Into<String>, dataset: Dataset) -> Self {
        self.children.insert(name.into(), Node::Dataset(dataset));
        self
    }

    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) {
        self.children.insert(name.into(), Node::Group(group));
    }

    pub fn insert_dataset(&mut self, name: impl Into<String>, dataset: Dataset) {
        self.children.insert(name.into(), Node::Dataset(dataset));
    }

    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// The kind of a named child, or `None` if absent.
    pub fn child_kind(&self, name: &str) -> Option<ChildKind> {
        self.children.get(name).map(|node| match node {
            Node::Group(_) => ChildKind::Group,
            Node::Dataset(_) => ChildKind::Dataset,
        })
    }

    /// Opens a named child as a group.
    pub fn open_group(&self, name: &str) -> Result<&Group, StoreError> {
        match self.children.get(name) {
            Some(Node::Group(group)) => Ok(group),
            _ => Err(StoreError::ExpectedGroup(name.to_string())),
        }
    }

    /// Opens a named child as a dataset.
    pub fn open_dataset(&self, name: &str) -> Result<&Dataset, StoreError> {
        match self.children.get(name) {
            Some(Node::Dataset(dataset)) => Ok(dataset),
            _ => Err(StoreError::ExpectedDataset(name.to_string())),
        }
    }

    /// Mutable access to a named child group, for in-place test surgery.
    pub fn open_group_mut(&mut self, name: &str) -> Result<&mut Group, StoreError> {
        match self.children.get_mut(name) {
            Some(Node::Group(group)) => Ok(group),
            _ => Err(StoreError::ExpectedGroup(name.to_string())),
        }
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Iterates over child names in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Result<&Attribute, StoreError> {
        self.attributes
            .get(name)
            .ok_or_else(|| StoreError::ExpectedAttribute(name.to_string()))
    }
}
