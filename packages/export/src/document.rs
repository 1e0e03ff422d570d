//! Assembled export output and document-level metadata

use crate::output::{OutputNode, Role};
use serde::Serialize;

/// Metadata written into the artifact's document properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
}

impl DocumentInfo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Title, body and footer, in page order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub title_node: OutputNode,
    pub output_nodes: Vec<OutputNode>,
    pub footer_node: OutputNode,
}

impl RenderedDocument {
    /// Every node in page order, title first and footer last
    pub fn iter(&self) -> impl Iterator<Item = &OutputNode> {
        std::iter::once(&self.title_node)
            .chain(self.output_nodes.iter())
            .chain(std::iter::once(&self.footer_node))
    }

    /// Body nodes (at any depth) with the given role
    pub fn find_all(&self, role: Role) -> Vec<&OutputNode> {
        self.output_nodes
            .iter()
            .flat_map(|node| node.find_all(role))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.output_nodes.is_empty()
    }
}
