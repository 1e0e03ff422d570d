//! Output-node tree handed to the page-layout renderer

use serde::Serialize;
use std::collections::BTreeMap;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Layout role of an output box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Title,
    Footer,
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    /// Blank line that keeps vertical rhythm
    Spacer,
    OrderedList,
    ListItem,
    NestedList,
    Image,
    Caption,
    CodeBlock,
    Quote,
    Divider,
    Card,
    CardTitle,
    CardSubtext,
    CardBody,
    Link,
}

impl Role {
    pub fn heading(level: u8) -> Self {
        match level {
            2 => Role::Heading2,
            3 => Role::Heading3,
            _ => Role::Heading1,
        }
    }
}

/// Render-ready node handed to the page-layout renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputNode {
    /// Styled box
    Element {
        role: Role,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<OutputNode>,
        /// Repeat on every page, independent of pagination
        #[serde(skip_serializing_if = "is_false")]
        fixed: bool,
    },

    /// Text run with presentation attributes already flattened
    Text {
        content: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
    },

    /// Placeholder for a block whose render failed
    #[serde(rename_all = "camelCase")]
    Error { message: String, block_type: String },
}

impl OutputNode {
    pub fn element(role: Role) -> Self {
        OutputNode::Element {
            role,
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            fixed: false,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        OutputNode::Text {
            content: content.into(),
            styles: BTreeMap::new(),
        }
    }

    pub fn styled_text(content: impl Into<String>, styles: BTreeMap<String, String>) -> Self {
        OutputNode::Text {
            content: content.into(),
            styles,
        }
    }

    pub fn error(message: impl Into<String>, block_type: impl Into<String>) -> Self {
        OutputNode::Error {
            message: message.into(),
            block_type: block_type.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let OutputNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, extra: BTreeMap<String, String>) -> Self {
        match self {
            OutputNode::Element { ref mut styles, .. }
            | OutputNode::Text { ref mut styles, .. } => {
                styles.extend(extra);
            }
            OutputNode::Error { .. } => {}
        }
        self
    }

    pub fn with_child(mut self, child: OutputNode) -> Self {
        if let OutputNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<OutputNode>) -> Self {
        if let OutputNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Mark the node to repeat on every output page
    pub fn pinned(mut self) -> Self {
        if let OutputNode::Element { ref mut fixed, .. } = self {
            *fixed = true;
        }
        self
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            OutputNode::Element { role, .. } => Some(*role),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            OutputNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            OutputNode::Element { styles, .. } | OutputNode::Text { styles, .. } => {
                styles.get(key).map(String::as_str)
            }
            OutputNode::Error { .. } => None,
        }
    }

    pub fn children(&self) -> &[OutputNode] {
        match self {
            OutputNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, OutputNode::Element { fixed: true, .. })
    }

    /// All text below this node, concatenated
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            OutputNode::Text { content, .. } => out.push_str(content),
            OutputNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            OutputNode::Error { .. } => {}
        }
    }

    /// Pre-order walk collecting every element with `role`
    pub fn find_all(&self, role: Role) -> Vec<&OutputNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.role() == Some(role) {
                found.push(node);
            }
        });
        found
    }

    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a OutputNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
