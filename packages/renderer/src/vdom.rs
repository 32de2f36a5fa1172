use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attributes and styles are ordered maps so the same input always
/// serializes (and compiles to HTML) byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Reconciliation key (the block id for block roots)
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },

    /// Diagnostic shown in place of a block that couldn't be rendered
    Placeholder {
        block_id: String,
        block_type: String,
        message: String,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn placeholder(
        block_id: impl Into<String>,
        block_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        VNode::Placeholder {
            block_id: block_id.into(),
            block_type: block_type.into(),
            message: message.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute in place; non-elements are left alone
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if let VNode::Element { attributes, .. } = self {
            attributes.insert(key.into(), value.into());
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append `text` as a text child, skipping empty strings
    pub fn with_text(self, text: &str) -> Self {
        if text.is_empty() {
            return self;
        }
        self.with_child(VNode::text(text))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Element { key, .. } => key.as_deref(),
            VNode::Placeholder { block_id, .. } => Some(block_id.as_str()),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(content),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            VNode::Comment { .. } | VNode::Placeholder { .. } => {}
        }
    }
}

/// Rendered page: block roots plus the page-level style rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub nodes: Vec<VNode>,
    pub styles: Vec<CssRule>,
}

/// CSS Rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub properties: Vec<(String, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }
}

/// A declaration value that cannot end its rule or the enclosing `<style>`
pub fn is_safe_style_value(value: &str) -> bool {
    !value.contains(['<', '{', '}', ';'])
}
