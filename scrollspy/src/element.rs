use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<Element>),
}

/// A node in the observed tree.
///
/// Carries just enough structure for selector matching and identity
/// tracking: a stable string id, a tag name, and CSS-style classes.
/// Identity is the id string; two structurally equal elements with
/// different ids are distinct targets.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub content: Content,
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("el"),
            tag: "box",
            classes: Vec::new(),
            content: Content::None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: generate_id("el"),
            tag: "text",
            classes: Vec::new(),
            content: Content::Text(text.into()),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Children(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}
