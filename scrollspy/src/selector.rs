use thiserror::Error;

use crate::element::{Content, Element};

/// Failure to parse a selector string.
///
/// A malformed selector is the caller's problem and always propagates;
/// swallowing it would leave a tracker silently watching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("empty selector in list")]
    EmptyPart,
    #[error("`{0}` must be followed by a name")]
    MissingName(char),
    #[error("unexpected character `{0}` in selector")]
    InvalidChar(char),
}

/// One compound selector: optional tag plus id/class constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != element.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if id != &element.id {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A parsed selector list such as `".section, #intro, text.note"`.
///
/// Supported grammar: comma-separated compound selectors, where a compound
/// is an optional tag name (or `*`) followed by any number of `#id` and
/// `.class` parts. Combinators, attributes and pseudo-classes are not
/// supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut compounds = Vec::new();
        for part in trimmed.split(',') {
            compounds.push(parse_compound(part.trim())?);
        }
        Ok(Self { compounds })
    }

    /// Whether any compound in the list matches the element.
    pub fn matches(&self, element: &Element) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(part: &str) -> Result<Compound, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::EmptyPart);
    }

    let mut chars = part.chars().peekable();
    let mut compound = Compound {
        tag: None,
        id: None,
        classes: Vec::new(),
    };

    // Leading tag name, or `*` for any tag.
    match chars.peek() {
        Some('*') => {
            chars.next();
        }
        Some(c) if is_name_char(*c) => {
            let mut tag = String::new();
            while let Some(c) = chars.peek() {
                if !is_name_char(*c) {
                    break;
                }
                tag.push(*c);
                chars.next();
            }
            compound.tag = Some(tag);
        }
        _ => {}
    }

    while let Some(c) = chars.next() {
        match c {
            '#' | '.' => {
                let mut name = String::new();
                while let Some(n) = chars.peek() {
                    if !is_name_char(*n) {
                        break;
                    }
                    name.push(*n);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(SelectorError::MissingName(c));
                }
                if c == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            other => return Err(SelectorError::InvalidChar(other)),
        }
    }

    Ok(compound)
}

/// Collect ids of all elements matching the selector, in tree order.
/// The root itself participates, so a container can be its own target.
pub fn query_all(root: &Element, selector: &Selector) -> Vec<String> {
    let mut result = Vec::new();
    collect_matches(root, selector, &mut result);
    result
}

fn collect_matches(element: &Element, selector: &Selector, result: &mut Vec<String>) {
    if selector.matches(element) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_matches(child, selector, result);
        }
    }
}
