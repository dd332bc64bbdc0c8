//! XML to [`Node`] adapter.
//!
//! Shape of an element value:
//! - no attributes and no child elements: `Text` holding its text (possibly empty);
//! - otherwise a `Map` with `$` (attributes), `_` (direct text, when not blank)
//!   and one key per child tag. A tag seen once maps straight to its value, a
//!   repeated tag maps to a `List` in document order.

use anyhow::Context as _;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::tree::Node;

/// Parses a whole document and returns the root element's value.
pub fn parse_document(bytes: &[u8]) -> anyhow::Result<Node> {
    let text = std::str::from_utf8(bytes).context("document is not valid UTF-8")?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc = roxmltree::Document::parse(text).context("parse XML document")?;
    let root = doc.root_element();
    tracing::debug!(root = root.tag_name().name(), "parsed XML document");
    Ok(element_value(root))
}

fn element_value(element: roxmltree::Node<'_, '_>) -> Node {
    let has_attributes = element.attributes().next().is_some();
    let has_children = element.children().any(|n| n.is_element());

    let mut text = String::new();
    for child in element.children() {
        if child.is_text()
            && let Some(t) = child.text()
        {
            text.push_str(t);
        }
    }

    if !has_attributes && !has_children {
        return Node::Text(text);
    }

    let mut map = IndexMap::new();
    if has_attributes {
        let attrs = element
            .attributes()
            .map(|attr| (attr.name().to_owned(), Node::text(attr.value())))
            .collect();
        map.insert("$".to_owned(), Node::Map(attrs));
    }
    if !text.trim().is_empty() {
        map.insert("_".to_owned(), Node::Text(text));
    }

    for child in element.children().filter(|n| n.is_element()) {
        let value = element_value(child);
        match map.entry(child.tag_name().name().to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::List(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, Node::List(Vec::new()));
                    *existing = Node::List(vec![first, value]);
                }
            },
        }
    }

    Node::Map(map)
}
