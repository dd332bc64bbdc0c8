//! Semi-structured document tree and the lenient path reader used by every
//! extractor.
//!
//! Reads never fail: a path that does not resolve yields the caller's default.

use indexmap::IndexMap;

/// Keys that hold an element's inner text when it also carries attributes.
pub const TEXT_KEYS: [&str; 2] = ["_", "$t"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    List(Vec<Node>),
    Map(IndexMap<String, Node>),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Strips any number of single-element list wrappers.
    pub fn unwrapped(&self) -> &Node {
        let mut node = self;
        while let Node::List(items) = node {
            if items.len() != 1 {
                break;
            }
            node = &items[0];
        }
        node
    }

    fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Node::Map(map) => map.get(segment),
            Node::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            Node::Text(_) => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Node::Text(text) => text.is_empty(),
            Node::List(items) => items.is_empty(),
            Node::Map(_) => false,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Text(String::new()),
            serde_json::Value::Bool(b) => Node::Text(b.to_string()),
            serde_json::Value::Number(n) => Node::Text(n.to_string()),
            serde_json::Value::String(s) => Node::Text(s),
            serde_json::Value::Array(items) => {
                Node::List(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Walks `segments` from `tree`, then normalizes the result: single-element
/// lists are unwrapped, text-marker mappings collapse to their text, and empty
/// values count as absent.
pub fn lookup<'a>(tree: &'a Node, segments: &[&str]) -> Option<&'a Node> {
    let mut node = tree;
    for segment in segments {
        node = node.child(segment)?;
    }

    let mut node = node.unwrapped();
    if let Node::Map(map) = node
        && let Some(text) = TEXT_KEYS.iter().find_map(|key| map.get(*key))
    {
        node = text.unwrapped();
    }

    if node.is_empty() { None } else { Some(node) }
}

/// Dotted-path form of [`lookup`]. An empty path addresses `tree` itself.
pub fn get<'a>(tree: &'a Node, path: &str) -> Option<&'a Node> {
    if path.is_empty() {
        return lookup(tree, &[]);
    }
    let segments: Vec<&str> = path.split('.').collect();
    lookup(tree, &segments)
}

/// Text at `path`, or `default` when the path is absent, empty, or does not
/// resolve to text.
pub fn get_text(tree: &Node, path: &str, default: &str) -> String {
    match get(tree, path) {
        Some(Node::Text(text)) => text.clone(),
        _ => default.to_owned(),
    }
}

pub fn parse_int_or(text: &str, default: i64) -> i64 {
    text.trim().parse::<i64>().unwrap_or(default)
}
