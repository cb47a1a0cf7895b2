//! Dynamically shaped JSON value as handed over by the Jira REST API.
//!
//! Jira documents carry custom fields whose names and types vary between
//! instances, so issues are decoded from this tree instead of a fixed serde
//! schema. All accessors are non-panicking: a wrong shape simply yields
//! `None`.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(HashMap<String, Node>),
}

static NULL: Node = Node::Null;

impl Node {
    pub fn parse(text: &str) -> Result<Node, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Node::from(value))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Node, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Node::from(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup on an object. Absent keys and non-objects both resolve
    /// to `Null`.
    pub fn get(&self, name: &str) -> &Node {
        self.as_object()
            .and_then(|map| map.get(name))
            .unwrap_or(&NULL)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(items) => {
                Node::Array(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(name, value)| (name, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Renders scalars bare (strings unquoted, integral numbers without a
/// fraction), which is what custom field values are shown as.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Number(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "{}", s),
            Node::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::Object(map) => {
                let mut names: Vec<&String> = map.keys().collect();
                names.sort();
                write!(f, "map[")?;
                for (i, name) in names.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", name, map[name])?;
                }
                write!(f, "]")
            }
        }
    }
}
