use crate::document::Node;
use crate::error::WalkError;

/// Follows a slash-delimited path such as `fields/issuetype/name`.
///
/// Every segment but the last must land on an object. The last lookup is
/// lenient: an absent key comes back as `Null` and it is up to the caller
/// to check the type of what it got. Arrays are never indexed.
pub fn walk<'a>(path: &str, node: &'a Node) -> Result<&'a Node, WalkError> {
    let segments: Vec<&str> = path.split('/').collect();
    let mut current = node;
    for (i, name) in segments.iter().enumerate() {
        let map = current.as_object().ok_or_else(|| WalkError::NotTraversable {
            path: path.to_string(),
            segment: i.saturating_sub(1),
            name: match i {
                0 => String::new(),
                _ => segments[i - 1].to_string(),
            },
        })?;
        current = map.get(*name).unwrap_or(&NULL);
    }
    Ok(current)
}

static NULL: Node = Node::Null;

/// Shorthand for the common "optional string" lookup.
pub fn walk_str<'a>(path: &str, node: &'a Node) -> Option<&'a str> {
    walk(path, node).ok().and_then(Node::as_str)
}
