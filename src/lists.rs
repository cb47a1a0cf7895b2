use crate::document::Node;
use crate::models::{Comment, IssueFile};
use crate::walker::walk_str;
use tracing::debug;

pub const COMMENTS_PATH: &str = "fields/comment/comments";
pub const ATTACHMENTS_PATH: &str = "fields/attachment";

/// Decodes a comment array. Elements lacking `id`, `body` or
/// `author.displayName` as strings are dropped; the rest keep their order.
pub fn comments_from_node(node: &Node) -> Vec<Comment> {
    decode_each(node, "comment", |item| {
        Some(Comment {
            id: walk_str("id", item)?.to_string(),
            body: walk_str("body", item)?.to_string(),
            author_name: walk_str("author/displayName", item)?.to_string(),
        })
    })
}

/// Decodes an attachment array, same skipping rules as comments with
/// `filename`, `content` and `self` as the required members.
pub fn files_from_node(node: &Node) -> Vec<IssueFile> {
    decode_each(node, "attachment", |item| {
        Some(IssueFile {
            name: walk_str("filename", item)?.to_string(),
            url: walk_str("content", item)?.to_string(),
            self_url: walk_str("self", item)?.to_string(),
        })
    })
}

fn decode_each<T>(node: &Node, what: &str, decode: impl Fn(&Node) -> Option<T>) -> Vec<T> {
    let items = node.as_array().unwrap_or_default();
    let decoded: Vec<T> = items.iter().filter_map(&decode).collect();
    if decoded.len() < items.len() {
        debug!(
            "Skipped {} malformed {} entries",
            items.len() - decoded.len(),
            what
        );
    }
    decoded
}
