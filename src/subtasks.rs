use crate::config::SubtaskFailure;
use crate::decoder::IssueDecoder;
use crate::document::Node;
use crate::error::DecodeError;
use crate::models::Issue;
use crate::walker::{walk, walk_str};
use tracing::{debug, warn};

/// Keys listed under `fields/subtasks`, in document order. Entries without
/// a string key are ignored.
pub fn subtask_keys(node: &Node) -> Vec<String> {
    walk("fields/subtasks", node)
        .ok()
        .and_then(Node::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(|subtask| walk_str("key", subtask))
        .map(str::to_string)
        .collect()
}

/// Fetches and decodes one subtask. `ancestors` is the chain of issues
/// being decoded above it; meeting one of them again is a cycle.
pub fn resolve_subtask(
    decoder: &IssueDecoder<'_>,
    key: &str,
    ancestors: &mut Vec<String>,
) -> Result<Issue, DecodeError> {
    if ancestors.iter().any(|ancestor| ancestor == key) {
        return Err(DecodeError::CyclicSubtask {
            key: key.to_string(),
        });
    }
    debug!("Fetching subtask {}", key);
    let node = decoder
        .source()
        .fetch_by_key(key)
        .map_err(|source| DecodeError::Fetch {
            key: key.to_string(),
            source,
        })?;
    decoder
        .decode_within(&node, ancestors)
        .map_err(|e| match e {
            DecodeError::CyclicSubtask { .. } => e,
            other => DecodeError::Subtask {
                key: key.to_string(),
                source: Box::new(other),
            },
        })
}

/// Resolves every key in order, one at a time. Failures are handled per
/// [`SubtaskFailure`]; a cycle always fails the whole decode.
pub fn resolve_subtasks(
    decoder: &IssueDecoder<'_>,
    keys: &[String],
    ancestors: &mut Vec<String>,
) -> Result<Vec<Issue>, DecodeError> {
    let mut resolved = Vec::with_capacity(keys.len());
    for key in keys {
        match resolve_subtask(decoder, key, ancestors) {
            Ok(issue) => resolved.push(issue),
            Err(e @ DecodeError::CyclicSubtask { .. }) => return Err(e),
            Err(e) => match decoder.config().subtask_failure {
                SubtaskFailure::Abort => return Err(e),
                SubtaskFailure::Skip => warn!("Leaving out subtask {}: {}", key, e),
            },
        }
    }
    Ok(resolved)
}
