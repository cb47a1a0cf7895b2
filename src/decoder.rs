//! Builds [`Issue`] values out of raw Jira issue documents.
//!
//! Key, type and summary are mandatory. Time-tracking values are mandatory
//! too, but which fields carry them depends on the issue type: subtasks
//! report their own time, every other type reports the aggregate that
//! rolls up its subtasks. Everything else degrades to an empty value.

use crate::config::Config;
use crate::document::Node;
use crate::error::DecodeError;
use crate::jira_client::DocumentSource;
use crate::lists::{comments_from_node, files_from_node, ATTACHMENTS_PATH, COMMENTS_PATH};
use crate::models::Issue;
use crate::subtasks::{resolve_subtasks, subtask_keys};
use crate::time_log::time_log_for_issue;
use crate::walker::{walk, walk_str};
use tracing::{debug, info, warn};

/// Field names holding the three time-tracking values of one issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTrackingFields {
    pub original_estimate: &'static str,
    pub remaining_estimate: &'static str,
    pub time_spent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeTrackingVariant {
    /// Any issue that may own subtasks; reads the aggregate fields.
    Standard,
    /// `Sub-task` issues; reads the issue's own fields.
    SubTask,
}

impl TimeTrackingVariant {
    pub const SUB_TASK_TYPE: &'static str = "Sub-task";

    pub fn for_issue_type(issue_type: &str) -> Self {
        if issue_type == Self::SUB_TASK_TYPE {
            TimeTrackingVariant::SubTask
        } else {
            TimeTrackingVariant::Standard
        }
    }

    pub fn fields(self) -> TimeTrackingFields {
        match self {
            TimeTrackingVariant::Standard => TimeTrackingFields {
                original_estimate: "aggregatetimeoriginalestimate",
                remaining_estimate: "aggregatetimeestimate",
                time_spent: "aggregatetimespent",
            },
            TimeTrackingVariant::SubTask => TimeTrackingFields {
                original_estimate: "timeoriginalestimate",
                remaining_estimate: "timeremainingestimate",
                time_spent: "timespent",
            },
        }
    }

    /// Whether issues of this variant can list subtasks of their own.
    pub fn has_subtasks(self) -> bool {
        matches!(self, TimeTrackingVariant::Standard)
    }
}

/// Decodes one issue document, fetching subtasks through `source` when
/// `config.include_subtasks` is set.
pub fn decode_issue(
    node: &Node,
    source: &dyn DocumentSource,
    config: &Config,
) -> Result<Issue, DecodeError> {
    IssueDecoder::new(source, config).decode(node)
}

/// Decodes the `issues` array of a search response. Issues that fail to
/// decode are logged and left out.
pub fn decode_search_results(
    node: &Node,
    source: &dyn DocumentSource,
    config: &Config,
) -> Vec<Issue> {
    let decoder = IssueDecoder::new(source, config);
    let issues = walk("issues", node)
        .ok()
        .and_then(Node::as_array)
        .unwrap_or_default();
    issues
        .iter()
        .filter_map(|issue| match decoder.decode(issue) {
            Ok(issue) => Some(issue),
            Err(e) => {
                warn!(
                    "Skipping issue {}: {}",
                    walk_str("key", issue).unwrap_or("<no key>"),
                    e
                );
                None
            }
        })
        .collect()
}

pub struct IssueDecoder<'a> {
    source: &'a dyn DocumentSource,
    config: &'a Config,
}

impl<'a> IssueDecoder<'a> {
    pub fn new(source: &'a dyn DocumentSource, config: &'a Config) -> Self {
        Self { source, config }
    }

    pub(crate) fn source(&self) -> &'a dyn DocumentSource {
        self.source
    }

    pub(crate) fn config(&self) -> &'a Config {
        self.config
    }

    pub fn decode(&self, node: &Node) -> Result<Issue, DecodeError> {
        self.decode_within(node, &mut Vec::new())
    }

    /// `ancestors` holds the keys of the issues currently being decoded
    /// above this one, outermost first.
    pub(crate) fn decode_within(
        &self,
        node: &Node,
        ancestors: &mut Vec<String>,
    ) -> Result<Issue, DecodeError> {
        let key = required_str("key", "key", node)?;
        // A document may come back under a different key than requested.
        if ancestors.iter().any(|ancestor| ancestor == &key) {
            return Err(DecodeError::CyclicSubtask { key });
        }
        let issue_type = required_str("fields/issuetype/name", "issuetype", node)?;
        let summary = required_str("fields/summary", "summary", node)?;
        debug!("Decoding {} ({})", key, issue_type);

        let mut issue = Issue {
            key,
            issue_type,
            summary,
            parent: optional_str("fields/parent/key", node),
            description: optional_str("fields/description", node),
            status: optional_str("fields/status/name", node),
            assignee: optional_str("fields/assignee/name", node),
            updated: optional_str("fields/updated", node),
            files: walk(ATTACHMENTS_PATH, node)
                .map(files_from_node)
                .unwrap_or_default(),
            comments: walk(COMMENTS_PATH, node)
                .map(comments_from_node)
                .unwrap_or_default(),
            points: custom_field(&self.config.points_field, node).unwrap_or_default(),
            ..Default::default()
        };
        if self.config.verbose {
            for comment in &issue.comments {
                info!("{}: {}", issue.key, comment);
            }
        }

        let variant = TimeTrackingVariant::for_issue_type(&issue.issue_type);
        let fields = variant.fields();
        issue.original_estimate = time_field(&issue.key, fields.original_estimate, node)?;
        issue.remaining_estimate = time_field(&issue.key, fields.remaining_estimate, node)?;
        issue.time_spent = time_field(&issue.key, fields.time_spent, node)?;
        issue.time_log = time_log_for_issue(&issue.key, node)?;

        if variant.has_subtasks() && self.config.include_subtasks {
            let keys = subtask_keys(node);
            ancestors.push(issue.key.clone());
            let resolved = resolve_subtasks(self, &keys, ancestors);
            ancestors.pop();
            issue.sub_tasks = resolved?;
        }
        Ok(issue)
    }
}

fn required_str(path: &str, field: &'static str, node: &Node) -> Result<String, DecodeError> {
    walk_str(path, node)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(DecodeError::MissingField { field })
}

fn optional_str(path: &str, node: &Node) -> String {
    walk_str(path, node).unwrap_or_default().to_string()
}

fn time_field(key: &str, field: &'static str, node: &Node) -> Result<f64, DecodeError> {
    walk(&format!("fields/{}", field), node)?
        .as_f64()
        .ok_or_else(|| DecodeError::MissingTimeTracking {
            key: key.to_string(),
            field,
        })
}

/// Looks up a custom field by exact name and renders its value. `None` when
/// the field is absent or null.
pub fn custom_field(name: &str, node: &Node) -> Option<String> {
    let fields = walk("fields", node).ok()?.as_object()?;
    fields
        .iter()
        .find(|(field, value)| field.as_str() == name && !value.is_null())
        .map(|(_, value)| value.to_string())
}
