//! Decodes Jira issue documents into typed issues with comments,
//! attachments, subtasks and a per-day work log.

pub mod collector;
pub mod config;
pub mod decoder;
pub mod document;
pub mod error;
pub mod jira_client;
pub mod lists;
pub mod markup;
pub mod models;
pub mod subtasks;
pub mod time_log;
pub mod walker;

#[cfg(test)]
mod test_utils;

pub use config::{Config, SubtaskFailure};
pub use decoder::{decode_issue, decode_search_results, IssueDecoder, TimeTrackingVariant};
pub use document::Node;
pub use error::{ConfigError, DecodeError, FetchError, WalkError};
pub use jira_client::{DocumentSource, JiraClient};
pub use markup::format_description;
pub use models::{Comment, Issue, IssueFile, TimeLog};
pub use time_log::{format_duration, TimeLogMap};
pub use walker::walk;
