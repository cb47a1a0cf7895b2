use crate::markup::format_description;
use crate::time_log::{format_duration, TimeLogMap};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Issue {
    pub key: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub summary: String,
    pub parent: String,
    pub description: String,
    pub status: String,
    pub assignee: String,
    pub updated: String,
    pub files: Vec<IssueFile>,
    pub comments: Vec<Comment>,
    pub time_log: TimeLogMap,
    pub original_estimate: f64,
    pub remaining_estimate: f64,
    pub time_spent: f64,
    pub points: String,
    pub sub_tasks: Vec<Issue>,
}

impl Issue {
    pub fn url(&self, server: &str) -> String {
        format!("https://{}/browse/{}", server, self.key)
    }

    pub fn spent_percentage(&self) -> String {
        if self.original_estimate == 0.0 {
            return "N/A".to_string();
        }
        format!("{:.2}%", self.time_spent / self.original_estimate * 100.0)
    }

    /// Hex SHA-256 of the `updated` timestamp. Changes whenever Jira
    /// reports a new modification time for the issue.
    pub fn etag(&self) -> String {
        format!("{:x}", Sha256::digest(self.updated.as_bytes()))
    }

    /// Plain-text summary of the issue, one field per paragraph.
    pub fn report(&self, server: &str) -> String {
        let mut sections = vec![
            self.to_string(),
            format!("Jira URL: {}", self.url(server)),
            format!("Status: {}", self.status),
            format!("Assignee: {}", self.assignee),
            format!(
                "Original time estimate: {}",
                format_duration(self.original_estimate as i64)
            ),
            format!("Time spent: {}", format_duration(self.time_spent as i64)),
            format!(
                "Remaining time estimated: {}",
                format_duration(self.remaining_estimate as i64)
            ),
            format!("Description: {}", format_description(&self.description)),
        ];
        if !self.files.is_empty() {
            sections.push(format!("Files: \n{}", indented(&self.files)));
        }
        if !self.comments.is_empty() {
            sections.push(format!("Comments: \n{}", indented(&self.comments)));
        }
        if !self.time_log.is_empty() {
            sections.push(format!("Worklog: \n{}", self.time_log));
        }
        sections.join("\n\n")
    }
}

fn indented<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("\t{}\n", item)).collect()
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parent.is_empty() {
            write!(f, "{} ({}): {}", self.key, self.issue_type, self.summary)
        } else {
            write!(
                f,
                "{} ({} of {}): {}",
                self.key, self.issue_type, self.parent, self.summary
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub author_name: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} by {}: {}", self.id, self.author_name, self.body)
    }
}

/// An attachment. `self_url` is the resource to DELETE to remove it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueFile {
    pub name: String,
    pub url: String,
    pub self_url: String,
}

impl fmt::Display for IssueFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.url)
    }
}

/// One work-log record. `date` is midnight of the day the work started, in
/// the offset the record was logged with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLog {
    pub key: String,
    pub date: DateTime<FixedOffset>,
    pub seconds: i64,
    pub author: String,
}

impl fmt::Display for TimeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.key, format_duration(self.seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> Issue {
        Issue {
            key: "PRJ-7".to_string(),
            issue_type: "Story".to_string(),
            summary: "Export timesheets".to_string(),
            status: "Open".to_string(),
            original_estimate: 7200.0,
            time_spent: 1800.0,
            ..Default::default()
        }
    }

    #[test]
    fn display_without_parent() {
        assert_eq!(issue().to_string(), "PRJ-7 (Story): Export timesheets");
    }

    #[test]
    fn display_with_parent() {
        let issue = Issue {
            parent: "PRJ-1".to_string(),
            issue_type: "Sub-task".to_string(),
            ..issue()
        };
        assert_eq!(
            issue.to_string(),
            "PRJ-7 (Sub-task of PRJ-1): Export timesheets"
        );
    }

    #[test]
    fn url_uses_given_server() {
        assert_eq!(
            issue().url("jira.example.com"),
            "https://jira.example.com/browse/PRJ-7"
        );
    }

    #[test]
    fn percentage_of_estimate() {
        assert_eq!(issue().spent_percentage(), "25.00%");
        let unestimated = Issue {
            original_estimate: 0.0,
            ..issue()
        };
        assert_eq!(unestimated.spent_percentage(), "N/A");
    }

    #[test]
    fn report_lists_optional_sections_only_when_present() {
        let mut issue = issue();
        let report = issue.report("jira.example.com");
        assert!(report.contains("Status: Open"));
        assert!(report.contains("Time spent:  0h 30m  0s"));
        assert!(!report.contains("Comments:"));

        issue.comments.push(Comment {
            id: "10".to_string(),
            body: "done".to_string(),
            author_name: "Bob".to_string(),
        });
        let report = issue.report("jira.example.com");
        assert!(report.contains("Comments: \n\t#10 by Bob: done\n"));
    }

    #[test]
    fn report_renders_description_markup() {
        let issue = Issue {
            description: "Needs *review* by {color:red}QA{color}".to_string(),
            ..issue()
        };
        let report = issue.report("jira.example.com");
        assert!(report
            .contains("Description: Needs \x1b[1mreview\x1b[22m by \x1b[31mQA\x1b[39m"));
    }

    #[test]
    fn etag_follows_updated_timestamp() {
        assert_eq!(
            issue().etag(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let updated = Issue {
            updated: "2024-03-05T10:00:00.000+0000".to_string(),
            ..issue()
        };
        let same = Issue {
            summary: "Renamed".to_string(),
            ..updated.clone()
        };
        let later = Issue {
            updated: "2024-03-05T11:00:00.000+0000".to_string(),
            ..issue()
        };
        assert_eq!(updated.etag().len(), 64);
        assert_eq!(updated.etag(), same.etag());
        assert_ne!(updated.etag(), later.etag());
    }

    #[test]
    fn serializes_type_field_name() {
        let json = serde_json::to_value(issue()).unwrap();
        assert_eq!(json["type"], "Story");
        assert_eq!(json["key"], "PRJ-7");
    }
}
