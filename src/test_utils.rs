//! Fixtures shared by the unit tests.

use crate::document::Node;
use crate::error::FetchError;
use crate::jira_client::DocumentSource;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory document source that records every key it was asked for.
#[derive(Default)]
pub struct MapSource {
    docs: HashMap<String, Node>,
    fetched: RefCell<Vec<String>>,
}

impl MapSource {
    pub fn with(docs: Vec<Value>) -> Self {
        Self {
            docs: docs
                .into_iter()
                .map(|doc| {
                    let key = doc["key"].as_str().unwrap_or_default().to_string();
                    (key, Node::from(doc))
                })
                .collect(),
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// Serves the document stored under `key` when `alias` is requested,
    /// like Jira does for issues that were moved to another project.
    pub fn alias(mut self, alias: &str, key: &str) -> Self {
        if let Some(doc) = self.docs.get(key).cloned() {
            self.docs.insert(alias.to_string(), doc);
        }
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl DocumentSource for MapSource {
    fn fetch_by_key(&self, key: &str) -> Result<Node, FetchError> {
        self.fetched.borrow_mut().push(key.to_string());
        self.docs
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::Other(format!("no issue {}", key)))
    }
}

/// A complete issue document carrying both sets of time-tracking fields.
pub fn issue_doc(key: &str, issue_type: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {}", key),
            "issuetype": {"name": issue_type},
            "status": {"name": "In Progress"},
            "assignee": {"name": "bob", "displayName": "Bob"},
            "description": null,
            "updated": "2013-11-08T16:00:00.000-0500",
            "customfield_10003": 5,
            "aggregatetimeoriginalestimate": 7200,
            "aggregatetimeestimate": 3600,
            "aggregatetimespent": 3600,
            "timeoriginalestimate": 1800,
            "timeremainingestimate": 900,
            "timespent": 900,
            "attachment": [
                {"filename": "log.txt", "content": "https://jira/secure/log.txt", "self": "https://jira/rest/api/2/attachment/1"}
            ],
            "comment": {"comments": [
                {"id": "100", "body": "Looks good", "author": {"displayName": "Amy"}}
            ]},
            "worklog": {"worklogs": [
                {"author": {"name": "bob"}, "started": "2013-11-08T11:37:03.000-0500", "timeSpentSeconds": 3600}
            ]},
            "subtasks": []
        }
    })
}

/// A `Sub-task` document with only its own time-tracking fields.
pub fn subtask_doc(key: &str, parent: &str) -> Value {
    let mut doc = issue_doc(key, "Sub-task");
    let fields = &mut doc["fields"];
    fields["parent"] = json!({"key": parent});
    if let Some(fields) = fields.as_object_mut() {
        for aggregate in [
            "aggregatetimeoriginalestimate",
            "aggregatetimeestimate",
            "aggregatetimespent",
        ] {
            fields.remove(aggregate);
        }
    }
    doc
}

pub fn with_subtasks(mut doc: Value, keys: &[&str]) -> Value {
    doc["fields"]["subtasks"] = keys.iter().map(|key| json!({"key": key})).collect();
    doc
}
