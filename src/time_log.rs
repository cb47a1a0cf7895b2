use crate::document::Node;
use crate::error::WalkError;
use crate::models::TimeLog;
use crate::walker::{walk, walk_str};
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Format of the `started` timestamp on Jira work logs,
/// e.g. `2013-11-08T11:37:03.000-0500`.
pub const JIRA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

pub const WORKLOG_PATH: &str = "fields/worklog/worklogs";

/// Work logs of one issue bucketed by the day they started on.
///
/// Days are midnight in the offset of the source timestamp; ordering and
/// equality follow the absolute instant of that midnight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeLogMap {
    days: BTreeMap<DateTime<FixedOffset>, Vec<TimeLog>>,
}

impl TimeLogMap {
    /// Builds the map from an issue document. Entries without an author,
    /// with an unparsable `started` or without a duration are dropped.
    pub fn from_worklogs(issue_key: &str, worklogs: &Node) -> TimeLogMap {
        let mut map = TimeLogMap::default();
        for entry in worklogs.as_array().unwrap_or_default() {
            match parse_entry(issue_key, entry) {
                Some(log) => map.insert(log),
                None => debug!("Skipping malformed work log entry on {}", issue_key),
            }
        }
        map
    }

    pub fn insert(&mut self, log: TimeLog) {
        self.days.entry(log.date).or_default().push(log);
    }

    pub fn get(&self, date: &DateTime<FixedOffset>) -> &[TimeLog] {
        self.days.get(date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<FixedOffset>, &Vec<TimeLog>)> {
        self.days.iter()
    }

    pub fn sum_for_key(&self, date: &DateTime<FixedOffset>) -> i64 {
        self.get(date).iter().map(|log| log.seconds).sum()
    }

    pub fn sum_for_map(&self) -> i64 {
        self.days.keys().map(|date| self.sum_for_key(date)).sum()
    }

    pub fn sorted_keys(&self) -> Vec<DateTime<FixedOffset>> {
        self.days.keys().copied().collect()
    }

    /// Total seconds per author across every day.
    pub fn sum_by_author(&self) -> BTreeMap<String, i64> {
        self.days
            .values()
            .flatten()
            .into_group_map_by(|log| log.author.clone())
            .into_iter()
            .map(|(author, logs)| (author, logs.iter().map(|log| log.seconds).sum::<i64>()))
            .collect()
    }
}

/// Extracts the work log of an issue document. The work-log object itself
/// must be reachable; a missing or non-array list is just an empty log.
pub fn time_log_for_issue(
    issue_key: &str,
    issue: &Node,
) -> Result<TimeLogMap, WalkError> {
    let worklogs = walk(WORKLOG_PATH, issue)?;
    Ok(TimeLogMap::from_worklogs(issue_key, worklogs))
}

fn parse_entry(issue_key: &str, entry: &Node) -> Option<TimeLog> {
    let author = walk_str("author/name", entry).or_else(|| walk_str("author/displayName", entry))?;
    let started = walk_str("started", entry)?;
    let started = DateTime::parse_from_str(started, JIRA_TIME_FORMAT).ok()?;
    let date = started
        .date_naive()
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(*started.offset())
        .single()?;
    let seconds = walk("timeSpentSeconds", entry).ok()?.as_f64()? as i64;
    Some(TimeLog {
        key: issue_key.to_string(),
        date,
        seconds,
        author: author.to_string(),
    })
}

/// Renders seconds as `"{h}h {m}m {s}s"`, each number space-padded to two
/// columns: 3661 is `" 1h  1m  1s"`.
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds - hours * 3600) / 60;
    let seconds = seconds - hours * 3600 - minutes * 60;
    format!("{:2}h {:2}m {:2}s", hours, minutes, seconds)
}

impl fmt::Display for TimeLogMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (date, logs) in &self.days {
            writeln!(f, "  {}", date.format("%Y-%m-%d %z"))?;
            for log in logs {
                writeln!(f, "    {}", format_duration(log.seconds))?;
            }
        }
        Ok(())
    }
}

impl Serialize for TimeLogMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, logs) in &self.days {
            map.serialize_entry(&date.to_rfc3339(), logs)?;
        }
        map.end()
    }
}
