use crate::config::Config;
use crate::decoder::decode_search_results;
use crate::error::FetchError;
use crate::jira_client::JiraClient;
use crate::models::Issue;
use crate::time_log::format_duration;
use crate::walker::walk;
use tracing::info;

/// Runs a JQL search page by page and decodes every issue it returns.
/// Issues that fail to decode are left out; a failed page request aborts.
pub fn collect_issues(
    jira_client: &JiraClient,
    config: &Config,
    jql: &str,
) -> Result<Vec<Issue>, FetchError> {
    info!("Collecting issues for '{}'...", jql);
    let mut issues: Vec<Issue> = Vec::new();
    let mut start_at = 0;

    loop {
        let page = jira_client.search(jql, start_at)?;
        let total = walk("total", &page)
            .ok()
            .and_then(|total| total.as_f64())
            .unwrap_or_default() as usize;
        let page_size = walk("issues", &page)
            .ok()
            .and_then(|issues| issues.as_array())
            .map_or(0, |issues| issues.len());

        issues.extend(decode_search_results(&page, jira_client, config));
        start_at += page_size;

        if page_size == 0 || start_at >= total {
            break;
        }
    }

    for issue in &issues {
        info!(
            "Collected issue {}: {}, estimate {}, spent {}, {}",
            issue.key,
            issue.summary,
            format_duration(issue.original_estimate as i64),
            format_duration(issue.time_spent as i64),
            if issue.assignee.is_empty() {
                "unassigned"
            } else {
                issue.assignee.as_str()
            }
        );
    }
    Ok(issues)
}
