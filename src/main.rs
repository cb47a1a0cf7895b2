use jira_worklog::collector::collect_issues;
use jira_worklog::{format_duration, Config, JiraClient};
use std::env;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let level = if config.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(e) = run(&config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let jql = env::var("JIRA_ISSUES_JQL").map_err(|_| "JIRA_ISSUES_JQL must be set")?;
    let jira_client = JiraClient::from_env()?;

    let issues = collect_issues(&jira_client, config, &jql)?;
    for issue in &issues {
        println!("{}\n", issue.report(&config.server));
        for (author, seconds) in issue.time_log.sum_by_author() {
            println!("  {}: {}", author, format_duration(seconds));
        }
        for sub_task in &issue.sub_tasks {
            println!("  - {} ({})", sub_task, sub_task.spent_percentage());
        }
        println!();
    }
    tracing::info!("Reported {} issues", issues.len());
    Ok(())
}
