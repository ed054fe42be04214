//! Per-project hour breakdown.

use super::types::{ProjectStat, RawProject};

const UNKNOWN_PROJECT: &str = "Unknown";

/// Maps raw project entries to `{name, hours, seconds}` in source order.
pub fn aggregate_projects(projects: &[RawProject]) -> Vec<ProjectStat> {
    projects
        .iter()
        .map(|proj| {
            let name = proj
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(UNKNOWN_PROJECT)
                .to_string();
            let seconds = proj.total_seconds.unwrap_or(0.0);
            ProjectStat {
                name,
                hours: seconds / 3600.0,
                seconds,
            }
        })
        .collect()
}
