use crate::models::{Row, Series};
use crate::options::OptionBag;
use chrono::{DateTime, Utc};

/// Source of repository metrics. Errors are opaque here and are forwarded to
/// the caller as-is.
pub trait MetricsProvider: Send + Sync {
    fn total_stars(&self, repository: &str) -> anyhow::Result<u64>;
    fn total_watchers(&self, repository: &str) -> anyhow::Result<u64>;
    fn total_open_issues(&self, repository: &str) -> anyhow::Result<u64>;
    fn list_repositories(&self, limit: usize, order: &str, metrics: &[String]) -> anyhow::Result<Vec<Row>>;
    fn list_branches(&self, repository: &str, limit: usize) -> anyhow::Result<Vec<Row>>;
    fn list_issues(&self, repository: &str, limit: usize) -> anyhow::Result<Vec<Row>>;
    fn list_pull_requests(&self, repository: &str, limit: usize) -> anyhow::Result<Vec<Row>>;
    fn views(&self, repository: &str) -> anyhow::Result<Series>;
    /// Commits bucketed per week, `start_weeks` to `end_weeks` back from `now`.
    fn count_commits(
        &self,
        repository: &str,
        scope: &str,
        start_weeks: u64,
        end_weeks: u64,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Series>;
    fn count_stars(&self, repository: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> anyhow::Result<Series>;
}

/// Terminal surface the resolved values are painted on.
pub trait DisplaySurface: Send + Sync {
    fn text_box(&self, value: &str, title: &str, options: &OptionBag) -> anyhow::Result<()>;
    fn table(&self, rows: &[Row], title: &str, options: &OptionBag) -> anyhow::Result<()>;
    fn bar_chart(&self, counts: &[u64], labels: &[String], title: &str, options: &OptionBag) -> anyhow::Result<()>;
}
