use super::WidgetContext;
use crate::errors::WidgetResult;
use crate::models::{Rendered, Row};
use crate::platform::MetricsProvider;

pub(super) fn table_repositories(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    let title = ctx.title();
    let limit = ctx.row_limit()?;
    let metrics = ctx.metrics();
    let order = ctx.order();

    let rows = ctx
        .provider
        .list_repositories(limit, &order, &metrics)
        .map_err(|error| ctx.provider_error(error))?;

    render_rows(ctx, rows, limit, title)
}

pub(super) fn table_branches(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    repository_rows(ctx, |provider, repository, limit| provider.list_branches(repository, limit))
}

pub(super) fn table_issues(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    repository_rows(ctx, |provider, repository, limit| provider.list_issues(repository, limit))
}

pub(super) fn table_pull_requests(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    repository_rows(ctx, |provider, repository, limit| {
        provider.list_pull_requests(repository, limit)
    })
}

fn repository_rows<F>(ctx: &WidgetContext<'_>, query: F) -> WidgetResult<Rendered>
where
    F: FnOnce(&dyn MetricsProvider, &str, usize) -> anyhow::Result<Vec<Row>>,
{
    let repository = ctx.repository();
    let title = ctx.title();
    let limit = ctx.row_limit()?;

    let rows = query(ctx.provider, &repository, limit).map_err(|error| ctx.provider_error(error))?;

    render_rows(ctx, rows, limit, title)
}

fn render_rows(ctx: &WidgetContext<'_>, mut rows: Vec<Row>, limit: usize, title: String) -> WidgetResult<Rendered> {
    // Providers may return more than asked for.
    rows.truncate(limit);

    ctx.display
        .table(&rows, &title, ctx.options)
        .map_err(|error| ctx.display_error(error))?;

    Ok(ctx.rendered(title))
}
