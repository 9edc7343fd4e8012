use super::WidgetContext;
use crate::errors::WidgetResult;
use crate::models::Rendered;
use crate::platform::MetricsProvider;

pub(super) fn box_stars(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    render_count(ctx, |provider, repository| provider.total_stars(repository))
}

pub(super) fn box_watchers(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    render_count(ctx, |provider, repository| provider.total_watchers(repository))
}

pub(super) fn box_open_issues(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    render_count(ctx, |provider, repository| provider.total_open_issues(repository))
}

fn render_count<F>(ctx: &WidgetContext<'_>, query: F) -> WidgetResult<Rendered>
where
    F: FnOnce(&dyn MetricsProvider, &str) -> anyhow::Result<u64>,
{
    let repository = ctx.repository();
    let title = ctx.title();

    let count = query(ctx.provider, &repository).map_err(|error| ctx.provider_error(error))?;

    ctx.display
        .text_box(&count.to_string(), &title, ctx.options)
        .map_err(|error| ctx.display_error(error))?;

    Ok(ctx.rendered(title))
}
