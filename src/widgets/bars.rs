use super::WidgetContext;
use crate::dates::{convert_dates, extract_count_period, require_unit, DateUnit};
use crate::errors::WidgetResult;
use crate::models::{Rendered, Series};
use crate::options::{OPTION_END_DATE, OPTION_START_DATE};

pub(super) fn bar_views(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    let repository = ctx.repository();
    let title = ctx.title();

    let series = ctx
        .provider
        .views(&repository)
        .map_err(|error| ctx.provider_error(error))?;

    render_series(ctx, series, title)
}

pub(super) fn bar_commits(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    let repository = ctx.repository();
    let title = ctx.title();
    let (start_date, end_date) = ctx.date_options();
    let scope = ctx.scope();

    // Bucketed per week, so both ends must be written in weeks.
    ctx.located(OPTION_START_DATE, require_unit(&start_date, DateUnit::Weeks))?;
    ctx.located(OPTION_END_DATE, require_unit(&end_date, DateUnit::Weeks))?;
    let start_weeks = ctx.located(OPTION_START_DATE, extract_count_period(&start_date))?;
    let end_weeks = ctx.located(OPTION_END_DATE, extract_count_period(&end_date))?;
    tracing::debug!(widget = %ctx.id(), start_weeks, end_weeks, scope = %scope, "resolved commit window");

    let series = ctx
        .provider
        .count_commits(&repository, &scope, start_weeks, end_weeks, ctx.now)
        .map_err(|error| ctx.provider_error(error))?;

    render_series(ctx, series, title)
}

pub(super) fn bar_stars(ctx: &WidgetContext<'_>) -> WidgetResult<Rendered> {
    let repository = ctx.repository();
    let title = ctx.title();
    let (start_date, end_date) = ctx.date_options();

    ctx.located(OPTION_START_DATE, require_unit(&start_date, DateUnit::Days))?;
    ctx.located(OPTION_END_DATE, require_unit(&end_date, DateUnit::Days))?;
    // Already names start_date or end_date.
    let range = convert_dates(ctx.now, &start_date, &end_date).map_err(|error| error.in_widget(ctx.id()))?;

    let series = ctx
        .provider
        .count_stars(&repository, range.start, range.end)
        .map_err(|error| ctx.provider_error(error))?;

    render_series(ctx, series, title)
}

fn render_series(ctx: &WidgetContext<'_>, series: Series, title: String) -> WidgetResult<Rendered> {
    ctx.display
        .bar_chart(&series.counts, &series.labels, &title, ctx.options)
        .map_err(|error| ctx.display_error(error))?;

    Ok(ctx.rendered(title))
}
