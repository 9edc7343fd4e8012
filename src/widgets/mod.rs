mod bars;
mod boxes;
mod tables;

use crate::errors::{WidgetError, WidgetResult};
use crate::models::Rendered;
use crate::options::{
    OptionBag, LIST_SEPARATOR, OPTION_END_DATE, OPTION_METRICS, OPTION_ORDER, OPTION_REPOSITORY,
    OPTION_ROW_LIMIT, OPTION_SCOPE, OPTION_START_DATE, OPTION_TITLE,
};
use crate::platform::{DisplaySurface, MetricsProvider};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

pub const SERVICE: &str = "github";

pub const DEFAULT_ROW_LIMIT: usize = 5;
pub const DEFAULT_METRICS: [&str; 5] = ["name", "stars", "watchers", "forks", "open_issues"];
pub const DEFAULT_ORDER: &str = "pushed";
pub const OWNER_SCOPE: &str = "owner";

const REPOSITORY_PLACEHOLDER: &str = "{repository}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    BoxStars,
    BoxWatchers,
    BoxOpenIssues,
    TableRepositories,
    TableBranches,
    TableIssues,
    TablePullRequests,
    BarViews,
    BarCommits,
    BarStars,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 10] = [
        Self::BoxStars,
        Self::BoxWatchers,
        Self::BoxOpenIssues,
        Self::TableRepositories,
        Self::TableBranches,
        Self::TableIssues,
        Self::TablePullRequests,
        Self::BarViews,
        Self::BarCommits,
        Self::BarStars,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoxStars => "github.box_stars",
            Self::BoxWatchers => "github.box_watchers",
            Self::BoxOpenIssues => "github.box_open_issues",
            Self::TableRepositories => "github.table_repositories",
            Self::TableBranches => "github.table_branches",
            Self::TableIssues => "github.table_issues",
            Self::TablePullRequests => "github.table_pull_requests",
            Self::BarViews => "github.bar_views",
            Self::BarCommits => "github.bar_commits",
            Self::BarStars => "github.bar_stars",
        }
    }

    pub fn spec(self) -> &'static WidgetSpec {
        match self {
            Self::BoxStars => &BOX_STARS,
            Self::BoxWatchers => &BOX_WATCHERS,
            Self::BoxOpenIssues => &BOX_OPEN_ISSUES,
            Self::TableRepositories => &TABLE_REPOSITORIES,
            Self::TableBranches => &TABLE_BRANCHES,
            Self::TableIssues => &TABLE_ISSUES,
            Self::TablePullRequests => &TABLE_PULL_REQUESTS,
            Self::BarViews => &BAR_VIEWS,
            Self::BarCommits => &BAR_COMMITS,
            Self::BarStars => &BAR_STARS,
        }
    }
}

impl FromStr for WidgetKind {
    type Err = WidgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| WidgetError::UnknownWidget {
                widget: value.to_string(),
                service: SERVICE.to_string(),
            })
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Handler = fn(&WidgetContext<'_>) -> WidgetResult<Rendered>;

/// Static defaults for one widget kind. Date fields are empty for widgets
/// that are not time-series based.
#[derive(Debug, Clone, Copy)]
pub struct WidgetDefaults {
    pub row_limit: usize,
    pub metrics: &'static [&'static str],
    pub order: &'static str,
    pub scope: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
}

const BASE_DEFAULTS: WidgetDefaults = WidgetDefaults {
    row_limit: DEFAULT_ROW_LIMIT,
    metrics: &DEFAULT_METRICS,
    order: DEFAULT_ORDER,
    scope: OWNER_SCOPE,
    start_date: "",
    end_date: "",
};

#[derive(Clone, Copy)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    /// May contain `{repository}`, substituted at render time.
    pub title: &'static str,
    pub defaults: WidgetDefaults,
    pub handler: Handler,
}

impl fmt::Debug for WidgetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSpec")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

static BOX_STARS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BoxStars,
    title: " Github Stars for {repository}",
    defaults: BASE_DEFAULTS,
    handler: boxes::box_stars,
};

static BOX_WATCHERS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BoxWatchers,
    title: " Github Watchers ",
    defaults: BASE_DEFAULTS,
    handler: boxes::box_watchers,
};

static BOX_OPEN_ISSUES: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BoxOpenIssues,
    title: " Github Open Issues ",
    defaults: BASE_DEFAULTS,
    handler: boxes::box_open_issues,
};

static TABLE_REPOSITORIES: WidgetSpec = WidgetSpec {
    kind: WidgetKind::TableRepositories,
    title: " Github Repositories ",
    defaults: BASE_DEFAULTS,
    handler: tables::table_repositories,
};

static TABLE_BRANCHES: WidgetSpec = WidgetSpec {
    kind: WidgetKind::TableBranches,
    title: " Github Branches ",
    defaults: BASE_DEFAULTS,
    handler: tables::table_branches,
};

static TABLE_ISSUES: WidgetSpec = WidgetSpec {
    kind: WidgetKind::TableIssues,
    title: " Github Issues ",
    defaults: BASE_DEFAULTS,
    handler: tables::table_issues,
};

static TABLE_PULL_REQUESTS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::TablePullRequests,
    title: " Github Pull Requests ",
    defaults: BASE_DEFAULTS,
    handler: tables::table_pull_requests,
};

static BAR_VIEWS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BarViews,
    title: " Github Views ",
    defaults: BASE_DEFAULTS,
    handler: bars::bar_views,
};

static BAR_COMMITS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BarCommits,
    title: " Github Commit Per Week ",
    defaults: WidgetDefaults {
        start_date: "7_weeks_ago",
        end_date: "0_weeks_ago",
        ..BASE_DEFAULTS
    },
    handler: bars::bar_commits,
};

static BAR_STARS: WidgetSpec = WidgetSpec {
    kind: WidgetKind::BarStars,
    title: " Github Stars ",
    defaults: WidgetDefaults {
        start_date: "7_days_ago",
        end_date: "today",
        ..BASE_DEFAULTS
    },
    handler: bars::bar_stars,
};

/// Everything a handler needs for one render: its table entry, the raw
/// options, the reference instant and both collaborators.
pub struct WidgetContext<'a> {
    pub spec: &'static WidgetSpec,
    pub options: &'a OptionBag,
    pub now: DateTime<Utc>,
    pub provider: &'a dyn MetricsProvider,
    pub display: &'a dyn DisplaySurface,
}

impl WidgetContext<'_> {
    pub fn id(&self) -> &'static str {
        self.spec.kind.as_str()
    }

    pub fn repository(&self) -> String {
        self.options.get(OPTION_REPOSITORY, "")
    }

    pub fn title(&self) -> String {
        match self.options.raw(OPTION_TITLE) {
            Some(title) => title.to_string(),
            None => self.spec.title.replace(REPOSITORY_PLACEHOLDER, &self.repository()),
        }
    }

    pub fn row_limit(&self) -> WidgetResult<usize> {
        self.options
            .get_count(OPTION_ROW_LIMIT, self.spec.defaults.row_limit)
            .map_err(|error| error.in_widget(self.id()))
    }

    pub fn metrics(&self) -> Vec<String> {
        self.options
            .get_list(OPTION_METRICS, self.spec.defaults.metrics, LIST_SEPARATOR)
    }

    pub fn order(&self) -> String {
        self.options.get(OPTION_ORDER, self.spec.defaults.order)
    }

    pub fn scope(&self) -> String {
        self.options.get(OPTION_SCOPE, self.spec.defaults.scope)
    }

    pub fn date_options(&self) -> (String, String) {
        (
            self.options.get(OPTION_START_DATE, self.spec.defaults.start_date),
            self.options.get(OPTION_END_DATE, self.spec.defaults.end_date),
        )
    }

    /// Tags a validation failure with this widget and the option it came from.
    fn located<T>(&self, option: &str, result: WidgetResult<T>) -> WidgetResult<T> {
        result.map_err(|error| error.for_option(option).in_widget(self.id()))
    }

    fn provider_error(&self, source: anyhow::Error) -> WidgetError {
        WidgetError::Provider {
            widget: self.id().to_string(),
            source,
        }
    }

    fn display_error(&self, source: anyhow::Error) -> WidgetError {
        WidgetError::Display {
            widget: self.id().to_string(),
            source,
        }
    }

    fn rendered(&self, title: String) -> Rendered {
        Rendered {
            kind: self.spec.kind,
            title,
        }
    }
}

/// Routes `widget_id` through the static table and runs its handler to completion.
pub fn dispatch(
    widget_id: &str,
    options: &OptionBag,
    now: DateTime<Utc>,
    provider: &dyn MetricsProvider,
    display: &dyn DisplaySurface,
) -> WidgetResult<Rendered> {
    let kind = widget_id.parse::<WidgetKind>().map_err(|error| {
        tracing::warn!(widget = %widget_id, "unknown widget identifier");
        error
    })?;
    let spec = kind.spec();
    tracing::debug!(widget = %kind, options = options.len(), "dispatching widget");

    let context = WidgetContext {
        spec,
        options,
        now,
        provider,
        display,
    };
    (spec.handler)(&context)
}

#[cfg(test)]
mod tests {
    use super::{WidgetKind, DEFAULT_METRICS, SERVICE};
    use crate::errors::WidgetError;

    #[test]
    fn every_kind_round_trips_through_its_identifier() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.as_str().parse::<WidgetKind>().expect("known"), kind);
            assert_eq!(kind.spec().kind, kind);
            assert!(kind.as_str().starts_with("github."));
        }
    }

    #[test]
    fn unknown_identifier_names_widget_and_service() {
        match "github.box_unicorn".parse::<WidgetKind>() {
            Err(WidgetError::UnknownWidget { widget, service }) => {
                assert_eq!(widget, "github.box_unicorn");
                assert_eq!(service, SERVICE);
            }
            other => panic!("expected UnknownWidget, got {:?}", other),
        }
    }

    #[test]
    fn identifiers_are_matched_verbatim() {
        for raw in [" github.box_stars", "github.box_stars ", "GITHUB.BOX_STARS"] {
            assert!(matches!(
                raw.parse::<WidgetKind>(),
                Err(WidgetError::UnknownWidget { ref widget, .. }) if widget == raw
            ));
        }
    }

    #[test]
    fn only_time_series_widgets_carry_date_defaults() {
        for kind in WidgetKind::ALL {
            let defaults = kind.spec().defaults;
            let time_series = matches!(kind, WidgetKind::BarCommits | WidgetKind::BarStars);
            assert_eq!(!defaults.start_date.is_empty(), time_series, "{}", kind);
            assert_eq!(defaults.metrics, &DEFAULT_METRICS[..]);
        }
        assert_eq!(WidgetKind::BarCommits.spec().defaults.start_date, "7_weeks_ago");
        assert_eq!(WidgetKind::BarStars.spec().defaults.end_date, "today");
    }
}
