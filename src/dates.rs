use crate::errors::{WidgetError, WidgetResult};
use crate::options::{OPTION_END_DATE, OPTION_START_DATE};
use chrono::{DateTime, Days, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)_(days|weeks|months)_ago$").expect("valid relative date regex"));

pub const WEEKS_AGO_SHAPE: &str = "<integer>_weeks_ago";
pub const DAYS_AGO_SHAPE: &str = "<integer>_days_ago or today";
const COUNT_PERIOD_SHAPE: &str = "<integer>_weeks_ago or <integer>_days_ago";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Days,
    Weeks,
    /// Parsed but not resolvable yet.
    Months,
}

impl DateUnit {
    /// Token that must appear verbatim in an expression of this unit.
    pub fn ago_token(self) -> &'static str {
        match self {
            Self::Days => "days_ago",
            Self::Weeks => "weeks_ago",
            Self::Months => "months_ago",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "days" => Some(Self::Days),
            "weeks" => Some(Self::Weeks),
            "months" => Some(Self::Months),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    /// `today` or `now`.
    Today,
    Ago { count: u64, unit: DateUnit },
}

impl RelativeDate {
    pub fn parse(expression: &str) -> Option<Self> {
        let trimmed = expression.trim();
        if trimmed == "today" || trimmed == "now" {
            return Some(Self::Today);
        }
        let captures = RELATIVE_DATE_RE.captures(trimmed)?;
        let count = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let unit = DateUnit::parse(captures.get(2)?.as_str())?;
        Some(Self::Ago { count, unit })
    }
}

/// Absolute day-granularity range. Orientation is whatever the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Magnitude of a `<n>_weeks_ago` (or `<n>_days_ago`) expression, for bucketed
/// queries that count back from "now" themselves.
pub fn extract_count_period(expression: &str) -> WidgetResult<u64> {
    match RelativeDate::parse(expression) {
        Some(RelativeDate::Ago {
            count,
            unit: DateUnit::Weeks | DateUnit::Days,
        }) => Ok(count),
        _ => Err(WidgetError::malformed_date(expression, COUNT_PERIOD_SHAPE)),
    }
}

/// Resolves a `<n>_days_ago` / `today` pair against one reference instant.
pub fn convert_dates(now: DateTime<Utc>, start: &str, end: &str) -> WidgetResult<DateRange> {
    let range = DateRange {
        start: resolve_day(now, start).map_err(|error| error.for_option(OPTION_START_DATE))?,
        end: resolve_day(now, end).map_err(|error| error.for_option(OPTION_END_DATE))?,
    };
    tracing::debug!(start = %range.start, end = %range.end, "resolved relative date range");
    Ok(range)
}

fn resolve_day(now: DateTime<Utc>, expression: &str) -> WidgetResult<DateTime<Utc>> {
    let days_back = match RelativeDate::parse(expression) {
        Some(RelativeDate::Today) => 0,
        Some(RelativeDate::Ago {
            count,
            unit: DateUnit::Days,
        }) => count,
        _ => return Err(WidgetError::malformed_date(expression, DAYS_AGO_SHAPE)),
    };

    now.date_naive()
        .checked_sub_days(Days::new(days_back))
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| WidgetError::malformed_date(expression, "a day offset within the calendar range"))
}

/// Checks that an expression is written in `unit` before any query is attempted.
pub fn require_unit(expression: &str, unit: DateUnit) -> WidgetResult<()> {
    let trimmed = expression.trim();
    let accepted = match unit {
        DateUnit::Days => trimmed.contains(unit.ago_token()) || trimmed == "today" || trimmed == "now",
        DateUnit::Weeks | DateUnit::Months => trimmed.contains(unit.ago_token()),
    };
    if accepted {
        Ok(())
    } else {
        let expected = match unit {
            DateUnit::Days => DAYS_AGO_SHAPE.to_string(),
            DateUnit::Weeks => WEEKS_AGO_SHAPE.to_string(),
            DateUnit::Months => format!("<integer>_{}", unit.ago_token()),
        };
        Err(WidgetError::malformed_date(expression, &expected))
    }
}
