use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("UNKNOWN_WIDGET: can't find the widget {widget} for service {service}")]
    UnknownWidget { widget: String, service: String },
    #[error("INVALID_NUMBER: {}must be a number, got '{value}'", location(.widget, .option))]
    InvalidNumber {
        widget: String,
        option: String,
        value: String,
    },
    #[error(
        "MALFORMED_DATE: {}'{expression}' is not a valid relative date, expected {expected}",
        location(.widget, .option)
    )]
    MalformedDateExpression {
        widget: String,
        option: String,
        expression: String,
        expected: String,
    },
    #[error("PROVIDER_FAILURE: {widget}: {source}")]
    Provider {
        widget: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("DISPLAY_FAILURE: {widget}: {source}")]
    Display {
        widget: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("CONFIG_INVALID: {0}")]
    Config(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
}

impl WidgetError {
    pub(crate) fn invalid_number(option: &str, value: &str) -> Self {
        Self::InvalidNumber {
            widget: String::new(),
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn malformed_date(expression: &str, expected: &str) -> Self {
        Self::MalformedDateExpression {
            widget: String::new(),
            option: String::new(),
            expression: expression.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Names the option a validation error came from, unless already known.
    pub(crate) fn for_option(mut self, name: &str) -> Self {
        if let Self::InvalidNumber { option, .. } | Self::MalformedDateExpression { option, .. } = &mut self {
            if option.is_empty() {
                *option = name.to_string();
            }
        }
        self
    }

    /// Names the widget a validation error came from, unless already known.
    pub(crate) fn in_widget(mut self, id: &str) -> Self {
        if let Self::InvalidNumber { widget, .. } | Self::MalformedDateExpression { widget, .. } = &mut self {
            if widget.is_empty() {
                *widget = id.to_string();
            }
        }
        self
    }
}

fn location(widget: &str, option: &str) -> String {
    match (widget.is_empty(), option.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("option '{}': ", option),
        (false, true) => format!("{}: ", widget),
        (false, false) => format!("{} option '{}': ", widget, option),
    }
}

impl From<std::io::Error> for WidgetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_yaml::Error> for WidgetError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Config(value.to_string())
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::WidgetError;
    use std::error::Error;

    #[test]
    fn unknown_widget_names_identifier_and_service() {
        let error = WidgetError::UnknownWidget {
            widget: "github.box_unicorn".to_string(),
            service: "github".to_string(),
        };
        let message = error.to_string();
        assert!(message.starts_with("UNKNOWN_WIDGET:"));
        assert!(message.contains("github.box_unicorn"));
        assert!(message.contains("service github"));
    }

    #[test]
    fn validation_errors_name_widget_and_option() {
        let error = WidgetError::malformed_date("5_wks_ago", "<integer>_weeks_ago")
            .for_option("end_date")
            .in_widget("github.bar_commits");
        assert_eq!(
            error.to_string(),
            "MALFORMED_DATE: github.bar_commits option 'end_date': '5_wks_ago' is not a valid relative date, expected <integer>_weeks_ago"
        );

        let bare = WidgetError::invalid_number("row_limit", "five");
        assert_eq!(bare.to_string(), "INVALID_NUMBER: option 'row_limit': must be a number, got 'five'");
        let located = bare.in_widget("github.table_issues").in_widget("github.box_stars");
        assert!(located.to_string().starts_with("INVALID_NUMBER: github.table_issues option 'row_limit':"));
    }

    #[test]
    fn provider_failure_keeps_source_chain() {
        let error = WidgetError::Provider {
            widget: "github.box_stars".to_string(),
            source: anyhow::anyhow!("rate limited"),
        };
        assert_eq!(
            error.source().map(|source| source.to_string()),
            Some("rate limited".to_string())
        );
    }
}
