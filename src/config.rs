use crate::errors::{WidgetError, WidgetResult};
use crate::models::DashboardConfig;
use std::path::Path;

pub fn load_dashboard(path: &Path) -> WidgetResult<DashboardConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| WidgetError::Io(format!("Failed to read '{}': {}", path.display(), err)))?;
    parse_dashboard(&raw)
}

pub fn parse_dashboard(raw: &str) -> WidgetResult<DashboardConfig> {
    let config: DashboardConfig = serde_yaml::from_str(raw)?;
    if let Some(position) = config.widgets.iter().position(|widget| widget.name.trim().is_empty()) {
        return Err(WidgetError::Config(format!("widgets[{}].name cannot be empty", position)));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_dashboard, parse_dashboard};
    use crate::errors::WidgetError;

    const SAMPLE: &str = r#"
widgets:
  - name: github.table_repositories
    options:
      row_limit: 3
      metrics: [name, stars]
  - name: github.bar_commits
    options:
      start_date: 4_weeks_ago
      end_date: 0_weeks_ago
  - name: github.box_unicorn
"#;

    #[test]
    fn parses_widgets_in_order_with_string_options() {
        let config = parse_dashboard(SAMPLE).expect("parse");
        let names = config.widgets.iter().map(|widget| widget.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["github.table_repositories", "github.bar_commits", "github.box_unicorn"]
        );
        assert_eq!(config.widgets[0].options.raw("row_limit"), Some("3"));
        assert_eq!(config.widgets[0].options.raw("metrics"), Some("name,stars"));
        assert!(config.widgets[2].options.is_empty());
    }

    #[test]
    fn rejects_blank_widget_name() {
        let result = parse_dashboard("widgets:\n  - name: '  '\n");
        assert!(matches!(result, Err(WidgetError::Config(message)) if message.contains("widgets[0]")));
    }

    #[test]
    fn reports_yaml_errors_as_config() {
        assert!(matches!(parse_dashboard("widgets: [name"), Err(WidgetError::Config(_))));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dashboard.yml");
        std::fs::write(&path, SAMPLE).expect("write config");
        assert_eq!(load_dashboard(&path).expect("load").widgets.len(), 3);
        assert!(matches!(
            load_dashboard(&dir.path().join("missing.yml")),
            Err(WidgetError::Io(_))
        ));
    }
}
