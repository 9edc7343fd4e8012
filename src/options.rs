use crate::errors::{WidgetError, WidgetResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const OPTION_REPOSITORY: &str = "repository";
pub const OPTION_TITLE: &str = "title";
pub const OPTION_ROW_LIMIT: &str = "row_limit";
pub const OPTION_METRICS: &str = "metrics";
pub const OPTION_ORDER: &str = "order";
pub const OPTION_SCOPE: &str = "scope";
pub const OPTION_START_DATE: &str = "start_date";
pub const OPTION_END_DATE: &str = "end_date";

pub const LIST_SEPARATOR: &str = ",";

/// String-keyed widget configuration. Values stay raw strings until a handler
/// asks for a typed reading; unknown keys are carried along untouched so the
/// display surface can still see layout options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionBag(BTreeMap<String, String>);

impl OptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present values win even when empty; only absence falls back.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).to_string()
    }

    pub fn get_int(&self, key: &str, default: i64) -> WidgetResult<i64> {
        match self.raw(key) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| WidgetError::invalid_number(key, raw)),
            None => Ok(default),
        }
    }

    /// Like [`OptionBag::get_int`] but rejects negative values, for counts such as row limits.
    pub fn get_count(&self, key: &str, default: usize) -> WidgetResult<usize> {
        match self.raw(key) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| WidgetError::invalid_number(key, raw)),
            None => Ok(default),
        }
    }

    /// Splits a list option. A present but blank value counts as unconfigured
    /// and yields the default, never an empty list.
    pub fn get_list(&self, key: &str, default: &[&str], separator: &str) -> Vec<String> {
        let defaults = || default.iter().map(|item| (*item).to_string()).collect::<Vec<_>>();
        let Some(raw) = self.raw(key) else {
            return defaults();
        };

        let items = raw
            .trim()
            .split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        if items.is_empty() {
            defaults()
        } else {
            items
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for OptionBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_yaml::Value>::deserialize(deserializer)?;
        let mut bag = BTreeMap::new();
        for (key, value) in raw {
            let text = stringify_value(&value).ok_or_else(|| {
                <D::Error as serde::de::Error>::custom(format!(
                    "option '{}' must be a scalar or a list of scalars",
                    key
                ))
            })?;
            bag.insert(key, text);
        }
        Ok(Self(bag))
    }
}

fn stringify_value(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => Some(String::new()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
                scalar => stringify_value(scalar),
            })
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(LIST_SEPARATOR)),
        serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => stringify_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionBag, LIST_SEPARATOR, OPTION_METRICS, OPTION_ROW_LIMIT, OPTION_TITLE};
    use crate::errors::WidgetError;

    #[test]
    fn get_falls_back_only_when_absent() {
        let bag = OptionBag::new().with(OPTION_TITLE, "");
        assert_eq!(bag.get(OPTION_TITLE, "Default"), "");
        assert_eq!(bag.get("repository", "devdash"), "devdash");
    }

    #[test]
    fn get_int_reports_offending_value() {
        let bag = OptionBag::new().with(OPTION_ROW_LIMIT, "five");
        match bag.get_int(OPTION_ROW_LIMIT, 5) {
            Err(WidgetError::InvalidNumber { option, value, .. }) => {
                assert_eq!(option, OPTION_ROW_LIMIT);
                assert_eq!(value, "five");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
        let message = bag.get_int(OPTION_ROW_LIMIT, 5).expect_err("invalid").to_string();
        assert!(message.contains("five"));
    }

    #[test]
    fn get_int_parses_and_defaults() {
        let bag = OptionBag::new().with(OPTION_ROW_LIMIT, "12");
        assert_eq!(bag.get_int(OPTION_ROW_LIMIT, 5).expect("int"), 12);
        assert_eq!(OptionBag::new().get_int(OPTION_ROW_LIMIT, 5).expect("default"), 5);
    }

    #[test]
    fn numbers_are_parsed_untrimmed() {
        let bag = OptionBag::new().with(OPTION_ROW_LIMIT, " 12 ");
        assert!(matches!(
            bag.get_int(OPTION_ROW_LIMIT, 5),
            Err(WidgetError::InvalidNumber { ref value, .. }) if value == " 12 "
        ));
        assert!(bag.get_count(OPTION_ROW_LIMIT, 5).is_err());
    }

    #[test]
    fn get_count_rejects_negative_limits() {
        let bag = OptionBag::new().with(OPTION_ROW_LIMIT, "-2");
        assert!(matches!(
            bag.get_count(OPTION_ROW_LIMIT, 5),
            Err(WidgetError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn blank_list_yields_default() {
        let default = ["name", "stars"];
        for raw in ["", "   ", " , "] {
            let bag = OptionBag::new().with(OPTION_METRICS, raw);
            assert_eq!(bag.get_list(OPTION_METRICS, &default, LIST_SEPARATOR), vec!["name", "stars"]);
        }
    }

    #[test]
    fn list_override_replaces_default() {
        let bag = OptionBag::new().with(OPTION_METRICS, " forks , name ");
        assert_eq!(
            bag.get_list(OPTION_METRICS, &["name", "stars"], LIST_SEPARATOR),
            vec!["forks", "name"]
        );
    }

    #[test]
    fn list_honours_custom_separator() {
        let bag = OptionBag::new().with(OPTION_METRICS, "name | stars,forks |");
        assert_eq!(
            bag.get_list(OPTION_METRICS, &["name"], "|"),
            vec!["name", "stars,forks"]
        );
        assert_eq!(bag.get_list(OPTION_METRICS, &["name"], LIST_SEPARATOR).len(), 2);
    }

    #[test]
    fn deserializes_scalars_and_lists_as_strings() {
        let bag: OptionBag = serde_yaml::from_str(
            "row_limit: 3\nmetrics: [name, stars]\ntitle: ~\nprivate: true\n",
        )
        .expect("parse options");
        assert_eq!(bag.raw("row_limit"), Some("3"));
        assert_eq!(bag.raw("metrics"), Some("name,stars"));
        assert_eq!(bag.raw("title"), Some(""));
        assert_eq!(bag.raw("private"), Some("true"));
    }

    #[test]
    fn rejects_nested_mappings() {
        let result = serde_yaml::from_str::<OptionBag>("layout:\n  size: M\n");
        assert!(result.is_err());
    }
}
