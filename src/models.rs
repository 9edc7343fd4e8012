use crate::options::OptionBag;
use crate::widgets::WidgetKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One provider row: column name to rendered value.
pub type Row = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl Series {
    pub fn new(labels: Vec<String>, counts: Vec<u64>) -> Self {
        Self { labels, counts }
    }
}

/// A configured widget as it arrives from the dashboard file. The name is kept
/// as free-form text and only checked at dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub name: String,
    #[serde(default)]
    pub options: OptionBag,
}

impl WidgetDescriptor {
    pub fn new(name: impl Into<String>, options: OptionBag) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub kind: WidgetKind,
    pub title: String,
}
