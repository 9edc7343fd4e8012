use crate::errors::{WidgetError, WidgetResult};
use crate::models::{Rendered, WidgetDescriptor};
use crate::options::OptionBag;
use crate::platform::{DisplaySurface, MetricsProvider};
use crate::widgets;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first widget that fails.
    #[default]
    Abort,
    /// Log the failure and carry on with the remaining widgets.
    Skip,
}

#[derive(Debug, Default)]
pub struct DashboardReport {
    pub rendered: Vec<Rendered>,
    pub failures: Vec<(String, WidgetError)>,
}

impl DashboardReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the two collaborators and renders widgets one at a time.
#[derive(Clone)]
pub struct WidgetEngine {
    provider: Arc<dyn MetricsProvider>,
    display: Arc<dyn DisplaySurface>,
}

impl WidgetEngine {
    pub fn new(provider: Arc<dyn MetricsProvider>, display: Arc<dyn DisplaySurface>) -> Self {
        Self { provider, display }
    }

    pub fn dispatch(&self, widget_id: &str, options: &OptionBag) -> WidgetResult<Rendered> {
        self.dispatch_at(widget_id, options, Utc::now())
    }

    pub fn dispatch_at(&self, widget_id: &str, options: &OptionBag, now: DateTime<Utc>) -> WidgetResult<Rendered> {
        widgets::dispatch(widget_id, options, now, self.provider.as_ref(), self.display.as_ref())
    }

    pub fn render_all(&self, descriptors: &[WidgetDescriptor], policy: FailurePolicy) -> WidgetResult<DashboardReport> {
        self.render_all_at(descriptors, policy, Utc::now())
    }

    /// Renders `descriptors` in order against a single reference instant.
    pub fn render_all_at(
        &self,
        descriptors: &[WidgetDescriptor],
        policy: FailurePolicy,
        now: DateTime<Utc>,
    ) -> WidgetResult<DashboardReport> {
        let mut report = DashboardReport::default();

        for descriptor in descriptors {
            match self.dispatch_at(&descriptor.name, &descriptor.options, now) {
                Ok(rendered) => report.rendered.push(rendered),
                Err(error) => match policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Skip => {
                        tracing::warn!(widget = %descriptor.name, error = %error, "skipping widget that failed to render");
                        report.failures.push((descriptor.name.clone(), error));
                    }
                },
            }
        }

        tracing::debug!(
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            "dashboard render finished"
        );
        Ok(report)
    }
}
