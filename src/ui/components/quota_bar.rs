use dioxus::prelude::*;

use crate::domain::{QuotaProgress, NO_QUOTA_LABEL};
use crate::ui::theme;

/// Render-ready quota figures for one produce line.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotaView {
    pub label: String,
    pub recorded: f32,
    pub expected: f32,
}

impl From<Option<QuotaProgress>> for QuotaView {
    fn from(quota: Option<QuotaProgress>) -> Self {
        match quota {
            Some(quota) => Self {
                label: quota.label(),
                recorded: quota.recorded_ratio(),
                expected: quota.expected_ratio(),
            },
            None => Self {
                label: NO_QUOTA_LABEL.to_string(),
                recorded: 0.0,
                expected: 0.0,
            },
        }
    }
}

/// Two-layer bar: recorded sales underneath, recorded plus pending on top.
#[component]
pub fn QuotaBar(quota: QuotaView) -> Element {
    rsx! {
        div { class: "quota",
            p { class: "quota-label", "{quota.label}" }
            div { class: "quota-track",
                div { class: "quota-expected", style: theme::bar_width(quota.expected) }
                div { class: "quota-recorded", style: theme::bar_width(quota.recorded) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_quota_renders_placeholder() {
        let view = QuotaView::from(None);
        assert_eq!(view.label, "No Quota Available");
        assert_eq!(view.expected, 0.0);
    }

    #[test]
    fn over_goal_label_is_not_clamped() {
        let view = QuotaView::from(Some(QuotaProgress {
            current: 15,
            pending: 6,
            goal: 20,
        }));
        assert_eq!(view.label, "Quota Progress: 21/20");
        assert_eq!(view.expected, 1.0);
        assert_eq!(view.recorded, 0.75);
    }
}
