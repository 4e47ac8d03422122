//! Widget snapshot assembly.

use crate::model::state::AppState;
use crate::repo::prefs_repo::{WidgetLayout, WidgetPrefs};
use crate::select::moment::Moment;
use crate::select::summary::widget_summary;
use crate::select::today::current_and_next;
use crate::widget::link::{home_deep_link, lesson_deep_link};

/// Everything the widget host needs for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub headline: String,
    pub subline: String,
    /// Tap target: the current-or-next lesson's detail view when one
    /// exists, else the home screen.
    pub deep_link: String,
    pub layout: WidgetLayout,
}

/// Builds the render snapshot for the given state, preferences and time.
pub fn build_widget_snapshot(
    state: &AppState,
    prefs: &WidgetPrefs,
    moment: &Moment,
) -> WidgetSnapshot {
    let summary = widget_summary(state, moment);
    let lessons = current_and_next(state, moment);

    let deep_link = lessons
        .current
        .or(lessons.next)
        .map(|lesson| lesson_deep_link(&lesson.schedule_item.id))
        .unwrap_or_else(home_deep_link);

    WidgetSnapshot {
        headline: summary.headline,
        subline: summary.subline,
        deep_link,
        layout: prefs.layout,
    }
}
