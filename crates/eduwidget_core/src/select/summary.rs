//! Homework, stuck-record and widget-summary selectors.

use crate::model::state::{AppState, Homework};
use crate::select::moment::Moment;
use crate::select::today::{current_and_next, non_blank};

/// Homework belonging to the selected class group.
pub fn homeworks_for_selected_class(state: &AppState) -> Vec<&Homework> {
    let Some(selected) = state.selected_class_group_id.as_deref() else {
        return Vec::new();
    };
    state
        .homeworks
        .iter()
        .filter(|homework| homework.class_group_id == selected)
        .collect()
}

/// Count of the selected class's homework due on `moment`'s date.
pub fn due_today_homework_count(state: &AppState, moment: &Moment) -> usize {
    let today = moment.today_iso();
    homeworks_for_selected_class(state)
        .into_iter()
        .filter(|homework| homework.due_date_iso == today)
        .count()
}

/// Display text of the selected class's most recent stuck record.
///
/// "Most recent" is the last record in array order; every writer appends,
/// so array position tracks recency. The referenced achievement renders
/// as its title, else "unit / outcome", else whichever half exists.
pub fn last_stuck_text(state: &AppState) -> Option<String> {
    let selected = state.selected_class_group_id.as_deref()?;

    let last = state
        .daily_stuck
        .iter()
        .filter(|stuck| stuck.class_group_id == selected)
        .next_back()?;

    let achievement = state
        .achievements
        .iter()
        .find(|achievement| achievement.id == last.achievement_id)?;

    if let Some(title) = non_blank(achievement.title.as_deref()) {
        return Some(title);
    }

    let unit = non_blank(achievement.unit.as_deref());
    let outcome = non_blank(achievement.outcome.as_deref());
    match (unit, outcome) {
        (Some(unit), Some(outcome)) => Some(format!("{unit} / {outcome}")),
        (Some(unit), None) => Some(unit),
        (None, Some(outcome)) => Some(outcome),
        (None, None) => None,
    }
}

/// The two text fields the widget host renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSummary {
    pub headline: String,
    pub subline: String,
}

/// Composes the widget text from the current/next lesson, the due-homework
/// count and the last stuck record.
pub fn widget_summary(state: &AppState, moment: &Moment) -> WidgetSummary {
    let lessons = current_and_next(state, moment);
    let due = due_today_homework_count(state, moment);
    let stuck = last_stuck_text(state);

    let mut headline = "No lessons today".to_string();
    let mut subline_parts: Vec<String> = Vec::new();

    if let Some(current) = &lessons.current {
        headline = format!(
            "{} ({}\u{2013}{})",
            current.course.title, current.start, current.end
        );
        if let Some(note) = &current.effective_note {
            subline_parts.push(note.clone());
        }
    } else if let Some(next) = &lessons.next {
        headline = format!("Next: {} ({}\u{2013}{})", next.course.title, next.start, next.end);
    }

    if due > 0 {
        subline_parts.push(format!("{due} homework due today"));
    }
    if let Some(stuck) = stuck {
        subline_parts.push(format!("Topic: {stuck}"));
    }

    WidgetSummary {
        headline,
        subline: subline_parts.join(" \u{2022} "),
    }
}
