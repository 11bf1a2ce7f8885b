//! Agenda views derived from all projects with their items.
//!
//! These are the Today / Upcoming / Someday / Logbook lists. They never touch
//! the database: load the groups with
//! [`SqliteStorage::get_all_projects_with_items`](crate::storage::SqliteStorage::get_all_projects_with_items)
//! and filter here.

use crate::model::{Item, ProjectWithItems};
use chrono::{Days, NaiveDate};

/// A derived item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaView {
    /// Open items due today or overdue.
    Today,
    /// Open items due after today, inside the upcoming window.
    Upcoming,
    /// Open items without a due date.
    Someday,
    /// Completed items.
    Logbook,
}

impl AgendaView {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Someday => "Someday",
            Self::Logbook => "Logbook",
        }
    }

    /// Whether `item` belongs in this view.
    ///
    /// Upcoming is exclusive on both ends: an item due today is in Today,
    /// and an item due exactly `upcoming_days` from now is outside.
    #[must_use]
    pub fn includes(self, item: &Item, today: NaiveDate, upcoming_days: u32) -> bool {
        match self {
            Self::Logbook => item.is_done,
            Self::Someday => !item.is_done && item.due_date.is_none(),
            Self::Today => !item.is_done && item.due_day().is_some_and(|due| due <= today),
            Self::Upcoming => {
                let Some(due) = item.due_day().filter(|_| !item.is_done) else {
                    return false;
                };
                let horizon = today
                    .checked_add_days(Days::new(u64::from(upcoming_days)))
                    .unwrap_or(NaiveDate::MAX);
                today < due && due < horizon
            }
        }
    }
}

/// Keep the items that belong in `view`, dropping projects left empty.
#[must_use]
pub fn filter(
    groups: Vec<ProjectWithItems>,
    view: AgendaView,
    today: NaiveDate,
    upcoming_days: u32,
) -> Vec<ProjectWithItems> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            group
                .items
                .retain(|item| view.includes(item, today, upcoming_days));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

/// Number of items in `view`.
#[must_use]
pub fn count(
    groups: &[ProjectWithItems],
    view: AgendaView,
    today: NaiveDate,
    upcoming_days: u32,
) -> usize {
    groups
        .iter()
        .flat_map(|group| &group.items)
        .filter(|item| view.includes(item, today, upcoming_days))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: i64, is_done: bool, due: Option<NaiveDate>) -> Item {
        Item {
            id,
            project_id: 1,
            is_done,
            title: format!("item {id}"),
            due_date: due.map(|d| d.and_hms_opt(12, 0, 0).unwrap()),
        }
    }

    fn groups() -> Vec<ProjectWithItems> {
        let today = date(2024, 3, 10);
        vec![
            ProjectWithItems::new(
                Project {
                    id: 1,
                    name: "Home".to_string(),
                },
                vec![
                    item(1, false, Some(date(2024, 3, 1))),  // overdue
                    item(2, false, Some(today)),             // today
                    item(3, false, Some(date(2024, 3, 12))), // upcoming
                    item(4, false, Some(date(2024, 3, 17))), // exactly at the horizon
                    item(5, true, Some(date(2024, 3, 11))),  // done
                ],
            ),
            ProjectWithItems::new(
                Project {
                    id: 2,
                    name: "Someday".to_string(),
                },
                vec![item(6, false, None), item(7, true, None)],
            ),
        ]
    }

    fn ids(groups: &[ProjectWithItems]) -> Vec<i64> {
        groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.id))
            .collect()
    }

    #[test]
    fn test_today_includes_overdue() {
        let result = filter(groups(), AgendaView::Today, date(2024, 3, 10), 7);
        assert_eq!(ids(&result), vec![1, 2]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_upcoming_window_is_exclusive() {
        let result = filter(groups(), AgendaView::Upcoming, date(2024, 3, 10), 7);
        assert_eq!(ids(&result), vec![3]);

        let wider = filter(groups(), AgendaView::Upcoming, date(2024, 3, 10), 8);
        assert_eq!(ids(&wider), vec![3, 4]);
    }

    #[test]
    fn test_someday_and_logbook() {
        let someday = filter(groups(), AgendaView::Someday, date(2024, 3, 10), 7);
        assert_eq!(ids(&someday), vec![6]);
        assert_eq!(someday[0].project.name, "Someday");

        let logbook = filter(groups(), AgendaView::Logbook, date(2024, 3, 10), 7);
        assert_eq!(ids(&logbook), vec![5, 7]);
        assert_eq!(logbook.len(), 2);
    }

    #[test]
    fn test_count_matches_filter() {
        let all = groups();
        let today = date(2024, 3, 10);
        for view in [
            AgendaView::Today,
            AgendaView::Upcoming,
            AgendaView::Someday,
            AgendaView::Logbook,
        ] {
            assert_eq!(
                count(&all, view, today, 7),
                ids(&filter(all.clone(), view, today, 7)).len()
            );
        }
    }
}
