//! Status command implementation.

use super::{open_storage, print_json, today};
use crate::agenda::{self, AgendaView};
use crate::defaults::Preferences;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Output for status command.
#[derive(Serialize)]
struct StatusOutput {
    project_count: usize,
    item_count: usize,
    done_count: usize,
    badges: BadgeCounts,
    preferences: Preferences,
}

/// Counters shown next to the agenda views.
#[derive(Serialize)]
struct BadgeCounts {
    today: usize,
    upcoming: usize,
}

/// Execute status command.
///
/// Badge counters are always present in JSON. The human output hides them
/// when the badges setting is off.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let preferences = Preferences::load(&storage)?;
    let groups = storage.get_all_projects_with_items()?;

    let today = today();
    let days = preferences.upcoming_days;
    let output = StatusOutput {
        project_count: groups.len(),
        item_count: groups.iter().map(|g| g.items.len()).sum(),
        done_count: groups.iter().map(|g| g.progress().0).sum(),
        badges: BadgeCounts {
            today: agenda::count(&groups, AgendaView::Today, today, days),
            upcoming: agenda::count(&groups, AgendaView::Upcoming, today, days),
        },
        preferences,
    };

    if json {
        return print_json(&output);
    }

    println!(
        "{} projects, {} items ({} done)",
        output.project_count, output.item_count, output.done_count
    );
    if preferences.show_badges {
        println!(
            "{} {}   {} {}",
            "Today".bold(),
            output.badges.today.to_string().red(),
            "Upcoming".bold(),
            output.badges.upcoming.to_string().yellow()
        );
    }
    println!("Upcoming window: {days} days");

    Ok(())
}
