//! Project management commands.
//!
//! Commands for managing projects:
//! - `liatris project list [--search q]` - List projects with progress
//! - `liatris project add <name>` - Create a project
//! - `liatris project show <id>` - Show a project and its items
//! - `liatris project rename <id> <name>` - Rename a project
//! - `liatris project delete <id>` - Delete a project, its items and notes

use super::{format_item_line, open_storage, print_json, today};
use crate::cli::ProjectCommands;
use crate::error::{Error, Result};
use crate::model::{NewProject, Project, ProjectWithItems};
use crate::storage::{DeletedCounts, SqliteStorage};
use crate::validate::validate_name;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Serialize)]
struct ProjectOutput {
    id: i64,
    name: String,
    done: usize,
    total: usize,
}

impl From<&ProjectWithItems> for ProjectOutput {
    fn from(group: &ProjectWithItems) -> Self {
        let (done, total) = group.progress();
        Self {
            id: group.project.id,
            name: group.project.name.clone(),
            done,
            total,
        }
    }
}

#[derive(Serialize)]
struct ProjectListOutput {
    projects: Vec<ProjectOutput>,
    count: usize,
}

#[derive(Serialize)]
struct ProjectDeleteOutput {
    id: i64,
    deleted: DeletedCounts,
}

/// Execute a project command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the operation fails.
pub fn execute(command: &ProjectCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = open_storage(db_path)?;

    match command {
        ProjectCommands::List { search } => execute_list(&storage, search.as_deref(), json),
        ProjectCommands::Add { name } => execute_add(&mut storage, name, json),
        ProjectCommands::Show { id } => execute_show(&storage, *id, json),
        ProjectCommands::Rename { id, name } => execute_rename(&mut storage, *id, name, json),
        ProjectCommands::Delete { id } => execute_delete(&mut storage, *id, json),
    }
}

fn execute_list(storage: &SqliteStorage, search: Option<&str>, json: bool) -> Result<()> {
    // Blank search means no filter
    let projects = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(query) => storage.search_projects(query)?,
        None => storage.get_all_projects()?,
    };

    let mut rows = Vec::with_capacity(projects.len());
    for project in projects {
        // A project deleted between the two reads simply drops out
        if let Some(group) = storage.get_project_with_items(project.id)? {
            rows.push(ProjectOutput::from(&group));
        }
    }

    if json {
        return print_json(&ProjectListOutput {
            count: rows.len(),
            projects: rows,
        });
    }

    if rows.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    for row in &rows {
        let progress = format!("{}/{}", row.done, row.total);
        let progress = if row.total > 0 && row.done == row.total {
            progress.green()
        } else {
            progress.normal()
        };
        println!("{:>4}  {}  {progress}", row.id, row.name);
    }

    Ok(())
}

fn execute_add(storage: &mut SqliteStorage, name: &str, json: bool) -> Result<()> {
    let name = validate_name("project name", name)?;
    let id = storage.insert(NewProject::new(name.clone()))?;
    debug!(id, "Project created");

    if crate::is_silent() {
        println!("{id}");
        return Ok(());
    }

    if json {
        print_json(&Project { id, name })
    } else {
        println!("Created project {id}: {name}");
        Ok(())
    }
}

fn execute_show(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let group = storage
        .get_project_with_items(id)?
        .ok_or(Error::ProjectNotFound { id })?;

    if json {
        return print_json(&group);
    }

    let (done, total) = group.progress();
    println!("{} ({done}/{total})", group.project.name.bold());
    if group.items.is_empty() {
        println!("  No items yet.");
    }
    let today = today();
    for item in &group.items {
        println!("  {}", format_item_line(item, today));
    }

    Ok(())
}

fn execute_rename(storage: &mut SqliteStorage, id: i64, name: &str, json: bool) -> Result<()> {
    let name = validate_name("project name", name)?;
    let project = Project { id, name };

    // Phantom rows are invisible, so only rename what `get_project` can see
    if storage.get_project(id)?.is_none() || !storage.update_project(&project)? {
        return Err(Error::ProjectNotFound { id });
    }

    if json {
        print_json(&project)
    } else {
        println!("Renamed project {id} to {}", project.name);
        Ok(())
    }
}

fn execute_delete(storage: &mut SqliteStorage, id: i64, json: bool) -> Result<()> {
    // Phantom rows are invisible here too; nothing is written for them
    if storage.get_project(id)?.is_none() {
        return Err(Error::ProjectNotFound { id });
    }

    let deleted = storage.delete_project(id)?;
    if deleted.projects == 0 {
        return Err(Error::ProjectNotFound { id });
    }

    if json {
        print_json(&ProjectDeleteOutput { id, deleted })
    } else {
        println!(
            "Deleted project {id} ({} items, {} notes)",
            deleted.items, deleted.notes
        );
        Ok(())
    }
}
