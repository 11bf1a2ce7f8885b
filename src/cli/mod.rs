//! CLI definitions using clap.

use crate::agenda::AgendaView;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Liatris - Personal task manager
#[derive(Parser, Debug)]
#[command(name = "liatris", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: platform data dir, e.g. ~/.local/share/liatris/liatris.db)
    #[arg(long, global = true, env = "LIATRIS_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output only the ID (for scripting)
    #[arg(long, global = true)]
    pub silent: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version and database location
    Version,

    /// Show badge counters for Today and Upcoming
    Status,

    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Item management
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Item notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Search items by title or due date (any word matches)
    Search {
        /// Search words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show an agenda view
    View {
        /// Which view to show
        #[arg(value_enum)]
        view: AgendaView,
    },

    /// Read and change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Project Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects with their progress
    List {
        /// Only projects whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a project
    Add {
        /// Project name
        name: String,
    },

    /// Show a project and its items
    Show {
        /// Project ID
        id: i64,
    },

    /// Rename a project
    Rename {
        /// Project ID
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a project with all of its items and notes
    Delete {
        /// Project ID
        id: i64,
    },
}

// ============================================================================
// Item Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add an item to a project
    Add {
        /// Project ID
        project: i64,

        /// Item title
        title: String,

        /// Due date (YYYY-MM-DD, today, tomorrow, +3d, +1w)
        #[arg(short, long)]
        due: Option<String>,
    },

    /// Show an item
    Show {
        /// Item ID
        id: i64,
    },

    /// Mark an item as done
    Done {
        /// Item ID
        id: i64,
    },

    /// Mark an item as not done
    Undo {
        /// Item ID
        id: i64,
    },

    /// Rename an item
    Rename {
        /// Item ID
        id: i64,

        /// New title
        title: String,
    },

    /// Set or clear the due date (`none` clears)
    Due {
        /// Item ID
        id: i64,

        /// Due date (YYYY-MM-DD, today, tomorrow, +3d, +1w, none)
        date: String,
    },

    /// Move an item to another project
    Move {
        /// Item ID
        id: i64,

        /// Target project ID
        project: i64,
    },

    /// Delete an item and its note
    Delete {
        /// Item ID
        id: i64,
    },
}

// ============================================================================
// Note Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Show the note of an item (creates an empty one if needed)
    Show {
        /// Item ID
        item: i64,
    },

    /// Replace the note of an item
    Set {
        /// Item ID
        item: i64,

        /// New note content
        content: String,
    },
}

// ============================================================================
// Settings Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// List all settings
    List,

    /// Get one setting
    Get {
        /// Setting key (or short name: upcoming, badges, monospace)
        key: String,
    },

    /// Change an existing setting
    Set {
        /// Setting key (or short name: upcoming, badges, monospace)
        key: String,

        /// New value
        value: String,
    },
}
