//! Data models for Liatris.
//!
//! This module contains all persisted record shapes:
//! - Setting
//! - Project (and the composite `ProjectWithItems` view)
//! - Item
//! - ItemNote
//!
//! plus the `New*` shapes and the [`Record`] sum type accepted by the
//! generic insert operations.

pub mod item;
pub mod note;
pub mod project;
pub mod record;
pub mod setting;

pub use item::{Item, NewItem};
pub use note::{ItemNote, NewItemNote};
pub use project::{NewProject, Project, ProjectWithItems};
pub use record::Record;
pub use setting::Setting;
