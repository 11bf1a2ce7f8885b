//! Settings commands.
//!
//! Keys are resolved through [`resolve_setting_key`], so `upcoming`,
//! `badges` and `mono` work as short names. Values for the required settings
//! are normalized before they are written.

use super::{open_storage, print_json};
use crate::cli::SettingsCommands;
use crate::error::{Error, Result};
use crate::model::Setting;
use crate::storage::SqliteStorage;
use crate::validate::{find_similar_keys, normalize_setting_value, resolve_setting_key};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Serialize)]
struct SettingsListOutput {
    settings: Vec<Setting>,
    count: usize,
}

/// Execute a settings command.
///
/// # Errors
///
/// Returns `SettingNotFound` for unknown keys, `InvalidArgument` for
/// malformed values, or a storage error.
pub fn execute(command: &SettingsCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = open_storage(db_path)?;

    match command {
        SettingsCommands::List => execute_list(&storage, json),
        SettingsCommands::Get { key } => {
            let setting = lookup(&storage, key)?;
            print_setting(&setting, json)
        }
        SettingsCommands::Set { key, value } => execute_set(&mut storage, key, value, json),
    }
}

fn execute_list(storage: &SqliteStorage, json: bool) -> Result<()> {
    let settings = storage.list_settings()?;

    if json {
        return print_json(&SettingsListOutput {
            count: settings.len(),
            settings,
        });
    }

    let width = settings.iter().map(|s| s.key.len()).max().unwrap_or(0);
    for setting in &settings {
        println!("{:<width$}  {}", setting.key, setting.value);
    }
    Ok(())
}

/// Find a setting by user-typed key, suggesting close matches on a miss.
fn lookup(storage: &SqliteStorage, key: &str) -> Result<Setting> {
    let key = resolve_setting_key(key);
    if let Some(setting) = storage.get_setting(&key)? {
        return Ok(setting);
    }

    let existing: Vec<String> = storage.list_settings()?.into_iter().map(|s| s.key).collect();
    Err(Error::SettingNotFound {
        similar: find_similar_keys(&key, &existing, 3),
        key,
    })
}

fn execute_set(storage: &mut SqliteStorage, key: &str, value: &str, json: bool) -> Result<()> {
    // Only existing keys can be changed; new keys come from inserts
    let mut setting = lookup(storage, key)?;
    setting.value = normalize_setting_value(&setting.key, value)?;

    if !storage.update_setting(&setting)? {
        return Err(Error::SettingNotFound {
            key: setting.key,
            similar: Vec::new(),
        });
    }
    debug!(key = %setting.key, value = %setting.value, "Setting updated");

    print_setting(&setting, json)
}

fn print_setting(setting: &Setting, json: bool) -> Result<()> {
    if json {
        print_json(setting)
    } else {
        println!("{} = {}", setting.key, setting.value);
        Ok(())
    }
}
