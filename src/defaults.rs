//! Required settings and their typed view.
//!
//! [`ensure_defaults`] runs on every start and inserts whichever required
//! settings are missing. [`Preferences`] reads them back into typed fields.

use crate::error::Result;
use crate::model::Setting;
use crate::storage::SqliteStorage;
use tracing::{info, warn};

/// Smallest accepted upcoming window, in days.
pub const MIN_UPCOMING_DAYS: u32 = 1;

/// Largest accepted upcoming window, in days.
pub const MAX_UPCOMING_DAYS: u32 = 70;

/// Settings every store must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSetting {
    /// Width of the "upcoming" window in days.
    UpcomingThreshold,
    /// Show numeric badges for the Today/Upcoming views.
    EnableNums,
    /// Render notes in a monospace font.
    EnableMonospace,
}

impl DefaultSetting {
    pub const ALL: [Self; 3] = [
        Self::UpcomingThreshold,
        Self::EnableNums,
        Self::EnableMonospace,
    ];

    /// Stored key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::UpcomingThreshold => "UPCOMINGTHRESHOLD",
            Self::EnableNums => "ENABLENUMS",
            Self::EnableMonospace => "ENABLEMONOSPACE",
        }
    }

    /// Value inserted when the key is missing.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::UpcomingThreshold => "7",
            Self::EnableNums => "1",
            Self::EnableMonospace => "0",
        }
    }

    /// Look up a required setting by its stored key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    #[must_use]
    pub fn to_setting(self) -> Setting {
        Setting::new(self.key(), self.default_value())
    }
}

/// Insert every missing required setting in one batch.
///
/// Returns the number of settings inserted; zero when the store is already
/// complete.
///
/// # Errors
///
/// Returns an error if a lookup or the batch insert fails. A failed batch
/// inserts nothing.
pub fn ensure_defaults(storage: &mut SqliteStorage) -> Result<usize> {
    let mut missing = Vec::new();
    for default in DefaultSetting::ALL {
        if storage.get_setting(default.key())?.is_none() {
            missing.push(default.to_setting());
        }
    }

    if missing.is_empty() {
        return Ok(0);
    }

    let keys: Vec<&str> = missing.iter().map(|s| s.key.as_str()).collect();
    info!(?keys, "Inserting default settings");
    let inserted = missing.len();
    storage.insert_many(missing)?;
    Ok(inserted)
}

/// Clamp an upcoming window to the accepted range.
#[must_use]
pub fn clamp_upcoming_days(days: i64) -> u32 {
    let clamped = days.clamp(i64::from(MIN_UPCOMING_DAYS), i64::from(MAX_UPCOMING_DAYS));
    u32::try_from(clamped).unwrap_or(MAX_UPCOMING_DAYS)
}

/// Typed view over the required settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Preferences {
    /// Upcoming window in days, within `[1, 70]`.
    pub upcoming_days: u32,
    /// Whether badge counters are shown.
    pub show_badges: bool,
    /// Whether notes use a monospace font.
    pub monospace_notes: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            upcoming_days: 7,
            show_badges: true,
            monospace_notes: false,
        }
    }
}

impl Preferences {
    /// Read preferences from the store.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings lookup fails.
    pub fn load(storage: &SqliteStorage) -> Result<Self> {
        let defaults = Self::default();

        let upcoming_days = match storage.get_setting(DefaultSetting::UpcomingThreshold.key())? {
            Some(setting) => setting.as_int().map_or_else(
                || {
                    warn!(value = %setting.value, "Unparsable upcoming threshold, using default");
                    defaults.upcoming_days
                },
                clamp_upcoming_days,
            ),
            None => defaults.upcoming_days,
        };

        Ok(Self {
            upcoming_days,
            show_badges: load_flag(storage, DefaultSetting::EnableNums, defaults.show_badges)?,
            monospace_notes: load_flag(
                storage,
                DefaultSetting::EnableMonospace,
                defaults.monospace_notes,
            )?,
        })
    }
}

fn load_flag(storage: &SqliteStorage, which: DefaultSetting, fallback: bool) -> Result<bool> {
    let Some(setting) = storage.get_setting(which.key())? else {
        return Ok(fallback);
    };
    Ok(setting.as_flag().unwrap_or_else(|| {
        warn!(key = which.key(), value = %setting.value, "Unparsable flag, using default");
        fallback
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting_count(storage: &SqliteStorage) -> i64 {
        storage
            .conn()
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_ensure_defaults_fresh_store() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        assert_eq!(ensure_defaults(&mut storage).unwrap(), 3);

        for default in DefaultSetting::ALL {
            let setting = storage.get_setting(default.key()).unwrap().unwrap();
            assert_eq!(setting.value, default.default_value());
        }
    }

    #[test]
    fn test_ensure_defaults_idempotent() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        ensure_defaults(&mut storage).unwrap();
        let second = ensure_defaults(&mut storage).unwrap();

        assert_eq!(second, 0);
        assert_eq!(setting_count(&storage), 3);
    }

    #[test]
    fn test_ensure_defaults_keeps_existing_values() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.insert(Setting::new("ENABLENUMS", "0")).unwrap();

        assert_eq!(ensure_defaults(&mut storage).unwrap(), 2);
        assert_eq!(storage.get_setting("ENABLENUMS").unwrap().unwrap().value, "0");
        assert_eq!(setting_count(&storage), 3);
    }

    #[test]
    fn test_clamp_upcoming_days() {
        assert_eq!(clamp_upcoming_days(0), 1);
        assert_eq!(clamp_upcoming_days(-5), 1);
        assert_eq!(clamp_upcoming_days(14), 14);
        assert_eq!(clamp_upcoming_days(500), 70);
    }

    #[test]
    fn test_preferences_load() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        ensure_defaults(&mut storage).unwrap();
        assert_eq!(Preferences::load(&storage).unwrap(), Preferences::default());

        storage.update_setting(&Setting::new("UPCOMINGTHRESHOLD", "99")).unwrap();
        storage.update_setting(&Setting::new("ENABLEMONOSPACE", "1")).unwrap();
        storage.update_setting(&Setting::new("ENABLENUMS", "maybe")).unwrap();

        let prefs = Preferences::load(&storage).unwrap();
        assert_eq!(prefs.upcoming_days, 70);
        assert!(prefs.monospace_notes);
        assert!(prefs.show_badges);
    }

    #[test]
    fn test_preferences_without_bootstrap_use_defaults() {
        let storage = SqliteStorage::open_memory().unwrap();
        assert_eq!(Preferences::load(&storage).unwrap(), Preferences::default());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(
            DefaultSetting::from_key("ENABLEMONOSPACE"),
            Some(DefaultSetting::EnableMonospace)
        );
        assert_eq!(DefaultSetting::from_key("enablemonospace"), None);
    }
}
