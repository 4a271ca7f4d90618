//! Storage initialization and integrity checks

use crate::collection::{read_json, write_json};
use crate::connection::KeyValueStore;
use crate::keys;
use crate::queries::reference::{default_genres, default_statuses, default_types, SiteSettings};
use crate::seed::{demo_chapters, demo_titles};
use serde_json::Value;
use yamiko_core::{AppError, Timestamp};

/// Current storage layout version
pub const CURRENT_VERSION: &str = "1.0";

/// Result of [`initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Collections were written for the first time
    Seeded,
    /// The initialization flag was already present
    AlreadyInitialized,
}

/// Returns the current layout version
pub fn current_version() -> &'static str {
    CURRENT_VERSION
}

/// Returns true if the store carries the initialization flag
pub fn is_initialized<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool, AppError> {
    Ok(store.get(keys::INITIALIZED)?.as_deref() == Some("true"))
}

/// Returns the stored layout version, if any
pub fn stored_version<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<String>, AppError> {
    store.get(keys::VERSION)
}

/// Seeds the store with the demo catalog unless it was already initialized
///
/// Writes are not transactional across keys: a failure midway leaves the
/// keys written so far in place and the flag unset, so the next call
/// seeds again.
pub fn initialize<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<InitOutcome, AppError> {
    initialize_with(store, true)
}

/// Like [`initialize`], but `with_demo_data = false` seeds empty title and
/// chapter collections
pub fn initialize_with<S: KeyValueStore + ?Sized>(
    store: &mut S,
    with_demo_data: bool,
) -> Result<InitOutcome, AppError> {
    if is_initialized(store)? {
        log::debug!("Storage already initialized");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    let now = Timestamp::now();
    let (titles, chapters) = if with_demo_data {
        let titles = demo_titles(now);
        let chapters = demo_chapters(&titles, now);
        (titles, chapters)
    } else {
        (Vec::new(), Vec::new())
    };

    write_json(store, keys::MANGAS, &titles)?;
    write_json(store, keys::CHAPTERS, &chapters)?;
    for key in keys::AUXILIARY_COLLECTIONS {
        write_json(store, key, &Vec::<Value>::new())?;
    }
    write_json(store, keys::GENRES, &default_genres())?;
    write_json(store, keys::TYPES, &default_types())?;
    write_json(store, keys::STATUSES, &default_statuses())?;
    write_json(store, keys::SETTINGS, &SiteSettings::default())?;

    store.set(keys::INITIALIZED, "true")?;
    store.set(keys::VERSION, CURRENT_VERSION)?;

    log::info!(
        "Initialized storage v{} with {} titles and {} chapters",
        CURRENT_VERSION,
        titles.len(),
        chapters.len()
    );
    Ok(InitOutcome::Seeded)
}

/// Clears every catalog key so the next [`initialize`] seeds again
pub fn reset<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), AppError> {
    for key in keys::ARRAY_KEYS {
        store.remove(key)?;
    }
    store.remove(keys::SETTINGS)?;
    store.remove(keys::INITIALIZED)?;
    store.remove(keys::VERSION)?;

    log::info!("Storage reset");
    Ok(())
}

/// Verifies that every present collection decodes as its expected JSON shape
pub fn verify_integrity<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), AppError> {
    for key in keys::ARRAY_KEYS {
        if let Some(value) = read_json::<Value, _>(store, key)? {
            if !value.is_array() {
                return Err(AppError::StorageCorrupted {
                    key: key.to_string(),
                    details: "expected a JSON array".to_string(),
                });
            }
        }
    }

    if let Some(value) = read_json::<Value, _>(store, keys::SETTINGS)? {
        if !value.is_object() {
            return Err(AppError::StorageCorrupted {
                key: keys::SETTINGS.to_string(),
                details: "expected a JSON object".to_string(),
            });
        }
    }

    Ok(())
}
