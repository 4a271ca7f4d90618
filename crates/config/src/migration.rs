//! Upgrades settings files written by older releases
//!
//! Migrations run on the raw TOML table before it is deserialized, so renamed
//! keys survive instead of being silently replaced by defaults.

use crate::{ConfigError, ConfigResult, CONFIG_VERSION};
use toml::{Table, Value};

/// Rewrites a table from `target - 1` to `target`
type Step = fn(&mut Table) -> ConfigResult<()>;

const STEPS: &[(u32, Step)] = &[(1, unversioned_to_v1)];

/// Version recorded in the table; files without one predate versioning
pub fn stored_version(table: &Table) -> ConfigResult<u32> {
    match table.get("version") {
        None => Ok(0),
        Some(Value::Integer(v)) => u32::try_from(*v).map_err(|_| ConfigError::MigrationError {
            from: 0,
            reason: format!("version {} is out of range", v),
        }),
        Some(other) => Err(ConfigError::MigrationError {
            from: 0,
            reason: format!("version must be an integer, found {}", other.type_str()),
        }),
    }
}

/// Brings `table` up to `CONFIG_VERSION`
///
/// Returns true if anything was rewritten. Files from newer releases are
/// left alone.
pub fn migrate_to_latest(table: &mut Table) -> ConfigResult<bool> {
    migrate_with(table, CONFIG_VERSION, STEPS)
}

fn migrate_with(table: &mut Table, target: u32, steps: &[(u32, Step)]) -> ConfigResult<bool> {
    let from = stored_version(table)?;

    if from > target {
        log::warn!(
            "Settings version {} is newer than supported version {}, reading as-is",
            from,
            target
        );
        return Ok(false);
    }
    if from == target {
        return Ok(false);
    }

    log::info!("Migrating settings from version {} to {}", from, target);
    for version in from + 1..=target {
        let (_, step) = steps
            .iter()
            .find(|(v, _)| *v == version)
            .ok_or_else(|| ConfigError::MigrationError {
                from,
                reason: format!("no migration to version {}", version),
            })?;
        step(table)?;
        table.insert("version".to_string(), Value::Integer(i64::from(version)));
        log::debug!("Applied settings migration to version {}", version);
    }
    Ok(true)
}

/// Early files used shorter key names
fn unversioned_to_v1(table: &mut Table) -> ConfigResult<()> {
    rename_key(table, "catalog", "page_size", "items_per_page");
    rename_key(table, "reader", "mode", "default_mode");
    rename_key(table, "reader", "fit", "default_fit");
    rename_key(table, "reader", "background", "default_background");
    Ok(())
}

fn rename_key(table: &mut Table, section: &str, from: &str, to: &str) {
    if let Some(Value::Table(inner)) = table.get_mut(section) {
        if inner.contains_key(to) {
            inner.remove(from);
        } else if let Some(value) = inner.remove(from) {
            inner.insert(to.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Table {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_current_version_untouched() {
        let mut table = parse(&format!("version = {}\n[catalog]\nitems_per_page = 30", CONFIG_VERSION));
        let before = table.clone();
        assert!(!migrate_to_latest(&mut table).unwrap());
        assert_eq!(table, before);
    }

    #[test]
    fn test_unversioned_file_is_upgraded() {
        let mut table = parse("[catalog]\npage_size = 30\n[reader]\nmode = \"single\"");
        assert!(migrate_to_latest(&mut table).unwrap());

        assert_eq!(stored_version(&table).unwrap(), CONFIG_VERSION);
        let catalog = table["catalog"].as_table().unwrap();
        assert_eq!(catalog["items_per_page"].as_integer(), Some(30));
        assert!(!catalog.contains_key("page_size"));
        assert_eq!(table["reader"]["default_mode"].as_str(), Some("single"));
    }

    #[test]
    fn test_new_key_wins_over_legacy_key() {
        let mut table = parse("[catalog]\npage_size = 30\nitems_per_page = 50");
        migrate_to_latest(&mut table).unwrap();
        let catalog = table["catalog"].as_table().unwrap();
        assert_eq!(catalog["items_per_page"].as_integer(), Some(50));
        assert!(!catalog.contains_key("page_size"));
    }

    #[test]
    fn test_newer_file_left_alone() {
        let mut table = parse("version = 99");
        assert!(!migrate_to_latest(&mut table).unwrap());
        assert_eq!(stored_version(&table).unwrap(), 99);
    }

    #[test]
    fn test_bad_version_rejected() {
        assert!(stored_version(&parse("version = \"one\"")).is_err());
        assert!(stored_version(&parse("version = -3")).is_err());
    }

    #[test]
    fn test_steps_apply_in_order() {
        fn add_a(table: &mut Table) -> ConfigResult<()> {
            table.insert("trail".into(), Value::String("a".into()));
            Ok(())
        }
        fn add_b(table: &mut Table) -> ConfigResult<()> {
            let trail = table["trail"].as_str().unwrap_or_default().to_string();
            table.insert("trail".into(), Value::String(trail + "b"));
            Ok(())
        }

        let mut table = parse("version = 1");
        let steps: &[(u32, Step)] = &[(3, add_b), (2, add_a)];
        assert!(migrate_with(&mut table, 3, steps).unwrap());
        assert_eq!(table["trail"].as_str(), Some("ab"));
        assert_eq!(stored_version(&table).unwrap(), 3);
    }

    #[test]
    fn test_missing_step_is_an_error() {
        let mut table = parse("version = 1");
        assert!(matches!(
            migrate_with(&mut table, 2, &[]),
            Err(ConfigError::MigrationError { from: 1, .. })
        ));
    }
}
