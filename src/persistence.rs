//! Mirrors roster state to and from a [`LocalStorage`].

use crate::errors::{HydrateError, StorageError};
use crate::models::{Features, RosterConfig, TeamMember};
use crate::roster::{Change, RosterStore};
use crate::storage::LocalStorage;
use tracing::{debug, error, info, warn};

pub const TEAM_KEY: &str = "team";
pub const LATE_LIMIT_KEY: &str = "lateLimit";
pub const PUNISHMENT_KEY: &str = "punishment";

/// Reads persisted state into a fresh store. Read-only: nothing is written
/// back and no changes are recorded.
pub fn hydrate(storage: &dyn LocalStorage, features: Features) -> Result<RosterStore, HydrateError> {
    let members = read_members(storage)?;

    let mut config = RosterConfig::default();
    if features.has_limit {
        if let Some(limit) = read_late_limit(storage)? {
            config.late_limit = limit;
        }
        if let Some(punishment) = read_punishment(storage)? {
            config.punishment = punishment;
        }
    }

    debug!(members = members.len(), late_limit = config.late_limit, "hydrated roster");
    Ok(RosterStore::from_parts(features, members, config))
}

/// Hydrates key by key. A malformed entry is logged and replaced by its
/// default without discarding the other entries.
pub fn load_or_default(storage: &dyn LocalStorage, features: Features) -> RosterStore {
    let members = read_members(storage).unwrap_or_else(|err| {
        error!("failed to load stored team, starting empty: {err}");
        Vec::new()
    });

    let mut config = RosterConfig::default();
    if features.has_limit {
        match read_late_limit(storage) {
            Ok(Some(limit)) => config.late_limit = limit,
            Ok(None) => {}
            Err(err) => warn!("keeping default late limit {}: {err}", config.late_limit),
        }
        match read_punishment(storage) {
            Ok(Some(punishment)) => config.punishment = punishment,
            Ok(None) => {}
            Err(err) => warn!("keeping default punishment: {err}"),
        }
    }

    debug!(members = members.len(), late_limit = config.late_limit, "loaded roster");
    RosterStore::from_parts(features, members, config)
}

fn read_members(storage: &dyn LocalStorage) -> Result<Vec<TeamMember>, HydrateError> {
    match non_empty(storage.get_item(TEAM_KEY)?) {
        Some(raw) => serde_json::from_str(&raw).map_err(HydrateError::CorruptTeam),
        None => Ok(Vec::new()),
    }
}

fn read_late_limit(storage: &dyn LocalStorage) -> Result<Option<i64>, HydrateError> {
    let Some(raw) = non_empty(storage.get_item(LATE_LIMIT_KEY)?) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|source| HydrateError::InvalidLimit { value: raw.clone(), source })
}

fn read_punishment(storage: &dyn LocalStorage) -> Result<Option<String>, HydrateError> {
    Ok(non_empty(storage.get_item(PUNISHMENT_KEY)?))
}

/// Writes the given slices. Failures are logged and dropped; the in-memory
/// store stays authoritative.
pub fn persist_changes(storage: &dyn LocalStorage, store: &RosterStore, changes: &[Change]) {
    for change in changes {
        if let Err(err) = persist_change(storage, store, *change) {
            error!(?change, "failed to persist roster state: {err}");
        }
    }
}

/// Drains the store's pending changes and persists them.
pub fn flush(storage: &dyn LocalStorage, store: &mut RosterStore) {
    let changes = store.drain_changes();
    if changes.is_empty() {
        return;
    }
    persist_changes(storage, store, &changes);
}

fn persist_change(
    storage: &dyn LocalStorage,
    store: &RosterStore,
    change: Change,
) -> Result<(), StorageError> {
    match change {
        Change::Team => {
            let members = store.members();
            if !members.is_empty() {
                let payload = serde_json::to_string(members)?;
                storage.set_item(TEAM_KEY, &payload)
            } else if store.features().has_limit {
                info!("roster emptied, removing stored team");
                storage.remove_item(TEAM_KEY)
            } else {
                Ok(())
            }
        }
        Change::LateLimit => {
            storage.set_item(LATE_LIMIT_KEY, &store.config().late_limit.to_string())
        }
        Change::Punishment => storage.set_item(PUNISHMENT_KEY, &store.config().punishment),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn hydrate_from_empty_storage_uses_defaults() {
        let storage = MemoryStorage::new();
        let store = hydrate(&storage, Features::limited()).unwrap();

        assert!(store.members().is_empty());
        assert_eq!(store.config(), &RosterConfig::default());
        assert!(storage.snapshot().is_empty());
    }

    #[test]
    fn hydrate_does_not_record_changes() {
        let storage = MemoryStorage::new();
        storage
            .set_item(TEAM_KEY, r#"[{"id":1,"name":"A","points":2}]"#)
            .unwrap();
        storage.set_item(LATE_LIMIT_KEY, "5").unwrap();

        let mut store = hydrate(&storage, Features::limited()).unwrap();
        assert!(store.drain_changes().is_empty());
        assert_eq!(store.config().late_limit, 5);
    }

    #[test]
    fn plain_variant_ignores_stored_config() {
        let storage = MemoryStorage::new();
        storage.set_item(LATE_LIMIT_KEY, "not a number").unwrap();
        storage.set_item(PUNISHMENT_KEY, "Sing").unwrap();

        let store = hydrate(&storage, Features::plain()).unwrap();
        assert_eq!(store.config(), &RosterConfig::default());
    }

    #[test]
    fn bad_limit_is_reported() {
        let storage = MemoryStorage::new();
        storage.set_item(LATE_LIMIT_KEY, "three").unwrap();

        let err = hydrate(&storage, Features::limited()).unwrap_err();
        assert!(matches!(err, HydrateError::InvalidLimit { ref value, .. } if value == "three"));
    }

    #[test]
    fn corrupt_team_falls_back_to_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(TEAM_KEY, "[{").unwrap();

        assert!(matches!(
            hydrate(&storage, Features::limited()),
            Err(HydrateError::CorruptTeam(_))
        ));
        let store = load_or_default(&storage, Features::limited());
        assert!(store.members().is_empty());
    }

    #[test]
    fn bad_limit_keeps_stored_team() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                TEAM_KEY,
                r#"[{"id":1,"name":"Ana","points":1},{"id":2,"name":"Ben","points":0}]"#,
            )
            .unwrap();
        storage.set_item(LATE_LIMIT_KEY, "4.5").unwrap();
        storage.set_item(PUNISHMENT_KEY, "Sing a song").unwrap();

        let mut store = load_or_default(&storage, Features::limited());
        assert_eq!(store.members().len(), 2);
        assert_eq!(store.config().late_limit, crate::models::DEFAULT_LATE_LIMIT);
        assert_eq!(store.config().punishment, "Sing a song");
        assert!(store.drain_changes().is_empty());

        assert_eq!(store.add_member("Cy"), Some(3));
        flush(&storage, &mut store);
        let stored: Vec<TeamMember> =
            serde_json::from_str(&storage.get_item(TEAM_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[test]
    fn corrupt_team_keeps_stored_config() {
        let storage = MemoryStorage::new();
        storage.set_item(TEAM_KEY, "not json").unwrap();
        storage.set_item(LATE_LIMIT_KEY, "6").unwrap();

        let store = load_or_default(&storage, Features::limited());
        assert!(store.members().is_empty());
        assert_eq!(store.config().late_limit, 6);
    }

    #[test]
    fn emptied_roster_is_removed_only_with_limit() {
        for (features, expect_team) in [(Features::limited(), false), (Features::plain(), true)] {
            let storage = MemoryStorage::new();
            let mut store = RosterStore::new(features);
            let id = store.add_member("A").unwrap();
            flush(&storage, &mut store);
            assert!(storage.get_item(TEAM_KEY).unwrap().is_some());

            store.remove_member(id);
            flush(&storage, &mut store);
            assert_eq!(storage.get_item(TEAM_KEY).unwrap().is_some(), expect_team);
        }
    }

    #[test]
    fn quota_failure_keeps_memory_state() {
        let storage = MemoryStorage::with_quota(8);
        let mut store = RosterStore::new(Features::limited());
        store.add_member("Someone with a long name").unwrap();
        flush(&storage, &mut store);

        assert_eq!(store.members().len(), 1);
        assert!(storage.get_item(TEAM_KEY).unwrap().is_none());
    }

    #[test]
    fn config_written_verbatim() {
        let storage = MemoryStorage::new();
        let mut store = RosterStore::new(Features::limited());
        store.set_late_limit(-2);
        store.set_punishment("  Bring pizza ");
        flush(&storage, &mut store);

        assert_eq!(storage.get_item(LATE_LIMIT_KEY).unwrap().as_deref(), Some("-2"));
        assert_eq!(
            storage.get_item(PUNISHMENT_KEY).unwrap().as_deref(),
            Some("  Bring pizza ")
        );
    }
}
