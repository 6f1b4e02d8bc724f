//! Local identity persistence
//!
//! One user record per machine, looked up by a fixed cache key. Read once
//! at startup, written once when the identity is first created.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::{parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::User;

const CACHE_KEY: &str = "local_user";

/// Identity store
pub struct IdentityStore<'a> {
    conn: &'a Connection,
}

impl<'a> IdentityStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Save the local user, replacing any previously cached identity
    #[instrument(skip(self, user), fields(name = %user.name))]
    pub fn save(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO local_identity (cache_key, user_id, name, avatar_color, cached_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                CACHE_KEY,
                user.user_id.to_string(),
                user.name,
                user.avatar_color,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load the cached local user, if one exists
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, name, avatar_color FROM local_identity WHERE cache_key = ?1",
        )?;

        let user = stmt
            .query_row(params![CACHE_KEY], |row| {
                Ok(User {
                    user_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    avatar_color: row.get(2)?,
                })
            })
            .optional()?;

        Ok(user)
    }

    /// Forget the cached identity
    pub fn clear(&self) -> Result<()> {
        self.conn.execute(
            "DELETE FROM local_identity WHERE cache_key = ?1",
            params![CACHE_KEY],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_identity_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let user = User::new("Alice");

        db.identity().save(&user).unwrap();

        let loaded = db.identity().load().unwrap().expect("cached user");
        assert_eq!(loaded, user);
    }

    #[test]
    fn test_load_without_cached_identity() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.identity().load().unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_previous_identity() {
        let db = Database::open_in_memory().unwrap();
        db.identity().save(&User::new("Alice")).unwrap();

        let replacement = User::new("Bob");
        db.identity().save(&replacement).unwrap();

        let loaded = db.identity().load().unwrap().unwrap();
        assert_eq!(loaded, replacement);
    }

    #[test]
    fn test_absent_avatar_color_round_trips() {
        let db = Database::open_in_memory().unwrap();
        let mut user = User::new("Alice");
        user.avatar_color = None;

        db.identity().save(&user).unwrap();
        assert_eq!(db.identity().load().unwrap().unwrap().avatar_color, None);
    }

    #[test]
    fn test_clear() {
        let db = Database::open_in_memory().unwrap();
        db.identity().save(&User::new("Alice")).unwrap();

        db.identity().clear().unwrap();
        assert!(db.identity().load().unwrap().is_none());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quorum.db");

        {
            let db = Database::open(&path).unwrap();
            db.identity().save(&User::new("Alice")).unwrap();
            assert!(db.schema_version() >= 1);
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.identity().load().unwrap().unwrap().name, "Alice");
    }
}
