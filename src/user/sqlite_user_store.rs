use super::auth::{CredentialHasher, PasswordCredentials};
use super::user_store::UserStore;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    open_versioned_db, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    DEFAULT_TIMESTAMP,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// V 0
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("handle", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_user_handle", "handle")],
};

const USER_PASSWORD_CREDENTIALS_V_0: Table = Table {
    name: "user_password_credentials",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("salt", &SqlType::Text, non_null = true),
        sqlite_column!("hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_tried", &SqlType::Integer),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    unique_constraints: &[],
    indices: &[],
};

pub const USER_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[USER_TABLE_V_0, USER_PASSWORD_CREDENTIALS_V_0],
    migration: None,
}];

fn system_time_from_secs(secs: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, USER_VERSIONED_SCHEMAS)?;
        let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM user", [], |r| r.get(0))?;
        info!("Opened user database with {} users", user_count);
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserStore for SqliteUserStore {
    fn create_user_with_password(
        &self,
        user_handle: &str,
        salt: &str,
        hash: &str,
        hasher: &CredentialHasher,
    ) -> Result<Option<usize>> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        match tx.execute(
            &format!("INSERT INTO {} (handle) VALUES (?1)", USER_TABLE_V_0.name),
            params![user_handle],
        ) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                debug!("User handle {} is already taken", user_handle);
                return Ok(None);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to create user {}", user_handle))
            }
        }
        let user_id = tx.last_insert_rowid() as usize;
        tx.execute(
            &format!(
                "INSERT INTO {} (user_id, salt, hash, hasher) VALUES (?1, ?2, ?3, ?4)",
                USER_PASSWORD_CREDENTIALS_V_0.name
            ),
            params![user_id, salt, hash, hasher.to_string()],
        )?;
        tx.commit()?;
        debug!("Created user {} with id {}", user_handle, user_id);
        Ok(Some(user_id))
    }

    fn get_user_id(&self, user_handle: &str) -> Result<Option<usize>> {
        let conn = self.lock();
        Ok(conn
            .query_row(
                &format!("SELECT id FROM {} WHERE handle = ?1", USER_TABLE_V_0.name),
                params![user_handle],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn get_password_credentials(&self, user_handle: &str) -> Result<Option<PasswordCredentials>> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT c.user_id, c.salt, c.hash, c.hasher, c.created
                 FROM user_password_credentials c JOIN user u ON u.id = c.user_id
                 WHERE u.handle = ?1",
                params![user_handle],
                |row| {
                    Ok((
                        row.get::<_, usize>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<i64>>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((user_id, salt, hash, hasher, created)) = row else {
            return Ok(None);
        };
        Ok(Some(PasswordCredentials {
            user_id,
            salt,
            hash,
            hasher: CredentialHasher::from_str(&hasher)?,
            created: system_time_from_secs(created.unwrap_or(0)),
        }))
    }

    fn update_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()> {
        let conn = self.lock();
        let updated = conn.execute(
            "UPDATE user_password_credentials SET salt = ?1, hash = ?2, hasher = ?3 WHERE user_id = ?4",
            params![
                credentials.salt,
                credentials.hash,
                credentials.hasher.to_string(),
                credentials.user_id
            ],
        )?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO user_password_credentials (salt, hash, hasher, user_id) VALUES (?1, ?2, ?3, ?4)",
                params![
                    credentials.salt,
                    credentials.hash,
                    credentials.hasher.to_string(),
                    credentials.user_id
                ],
            )?;
        }
        Ok(())
    }

    fn touch_password_credentials(&self, user_id: usize, success: bool) -> Result<()> {
        let conn = self.lock();
        let now = now_secs();
        if success {
            conn.execute(
                "UPDATE user_password_credentials SET last_tried = ?1, last_used = ?1 WHERE user_id = ?2",
                params![now, user_id],
            )?;
        } else {
            conn.execute(
                "UPDATE user_password_credentials SET last_tried = ?1 WHERE user_id = ?2",
                params![now, user_id],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteUserStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let temp_file_path = temp_dir.path().join("test.db");
        let store = SqliteUserStore::new(&temp_file_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn creates_user_with_credentials() {
        let (store, _temp_dir) = create_tmp_store();

        let user_id = store
            .create_user_with_password("test_user", "salt", "hash", &CredentialHasher::Argon2)
            .unwrap();
        assert_eq!(user_id, Some(1));
        assert_eq!(store.get_user_id("test_user").unwrap(), Some(1));

        let credentials = store.get_password_credentials("test_user").unwrap().unwrap();
        assert_eq!(credentials.user_id, 1);
        assert_eq!(credentials.salt, "salt");
        assert_eq!(credentials.hash, "hash");
        assert_eq!(credentials.hasher, CredentialHasher::Argon2);
    }

    #[test]
    fn duplicate_handle_is_reported_without_partial_rows() {
        let (store, _temp_dir) = create_tmp_store();
        store
            .create_user_with_password("test_user", "salt", "hash", &CredentialHasher::Argon2)
            .unwrap();

        assert_eq!(
            store
                .create_user_with_password("test_user", "salt2", "hash2", &CredentialHasher::Argon2)
                .unwrap(),
            None
        );

        let credentials_rows: i64 = store
            .lock()
            .query_row("SELECT COUNT(*) FROM user_password_credentials", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(credentials_rows, 1);
    }

    #[test]
    fn unknown_user_has_no_credentials() {
        let (store, _temp_dir) = create_tmp_store();
        assert_eq!(store.get_user_id("nobody").unwrap(), None);
        assert!(store.get_password_credentials("nobody").unwrap().is_none());
    }

    #[test]
    fn updates_only_the_given_user() {
        let (store, _temp_dir) = create_tmp_store();
        let first = store
            .create_user_with_password("first", "salt1", "hash1", &CredentialHasher::Argon2)
            .unwrap()
            .unwrap();
        store
            .create_user_with_password("second", "salt2", "hash2", &CredentialHasher::Argon2)
            .unwrap();

        let mut credentials = store.get_password_credentials("first").unwrap().unwrap();
        assert_eq!(credentials.user_id, first);
        credentials.salt = "new_salt".to_string();
        credentials.hash = "new_hash".to_string();
        store.update_password_credentials(&credentials).unwrap();

        assert_eq!(
            store.get_password_credentials("first").unwrap().unwrap().hash,
            "new_hash"
        );
        assert_eq!(
            store.get_password_credentials("second").unwrap().unwrap().hash,
            "hash2"
        );
    }

    #[test]
    fn records_login_attempts() {
        let (store, _temp_dir) = create_tmp_store();
        let user_id = store
            .create_user_with_password("test_user", "salt", "hash", &CredentialHasher::Argon2)
            .unwrap()
            .unwrap();

        store.touch_password_credentials(user_id, false).unwrap();
        let (tried, used): (Option<i64>, Option<i64>) = store
            .lock()
            .query_row(
                "SELECT last_tried, last_used FROM user_password_credentials WHERE user_id = ?1",
                params![user_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert!(tried.is_some());
        assert!(used.is_none());

        store.touch_password_credentials(user_id, true).unwrap();
        let used: Option<i64> = store
            .lock()
            .query_row(
                "SELECT last_used FROM user_password_credentials WHERE user_id = ?1",
                params![user_id],
                |r| r.get(0),
            )
            .unwrap();
        assert!(used.is_some());
    }
}
