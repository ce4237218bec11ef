//! redb-backed storage for users and todos.
//!
//! Records are postcard-encoded and keyed by UUID bytes. Usernames get a
//! secondary index; everything else is a scan (fine at team scale).

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{errors::StoreError, todo::Todo, user::User};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const USERNAME_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("username_index");
const TODOS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("todos");

/// Thin handle to the redb file. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database at `path`, creating tables if needed.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERNAME_INDEX)?;
            let _ = write_txn.open_table(TODOS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    // USERS

    /// Insert a new user. The uniqueness checks run inside the same write
    /// transaction as the insert, so concurrent registrations cannot both win.
    pub fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let username_key = user.username.to_lowercase();
        let email = user.email.to_lowercase();

        let write_txn = self.db.begin_write()?;
        {
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            let mut username_index = write_txn.open_table(USERNAME_INDEX)?;

            if username_index.get(username_key.as_str())?.is_some() {
                return Err(StoreError::UsernameTaken);
            }
            for entry in users_table.iter()? {
                let (_, value) = entry?;
                let existing: User = decode(value.value())?;
                if existing.email.to_lowercase() == email {
                    return Err(StoreError::EmailTaken);
                }
            }

            let user_bytes = encode(user)?;
            let id_bytes = user.id.as_bytes();
            users_table.insert(id_bytes.as_slice(), user_bytes.as_slice())?;
            username_index.insert(username_key.as_str(), id_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        match users_table.get(id.as_bytes().as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    /// Usernames are unique case-insensitively.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let username_index = read_txn.open_table(USERNAME_INDEX)?;

        let Some(id_data) = username_index.get(username.to_lowercase().as_str())? else {
            return Ok(None);
        };
        let users_table = read_txn.open_table(USERS_TABLE)?;
        match users_table.get(id_data.value())? {
            Some(user_data) => Ok(Some(decode(user_data.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim().to_lowercase();
        Ok(self.list_users()?.into_iter().find(|u| u.email == email))
    }

    pub fn user_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        Ok(users_table.get(id.as_bytes().as_slice())?.is_some())
    }

    pub fn user_count(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        Ok(users_table.len()?)
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;

        let mut users = Vec::new();
        for entry in users_table.iter()? {
            let (_, value) = entry?;
            users.push(decode(value.value())?);
        }
        Ok(users)
    }

    pub fn users_by_id(&self) -> Result<HashMap<Uuid, User>, StoreError> {
        Ok(self.list_users()?.into_iter().map(|u| (u.id, u)).collect())
    }

    // TODOS

    /// Insert or overwrite a todo in one write transaction.
    pub fn put_todo(&self, todo: &Todo) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut todos_table = write_txn.open_table(TODOS_TABLE)?;
            let todo_bytes = encode(todo)?;
            todos_table.insert(todo.id.as_bytes().as_slice(), todo_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_todo(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let todos_table = read_txn.open_table(TODOS_TABLE)?;
        match todos_table.get(id.as_bytes().as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    /// Every todo matching `keep`, newest `created_at` first.
    pub fn list_todos_where<F>(&self, keep: F) -> Result<Vec<Todo>, StoreError>
    where
        F: Fn(&Todo) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let todos_table = read_txn.open_table(TODOS_TABLE)?;

        let mut todos = Vec::new();
        for entry in todos_table.iter()? {
            let (_, value) = entry?;
            let todo: Todo = decode(value.value())?;
            if keep(&todo) {
                todos.push(todo);
            }
        }

        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    /// Read, change and write back a todo in one write transaction.
    /// `change` gets the stored record and a user-existence lookup; nothing
    /// is written unless it returns `Ok`. `None` if there is no such todo.
    pub fn update_todo<E, F>(&self, id: Uuid, change: F) -> Result<Option<Todo>, E>
    where
        E: From<StoreError>,
        F: FnOnce(&Todo, &dyn Fn(Uuid) -> Result<bool, StoreError>) -> Result<Todo, E>,
    {
        let key = id.as_bytes();
        let write_txn = self.db.begin_write().map_err(StoreError::from)?;
        let updated = {
            let mut todos_table = write_txn.open_table(TODOS_TABLE).map_err(StoreError::from)?;
            let users_table = write_txn.open_table(USERS_TABLE).map_err(StoreError::from)?;

            let current: Todo = match todos_table.get(key.as_slice()).map_err(StoreError::from)? {
                Some(data) => decode(data.value())?,
                None => return Ok(None),
            };
            let user_exists = |user_id: Uuid| -> Result<bool, StoreError> {
                Ok(users_table.get(user_id.as_bytes().as_slice())?.is_some())
            };

            let updated = change(&current, &user_exists)?;
            let todo_bytes = encode(&updated)?;
            todos_table
                .insert(key.as_slice(), todo_bytes.as_slice())
                .map_err(StoreError::from)?;
            updated
        };
        write_txn.commit().map_err(StoreError::from)?;
        Ok(Some(updated))
    }

    /// Remove a todo if `allow` accepts it, in one write transaction.
    /// `Ok(false)` if there is no such todo.
    pub fn delete_todo_if<E, F>(&self, id: Uuid, allow: F) -> Result<bool, E>
    where
        E: From<StoreError>,
        F: FnOnce(&Todo) -> Result<(), E>,
    {
        let key = id.as_bytes();
        let write_txn = self.db.begin_write().map_err(StoreError::from)?;
        {
            let mut todos_table = write_txn.open_table(TODOS_TABLE).map_err(StoreError::from)?;

            let current: Todo = match todos_table.get(key.as_slice()).map_err(StoreError::from)? {
                Some(data) => decode(data.value())?,
                None => return Ok(false),
            };
            allow(&current)?;
            todos_table.remove(key.as_slice()).map_err(StoreError::from)?;
        }
        write_txn.commit().map_err(StoreError::from)?;
        Ok(true)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(value).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────
