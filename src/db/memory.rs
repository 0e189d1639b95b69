// src/db/memory.rs
use std::sync::{Mutex, MutexGuard};

use crate::models::{NewPasswordRecord, PasswordRecord};
use super::{DbError, PasswordStore};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<PasswordRecord>,
    last_id: i64,
}

/// Process-local store; contents vanish with the handle.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, DbError> {
        self.state.lock().map_err(|_| DbError::LockPoisoned)
    }
}

fn owned_by(record: &PasswordRecord, owner: Option<&str>) -> bool {
    owner.map_or(true, |o| record.owner.as_deref() == Some(o))
}

impl PasswordStore for MemoryBackend {
    fn append(&self, record: &NewPasswordRecord) -> Result<i64, DbError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = state.last_id;
        state.records.push(record.clone().into_record(id));
        Ok(id)
    }

    fn list(&self, owner: Option<&str>) -> Result<Vec<PasswordRecord>, DbError> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|r| owned_by(r, owner))
            .cloned()
            .collect())
    }

    fn get(&self, id: i64, owner: Option<&str>) -> Result<Option<PasswordRecord>, DbError> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .find(|r| r.id == id && owned_by(r, owner))
            .cloned())
    }

    fn delete(&self, id: i64, owner: Option<&str>) -> Result<bool, DbError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|r| !(r.id == id && owned_by(r, owner)));
        Ok(state.records.len() < before)
    }

    fn delete_all(&self, owner: Option<&str>) -> Result<usize, DbError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|r| !owned_by(r, owner));
        Ok(before - state.records.len())
    }

    fn count(&self, owner: Option<&str>) -> Result<usize, DbError> {
        let state = self.lock()?;
        Ok(state.records.iter().filter(|r| owned_by(r, owner)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryBackend::new();
        let first = store.append(&NewPasswordRecord::new("a".into(), None)).unwrap();
        assert!(store.delete(first, None).unwrap());
        let second = store.append(&NewPasswordRecord::new("b".into(), None)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn delete_on_empty_store_is_a_no_op() {
        let store = MemoryBackend::new();
        assert!(!store.delete(999, None).unwrap());
        assert_eq!(store.delete_all(Some("nobody")).unwrap(), 0);
    }
}
