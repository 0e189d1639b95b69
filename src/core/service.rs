// src/core/service.rs
use thiserror::Error;

use crate::db::{Database, DbError, PasswordStore};
use crate::generators::{Generated, GenerationError, PasswordGenerator};
use crate::models::{GenerationRequest, NewPasswordRecord, PasswordRecord};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Password was generated but NOT saved: {0}")]
    NotSaved(#[source] DbError),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Generation(_) => false,
            ServiceError::NotSaved(e) | ServiceError::Storage(e) => e.is_retryable(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Generation plus persistence over an explicitly owned store handle.
pub struct PassGen {
    db: Database,
    generator: PasswordGenerator,
}

impl PassGen {
    pub fn new(db: Database, generator: PasswordGenerator) -> Self {
        Self { db, generator }
    }

    pub fn generator(&self) -> &PasswordGenerator {
        &self.generator
    }

    pub fn get_db_ref(&self) -> &Database {
        &self.db
    }

    /// Generates without storing anything.
    pub fn preview(&self, request: &GenerationRequest) -> Result<Generated> {
        let generated = self
            .generator
            .generate_password(request.base.as_deref(), request.length)?;
        Ok(generated)
    }

    /// Generates a password and appends exactly one record for it.
    /// If the append fails the caller gets [`ServiceError::NotSaved`] and no value.
    pub fn generate(&self, request: &GenerationRequest) -> Result<PasswordRecord> {
        let generated = self.preview(request)?;
        log::info!(
            "Generated {}-character password ({:?})",
            generated.value.chars().count(),
            generated.method
        );

        let record = NewPasswordRecord::new(generated.value, generated.base)
            .with_label(request.label.clone())
            .with_owner(request.owner.clone());

        match self.db.append(&record) {
            Ok(id) => Ok(record.into_record(id)),
            Err(e) => {
                log::error!("Failed to store generated password: {}", e);
                Err(ServiceError::NotSaved(e))
            }
        }
    }

    pub fn list(&self, owner: Option<&str>) -> Result<Vec<PasswordRecord>> {
        Ok(self.db.list(owner)?)
    }

    pub fn get(&self, id: i64, owner: Option<&str>) -> Result<Option<PasswordRecord>> {
        Ok(self.db.get(id, owner)?)
    }

    pub fn count(&self, owner: Option<&str>) -> Result<usize> {
        Ok(self.db.count(owner)?)
    }

    pub fn delete(&self, id: i64, owner: Option<&str>) -> Result<bool> {
        let removed = self.db.delete(id, owner)?;
        if removed {
            log::info!("Deleted password record {}", id);
        }
        Ok(removed)
    }

    pub fn delete_all(&self, owner: Option<&str>) -> Result<usize> {
        let removed = self.db.delete_all(owner)?;
        log::info!("Deleted {} password record(s)", removed);
        Ok(removed)
    }

    /// Releases the store handle.
    pub fn close(self) -> Result<()> {
        Ok(self.db.close()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::SubstitutionTable;

    fn service() -> PassGen {
        PassGen::new(
            Database::in_memory(),
            PasswordGenerator::new(SubstitutionTable::from([('A', "5"), ('B', "*")])),
        )
    }

    #[test]
    fn derived_password_is_stored_with_base() {
        let svc = service();
        let record = svc.generate(&GenerationRequest::from_base("ABC")).unwrap();
        assert_eq!(record.value, "5*C");
        assert_eq!(record.base.as_deref(), Some("ABC"));
        assert_eq!(svc.list(None).unwrap(), vec![record]);
    }

    #[test]
    fn random_password_is_stored_without_base() {
        let svc = service();
        let record = svc.generate(&GenerationRequest::random(8)).unwrap();
        assert_eq!(record.value.len(), 8);
        assert_eq!(record.base, None);
        assert_eq!(svc.count(None).unwrap(), 1);
    }

    #[test]
    fn invalid_request_stores_nothing() {
        let svc = service();
        let err = svc.generate(&GenerationRequest::random(-1)).unwrap_err();
        assert!(matches!(err, ServiceError::Generation(GenerationError::InvalidLength(-1))));
        assert!(!err.is_retryable());
        assert_eq!(svc.count(None).unwrap(), 0);
    }

    #[test]
    fn preview_does_not_persist() {
        let svc = service();
        let generated = svc.preview(&GenerationRequest::from_base("AB")).unwrap();
        assert_eq!(generated.value, "5*");
        assert!(svc.list(None).unwrap().is_empty());
    }

    #[test]
    fn failed_append_reports_not_saved() {
        let svc = PassGen::new(
            Database::new("sqlite::memory:").unwrap(),
            PasswordGenerator::default(),
        );
        svc.get_db_ref()
            .get_sqlite_backend()
            .unwrap()
            .with_connection(|conn| Ok(conn.execute_batch("DROP TABLE passwords")?))
            .unwrap();

        let err = svc.generate(&GenerationRequest::random(12)).unwrap_err();
        assert!(matches!(err, ServiceError::NotSaved(_)));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("NOT saved"));
    }

    #[test]
    fn count_follows_store_backend() {
        let svc = service();
        assert_eq!(svc.get_db_ref().get_backend_type(), "Memory");
        svc.generate(&GenerationRequest::from_base("A")).unwrap();
        svc.generate(&GenerationRequest {
            owner: Some("user1".into()),
            ..GenerationRequest::random(4)
        })
        .unwrap();
        assert_eq!(svc.count(None).unwrap(), 2);
        assert_eq!(svc.count(Some("user1")).unwrap(), 1);
    }

    #[test]
    fn owner_scoping() {
        let svc = service();
        let mine = svc
            .generate(&GenerationRequest {
                owner: Some("user1".into()),
                label: Some("mail".into()),
                ..GenerationRequest::from_base("A")
            })
            .unwrap();
        let theirs = svc
            .generate(&GenerationRequest {
                owner: Some("user2".into()),
                ..GenerationRequest::random(6)
            })
            .unwrap();

        assert_eq!(svc.list(Some("user1")).unwrap(), vec![mine.clone()]);
        assert_eq!(svc.list(None).unwrap().len(), 2);
        assert_eq!(svc.get(theirs.id, Some("user1")).unwrap(), None);
        assert!(!svc.delete(theirs.id, Some("user1")).unwrap());
        assert_eq!(svc.delete_all(Some("user2")).unwrap(), 1);
        assert_eq!(svc.list(None).unwrap(), vec![mine]);
    }
}
