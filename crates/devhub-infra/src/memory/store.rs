use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use devhub_core::error::RepoError;
use devhub_core::ports::BaseRepository;

/// A row the in-memory store can hold.
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in constraint messages.
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    /// Unique-index emulation: whether `self` and `other` may not coexist.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

/// A table: rows keyed by id behind an async RwLock.
pub struct InMemoryRepository<T> {
    pub(super) rows: RwLock<HashMap<Uuid, T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Every row matching `predicate`, in no particular order.
    pub(super) async fn select<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    fn check_unique(rows: &HashMap<Uuid, T>, candidate: &T) -> Result<(), RepoError> {
        let clash = rows
            .values()
            .any(|row| row.id() != candidate.id() && row.conflicts_with(candidate));

        if clash {
            return Err(RepoError::Constraint(format!("{} already exists", T::ENTITY)));
        }
        Ok(())
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&entity.id()) {
            return Err(RepoError::Constraint(format!("{} already exists", T::ENTITY)));
        }
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;

        if !rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        match rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}
