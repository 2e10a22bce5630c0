//! Generic repository over a JSON file holding one list of entities
//!
//! Every read loads the whole file and every write rewrites it. The last
//! assigned id lives in a sidecar text file so ids are never reused, even
//! after the entity with the highest id is deleted.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{
    error::{AppError, AppResult},
    models::Entity,
};

#[derive(Debug)]
pub struct JsonRepository<T> {
    data_path: PathBuf,
    last_id_path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonRepository<T> {
    fn clone(&self) -> Self {
        Self {
            data_path: self.data_path.clone(),
            last_id_path: self.last_id_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> JsonRepository<T> {
    pub fn new(data_path: impl Into<PathBuf>, last_id_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            last_id_path: last_id_path.into(),
            _entity: PhantomData,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load every entity; a missing file is created empty
    pub async fn get_all(&self) -> AppResult<Vec<T>> {
        let json = match fs::read_to_string(&self.data_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Creating empty data file {}", self.data_path.display());
                fs::write(&self.data_path, "[]").await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entities: Vec<T> = serde_json::from_str(&json).map_err(|e| {
            tracing::error!("Malformed data file {}: {}", self.data_path.display(), e);
            e
        })?;

        tracing::debug!("Loaded {} entities from {}", entities.len(), self.data_path.display());
        Ok(entities)
    }

    /// Get entity by ID
    pub async fn get(&self, id: i32) -> AppResult<Option<T>> {
        Ok(self.get_all().await?.into_iter().find(|e| e.id() == id))
    }

    /// Store a new entity and return it with its assigned id
    pub async fn add(&self, mut entity: T) -> AppResult<T> {
        let mut entities = self.get_all().await?;

        let highest_id = entities.iter().map(|e| e.id()).max().unwrap_or(0);
        let latest_id = self.latest_id().await;
        let id = highest_id.max(latest_id).checked_add(1).ok_or_else(|| {
            AppError::Internal(format!("No ids left for {}", self.data_path.display()))
        })?;
        entity.set_id(id);
        self.save_latest_id(entity.id()).await?;

        entities.push(entity.clone());
        self.save_all(&entities).await?;

        Ok(entity)
    }

    /// Delete entity by ID
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut entities = self.get_all().await?;

        let position = entities
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Entity with id {} not found", id)))?;
        entities.remove(position);

        self.save_all(&entities).await
    }

    /// Replace the entity sharing the id of `entity`; the file stays ordered by id
    pub async fn update(&self, entity: &T) -> AppResult<()> {
        let mut entities = self.get_all().await?;

        let slot = entities
            .iter_mut()
            .find(|e| e.id() == entity.id())
            .ok_or_else(|| AppError::NotFound(format!("Entity with id {} not found", entity.id())))?;
        *slot = entity.clone();

        entities.sort_by_key(|e| e.id());
        self.save_all(&entities).await
    }

    async fn save_all(&self, entities: &[T]) -> AppResult<()> {
        let json = serde_json::to_string(entities)?;
        fs::write(&self.data_path, json).await?;
        Ok(())
    }

    /// Last id handed out; unreadable or garbled sidecar counts as 0
    async fn latest_id(&self) -> i32 {
        match fs::read_to_string(&self.last_id_path).await {
            Ok(text) => text.trim().parse().unwrap_or(0),
            Err(_) => 0,
        }
    }

    async fn save_latest_id(&self, id: i32) -> AppResult<()> {
        fs::write(&self.last_id_path, id.to_string()).await?;
        Ok(())
    }
}
