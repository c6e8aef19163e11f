//! Content Store: the volatile, process-local list of reading materials.
//!
//! Every call sleeps for the configured latency first so the rest of the
//! system treats it like the remote store it stands in for.

pub mod admin;
pub mod handlers;
pub mod seed;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::material::ReadingMaterial;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("material id cannot be empty")]
    MissingId,

    #[error("unknown value-chain stage '{0}'")]
    UnknownStage(String),
}

#[derive(Clone)]
pub struct ContentStore {
    materials: Arc<RwLock<Vec<ReadingMaterial>>>,
    latency: Duration,
}

impl ContentStore {
    /// Builds a store pre-loaded with `materials`, rejecting any record whose
    /// stage is not part of the value chain.
    pub fn with_materials(
        materials: Vec<ReadingMaterial>,
        latency: Duration,
    ) -> Result<Self, StoreError> {
        for material in &materials {
            check(material)?;
        }
        info!("Content store seeded with {} materials", materials.len());
        Ok(Self {
            materials: Arc::new(RwLock::new(materials)),
            latency,
        })
    }

    /// All materials in insertion order.
    pub async fn list(&self) -> Vec<ReadingMaterial> {
        self.simulate_latency().await;
        self.materials.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<ReadingMaterial> {
        self.simulate_latency().await;
        self.materials
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub async fn create(&self, material: ReadingMaterial) -> Result<(), StoreError> {
        self.upsert(material).await
    }

    pub async fn update(&self, material: ReadingMaterial) -> Result<(), StoreError> {
        self.upsert(material).await
    }

    /// Removes the material with `id`. Returns whether anything was removed;
    /// a missing id is not an error.
    pub async fn delete(&self, id: &str) -> bool {
        self.simulate_latency().await;
        let mut materials = self.materials.write().await;
        let before = materials.len();
        materials.retain(|m| m.id != id);
        let removed = materials.len() != before;
        debug!("Delete material {id}: removed={removed}");
        removed
    }

    /// Replaces in place when the id exists, appends otherwise.
    async fn upsert(&self, material: ReadingMaterial) -> Result<(), StoreError> {
        check(&material)?;
        self.simulate_latency().await;

        let mut materials = self.materials.write().await;
        match materials.iter_mut().find(|m| m.id == material.id) {
            Some(existing) => {
                debug!("Replacing material {}", material.id);
                *existing = material;
            }
            None => {
                debug!("Appending material {}", material.id);
                materials.push(material);
            }
        }
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn check(material: &ReadingMaterial) -> Result<(), StoreError> {
    if material.id.trim().is_empty() {
        return Err(StoreError::MissingId);
    }
    if !material.has_known_stage() {
        return Err(StoreError::UnknownStage(material.stage_id.clone()));
    }
    Ok(())
}
