use uuid::Uuid;

use crate::database::Table;
use crate::models::garage::{Garage, VerificationFilter};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone, Default)]
pub struct GarageRepository {
    garages: Table<Garage>,
}

impl GarageRepository {
    pub fn new(garages: Vec<Garage>) -> Self {
        Self {
            garages: Table::from_rows(garages.into_iter().map(|g| (g.id, g)).collect()),
        }
    }

    pub async fn create(&self, garage: Garage) -> Garage {
        self.garages.insert(garage.id, garage.clone()).await;
        garage
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Garage> {
        self.garages.get(id).await
    }

    /// Búsqueda por nombre o dirección con filtro de verificación
    pub async fn search(&self, query: Option<&str>, filter: VerificationFilter) -> Vec<Garage> {
        let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        let mut garages = self
            .garages
            .filter(|g| {
                filter.matches(g)
                    && needle.as_deref().map_or(true, |q| {
                        g.name.to_lowercase().contains(q) || g.address.to_lowercase().contains(q)
                    })
            })
            .await;
        garages.sort_by(|a, b| a.name.cmp(&b.name));
        garages
    }

    pub async fn update<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Garage) -> AppResult<R>,
    {
        self.garages.update(id, "Garage", f).await
    }

    pub async fn approve(&self, id: Uuid) -> AppResult<Garage> {
        self.garages
            .update(id, "Garage", |garage| {
                garage.verified = true;
                Ok(garage.clone())
            })
            .await
    }

    /// Elimina un taller pendiente; los verificados no se pueden rechazar
    pub async fn reject(&self, id: Uuid) -> AppResult<Garage> {
        let mut garages = self.garages.write().await;
        let garage = garages
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Garage with id '{}' not found", id)))?;
        if garage.verified {
            return Err(AppError::Conflict(format!(
                "Garage '{}' is already verified and cannot be rejected",
                garage.name
            )));
        }
        garages
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Garage with id '{}' not found", id)))
    }

    pub async fn all(&self) -> Vec<Garage> {
        self.garages.all().await
    }
}
