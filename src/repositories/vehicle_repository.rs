use chrono::Utc;
use uuid::Uuid;

use crate::database::Table;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

/// Vehículos de clientes. Mantiene exactamente un `is_primary` por propietario
/// mientras el propietario tenga vehículos.
#[derive(Clone, Default)]
pub struct VehicleRepository {
    vehicles: Table<Vehicle>,
}

impl VehicleRepository {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Table::from_rows(vehicles.into_iter().map(|v| (v.id, v)).collect()),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        make: String,
        model: String,
        year: i32,
        plate: String,
    ) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;

        let owned: Vec<&Vehicle> = vehicles.values().filter(|v| v.owner_id == owner_id).collect();
        if owned.iter().any(|v| v.plate.eq_ignore_ascii_case(&plate)) {
            return Err(conflict_error("Vehicle", "plate", &plate));
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id,
            make,
            model,
            year,
            plate,
            is_primary: owned.is_empty(),
            created_at: Utc::now(),
        };
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Vehicle> {
        self.vehicles.get(id).await
    }

    /// Vehículo del propietario; el de otro cliente cuenta como inexistente
    pub async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .get(id)
            .await
            .filter(|v| v.owner_id == owner_id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    /// Principal primero, después por antigüedad
    pub async fn find_by_owner(&self, owner_id: Uuid) -> Vec<Vehicle> {
        let mut vehicles = self.vehicles.filter(|v| v.owner_id == owner_id).await;
        vehicles.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        vehicles
    }

    pub async fn set_primary(&self, owner_id: Uuid, id: Uuid) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.get(&id) {
            Some(v) if v.owner_id == owner_id => {}
            _ => return Err(not_found_error("Vehicle", &id.to_string())),
        }

        let mut selected = None;
        for vehicle in vehicles.values_mut().filter(|v| v.owner_id == owner_id) {
            vehicle.is_primary = vehicle.id == id;
            if vehicle.is_primary {
                selected = Some(vehicle.clone());
            }
        }
        selected.ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    /// Borra el vehículo; si era el principal, el más antiguo restante pasa a serlo
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.get(&id) {
            Some(v) if v.owner_id == owner_id => {}
            _ => return Err(not_found_error("Vehicle", &id.to_string())),
        }
        let removed = vehicles
            .remove(&id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if removed.is_primary {
            if let Some(oldest) = vehicles
                .values_mut()
                .filter(|v| v.owner_id == owner_id)
                .min_by_key(|v| v.created_at)
            {
                oldest.is_primary = true;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn add(repo: &VehicleRepository, owner: Uuid, plate: &str) -> Vehicle {
        repo.create(owner, "Toyota".into(), "Camry".into(), 2020, plate.into())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_vehicle_becomes_primary() {
        let repo = VehicleRepository::default();
        let owner = Uuid::new_v4();
        let first = add(&repo, owner, "A-12345").await;
        let second = add(&repo, owner, "B-67890").await;
        assert!(first.is_primary);
        assert!(!second.is_primary);
    }

    #[tokio::test]
    async fn test_duplicate_plate_is_conflict() {
        let repo = VehicleRepository::default();
        let owner = Uuid::new_v4();
        add(&repo, owner, "A-12345").await;
        let again = repo
            .create(owner, "BMW".into(), "X5".into(), 2015, "a-12345".into())
            .await;
        assert!(again.is_err());
        // otro propietario puede tener la misma matrícula
        add(&repo, Uuid::new_v4(), "A-12345").await;
    }

    #[tokio::test]
    async fn test_set_primary_keeps_exactly_one() {
        let repo = VehicleRepository::default();
        let owner = Uuid::new_v4();
        add(&repo, owner, "A-1").await;
        let second = add(&repo, owner, "A-2").await;
        add(&repo, owner, "A-3").await;

        repo.set_primary(owner, second.id).await.unwrap();

        let vehicles = repo.find_by_owner(owner).await;
        assert_eq!(vehicles.iter().filter(|v| v.is_primary).count(), 1);
        assert_eq!(vehicles[0].id, second.id);
    }

    #[tokio::test]
    async fn test_deleting_primary_promotes_oldest() {
        let repo = VehicleRepository::default();
        let owner = Uuid::new_v4();
        let first = add(&repo, owner, "A-1").await;
        let second = add(&repo, owner, "A-2").await;
        add(&repo, owner, "A-3").await;

        repo.delete(owner, first.id).await.unwrap();

        let vehicles = repo.find_by_owner(owner).await;
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].id, second.id);
        assert!(vehicles[0].is_primary);
    }

    #[tokio::test]
    async fn test_foreign_vehicle_is_not_found() {
        let repo = VehicleRepository::default();
        let vehicle = add(&repo, Uuid::new_v4(), "A-1").await;
        assert!(repo.find_owned(Uuid::new_v4(), vehicle.id).await.is_err());
        assert!(repo.delete(Uuid::new_v4(), vehicle.id).await.is_err());
    }
}
