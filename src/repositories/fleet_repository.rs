use uuid::Uuid;

use crate::database::Table;
use crate::models::fleet::Fleet;

#[derive(Clone, Default)]
pub struct FleetRepository {
    fleets: Table<Fleet>,
}

impl FleetRepository {
    pub fn new(fleets: Vec<Fleet>) -> Self {
        Self {
            fleets: Table::from_rows(fleets.into_iter().map(|f| (f.id, f)).collect()),
        }
    }

    pub async fn find_by_admin(&self, admin_id: Uuid) -> Option<Fleet> {
        self.fleets
            .filter(|f| f.admin_id == admin_id)
            .await
            .into_iter()
            .next()
    }
}
