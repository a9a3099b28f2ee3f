use uuid::Uuid;

use crate::database::Table;
use crate::models::review::GarageReview;

#[derive(Clone, Default)]
pub struct ReviewRepository {
    reviews: Table<GarageReview>,
}

impl ReviewRepository {
    pub fn new(reviews: Vec<GarageReview>) -> Self {
        Self {
            reviews: Table::from_rows(reviews.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    /// Reseñas del taller, la más reciente primero
    pub async fn for_garage(&self, garage_id: Uuid) -> Vec<GarageReview> {
        let mut reviews = self.reviews.filter(|r| r.garage_id == garage_id).await;
        reviews.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.customer_name.cmp(&b.customer_name)));
        reviews
    }
}
