use uuid::Uuid;

use crate::database::Table;
use crate::models::user::{AuthUser, UserRole};
use crate::utils::errors::{conflict_error, AppResult};

#[derive(Clone, Default)]
pub struct UserRepository {
    users: Table<AuthUser>,
}

impl UserRepository {
    pub fn new(users: Vec<AuthUser>) -> Self {
        Self {
            users: Table::from_rows(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    /// Registra un usuario; el teléfono es único
    pub async fn create(&self, user: AuthUser) -> AppResult<AuthUser> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.phone == user.phone) {
            return Err(conflict_error("User", "phone", &user.phone));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<AuthUser> {
        self.users.get(id).await
    }

    pub async fn find_by_phone(&self, phone: &str) -> Option<AuthUser> {
        self.users
            .filter(|u| u.phone == phone)
            .await
            .into_iter()
            .next()
    }

    /// Búsqueda por nombre, teléfono o email (sin distinguir mayúsculas) y rol
    pub async fn search(&self, query: Option<&str>, role: Option<UserRole>) -> Vec<AuthUser> {
        let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        let mut users = self
            .users
            .filter(|u| {
                let role_ok = role.map_or(true, |r| u.role == r);
                let query_ok = needle.as_deref().map_or(true, |q| {
                    u.name.to_lowercase().contains(q)
                        || u.phone.contains(q)
                        || u.email.as_deref().map_or(false, |e| e.to_lowercase().contains(q))
                });
                role_ok && query_ok
            })
            .await;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        users
    }

    pub async fn remove(&self, id: Uuid) -> Option<AuthUser> {
        self.users.remove(id).await
    }

    pub async fn all(&self) -> Vec<AuthUser> {
        self.users.all().await
    }
}
