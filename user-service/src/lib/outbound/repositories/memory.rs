use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::SortDirection;
use crate::domain::user::models::SortField;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store with the same soft-delete and uniqueness
/// semantics as the PostgreSQL repository.
///
/// Every read-then-write runs under a single write guard.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(field: SortField, a: &User, b: &User) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_live_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_live() && u.email.as_str() == email)
            .cloned())
    }

    async fn find_live_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(id).filter(|u| u.is_live()).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.as_str() == email))
    }

    async fn list_live(&self, request: &PageRequest) -> Result<Page<User>, UserError> {
        let users = self.users.read().await;
        let order = request.order();

        let mut live: Vec<&User> = users.values().filter(|u| u.is_live()).collect();
        live.sort_by(|a, b| {
            let primary = match order.direction {
                SortDirection::Ascending => compare(order.field, a, b),
                SortDirection::Descending => compare(order.field, b, a),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        let total_items = live.len() as u64;
        let items = live
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, request, total_items))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(existing) if existing.is_live() => {
                existing.name = user.name.clone();
                existing.updated_at = user.updated_at;
                Ok(existing.clone())
            }
            _ => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn soft_delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(id) {
            Some(existing) if existing.is_live() => {
                existing.mark_deleted(Utc::now());
                Ok(())
            }
            _ => Err(UserError::NotFound(id.to_string())),
        }
    }
}
