use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user, hashing the plaintext password before it is stored.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email belongs to another user, deleted or not
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve a live user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// User entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or has been deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// List live users one page at a time.
    ///
    /// # Arguments
    /// * `request` - Page number, page size and ordering
    ///
    /// # Returns
    /// The requested page with listing totals
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserError>;

    /// Rename a live user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or has been deleted
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Soft-delete a live user. Tokens already issued to them stop resolving.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was already deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Implementations own the atomicity guarantees: `create` must let exactly one
/// of several concurrent same-email inserts through, and `soft_delete` must
/// check liveness and set the flag as one step.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is held by any stored user, tombstoned included
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Find by email, soft-deleted users included.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Find by email among live users only.
    async fn find_live_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Find by identifier among live users only.
    async fn find_live_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Whether any user, deleted or not, holds this email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// One page of live users in the requested order.
    async fn list_live(&self, request: &PageRequest) -> Result<Page<User>, UserError>;

    /// Write back a modified live user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or has been deleted
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Mark a live user as deleted.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or was already deleted
    /// * `DatabaseError` - Database operation failed
    async fn soft_delete(&self, id: &UserId) -> Result<(), UserError>;
}
