//! In-process user store backed by `DashMap`.
//!
//! Used for `memory://` deployments and as the test double for the
//! PostgreSQL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::auth::user::{NewUser, User};
use crate::domain::UserId;
use crate::errors::{CaregateError, Result};

use super::user::UserRepository;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, StoredUser>,
    // email -> id; the entry lock serializes concurrent registrations per email
    emails: DashMap<String, UserId>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Flip the active flag of an existing user. Returns false if unknown.
    pub fn set_active(&self, id: &UserId, active: bool) -> bool {
        match self.users.get_mut(id) {
            Some(mut stored) => {
                stored.user.is_active = active;
                true
            }
            None => false,
        }
    }

    fn lookup_by_email(&self, email: &str) -> Option<StoredUser> {
        let id = self.emails.get(email)?.value().clone();
        self.users.get(&id).map(|stored| stored.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let created = User {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name,
            role: user.role,
            phone: user.phone,
            created_at: Utc::now(),
            is_active: user.is_active,
        };

        match self.emails.entry(user.email) {
            Entry::Occupied(_) => Err(CaregateError::conflict("Email already registered", "user")),
            Entry::Vacant(slot) => {
                if self.users.contains_key(&user.id) {
                    return Err(CaregateError::conflict("User id already exists", "user"));
                }
                self.users.insert(
                    user.id.clone(),
                    StoredUser { user: created.clone(), password_hash: user.password_hash },
                );
                slot.insert(user.id);
                Ok(created)
            }
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|stored| stored.user.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.lookup_by_email(email).map(|stored| stored.user))
    }

    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        Ok(self.lookup_by_email(email).map(|stored| (stored.user, stored.password_hash)))
    }

    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.user.clone()).collect();
        users.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(users.into_iter().skip(offset).take(limit).collect())
    }
}
