//! In-memory user directory.

use common::User;
use dashmap::DashMap;
use uuid::Uuid;

/// Thread-safe user registry keyed by id, with lookup by email.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<Uuid, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a user up by email.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone())
    }

    /// Insert a new user record.
    pub fn create(&self, user: User) -> User {
        self.users.insert(user.id, user.clone());
        user
    }

    /// Existing user for the email, or a freshly created one.
    ///
    /// Returns `(user, created)` so callers can distinguish login from
    /// registration.
    pub fn find_or_create(
        &self,
        email: &str,
        name: Option<String>,
        google_id: &str,
    ) -> (User, bool) {
        if let Some(user) = self.find_by_email(email) {
            (user, false)
        } else {
            (self.create(User::new(email, name, google_id)), true)
        }
    }
}
