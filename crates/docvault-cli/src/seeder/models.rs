//! Data models for database seeding configuration.

use docvault_models::{AccessLevel, RoleId, UserId};

/// Every seeded account uses this email domain, which is how
/// `clear-seed` tells them apart from real accounts.
pub const SEED_EMAIL_DOMAIN: &str = "seed.docvault.dev";

/// Password shared by all seeded accounts.
pub const SEED_PASSWORD: &str = "password123";

/// Seed data for creating a user.
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// Seed data for creating a document.
pub struct DocumentSeed {
    pub title: String,
    pub content: String,
    pub access: AccessLevel,
    pub user_id: UserId,
    pub user_role_id: RoleId,
}

/// A seeded account that can own documents.
#[derive(Debug, Clone, Copy)]
pub struct SeededOwner {
    pub user_id: UserId,
    pub role_id: RoleId,
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub regular_users: usize,
    pub admins: usize,
    pub documents_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            regular_users: 20,
            admins: 1,
            documents_per_user: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(regular_users: usize) -> Self {
        Self {
            regular_users,
            ..Default::default()
        }
    }

    pub fn with_admins(mut self, admins: usize) -> Self {
        self.admins = admins;
        self
    }

    pub fn with_documents_per_user(mut self, documents_per_user: usize) -> Self {
        self.documents_per_user = documents_per_user;
        self
    }

    pub fn total_users(&self) -> usize {
        self.regular_users + self.admins
    }

    pub fn total_documents(&self) -> usize {
        self.total_users() * self.documents_per_user
    }
}
