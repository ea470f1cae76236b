//! Access policy.
//!
//! Pure functions deciding what an authenticated [`Actor`] may do with a
//! document or another user's account. Nothing here touches the database;
//! handlers load the target first and then ask the policy.
//!
//! | Action | Allowed when |
//! |--------|--------------|
//! | read document | access is public, actor owns it, access is role and actor shares the owner's role, or actor is admin |
//! | edit/delete document | actor owns it or is admin |
//! | read/update user, change password, list a user's documents | actor is that user or admin |
//! | delete user | actor is that user or admin |
//! | list/search users, list roles | actor is admin |
//!
//! The same document rule is available as a SQL predicate through
//! [`Visibility`] so that list and search endpoints never return a document
//! the caller could not fetch by id.

use docvault_core::AppError;
use thiserror::Error;

use crate::documents::{AccessLevel, Document};
use crate::ids::{RoleId, UserId};
use crate::roles::system_roles;

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role_id: RoleId,
}

impl Actor {
    pub fn new(id: UserId, role_id: RoleId) -> Self {
        Self { id, role_id }
    }

    pub fn is_admin(&self) -> bool {
        self.role_id == system_roles::ADMIN
    }

    pub fn is_self_or_admin(&self, target: UserId) -> bool {
        self.id == target || self.is_admin()
    }
}

/// Why the policy refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Access Denied")]
    AccessDenied,
    #[error("Wrong Move")]
    WrongMove,
    #[error("Cannot delete user")]
    CannotDeleteUser,
}

impl Denial {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AccessDenied => "access_denied",
            Self::WrongMove => "wrong_move",
            Self::CannotDeleteUser => "cannot_delete_user",
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::forbidden(self.to_string())
    }
}

/// The attributes of a document the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAccess {
    pub owner_id: UserId,
    pub owner_role_id: RoleId,
    pub access: AccessLevel,
}

impl From<&Document> for DocumentAccess {
    fn from(doc: &Document) -> Self {
        Self {
            owner_id: doc.user_id,
            owner_role_id: doc.user_role_id,
            access: doc.access,
        }
    }
}

pub fn can_read_document(actor: &Actor, doc: &DocumentAccess) -> bool {
    actor.is_admin()
        || actor.id == doc.owner_id
        || match doc.access {
            AccessLevel::Public => true,
            AccessLevel::Role => actor.role_id == doc.owner_role_id,
            AccessLevel::Private => false,
        }
}

pub fn can_modify_document(actor: &Actor, doc: &DocumentAccess) -> bool {
    actor.is_admin() || actor.id == doc.owner_id
}

pub fn authorize_document_read(actor: &Actor, doc: &DocumentAccess) -> Result<(), Denial> {
    if can_read_document(actor, doc) {
        Ok(())
    } else {
        Err(Denial::AccessDenied)
    }
}

pub fn authorize_document_mutation(actor: &Actor, doc: &DocumentAccess) -> Result<(), Denial> {
    if can_modify_document(actor, doc) {
        Ok(())
    } else {
        Err(Denial::AccessDenied)
    }
}

/// Profile reads and updates, password changes, and per-user document lists.
pub fn authorize_self_or_admin(actor: &Actor, target: UserId) -> Result<(), Denial> {
    if actor.is_self_or_admin(target) {
        Ok(())
    } else {
        Err(Denial::WrongMove)
    }
}

pub fn authorize_user_delete(actor: &Actor, target: UserId) -> Result<(), Denial> {
    if actor.is_self_or_admin(target) {
        Ok(())
    } else {
        Err(Denial::CannotDeleteUser)
    }
}

pub fn authorize_admin(actor: &Actor) -> Result<(), Denial> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Denial::AccessDenied)
    }
}

/// Document read rule as a SQL predicate over the `documents` table.
///
/// The predicate takes three consecutive bind parameters in the order
/// returned by [`Visibility::binds`]: an "is admin" flag, the actor's id,
/// and the actor's role id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub is_admin: bool,
    pub user_id: UserId,
    pub role_id: RoleId,
}

impl Visibility {
    pub fn for_actor(actor: &Actor) -> Self {
        Self {
            is_admin: actor.is_admin(),
            user_id: actor.id,
            role_id: actor.role_id,
        }
    }

    /// Renders the predicate for a table alias, numbering binds from `first`.
    pub fn predicate(alias: &str, first: usize) -> String {
        format!(
            "(${admin} OR {a}.access = 'public' OR {a}.user_id = ${uid} \
             OR ({a}.access = 'role' AND {a}.user_role_id = ${rid}))",
            a = alias,
            admin = first,
            uid = first + 1,
            rid = first + 2,
        )
    }

    pub fn binds(&self) -> (bool, UserId, RoleId) {
        (self.is_admin, self.user_id, self.role_id)
    }

    /// In-memory evaluation of the predicate.
    pub fn matches(&self, doc: &DocumentAccess) -> bool {
        self.is_admin
            || doc.access == AccessLevel::Public
            || doc.owner_id == self.user_id
            || (doc.access == AccessLevel::Role && doc.owner_role_id == self.role_id)
    }
}
