//! Read-only identity registry consumed by the IAM operations.
//!
//! Operations depend only on the [`IdentityRegistry`] lookup surface; the
//! YAML-backed [`StaticRegistry`] is the implementation the daemon loads at
//! start-up.

mod errors;
mod static_registry;

use time::OffsetDateTime;

pub use self::errors::RegistryError;
pub use self::static_registry::{GROUP_ID_PREFIX, StaticRegistry, USER_ID_PREFIX};

/// Tracing target for registry loading.
pub const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// An IAM user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier, such as `AIDAEXAMPLE...`.
    pub id: String,
    /// Unique user name.
    pub name: String,
    /// Creation instant.
    pub created_at: OffsetDateTime,
    /// Path the user lives under, `/` by default.
    pub path: String,
}

impl User {
    /// Resource name of the user within `account_id`.
    #[must_use]
    pub fn arn(&self, account_id: &str) -> String {
        build_arn(account_id, "user", &self.path, &self.name)
    }
}

/// An IAM group and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Stable identifier, such as `AGPAEXAMPLE...`.
    pub id: String,
    /// Unique group name.
    pub name: String,
    /// Creation instant.
    pub created_at: OffsetDateTime,
    /// Path the group lives under, `/` by default.
    pub path: String,
    /// Member users in declaration order.
    pub members: Vec<User>,
}

impl Group {
    /// Resource name of the group within `account_id`.
    #[must_use]
    pub fn arn(&self, account_id: &str) -> String {
        build_arn(account_id, "group", &self.path, &self.name)
    }
}

/// Lookup surface over users and groups.
pub trait IdentityRegistry: Send + Sync {
    /// Finds the user named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the backing store fails.
    fn user_by_name(&self, name: &str) -> Result<Option<User>, RegistryError>;

    /// Finds the group named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the backing store fails.
    fn group_by_name(&self, name: &str) -> Result<Option<Group>, RegistryError>;

    /// Lists every user, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the backing store fails.
    fn users(&self) -> Result<Vec<User>, RegistryError>;

    /// Lists every group, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the backing store fails.
    fn groups(&self) -> Result<Vec<Group>, RegistryError>;
}

fn build_arn(account_id: &str, kind: &str, path: &str, name: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let inner = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if inner.is_empty() {
        format!("arn:aws:iam::{account_id}:{kind}/{name}")
    } else {
        format!("arn:aws:iam::{account_id}:{kind}/{inner}/{name}")
    }
}
