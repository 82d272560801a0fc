//! In-memory registry loaded from a YAML document.
//!
//! ```yaml
//! users:
//!   - name: alice
//!     path: /engineering/
//!     created_at: 2020-01-01T00:00:00Z
//! groups:
//!   - name: admins
//!     members: [alice]
//! ```
//!
//! Omitted identifiers are derived from the entity name, omitted creation
//! dates default to the Unix epoch, and omitted paths default to `/`.

use std::collections::BTreeMap;
use std::fs;

use camino::Utf8Path;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use tracing::info;

use super::{Group, IdentityRegistry, REGISTRY_TARGET, RegistryError, User};

/// Prefix of generated user identifiers.
pub const USER_ID_PREFIX: &str = "AIDA";

/// Prefix of generated group identifiers.
pub const GROUP_ID_PREFIX: &str = "AGPA";

const GENERATED_ID_LEN: usize = 17;
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DEFAULT_PATH: &str = "/";

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    users: Vec<UserEntry>,
    #[serde(default)]
    groups: Vec<GroupEntry>,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    members: Vec<String>,
}

/// Users and groups held in memory, keyed and listed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistry {
    users: BTreeMap<String, User>,
    groups: BTreeMap<String, Group>,
}

impl StaticRegistry {
    /// Builds a registry from explicit users and groups.
    ///
    /// Later entries replace earlier ones with the same name.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>, groups: impl IntoIterator<Item = Group>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.name.clone(), user)).collect(),
            groups: groups
                .into_iter()
                .map(|group| (group.name.clone(), group))
                .collect(),
        }
    }

    /// Parses a registry from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed YAML and
    /// [`RegistryError::UnknownMember`] when a group lists an unknown user.
    pub fn from_yaml_str(text: &str) -> Result<Self, RegistryError> {
        let document: Document = if text.trim().is_empty() {
            Document::default()
        } else {
            serde_saphyr::from_str(text).map_err(|error| RegistryError::parse(error.to_string()))?
        };
        info!(
            target: REGISTRY_TARGET,
            groups = document.groups.len(),
            users = document.users.len(),
            "registry document parsed"
        );

        let users: BTreeMap<String, User> = document
            .users
            .into_iter()
            .map(|entry| (entry.name.clone(), user_from_entry(entry)))
            .collect();

        let mut groups = BTreeMap::new();
        for entry in document.groups {
            let group = group_from_entry(entry, &users)?;
            groups.insert(group.name.clone(), group);
        }

        Ok(Self { users, groups })
    }

    /// Reads and parses the registry file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] when the file cannot be read, or any
    /// error of [`StaticRegistry::from_yaml_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path).map_err(|source| RegistryError::read(path, source))?;
        Self::from_yaml_str(&text)
    }

    /// Number of users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl IdentityRegistry for StaticRegistry {
    fn user_by_name(&self, name: &str) -> Result<Option<User>, RegistryError> {
        Ok(self.users.get(name).cloned())
    }

    fn group_by_name(&self, name: &str) -> Result<Option<Group>, RegistryError> {
        Ok(self.groups.get(name).cloned())
    }

    fn users(&self) -> Result<Vec<User>, RegistryError> {
        Ok(self.users.values().cloned().collect())
    }

    fn groups(&self) -> Result<Vec<Group>, RegistryError> {
        Ok(self.groups.values().cloned().collect())
    }
}

fn user_from_entry(entry: UserEntry) -> User {
    User {
        id: entry
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| derived_id(USER_ID_PREFIX, &entry.name)),
        created_at: entry.created_at.unwrap_or(OffsetDateTime::UNIX_EPOCH),
        path: non_empty_path(entry.path),
        name: entry.name,
    }
}

fn group_from_entry(entry: GroupEntry, users: &BTreeMap<String, User>) -> Result<Group, RegistryError> {
    let members = entry
        .members
        .iter()
        .map(|member| {
            users
                .get(member)
                .cloned()
                .ok_or_else(|| RegistryError::UnknownMember {
                    user: member.clone(),
                    group: entry.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        target: REGISTRY_TARGET,
        group = %entry.name,
        members = members.len(),
        "group members resolved"
    );
    Ok(Group {
        id: entry
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| derived_id(GROUP_ID_PREFIX, &entry.name)),
        created_at: entry.created_at.unwrap_or(OffsetDateTime::UNIX_EPOCH),
        path: non_empty_path(entry.path),
        name: entry.name,
        members,
    })
}

fn non_empty_path(path: Option<String>) -> String {
    path.filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_PATH.to_owned())
}

// Identifiers depend only on prefix and name.
fn derived_id(prefix: &str, name: &str) -> String {
    let digest = Sha256::new()
        .chain_update(prefix.as_bytes())
        .chain_update(b":")
        .chain_update(name.as_bytes())
        .finalize();
    let suffix: String = digest
        .iter()
        .filter_map(|byte| ID_ALPHABET.get(usize::from(*byte) % ID_ALPHABET.len()))
        .take(GENERATED_ID_LEN)
        .map(|symbol| char::from(*symbol))
        .collect();
    format!("{prefix}{suffix}")
}
