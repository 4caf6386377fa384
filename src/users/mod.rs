//! Read-only user directory.
//!
//! # Responsibilities
//! - Define the `User` record exposed by the API
//! - Provide the lookup interface handlers are constructed with
//! - Ship the in-memory demo fixture
//!
//! # Design Decisions
//! - The directory is injected, not a global; handlers cannot mutate it
//! - `list` returns records in insertion order for deterministic payloads

use serde::Serialize;

/// A user record from the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub role: String,
    pub permissions: Vec<String>,
}

/// Lookup interface over the external user data source.
pub trait UserDirectory: Send + Sync {
    /// Resolve a single user by id.
    fn get(&self, id: &str) -> Option<User>;

    /// All known users, in a stable order.
    fn list(&self) -> Vec<User>;
}

/// In-memory directory backed by a fixed record set.
pub struct InMemoryUserDirectory {
    users: Vec<User>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The two demo records served by the hosted instance.
    pub fn demo() -> Self {
        Self::new(vec![
            User {
                id: "admin".to_string(),
                role: "admin".to_string(),
                permissions: vec![
                    "read".to_string(),
                    "write".to_string(),
                    "delete".to_string(),
                ],
            },
            User {
                id: "user".to_string(),
                role: "user".to_string(),
                permissions: vec!["read".to_string()],
            },
        ])
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn list(&self) -> Vec<User> {
        self.users.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_directory_lookup() {
        let dir = InMemoryUserDirectory::demo();

        let admin = dir.get("admin").expect("admin record");
        assert_eq!(admin.role, "admin");
        assert_eq!(admin.permissions, vec!["read", "write", "delete"]);

        assert!(dir.get("ghost").is_none());
    }

    #[test]
    fn test_list_is_stable() {
        let dir = InMemoryUserDirectory::demo();
        let ids: Vec<String> = dir.list().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["admin", "user"]);
    }
}
