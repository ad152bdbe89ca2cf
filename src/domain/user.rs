use serde::{Deserialize, Serialize};

/// Represents a registered user in the system.
///
/// `name` and `email` are nullable: a client may explicitly send `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Payload for creating a new user. Both keys were supplied; either may be null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Payload for updating an existing user.
///
/// The outer `Option` says whether the key was supplied, the inner one
/// whether its value was `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<Option<String>>,
    pub email: Option<Option<String>>,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `name` - User's display name
    /// * `email` - User's email address
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Display form of the name; a null name renders as `None`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }

    /// The records every fresh store starts with.
    pub fn seed() -> Vec<User> {
        vec![
            User::new(1, "张三", "zhangsan@example.com"),
            User::new(2, "李四", "lisi@example.com"),
            User::new(3, "王五", "wangwu@example.com"),
        ]
    }
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

impl UserPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(Some(name.into())),
            email: None,
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(Some(email.into())),
        }
    }
}
