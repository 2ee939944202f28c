// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Nickname, Role, UserId};
use chrono::{DateTime, Utc};

/// A directory entry for a person who can author articles and join teams.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub nickname: Nickname,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
