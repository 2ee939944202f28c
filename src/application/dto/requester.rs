// src/application/dto/requester.rs
use crate::domain::user::{Role, User, UserId};

/// The caller on whose behalf an operation runs, resolved from the user directory.
#[derive(Debug, Clone)]
pub struct Requester {
    pub id: UserId,
    pub nickname: String,
    pub role: Role,
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<User> for Requester {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname.into(),
            role: user.role,
        }
    }
}
