// tests/support/mocks/users.rs
use async_trait::async_trait;
use shiori_core::domain::errors::DomainResult;
use shiori_core::domain::user::{Nickname, Role, User, UserId, UserRepository};
use std::collections::HashMap;
use std::sync::Mutex;

use super::time::fixed_now;

/// インメモリのユーザーディレクトリ
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: &str, nickname: &str, role: Role) -> User {
        let user = User {
            id: UserId::new(id).unwrap(),
            nickname: Nickname::new(nickname).unwrap(),
            role,
            created_at: fixed_now(),
        };
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}
