// tests/support/mocks/mod.rs
//! テスト用インメモリ実装の再エクスポート
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod articles;
pub mod categories;
pub mod search;
pub mod teams;
pub mod time;
pub mod users;

pub use articles::InMemoryArticleRepo;
pub use categories::InMemoryCategoryRepo;
pub use search::InMemorySearchIndex;
pub use teams::InMemoryTeamRepo;
pub use time::{FixedClock, fixed_now};
pub use users::InMemoryUserRepo;
