pub mod articles;
pub mod categories;
pub mod lookup;
pub mod teams;
