pub mod articles;
pub mod teams;
