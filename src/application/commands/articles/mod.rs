// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod reconcile;
mod service;
mod sync;
mod update;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::{BatchDeleteArticlesCommand, DeleteArticleCommand};
pub use reconcile::RECONCILE_BATCH_SIZE;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
