// src/domain/article/mod.rs
pub mod attachments;
pub mod entity;
pub mod repository;
pub mod search;
pub mod specifications;
pub mod value_objects;

pub use attachments::{Attachment, AttachmentBlob, AttachmentCodecError};
pub use entity::{Article, ArticleChanges, NewArticle};
pub use repository::{ArticleRepository, AuthorArticleFilter, ChangeCursor};
pub use search::{
    ArticleSearchIndex, BoolQuery, Clause, HighlightSpec, SearchDocument, SearchField, SearchHit,
    SearchRequest, SearchResults, SearchValue,
};
pub use value_objects::{
    ArticleContent, ArticleId, ArticleStatus, ArticleSummary, ArticleTitle, Visibility,
    VisibilityRange,
};
