mod elasticsearch;
mod query;

pub use elasticsearch::{ElasticsearchArticleIndex, ElasticsearchSettings};
