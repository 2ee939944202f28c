mod dates;
mod get_by_id;
mod list;
mod search;
mod service;

pub use dates::parse_date_range;
pub use get_by_id::GetArticleQuery;
pub use list::{ListAuthorArticlesQuery, ListCategoryArticlesQuery};
pub use search::{SearchArticlesQuery, SearchMode, build_search_query};
pub use service::ArticleQueryService;
