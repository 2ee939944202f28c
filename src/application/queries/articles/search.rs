use super::{ArticleQueryService, dates::parse_date_range};
use crate::{
    application::{
        dto::{ArticleSearchHitDto, PagedResult},
        error::ApplicationResult,
    },
    domain::{
        article::{
            ArticleStatus, BoolQuery, Clause, HighlightSpec, SearchField, SearchRequest,
            SearchValue,
        },
        category::CategoryId,
        pagination::Page,
        user::UserId,
    },
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Keywords across title, content and summary.
    #[default]
    Normal,
    /// Title/content alternatives, keywords on the summary only, plus date
    /// and importance filters.
    Advanced,
}

#[derive(Debug, Clone, Default)]
pub struct SearchArticlesQuery {
    pub mode: SearchMode,
    pub keywords: Vec<String>,
    /// Match each keyword as an exact phrase, all required.
    pub phrase: bool,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_ids: Vec<i64>,
    /// `YYYY-MM-DD`, inclusive. Advanced mode only.
    pub created_from: Option<String>,
    /// `YYYY-MM-DD`, inclusive. Advanced mode only.
    pub created_to: Option<String>,
    /// Advanced mode only.
    pub importance: Option<i32>,
    pub page_index: i64,
    pub page_size: i64,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn keyword_clause(fields: &[SearchField], text: &str, phrase: bool) -> Clause {
    match fields {
        [field] if phrase => Clause::MatchPhrase {
            field: *field,
            text: text.to_string(),
        },
        [field] => Clause::Match {
            field: *field,
            text: text.to_string(),
        },
        _ => Clause::MultiMatch {
            fields: fields.to_vec(),
            text: text.to_string(),
            phrase,
        },
    }
}

/// Keeps anything but published documents out of the hits even if the index
/// still holds a stale copy.
fn published_only() -> Clause {
    Clause::Term {
        field: SearchField::Status,
        value: SearchValue::Keyword(ArticleStatus::Published.as_str().to_string()),
    }
}

/// Translate a search request into the index query model.
pub fn build_search_query(query: &SearchArticlesQuery) -> ApplicationResult<BoolQuery> {
    let keywords: Vec<&str> = query
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    let title = non_blank(query.title.as_ref());
    let content = non_blank(query.content.as_ref());

    let mut bool_query = BoolQuery::new();

    match query.mode {
        SearchMode::Normal => {
            if let Some(title) = title {
                bool_query = bool_query.must(keyword_clause(&[SearchField::Title], title, false));
            }
            if let Some(content) = content {
                bool_query =
                    bool_query.must(keyword_clause(&[SearchField::Content], content, false));
            }
            if query.phrase {
                for keyword in &keywords {
                    bool_query = bool_query.must(keyword_clause(
                        &SearchField::TEXT_FIELDS,
                        keyword,
                        true,
                    ));
                }
            } else if !keywords.is_empty() {
                for keyword in &keywords {
                    bool_query = bool_query.should(keyword_clause(
                        &SearchField::TEXT_FIELDS,
                        keyword,
                        false,
                    ));
                }
                bool_query = bool_query.minimum_should_match(1);
            }
        }
        SearchMode::Advanced => {
            if let Some(title) = title {
                bool_query =
                    bool_query.should(keyword_clause(&[SearchField::Title], title, false));
            }
            if let Some(content) = content {
                bool_query =
                    bool_query.should(keyword_clause(&[SearchField::Content], content, false));
            }
            if !bool_query.should.is_empty() {
                bool_query = bool_query.minimum_should_match(1);
            }
            for keyword in &keywords {
                bool_query = bool_query.must(keyword_clause(
                    &[SearchField::ContentSummary],
                    keyword,
                    query.phrase,
                ));
            }

            let (gte, lt) =
                parse_date_range(query.created_from.as_deref(), query.created_to.as_deref())?;
            if gte.is_some() || lt.is_some() {
                bool_query = bool_query.filter(Clause::Range {
                    field: SearchField::CreatedAt,
                    gte: gte.map(SearchValue::Timestamp),
                    lt: lt.map(SearchValue::Timestamp),
                });
            }
            if let Some(importance) = query.importance {
                bool_query = bool_query.filter(Clause::Term {
                    field: SearchField::Importance,
                    value: SearchValue::Integer(i64::from(importance)),
                });
            }
        }
    }

    if !query.category_ids.is_empty() {
        let values = query
            .category_ids
            .iter()
            .map(|id| CategoryId::new(*id).map(|id| SearchValue::Integer(id.into())))
            .collect::<Result<Vec<_>, _>>()?;
        bool_query = bool_query.filter(Clause::Terms {
            field: SearchField::CategoryId,
            values,
        });
    }

    Ok(bool_query)
}

impl ArticleQueryService {
    /// Relevance search over indexed (public, published) articles.
    pub async fn search_articles(
        &self,
        query: SearchArticlesQuery,
    ) -> ApplicationResult<PagedResult<ArticleSearchHitDto>> {
        let page = Page::normalize(query.page_index, query.page_size);
        let request = SearchRequest {
            query: build_search_query(&query)?.filter(published_only()),
            highlight: Some(HighlightSpec::emphasis(SearchField::TEXT_FIELDS)),
            from: page.offset(),
            size: page.size(),
        };

        let results = self.search_index.search(&request).await?;
        debug!(total = results.total, hits = results.hits.len(), "article search finished");

        let mut names = self.names.cached();
        let mut items = Vec::with_capacity(results.hits.len());
        for hit in results.hits {
            let author = match UserId::new(hit.document.author_id.clone()) {
                Ok(author_id) => names.author_name(&author_id).await,
                Err(_) => None,
            };
            let category = match CategoryId::new(hit.document.category_id) {
                Ok(category_id) => names.category_name(category_id).await,
                Err(_) => None,
            };
            items.push(ArticleSearchHitDto::assemble(hit, author, category));
        }

        Ok(PagedResult::new(items, results.total, page))
    }
}
