// tests/support/mocks/search.rs
use async_trait::async_trait;
use shiori_core::domain::article::{
    ArticleId, ArticleSearchIndex, BoolQuery, Clause, HighlightSpec, SearchDocument, SearchField,
    SearchHit, SearchRequest, SearchResults, SearchValue,
};
use shiori_core::domain::errors::{DomainError, DomainResult};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// 検索インデックスのインメモリ実装
///
/// テキスト系の句は大文字小文字を無視した部分一致で評価する。
#[derive(Default)]
pub struct InMemorySearchIndex {
    docs: Mutex<BTreeMap<i64, SearchDocument>>,
    fail: AtomicBool,
    upserts: AtomicUsize,
    deletes: AtomicUsize,
    last_request: Mutex<Option<SearchRequest>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の呼び出しをすべて失敗させる
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, id: i64) -> bool {
        self.docs.lock().unwrap().contains_key(&id)
    }

    /// 同期処理を通さずに文書を直接置く
    pub fn insert_raw(&self, doc: SearchDocument) {
        self.docs.lock().unwrap().insert(doc.id, doc);
    }

    pub fn document(&self, id: i64) -> Option<SearchDocument> {
        self.docs.lock().unwrap().get(&id).cloned()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.docs.lock().unwrap().keys().copied().collect()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::SearchIndex("index unavailable".into()));
        }
        Ok(())
    }
}

fn text_of<'a>(doc: &'a SearchDocument, field: SearchField) -> Option<&'a str> {
    match field {
        SearchField::Title => Some(&doc.title),
        SearchField::Content => Some(&doc.content),
        SearchField::ContentSummary => Some(&doc.content_summary),
        _ => None,
    }
}

fn value_of(doc: &SearchDocument, field: SearchField) -> Option<SearchValue> {
    match field {
        SearchField::CategoryId => Some(SearchValue::Integer(doc.category_id)),
        SearchField::Importance => Some(SearchValue::Integer(i64::from(doc.importance))),
        SearchField::Status => Some(SearchValue::Keyword(doc.status.as_str().to_string())),
        SearchField::CreatedAt => Some(SearchValue::Timestamp(doc.created_at)),
        other => text_of(doc, other).map(|text| SearchValue::Keyword(text.to_string())),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn compare(a: &SearchValue, b: &SearchValue) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (SearchValue::Integer(a), SearchValue::Integer(b)) => Some(a.cmp(b)),
        (SearchValue::Timestamp(a), SearchValue::Timestamp(b)) => Some(a.cmp(b)),
        (SearchValue::Keyword(a), SearchValue::Keyword(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn clause_matches(doc: &SearchDocument, clause: &Clause) -> bool {
    match clause {
        Clause::Match { field, text } => text
            .split_whitespace()
            .any(|word| text_of(doc, *field).is_some_and(|value| contains_ci(value, word))),
        Clause::MatchPhrase { field, text } => {
            text_of(doc, *field).is_some_and(|value| contains_ci(value, text))
        }
        Clause::MultiMatch {
            fields,
            text,
            phrase,
        } => fields.iter().any(|field| {
            let single = if *phrase {
                Clause::MatchPhrase {
                    field: *field,
                    text: text.clone(),
                }
            } else {
                Clause::Match {
                    field: *field,
                    text: text.clone(),
                }
            };
            clause_matches(doc, &single)
        }),
        Clause::Term { field, value } => value_of(doc, *field).as_ref() == Some(value),
        Clause::Terms { field, values } => value_of(doc, *field)
            .is_some_and(|actual| values.iter().any(|value| value == &actual)),
        Clause::Range { field, gte, lt } => {
            let Some(actual) = value_of(doc, *field) else {
                return false;
            };
            let above = gte.as_ref().is_none_or(|bound| {
                compare(&actual, bound).is_some_and(|ord| ord != std::cmp::Ordering::Less)
            });
            let below = lt.as_ref().is_none_or(|bound| {
                compare(&actual, bound) == Some(std::cmp::Ordering::Less)
            });
            above && below
        }
    }
}

fn bool_matches(doc: &SearchDocument, query: &BoolQuery) -> bool {
    if !query.must.iter().all(|c| clause_matches(doc, c)) {
        return false;
    }
    if !query.filter.iter().all(|c| clause_matches(doc, c)) {
        return false;
    }
    if query.should.is_empty() {
        return true;
    }
    let required = query.minimum_should_match.map_or(
        usize::from(query.must.is_empty() && query.filter.is_empty()),
        |n| n as usize,
    );
    query.should.iter().filter(|c| clause_matches(doc, c)).count() >= required
}

/// 句に含まれる語を集める（ハイライト用）
fn collect_terms(query: &BoolQuery, out: &mut Vec<String>) {
    for clause in query.must.iter().chain(&query.should) {
        match clause {
            Clause::Match { text, .. } => {
                out.extend(text.split_whitespace().map(str::to_string));
            }
            Clause::MatchPhrase { text, .. } => out.push(text.clone()),
            Clause::MultiMatch { text, phrase, .. } => {
                if *phrase {
                    out.push(text.clone());
                } else {
                    out.extend(text.split_whitespace().map(str::to_string));
                }
            }
            _ => {}
        }
    }
}

fn emphasize(value: &str, term: &str, spec: &HighlightSpec) -> Option<String> {
    let lower = value.to_lowercase();
    let start = lower.find(&term.to_lowercase())?;
    let end = start + term.len();
    if !value.is_char_boundary(start) || !value.is_char_boundary(end) {
        return None;
    }
    Some(format!(
        "{}{}{}{}{}",
        &value[..start],
        spec.pre_tag,
        &value[start..end],
        spec.post_tag,
        &value[end..]
    ))
}

fn highlights(
    doc: &SearchDocument,
    terms: &[String],
    spec: Option<&HighlightSpec>,
) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    let Some(spec) = spec else {
        return out;
    };
    for field in &spec.fields {
        let Some(value) = text_of(doc, *field) else {
            continue;
        };
        let fragments: Vec<String> = terms
            .iter()
            .filter_map(|term| emphasize(value, term, spec))
            .collect();
        if !fragments.is_empty() {
            out.insert(field.as_str().to_string(), fragments);
        }
    }
    out
}

#[async_trait]
impl ArticleSearchIndex for InMemorySearchIndex {
    async fn upsert(&self, document: &SearchDocument) -> DomainResult<()> {
        self.check()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.docs
            .lock()
            .unwrap()
            .insert(document.id, document.clone());
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.check()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().unwrap().remove(&i64::from(id));
        Ok(())
    }

    async fn delete_many(&self, ids: &[ArticleId]) -> DomainResult<()> {
        self.check()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.lock().unwrap();
        for id in ids {
            docs.remove(&i64::from(*id));
        }
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> DomainResult<SearchResults> {
        self.check()?;
        *self.last_request.lock().unwrap() = Some(request.clone());

        let mut terms = Vec::new();
        collect_terms(&request.query, &mut terms);

        let docs = self.docs.lock().unwrap();
        let mut matching: Vec<&SearchDocument> = docs
            .values()
            .filter(|doc| bool_matches(doc, &request.query))
            .collect();
        // 新しい順（スコアの代わり）
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let from = usize::try_from(request.from).unwrap_or(0);
        let size = usize::try_from(request.size).unwrap_or(0);
        let hits = matching
            .into_iter()
            .skip(from)
            .take(size)
            .map(|doc| SearchHit {
                document: doc.clone(),
                score: Some(1.0),
                highlights: highlights(doc, &terms, request.highlight.as_ref()),
            })
            .collect();

        Ok(SearchResults { hits, total })
    }
}
