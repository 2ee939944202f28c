// tests/support/mocks/articles.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shiori_core::domain::article::{
    Article, ArticleId, ArticleRepository, ArticleStatus, ArticleTitle, AuthorArticleFilter,
    ChangeCursor, NewArticle,
};
use shiori_core::domain::category::CategoryId;
use shiori_core::domain::errors::{DomainError, DomainResult};
use shiori_core::domain::pagination::Page;
use shiori_core::domain::user::UserId;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// 記事ストアのインメモリ実装
///
/// 一意制約（著者ごとのタイトル、削除済みを除く）も再現する。
pub struct InMemoryArticleRepo {
    rows: Mutex<BTreeMap<i64, Article>>,
    next_id: Mutex<i64>,
    fail_writes: AtomicBool,
}

impl Default for InMemoryArticleRepo {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の行をそのまま差し込む（ID 採番も追従させる）
    pub fn seed(&self, article: Article) {
        let id = i64::from(article.id);
        {
            let mut next = self.next_id.lock().unwrap();
            if *next <= id {
                *next = id + 1;
            }
        }
        self.rows.lock().unwrap().insert(id, article);
    }

    pub fn get(&self, id: i64) -> Option<Article> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// 書き込み系の呼び出しを失敗させる
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writes(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("article store offline".into()));
        }
        Ok(())
    }

    fn duplicate_exists(
        rows: &BTreeMap<i64, Article>,
        title: &ArticleTitle,
        author_id: &UserId,
        excluding: Option<i64>,
    ) -> bool {
        rows.values().any(|row| {
            !row.is_deleted()
                && &row.title == title
                && &row.author_id == author_id
                && Some(i64::from(row.id)) != excluding
        })
    }
}

/// 公開済みで、非公開なら閲覧者が著者本人のときだけ一覧に出る
fn listed_in_category(row: &Article, category_id: CategoryId, viewer: Option<&UserId>) -> bool {
    row.category_id == category_id
        && row.status == ArticleStatus::Published
        && (!row.visibility.is_private() || viewer == Some(&row.author_id))
}

fn newest_first(rows: &mut [Article]) {
    rows.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
    });
}

fn paginate(rows: Vec<Article>, page: Page) -> Vec<Article> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(page.size()).unwrap_or(0);
    rows.into_iter().skip(offset).take(size).collect()
}

fn matches_filter(article: &Article, filter: &AuthorArticleFilter) -> bool {
    if article.is_deleted() || article.author_id != filter.author_id {
        return false;
    }
    if let Some(title) = &filter.title {
        if !article
            .title
            .as_str()
            .to_lowercase()
            .contains(&title.to_lowercase())
        {
            return false;
        }
    }
    if filter.category_id.is_some_and(|id| id != article.category_id) {
        return false;
    }
    if filter.created_from.is_some_and(|from| article.created_at < from) {
        return false;
    }
    if filter
        .created_before
        .is_some_and(|before| article.created_at >= before)
    {
        return false;
    }
    true
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepo {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.get(id.into()))
    }

    async fn title_taken(
        &self,
        title: &ArticleTitle,
        author_id: &UserId,
        excluding: Option<ArticleId>,
    ) -> DomainResult<bool> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::duplicate_exists(
            &rows,
            title,
            author_id,
            excluding.map(i64::from),
        ))
    }

    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        if Self::duplicate_exists(&rows, &article.title, &article.author_id, None) {
            return Err(DomainError::Conflict("duplicate article title".into()));
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };

        let stored = Article {
            id: ArticleId::new(id)?,
            title: article.title,
            content: article.content,
            content_summary: article.content_summary,
            author_id: article.author_id,
            category_id: article.category_id,
            importance: article.importance,
            visibility: article.visibility,
            comments_disabled: article.comments_disabled,
            source_uri: article.source_uri,
            status: article.status,
            attachments: article.attachments,
            created_at: article.created_at,
            updated_at: article.updated_at,
            deleted_at: None,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        let id = i64::from(article.id);
        if !rows.contains_key(&id) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        if Self::duplicate_exists(&rows, &article.title, &article.author_id, Some(id)) {
            return Err(DomainError::Conflict("duplicate article title".into()));
        }
        rows.insert(id, article.clone());
        Ok(article.clone())
    }

    async fn update_status(
        &self,
        ids: &[ArticleId],
        status: ArticleStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for id in ids {
            if let Some(row) = rows.get_mut(&i64::from(*id)) {
                if row.status == status {
                    continue;
                }
                row.status = status;
                row.updated_at = now;
                if status == ArticleStatus::Deleted {
                    row.deleted_at = Some(now);
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn count_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
    ) -> DomainResult<u64> {
        let rows = self.rows.lock().unwrap();
        let count = rows
            .values()
            .filter(|row| listed_in_category(row, category_id, viewer))
            .count();
        Ok(count as u64)
    }

    async fn list_published_in_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&UserId>,
        page: Page,
    ) -> DomainResult<Vec<Article>> {
        let mut matching: Vec<Article> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| listed_in_category(row, category_id, viewer))
            .cloned()
            .collect();
        newest_first(&mut matching);
        Ok(paginate(matching, page))
    }

    async fn list_by_author(
        &self,
        filter: &AuthorArticleFilter,
        page: Page,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let mut matching: Vec<Article> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| matches_filter(row, filter))
            .cloned()
            .collect();
        newest_first(&mut matching);
        let total = matching.len() as u64;
        Ok((paginate(matching, page), total))
    }

    async fn list_changed_after(
        &self,
        cursor: ChangeCursor,
        limit: i64,
    ) -> DomainResult<Vec<Article>> {
        let mut matching: Vec<Article> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| {
                (row.updated_at, i64::from(row.id)) > (cursor.updated_at, cursor.last_id)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|row| (row.updated_at, i64::from(row.id)));
        let limit = usize::try_from(limit.clamp(1, 1000)).unwrap_or(1);
        matching.truncate(limit);
        Ok(matching)
    }
}
