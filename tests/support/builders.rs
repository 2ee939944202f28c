// tests/support/builders.rs
use chrono::{DateTime, Utc};
use shiori_core::domain::article::{
    Article, ArticleContent, ArticleId, ArticleStatus, ArticleSummary, ArticleTitle, Attachment,
    AttachmentBlob, VisibilityRange,
};
use shiori_core::domain::category::CategoryId;
use shiori_core::domain::user::UserId;

use super::mocks::fixed_now;

/// テスト用の記事ビルダー
pub struct ArticleBuilder {
    id: i64,
    title: String,
    content: String,
    summary: String,
    author: String,
    category: i64,
    importance: i32,
    visibility: String,
    status: ArticleStatus,
    attachments: AttachmentBlob,
    created_at: DateTime<Utc>,
}

impl ArticleBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: format!("article {id}"),
            content: format!("body of article {id}"),
            summary: String::new(),
            author: "alice".into(),
            category: 1,
            importance: 0,
            visibility: "public".into(),
            status: ArticleStatus::Published,
            attachments: AttachmentBlob::default(),
            created_at: fixed_now(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.into();
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.into();
        self
    }

    pub fn category(mut self, category: i64) -> Self {
        self.category = category;
        self
    }

    pub fn importance(mut self, importance: i32) -> Self {
        self.importance = importance;
        self
    }

    pub fn visibility(mut self, visibility: &str) -> Self {
        self.visibility = visibility.into();
        self
    }

    pub fn status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn attachment(mut self, name: &str, url: &str) -> Self {
        self.attachments = AttachmentBlob::encode(&[Attachment {
            file_name: name.into(),
            file_url: url.into(),
        }])
        .unwrap();
        self
    }

    /// 壊れた添付 BLOB を持たせる
    pub fn corrupt_attachments(mut self) -> Self {
        self.attachments = AttachmentBlob::from_bytes(b"{not json".to_vec());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn build(self) -> Article {
        let deleted_at = (self.status == ArticleStatus::Deleted).then_some(self.created_at);
        Article {
            id: ArticleId::new(self.id).unwrap(),
            title: ArticleTitle::new(self.title).unwrap(),
            content: ArticleContent::new(self.content).unwrap(),
            content_summary: ArticleSummary::new(self.summary).unwrap(),
            author_id: UserId::new(self.author).unwrap(),
            category_id: CategoryId::new(self.category).unwrap(),
            importance: self.importance,
            visibility: VisibilityRange::parse(self.visibility),
            comments_disabled: false,
            source_uri: None,
            status: self.status,
            attachments: self.attachments,
            created_at: self.created_at,
            updated_at: self.created_at,
            deleted_at,
        }
    }
}

/// 作成リクエストの JSON ボディ
pub fn create_article_body(title: &str, category_id: i64, visibility: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "content": format!("{title} content"),
        "content_summary": format!("{title} summary"),
        "category_id": category_id,
        "visibility_range": visibility,
    })
}
