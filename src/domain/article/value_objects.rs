// src/domain/article/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

const MAX_TITLE_CHARS: usize = 255;
const MAX_SUMMARY_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl ArticleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "article id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ArticleId> for i64 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("title cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::Validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleTitle> for String {
    fn from(value: ArticleTitle) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent(String);

impl ArticleContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("content cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ArticleContent> for String {
    fn from(value: ArticleContent) -> Self {
        value.0
    }
}

/// Short teaser shown in listings. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleSummary(String);

impl ArticleSummary {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > MAX_SUMMARY_CHARS {
            return Err(DomainError::Validation(format!(
                "summary must be at most {MAX_SUMMARY_CHARS} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ArticleSummary> for String {
    fn from(value: ArticleSummary) -> Self {
        value.0
    }
}

/// Lifecycle state. The numeric codes are what the store and the index persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Deleted,
    PendingReview,
    Rejected,
    Scheduled,
}

impl ArticleStatus {
    pub fn code(self) -> i16 {
        match self {
            ArticleStatus::Draft => 0,
            ArticleStatus::Published => 1,
            ArticleStatus::Deleted => 2,
            ArticleStatus::PendingReview => 3,
            ArticleStatus::Rejected => 4,
            ArticleStatus::Scheduled => 5,
        }
    }

    pub fn from_code(code: i16) -> DomainResult<Self> {
        match code {
            0 => Ok(ArticleStatus::Draft),
            1 => Ok(ArticleStatus::Published),
            2 => Ok(ArticleStatus::Deleted),
            3 => Ok(ArticleStatus::PendingReview),
            4 => Ok(ArticleStatus::Rejected),
            5 => Ok(ArticleStatus::Scheduled),
            other => Err(DomainError::Validation(format!(
                "unknown article status code {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Deleted => "deleted",
            ArticleStatus::PendingReview => "pending_review",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::Scheduled => "scheduled",
        }
    }

    /// Whether the detail view may serve an article in this state.
    pub fn is_readable(self) -> bool {
        matches!(self, ArticleStatus::Published | ArticleStatus::PendingReview)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    Public,
    Private,
    TeamOnly,
}

impl Visibility {
    /// Lowercase tokens that mark a range as private.
    pub const PRIVATE_TOKENS: [&'static str; 3] = ["private", "private-only", "private_only"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "public" => Some(Visibility::Public),
            t if Self::PRIVATE_TOKENS.contains(&t) => Some(Visibility::Private),
            "team" | "team-only" | "team_only" | "teamonly" => Some(Visibility::TeamOnly),
            _ => None,
        }
    }
}

/// Who may read an article.
///
/// The stored string is kept verbatim; membership is decided on exact,
/// case-insensitive tokens separated by commas, semicolons, pipes or
/// whitespace. `"notprivate"` is not private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityRange {
    raw: String,
    scopes: BTreeSet<Visibility>,
}

impl VisibilityRange {
    /// Lenient parse used when reading stored rows. Unknown tokens are ignored.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let scopes = raw
            .split(|c: char| c == ',' || c == ';' || c == '|' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .filter_map(|token| Visibility::from_token(&token.to_ascii_lowercase()))
            .collect();
        Self { raw, scopes }
    }

    /// Strict parse for client input: at least one recognised token is required.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let range = Self::parse(raw);
        if range.scopes.is_empty() {
            return Err(DomainError::Validation(format!(
                "visibility range '{}' names no known scope",
                range.raw
            )));
        }
        Ok(range)
    }

    pub fn public() -> Self {
        Self::parse("public")
    }

    pub fn contains(&self, scope: Visibility) -> bool {
        self.scopes.contains(&scope)
    }

    pub fn is_public(&self) -> bool {
        self.contains(Visibility::Public)
    }

    pub fn is_private(&self) -> bool {
        self.contains(Visibility::Private)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for VisibilityRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for VisibilityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<VisibilityRange> for String {
    fn from(value: VisibilityRange) -> Self {
        value.raw
    }
}
