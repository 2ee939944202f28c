// src/domain/article/specifications.rs
use crate::domain::article::entity::Article;
use crate::domain::user::{Role, UserId};

pub trait ArticleSpecification {
    fn is_satisfied(&self) -> bool;
}

/// Author-or-admin rule shared by update and single delete.
pub struct CanMutateArticleSpec<'a> {
    article: &'a Article,
    user_id: &'a UserId,
    role: Role,
}

impl<'a> CanMutateArticleSpec<'a> {
    pub fn new(article: &'a Article, user_id: &'a UserId, role: Role) -> Self {
        Self {
            article,
            user_id,
            role,
        }
    }
}

impl ArticleSpecification for CanMutateArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.role.is_admin() || self.article.is_authored_by(self.user_id)
    }
}

/// Mutations spanning many articles have no single owner, so only admins qualify.
pub struct CanBulkMutateArticlesSpec {
    role: Role,
}

impl CanBulkMutateArticlesSpec {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl ArticleSpecification for CanBulkMutateArticlesSpec {
    fn is_satisfied(&self) -> bool {
        self.role.is_admin()
    }
}

/// Private articles may only be read by their author.
pub struct CanReadArticleSpec<'a> {
    article: &'a Article,
    requester: Option<&'a UserId>,
}

impl<'a> CanReadArticleSpec<'a> {
    pub fn new(article: &'a Article, requester: Option<&'a UserId>) -> Self {
        Self { article, requester }
    }
}

impl ArticleSpecification for CanReadArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        if !self.article.visibility.is_private() {
            return true;
        }
        self.requester
            .is_some_and(|requester| self.article.is_authored_by(requester))
    }
}
