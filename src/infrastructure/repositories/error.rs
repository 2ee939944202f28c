use crate::domain::errors::DomainError;

const CNT_ARTICLE_TITLE_AUTHOR: &str = "articles_title_author_active_key";
const CNT_ARTICLE_STATUS_CHECK: &str = "articles_status_check";
const CNT_TEAM_MEMBER: &str = "team_members_team_user_active_key";
const CNT_TEAM_MEMBER_TEAM: &str = "team_members_team_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_TITLE_AUTHOR => DomainError::Conflict(
                        "article with this title already exists for this author".into(),
                    ),
                    CNT_ARTICLE_STATUS_CHECK => {
                        DomainError::Validation("article status out of range".into())
                    }
                    CNT_TEAM_MEMBER => DomainError::Conflict("user is already a member".into()),
                    CNT_TEAM_MEMBER_TEAM => DomainError::NotFound("team not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
