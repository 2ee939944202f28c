pub mod articles;
pub mod pagination;
pub mod requester;
pub mod serde_time;
pub mod teams;

pub use articles::{
    ArticleDto, ArticleSearchHitDto, AttachmentDto, CreatedArticleDto, DeletedCountDto,
    ReconcileReportDto,
};
pub use pagination::PagedResult;
pub use requester::Requester;
pub use teams::{MemberDto, TeamDto};
