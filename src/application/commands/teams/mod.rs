// src/application/commands/teams/mod.rs
mod create;
mod delete;
mod members;
mod service;
mod update;

pub use create::CreateTeamCommand;
pub use delete::DeleteTeamCommand;
pub use members::{AddMemberCommand, ChangeMemberRoleCommand, RemoveMemberCommand};
pub use service::TeamCommandService;
pub use update::UpdateTeamCommand;
