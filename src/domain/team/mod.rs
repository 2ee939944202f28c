// src/domain/team/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Member, NewMember, NewTeam, Team};
pub use repository::{TeamFilter, TeamRepository};
pub use value_objects::{MemberRole, TeamId, TeamName};
