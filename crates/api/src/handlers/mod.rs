pub mod auth;
pub mod client;
pub mod freelancer;
pub mod health;
pub mod invoice;
pub mod project;
pub mod proposal;
pub mod team_member;
