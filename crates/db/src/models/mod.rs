pub mod client;
pub mod freelancer;
pub mod invoice;
pub mod project;
pub mod proposal;
pub mod session;
pub mod team_member;
