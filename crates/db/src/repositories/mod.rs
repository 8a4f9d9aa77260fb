mod client_repo;
mod freelancer_repo;
mod invoice_repo;
mod project_repo;
mod proposal_repo;
mod session_repo;
mod team_member_repo;

pub use client_repo::ClientRepo;
pub use freelancer_repo::FreelancerRepo;
pub use invoice_repo::InvoiceRepo;
pub use project_repo::ProjectRepo;
pub use proposal_repo::ProposalRepo;
pub use session_repo::SessionRepo;
pub use team_member_repo::TeamMemberRepo;
