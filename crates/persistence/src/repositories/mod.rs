//! Repository implementations.

pub mod business;
pub mod business_membership;
pub mod chat_message;
pub mod milestone;
pub mod password_reset;
pub mod permission;
pub mod project;
pub mod project_membership;
pub mod role;
pub mod role_permission;
pub mod team;
pub mod team_membership;
pub mod user;

pub use business::BusinessRepository;
pub use business_membership::BusinessMembershipRepository;
pub use chat_message::ChatMessageRepository;
pub use milestone::MilestoneRepository;
pub use password_reset::PasswordResetRepository;
pub use permission::PermissionRepository;
pub use project::ProjectRepository;
pub use project_membership::ProjectMembershipRepository;
pub use role::RoleRepository;
pub use role_permission::RolePermissionRepository;
pub use team::TeamRepository;
pub use team_membership::TeamMembershipRepository;
pub use user::UserRepository;
