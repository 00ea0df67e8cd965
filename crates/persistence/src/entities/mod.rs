//! Entity definitions (database row mappings).

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

pub use business::{BusinessEntity, BusinessTypeDb, BusinessWithOwnerEntity};
pub use business_membership::{
    BusinessMembershipEntity, BusinessMembershipWithRefsEntity, MembershipStatusDb,
};
pub use chat_message::{ChatMessageEntity, ChatMessageTypeDb, ChatMessageWithRefsEntity};
pub use milestone::{MilestoneEntity, MilestoneWithProjectEntity};
pub use password_reset::PasswordResetCodeEntity;
pub use permission::PermissionEntity;
pub use project::{ProgressStatusDb, ProjectEntity, ProjectWithRefsEntity};
pub use project_membership::{ProjectMembershipEntity, ProjectMembershipWithRefsEntity};
pub use role::{RoleEntity, RoleScopeDb};
pub use role_permission::{RolePermissionEntity, RolePermissionWithRefsEntity};
pub use team::{TeamEntity, TeamWithBusinessEntity};
pub use team_membership::{TeamMembershipEntity, TeamMembershipWithRefsEntity};
pub use user::{UserEntity, UserRoleDb};
