//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod business_memberships;
pub mod businesses;
pub mod chat_messages;
pub mod health;
pub mod milestones;
pub mod permissions;
pub mod project_memberships;
pub mod projects;
pub mod role_permissions;
pub mod roles;
pub mod team_memberships;
pub mod teams;
