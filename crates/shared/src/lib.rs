//! Shared utilities and common types for the BizFlow backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access token issuing and validation
//! - Password hashing with Argon2id
//! - One-time password-reset codes
//! - Common validation logic

pub mod jwt;
pub mod password;
pub mod reset_code;
pub mod validation;
