//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Client identification
//! - Rate limiting infrastructure

pub mod client;
pub mod cookie;
pub mod password;
pub mod rate_limit;
