//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, SHA-1, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Stateless signed tokens (HMAC-SHA256 over serialized claims)

pub mod crypto;
pub mod password;
pub mod token;
