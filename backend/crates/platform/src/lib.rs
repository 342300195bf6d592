//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with zeroized cleartext handling
//! - HTTP Basic `Authorization` header parsing

pub mod basic_auth;
pub mod password;
