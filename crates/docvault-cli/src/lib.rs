//! # DocVault CLI
//!
//! Database seeding utilities for DocVault development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use docvault_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20).with_documents_per_user(5);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
