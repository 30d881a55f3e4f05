//! # Campaign Ledger Testkit
//!
//! Testing utilities for the campaign ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: A signed three-event journal with expected canonical bytes and hashes
//! - **Generators**: Proptest strategies for events, commands, filters and cursors
//! - **Fixtures**: An in-memory ledger with a fixed clock and known keys
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the hash envelope, chain linkage and signatures:
//!
//! ```rust
//! use campaign_ledger_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, detail) in verify_all_vectors() {
//!     assert!(matches, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use campaign_ledger_core::event_hash;
//! use campaign_ledger_testkit::generators::event;
//!
//! proptest! {
//!     #[test]
//!     fn event_hash_is_deterministic(e in event()) {
//!         prop_assert_eq!(event_hash(&e).unwrap(), event_hash(&e.clone()).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust,ignore
//! use campaign_ledger_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let id = fixture.active_campaign("Sunfall").await?;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{create_payload, multi_key_fixtures, TestFixture};
pub use vectors::{all_vectors, event_from_vector, verify_all_vectors, GoldenVector};
