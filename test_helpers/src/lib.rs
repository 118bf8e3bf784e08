//! Test helpers shared across crates.
//!
//! Environment variables and the working directory are process-global; tests
//! that touch either run inside a [`figment::Jail`] through
//! [`figment::with_jail`].

pub mod figment;
