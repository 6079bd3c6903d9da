//! Core business logic - framework-agnostic storefront operations.
//!
//! Each submodule works against a `DatabaseConnection` and returns [`crate::errors::Result`].
//! The HTTP layer in [`crate::api`] is a thin mapping onto these functions.

/// Cart merging, stepping, and removal
pub mod cart;
/// Category listing and seeding
pub mod category;
/// Checkout and payment reconciliation
pub mod order;
/// Product catalogue and review workflow
pub mod product;
/// Account registration and roles
pub mod user;
