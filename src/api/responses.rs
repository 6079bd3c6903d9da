//! Response bodies for write operations.
//!
//! The shapes mirror the result objects of a document store (`insertedId`,
//! `matchedCount`, `deletedCount`) so storefront clients can tell what happened
//! without a second request.

use serde::Serialize;

/// Result of an insert
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    /// Always true once the write was accepted
    pub acknowledged: bool,
    /// Identifier of the new record, absent when nothing was inserted
    pub inserted_id: Option<i64>,
}

impl InsertResult {
    /// A record was inserted.
    #[must_use]
    pub const fn inserted(id: i64) -> Self {
        Self {
            acknowledged: true,
            inserted_id: Some(id),
        }
    }

    /// The request was accepted but no record was needed.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            acknowledged: true,
            inserted_id: None,
        }
    }
}

/// Result of an update
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Always true once the write was accepted
    pub acknowledged: bool,
    /// Records matched by the filter
    pub matched_count: u64,
    /// Records actually changed
    pub modified_count: u64,
}

impl UpdateResult {
    /// Update of at most one record, identified by whether it was found.
    #[must_use]
    pub const fn single(found: bool) -> Self {
        let count = if found { 1 } else { 0 };
        Self {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
        }
    }
}

/// Result of a delete
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Always true once the write was accepted
    pub acknowledged: bool,
    /// Records removed
    pub deleted_count: u64,
}

impl DeleteResult {
    /// `count` records were removed.
    #[must_use]
    pub const fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
