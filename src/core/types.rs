//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An AWS region identifier (e.g., eu-west-1).
pub type Region = String;

/// A 12-digit AWS account id.
///
/// Kept as a string; leading zeros are significant.
pub type AccountId = String;

/// The fully-qualified secret name: group prefix followed by the secret name.
pub type FullName = String;

/// A tag key. Keys are unique per secret and compared case-sensitively.
pub type TagKey = String;

/// A tag value.
pub type TagValue = String;
