//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// A unique username in the form `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("alice");
/// let b = unique_username("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice-"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
