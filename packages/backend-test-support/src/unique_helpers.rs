//! Unique fixture values so tests sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{uuid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("sub");
/// assert_ne!(a, unique_str("sub"));
/// assert!(a.starts_with("sub-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// `{prefix}-{uuid}@example.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("player");
/// assert!(email.starts_with("player-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix))
}
