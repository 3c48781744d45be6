//! Record id generation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Builds `<prefix>-<epoch millis>-<9 char random suffix>`.
///
/// Uniqueness is probabilistic; callers do not check for collisions.
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}-{}-{}",
        now.timestamp_millis(),
        &random[..SUFFIX_LEN]
    )
}
