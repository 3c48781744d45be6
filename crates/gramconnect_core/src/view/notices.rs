//! Notice banner surfacing rules.

use crate::model::notice::{Notice, NoticeKind};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Notices to surface on `today`.
///
/// Civic notices show whenever active; festival notices only on their date.
pub fn active_notices(notices: &[Notice], today: NaiveDate) -> Vec<Notice> {
    notices
        .iter()
        .filter(|notice| {
            notice.is_active
                && match notice.kind {
                    NoticeKind::Civic => true,
                    NoticeKind::Festival => notice.date == today,
                }
        })
        .cloned()
        .collect()
}

/// Active notices minus those dismissed in the current session.
pub fn visible_notices(
    notices: &[Notice],
    dismissed: &HashSet<String>,
    today: NaiveDate,
) -> Vec<Notice> {
    active_notices(notices, today)
        .into_iter()
        .filter(|notice| !dismissed.contains(&notice.id))
        .collect()
}
