//! Complaint feed filtering and dashboard counts.

use crate::model::complaint::{Complaint, ComplaintCategory, ComplaintStatus};

/// Feed filter; unset fields match every complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub category: Option<ComplaintCategory>,
    pub status: Option<ComplaintStatus>,
    /// Case-insensitive substring of description or location.
    pub search: String,
}

impl ComplaintFilter {
    pub fn category(category: ComplaintCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Whether any field narrows the feed.
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.status.is_some() || !self.search.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Category AND status AND (search in description OR location).
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if self
            .category
            .is_some_and(|category| complaint.category != category)
        {
            return false;
        }
        if self.status.is_some_and(|status| complaint.status != status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        complaint.description.to_lowercase().contains(&needle)
            || complaint.location.to_lowercase().contains(&needle)
    }

    /// Matching complaints, keeping input order.
    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        complaints
            .iter()
            .filter(|complaint| self.matches(complaint))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub submitted: usize,
    pub in_review: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.submitted + self.in_review + self.resolved
    }
}

pub fn status_counts(complaints: &[Complaint]) -> StatusCounts {
    complaints
        .iter()
        .fold(StatusCounts::default(), |mut counts, complaint| {
            match complaint.status {
                ComplaintStatus::Submitted => counts.submitted += 1,
                ComplaintStatus::InReview => counts.in_review += 1,
                ComplaintStatus::Resolved => counts.resolved += 1,
            }
            counts
        })
}
