//! Complaint submission validation.
//!
//! # Responsibility
//! - Turn raw form input into a `NewComplaint` or field-level messages.
//!
//! # Invariants
//! - Every failing field gets exactly one message.
//! - Valid drafts always produce `ComplaintStatus::Submitted`.

use crate::model::complaint::{ComplaintCategory, ComplaintStatus, NewComplaint};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum description length, in characters, after trimming.
pub const MIN_DESCRIPTION_CHARS: usize = 10;
/// Maximum decoded image size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

static IMAGE_DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,([A-Za-z0-9+/]*={0,2})$")
        .expect("valid data uri regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComplaintField {
    Category,
    Description,
    Location,
    Image,
}

impl ComplaintField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Description => "description",
            Self::Location => "location",
            Self::Image => "image",
        }
    }
}

/// Field-level validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<ComplaintField, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: ComplaintField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComplaintField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn set(&mut self, field: ComplaintField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Raw complaint form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub category: Option<ComplaintCategory>,
    pub description: String,
    pub location: String,
    /// `data:image/...;base64,` URI of the attached photo.
    pub image: Option<String>,
}

impl ComplaintDraft {
    /// Validates every field and returns the submission on success.
    pub fn validate(self) -> Result<NewComplaint, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.category.is_none() {
            errors.set(ComplaintField::Category, "Please select a category");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.set(ComplaintField::Description, "Please provide a description");
        } else if description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.set(
                ComplaintField::Description,
                "Description should be at least 10 characters",
            );
        }

        if self.location.trim().is_empty() {
            errors.set(ComplaintField::Location, "Please provide a location");
        }

        if let Some(image) = self.image.as_deref() {
            if let Err(message) = check_image(image) {
                errors.set(ComplaintField::Image, message);
            }
        }

        match self.category {
            Some(category) if errors.is_empty() => Ok(NewComplaint {
                category,
                description: self.description,
                location: self.location,
                image: self.image,
                status: ComplaintStatus::Submitted,
            }),
            _ => Err(errors),
        }
    }
}

fn check_image(image: &str) -> Result<(), &'static str> {
    let payload = IMAGE_DATA_URI_RE
        .captures(image)
        .and_then(|captures| captures.get(1))
        .ok_or("Image must be a data URI")?
        .as_str();

    if decoded_len(payload) > MAX_IMAGE_BYTES {
        return Err("Image size should be less than 5MB");
    }
    Ok(())
}

fn decoded_len(base64: &str) -> usize {
    let padding = base64.bytes().rev().take_while(|byte| *byte == b'=').count();
    (base64.len() / 4 * 3 + (base64.len() % 4) * 3 / 4).saturating_sub(padding)
}

#[cfg(test)]
mod tests {
    use super::{decoded_len, ComplaintDraft, ComplaintField, MAX_IMAGE_BYTES};
    use crate::model::complaint::{ComplaintCategory, ComplaintStatus};

    fn valid_draft() -> ComplaintDraft {
        ComplaintDraft {
            category: Some(ComplaintCategory::Sanitation),
            description: "Open drain overflowing near the market".to_string(),
            location: "Ward 4, Nashik".to_string(),
            image: None,
        }
    }

    #[test]
    fn valid_draft_becomes_submitted_complaint() {
        let new = valid_draft().validate().unwrap();
        assert_eq!(new.category, ComplaintCategory::Sanitation);
        assert_eq!(new.status, ComplaintStatus::Submitted);
    }

    #[test]
    fn missing_fields_each_get_a_message() {
        let errors = ComplaintDraft::default().validate().unwrap_err();
        assert_eq!(
            errors.get(ComplaintField::Category),
            Some("Please select a category")
        );
        assert_eq!(
            errors.get(ComplaintField::Description),
            Some("Please provide a description")
        );
        assert_eq!(
            errors.get(ComplaintField::Location),
            Some("Please provide a location")
        );
        assert_eq!(errors.get(ComplaintField::Image), None);
    }

    #[test]
    fn short_description_is_rejected() {
        let draft = ComplaintDraft {
            description: "  pipe burst ".to_string(),
            ..valid_draft()
        };
        let draft_short = ComplaintDraft {
            description: "leak".to_string(),
            ..valid_draft()
        };
        assert!(draft.validate().is_ok());
        let errors = draft_short.validate().unwrap_err();
        assert_eq!(
            errors.get(ComplaintField::Description),
            Some("Description should be at least 10 characters")
        );
    }

    #[test]
    fn image_must_be_base64_data_uri() {
        let draft = ComplaintDraft {
            image: Some("https://example.com/photo.png".to_string()),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(ComplaintField::Image),
            Some("Image must be a data URI")
        );

        let draft = ComplaintDraft {
            image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            ..valid_draft()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let payload = "A".repeat((MAX_IMAGE_BYTES / 3 + 1) * 4);
        let draft = ComplaintDraft {
            image: Some(format!("data:image/jpeg;base64,{payload}")),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(ComplaintField::Image),
            Some("Image size should be less than 5MB")
        );
    }

    #[test]
    fn decoded_len_accounts_for_padding() {
        assert_eq!(decoded_len("TWFu"), 3);
        assert_eq!(decoded_len("TWE="), 2);
        assert_eq!(decoded_len("TQ=="), 1);
        assert_eq!(decoded_len(""), 0);
    }

    #[test]
    fn display_lists_fields_in_order() {
        let errors = ComplaintDraft {
            category: None,
            location: String::new(),
            ..valid_draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "category: Please select a category; location: Please provide a location"
        );
    }
}
