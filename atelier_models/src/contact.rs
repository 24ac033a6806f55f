use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use nutype::nutype;
use serde::{Deserialize, Serialize};

#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Serialize,
    Deserialize,
))]
pub struct ContactMessageId(uuid::Uuid);

/// A contact message as recorded by the backend.
///
/// `id` and `created_at` are assigned by the server when the message is
/// accepted and are never taken from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactContent,
    pub phone: Option<ContactPhone>,
    pub company: Option<ContactCompany>,
    pub created_at: DateTime<Utc>,
}

/// A contact form submission that has passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactContent,
    pub phone: Option<ContactPhone>,
    pub company: Option<ContactCompany>,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 128),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactContent(String);

#[nutype(
    validate(len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    validate(len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactCompany(String);

/// The raw, untrusted shape of a contact form submission.
///
/// Both the browser form and the REST endpoint produce their submissions
/// from this type via [`ContactSubmissionDraft::validate`], so client and
/// server cannot diverge in their acceptance rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmissionDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl ContactSubmissionDraft {
    /// Checks the draft against the contact message schema.
    ///
    /// Returns the validated submission, or one [`FieldViolation`] per
    /// violated constraint. Validation is pure and performs no I/O.
    pub fn validate(self) -> Result<ContactSubmission, ContactValidationError> {
        let name = ContactName::try_new(self.name).map_err(|err| match err {
            ContactNameError::LenCharMinViolated => "Name must be at least 2 characters",
            ContactNameError::LenCharMaxViolated => "Name must be at most 128 characters",
        });
        let email = self
            .email
            .parse::<EmailAddress>()
            .map_err(|_| "Please enter a valid email address");
        let message = ContactContent::try_new(self.message).map_err(|err| match err {
            ContactContentError::LenCharMinViolated => "Message must be at least 10 characters",
            ContactContentError::LenCharMaxViolated => "Message must be at most 4096 characters",
        });
        let phone = self
            .phone
            .map(ContactPhone::try_new)
            .transpose()
            .map_err(|ContactPhoneError::LenCharMaxViolated| {
                "Phone number must be at most 64 characters"
            });
        let company = self
            .company
            .map(ContactCompany::try_new)
            .transpose()
            .map_err(|ContactCompanyError::LenCharMaxViolated| {
                "Company must be at most 256 characters"
            });

        let mut violations = Vec::new();
        for (field, error) in [
            (ContactField::Name, name.as_ref().err().copied()),
            (ContactField::Email, email.as_ref().err().copied()),
            (ContactField::Message, message.as_ref().err().copied()),
            (ContactField::Phone, phone.as_ref().err().copied()),
            (ContactField::Company, company.as_ref().err().copied()),
        ] {
            if let Some(msg) = error {
                violations.push(FieldViolation {
                    field,
                    message: msg,
                });
            }
        }

        match (name, email, message, phone, company) {
            (Ok(name), Ok(email), Ok(message), Ok(phone), Ok(company)) => Ok(ContactSubmission {
                name,
                email,
                message,
                phone,
                company,
            }),
            _ => Err(ContactValidationError { violations }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
    Phone,
    Company,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Phone => "phone",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated constraint of the contact message schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: ContactField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    pub violations: Vec<FieldViolation>,
}

impl std::fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid contact submission")?;
        for FieldViolation { field, message } in &self.violations {
            write!(f, "; {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: "Hello there, I need a website.".into(),
            phone: None,
            company: None,
        }
    }

    #[test]
    fn ok_without_optional_fields() {
        let submission = draft().validate().unwrap();

        assert_eq!(*submission.name, "Jo");
        assert_eq!(submission.email.as_str(), "jo@example.com");
        assert_eq!(*submission.message, "Hello there, I need a website.");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.company, None);
    }

    #[test]
    fn ok_with_optional_fields() {
        let submission = ContactSubmissionDraft {
            phone: Some("+49 1234 5678".into()),
            company: Some("Jo Design Studio".into()),
            ..draft()
        }
        .validate()
        .unwrap();

        assert_eq!(submission.phone.as_deref().map(String::as_str), Some("+49 1234 5678"));
        assert_eq!(
            submission.company.as_deref().map(String::as_str),
            Some("Jo Design Studio")
        );
    }

    #[test]
    fn name_too_short() {
        let err = ContactSubmissionDraft {
            name: "J".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            err.violations,
            [FieldViolation {
                field: ContactField::Name,
                message: "Name must be at least 2 characters",
            }]
        );
    }

    #[test]
    fn invalid_email() {
        let err = ContactSubmissionDraft {
            email: "not-an-email".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, ContactField::Email);
    }

    #[test]
    fn message_too_short() {
        let err = ContactSubmissionDraft {
            message: "short".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            err.violations,
            [FieldViolation {
                field: ContactField::Message,
                message: "Message must be at least 10 characters",
            }]
        );
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let err = ContactSubmissionDraft {
            name: "J".into(),
            email: "nope".into(),
            message: "short".into(),
            phone: None,
            company: None,
        }
        .validate()
        .unwrap_err();

        let fields = err
            .violations
            .iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            [ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        ContactSubmissionDraft {
            name: "Jo".into(),
            message: "0123456789".into(),
            ..draft()
        }
        .validate()
        .unwrap();

        ContactSubmissionDraft {
            name: "x".repeat(128),
            message: "x".repeat(4096),
            ..draft()
        }
        .validate()
        .unwrap();
    }

    #[test]
    fn missing_fields_deserialize_to_empty_draft() {
        let draft = serde_json::from_str::<ContactSubmissionDraft>("{}").unwrap();
        let err = draft.validate().unwrap_err();

        let fields = err
            .violations
            .iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            [ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }

    #[test]
    fn empty_optional_fields_are_accepted() {
        let submission = ContactSubmissionDraft {
            phone: Some(String::new()),
            company: Some(String::new()),
            ..draft()
        }
        .validate()
        .unwrap();

        assert_eq!(submission.phone.as_deref().map(String::as_str), Some(""));
    }
}
