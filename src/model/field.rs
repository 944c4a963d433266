use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A field value failed its grammar. Carries the field name and the
/// human-readable constraint that was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {constraint}")]
pub struct FieldError {
    pub field: &'static str,
    pub constraint: &'static str,
}

impl FieldError {
    fn new(field: &'static str, constraint: &'static str) -> Self {
        FieldError { field, constraint }
    }
}

// ---------------------------------------------------------------------------
// Display-string fields
// ---------------------------------------------------------------------------

/// Company name — any non-blank display string, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Company(String);

/// Position title — any non-blank display string, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position(String);

impl Company {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Position {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Company {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new("company", "company name must not be blank"));
        }
        Ok(Company(trimmed.to_string()))
    }
}

impl FromStr for Position {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new("position", "position must not be blank"));
        }
        Ok(Position(trimmed.to_string()))
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Application deadline — an ISO 8601 calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline(NaiveDate);

impl Deadline {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for Deadline {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Deadline)
            .map_err(|_| {
                FieldError::new(
                    "deadline",
                    "deadline must be an ISO 8601 calendar date (YYYY-MM-DD)",
                )
            })
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NaiveDate renders as YYYY-MM-DD
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Outcome of the application process so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Accepted,
    Rejected,
}

/// Whether the user is done working on this application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    Completed,
    Uncompleted,
}

/// How urgently this application should be worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Status {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "accepted" => Ok(Status::Accepted),
            "rejected" => Ok(Status::Rejected),
            _ => Err(FieldError::new(
                "status",
                "status must be one of: Pending, Accepted, Rejected",
            )),
        }
    }
}

impl FromStr for Completion {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "completed" => Ok(Completion::Completed),
            "uncompleted" => Ok(Completion::Uncompleted),
            _ => Err(FieldError::new(
                "completion",
                "completion must be either Completed or Uncompleted",
            )),
        }
    }
}

impl FromStr for Priority {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(FieldError::new(
                "priority",
                "priority must be one of: Low, Medium, High",
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pending => "Pending",
            Status::Accepted => "Accepted",
            Status::Rejected => "Rejected",
        })
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Completion::Completed => "Completed",
            Completion::Uncompleted => "Uncompleted",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        })
    }
}

// ---------------------------------------------------------------------------
// Set-valued fields
// ---------------------------------------------------------------------------

/// A short label attached to an application. Alphanumeric, normalized to
/// lowercase so the set is unique by normalized text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

/// A free-text requirement the application asks for (resume, portfolio, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement(String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Requirement {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Tag {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(char::is_alphanumeric) {
            return Err(FieldError::new(
                "tag",
                "tags must be a single alphanumeric word",
            ));
        }
        Ok(Tag(trimmed.to_lowercase()))
    }
}

impl FromStr for Requirement {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new(
                "requirement",
                "requirement must not be blank",
            ));
        }
        Ok(Requirement(trimmed.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Serde plumbing: re-validate on deserialize, render canonically on serialize
// ---------------------------------------------------------------------------

macro_rules! string_backed_serde {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = FieldError;

                fn try_from(raw: String) -> Result<Self, FieldError> {
                    raw.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> String {
                    value.0.to_string()
                }
            }
        )+
    };
}

string_backed_serde!(Company, Position, Deadline, Tag, Requirement);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_trims_and_keeps_case() {
        let company: Company = "  Jane Street  ".parse().unwrap();
        assert_eq!(company.as_str(), "Jane Street");
    }

    #[test]
    fn blank_company_rejected() {
        let err = "   ".parse::<Company>().unwrap_err();
        assert_eq!(err.field, "company");
        assert!(err.constraint.contains("blank"));
    }

    #[test]
    fn blank_position_rejected() {
        assert!("".parse::<Position>().is_err());
        assert!("\t".parse::<Position>().is_err());
    }

    #[test]
    fn deadline_parses_iso_dates() {
        let deadline: Deadline = "2026-03-01".parse().unwrap();
        assert_eq!(deadline.to_string(), "2026-03-01");
    }

    #[test]
    fn deadline_rejects_malformed_and_impossible_dates() {
        for raw in ["tomorrow", "01-03-2026", "2026/03/01", "2026-02-30", ""] {
            let err = raw.parse::<Deadline>().unwrap_err();
            assert_eq!(err.field, "deadline", "input: {raw:?}");
        }
    }

    #[test]
    fn enums_accept_any_case_and_render_canonically() {
        assert_eq!("pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!("ACCEPTED".parse::<Status>().unwrap(), Status::Accepted);
        assert_eq!(Status::Rejected.to_string(), "Rejected");

        assert_eq!("completed".parse::<Completion>().unwrap(), Completion::Completed);
        assert_eq!(Completion::Uncompleted.to_string(), "Uncompleted");

        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }

    #[test]
    fn unknown_enum_values_list_the_allowed_set() {
        let err = "ghosted".parse::<Status>().unwrap_err();
        assert!(err.constraint.contains("Pending"));
        assert!(err.constraint.contains("Accepted"));
        assert!(err.constraint.contains("Rejected"));

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(err.constraint.contains("Low"));
    }

    #[test]
    fn tags_normalize_to_lowercase() {
        let tag: Tag = "Remote".parse().unwrap();
        assert_eq!(tag.as_str(), "remote");
        assert_eq!(tag.to_string(), "#remote");
    }

    #[test]
    fn tags_must_be_alphanumeric() {
        assert!("backend2".parse::<Tag>().is_ok());
        assert!("".parse::<Tag>().is_err());
        assert!("two words".parse::<Tag>().is_err());
        assert!("c++".parse::<Tag>().is_err());
    }

    #[test]
    fn requirements_keep_free_text() {
        let req: Requirement = " cover letter ".parse().unwrap();
        assert_eq!(req.as_str(), "cover letter");
        assert!("  ".parse::<Requirement>().is_err());
    }

    #[test]
    fn string_backed_types_revalidate_on_deserialize() {
        let ok: Company = serde_json::from_str("\"Stripe\"").unwrap();
        assert_eq!(ok.as_str(), "Stripe");

        assert!(serde_json::from_str::<Company>("\"  \"").is_err());
        assert!(serde_json::from_str::<Deadline>("\"soon\"").is_err());
        assert!(serde_json::from_str::<Tag>("\"no spaces\"").is_err());
    }

    #[test]
    fn deadline_serializes_as_iso_string() {
        let deadline: Deadline = "2026-03-01".parse().unwrap();
        assert_eq!(serde_json::to_string(&deadline).unwrap(), "\"2026-03-01\"");
    }
}
