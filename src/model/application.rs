use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::field::{
    Company, Completion, Deadline, Position, Priority, Requirement, Status, Tag,
};

/// One tracked job application.
///
/// Records are value aggregates with no identity of their own: an edit always
/// builds a new `Application` that replaces the old one in the book. Full
/// `PartialEq` is used for change detection; [`Application::is_same_application`]
/// is the weaker duplicate-detection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub company: Company,
    pub position: Position,
    pub deadline: Deadline,
    pub status: Status,
    pub priority: Priority,
    pub completion: Completion,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub requirements: BTreeSet<Requirement>,
}

impl Application {
    /// True if `other` tracks the same application: company and position
    /// match case-insensitively. This is the duplicate-detection key, weaker
    /// than full equality.
    pub fn is_same_application(&self, other: &Application) -> bool {
        self.company
            .as_str()
            .to_lowercase()
            .eq(&other.company.as_str().to_lowercase())
            && self
                .position
                .as_str()
                .to_lowercase()
                .eq(&other.position.as_str().to_lowercase())
    }

    /// A copy of this record with the given completion, all other fields
    /// unchanged.
    pub fn with_completion(&self, completion: Completion) -> Application {
        Application {
            completion,
            ..self.clone()
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} (due {}, {}, {} priority, {})",
            self.company, self.position, self.deadline, self.status, self.priority, self.completion
        )?;
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(Tag::to_string).collect();
            write!(f, " {}", tags.join(" "))?;
        }
        if !self.requirements.is_empty() {
            let reqs: Vec<&str> = self.requirements.iter().map(Requirement::as_str).collect();
            write!(f, " requires: {}", reqs.join(", "))?;
        }
        Ok(())
    }
}
