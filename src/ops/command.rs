use std::collections::BTreeSet;

use crate::model::application::Application;
use crate::model::field::{
    Company, Deadline, FieldError, Position, Priority, Requirement, Status, Tag,
};

/// Error type for the command pipeline. Every variant is recoverable at the
/// boundary; none leaves the book partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command format\nusage: {usage}")]
    InvalidFormat { usage: &'static str },
    #[error("index must be a positive integer")]
    InvalidIndex,
    #[error("no application at index {0} in the current list")]
    InvalidDisplayedIndex(usize),
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error("at least one field to edit must be provided")]
    NoFieldsEdited,
    #[error("this application is already in the list")]
    DuplicateApplication,
}

pub const ADD_USAGE: &str =
    "add c/COMPANY p/POSITION d/DEADLINE [s/STATUS] [pr/PRIORITY] [t/TAG]... [r/REQUIREMENT]...";
pub const EDIT_USAGE: &str = "edit INDEX [c/COMPANY] [p/POSITION] [d/DEADLINE] [s/STATUS] \
                              [pr/PRIORITY] [t/TAG]... [r/REQUIREMENT]...";
pub const DELETE_USAGE: &str = "delete INDEX";
pub const COMPLETE_USAGE: &str = "complete INDEX";
pub const FIND_USAGE: &str = "find KEYWORD [KEYWORD]...";
pub const COMMAND_SUMMARY: &str = "add, edit, delete, complete, list, find, clear, help, exit";

/// A parsed, validated command ready for execution. Indices are 1-based
/// positions into the currently displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Box<Application>),
    Edit { index: usize, patch: ApplicationPatch },
    Delete { index: usize },
    Complete { index: usize },
    List,
    Find { keywords: Vec<String> },
    Clear,
    Help,
    Exit,
}

/// A sparse set of field overrides for `edit`: one optional slot per editable
/// field. Completion deliberately has no slot — only the `complete` command
/// changes it. Tag and requirement slots replace the whole set when present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationPatch {
    pub company: Option<Company>,
    pub position: Option<Position>,
    pub deadline: Option<Deadline>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tags: Option<BTreeSet<Tag>>,
    pub requirements: Option<BTreeSet<Requirement>>,
}

impl ApplicationPatch {
    /// True if no slot is set. An empty patch never reaches the executor:
    /// parsing rejects it with [`CommandError::NoFieldsEdited`].
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.position.is_none()
            && self.deadline.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.requirements.is_none()
    }

    /// Merge this patch onto `existing`: set slots win, unset slots carry the
    /// existing value, and completion always carries over. Pure and
    /// deterministic.
    pub fn apply_to(&self, existing: &Application) -> Application {
        Application {
            company: self.company.clone().unwrap_or_else(|| existing.company.clone()),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| existing.position.clone()),
            deadline: self.deadline.unwrap_or(existing.deadline),
            status: self.status.unwrap_or(existing.status),
            priority: self.priority.unwrap_or(existing.priority),
            completion: existing.completion,
            tags: self.tags.clone().unwrap_or_else(|| existing.tags.clone()),
            requirements: self
                .requirements
                .clone()
                .unwrap_or_else(|| existing.requirements.clone()),
        }
    }
}

/// What a successfully executed command reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Human-readable feedback, embedding the affected record where there is
    /// one.
    pub message: String,
    /// The book changed and should be persisted.
    pub mutated: bool,
    /// The caller should shut down.
    pub exit: bool,
}

impl Outcome {
    pub fn mutation(message: String) -> Self {
        Outcome {
            message,
            mutated: true,
            exit: false,
        }
    }

    pub fn info(message: String) -> Self {
        Outcome {
            message,
            mutated: false,
            exit: false,
        }
    }

    pub fn exit() -> Self {
        Outcome {
            message: "Bye!".to_string(),
            mutated: false,
            exit: true,
        }
    }
}
