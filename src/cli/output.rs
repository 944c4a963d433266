use serde::Serialize;

use crate::model::application::Application;
use crate::model::field::{Completion, Requirement, Tag};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ApplicationJson {
    pub company: String,
    pub position: String,
    pub deadline: String,
    pub status: String,
    pub priority: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
}

#[derive(Serialize)]
pub struct ListingJson {
    pub applications: Vec<ApplicationJson>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub uncompleted: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub high_priority: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn application_to_json(application: &Application) -> ApplicationJson {
    ApplicationJson {
        company: application.company.as_str().to_string(),
        position: application.position.as_str().to_string(),
        deadline: application.deadline.to_string(),
        status: application.status.to_string(),
        priority: application.priority.to_string(),
        completed: application.completion == Completion::Completed,
        tags: application.tags.iter().map(Tag::as_str).map(str::to_string).collect(),
        requirements: application
            .requirements
            .iter()
            .map(Requirement::as_str)
            .map(str::to_string)
            .collect(),
    }
}
