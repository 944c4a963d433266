pub mod application;
pub mod book;
pub mod config;
pub mod field;

pub use application::Application;
pub use book::{ApplicationBook, Filter, KeywordMatcher};
pub use config::Config;
pub use field::{
    Company, Completion, Deadline, FieldError, Position, Priority, Requirement, Status, Tag,
};
