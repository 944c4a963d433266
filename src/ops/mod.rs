pub mod command;
pub mod executor;
pub mod parser;

pub use command::{ApplicationPatch, Command, CommandError, Outcome};
pub use executor::{execute, execute_line};
pub use parser::parse_command;
