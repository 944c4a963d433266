use std::collections::BTreeSet;
use std::str::FromStr;

use crate::model::application::Application;
use crate::model::field::{Completion, FieldError, Priority, Status};
use crate::ops::command::{
    ADD_USAGE, ApplicationPatch, COMMAND_SUMMARY, COMPLETE_USAGE, Command, CommandError,
    DELETE_USAGE, EDIT_USAGE, FIND_USAGE,
};
use crate::parse::{ArgTokens, Marker, tokenize};

/// Parse a raw command line into a typed [`Command`].
///
/// The first word picks the command; the rest of the line is handed to that
/// command's parser. Parsing never touches the book — every error here is
/// raised before any store access.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (keyword, tail) = match line.split_once(char::is_whitespace) {
        Some((keyword, tail)) => (keyword, tail),
        None => (line, ""),
    };

    match keyword {
        "add" => parse_add(tail),
        "edit" => parse_edit(tail),
        "delete" => Ok(Command::Delete {
            index: parse_index(tail, DELETE_USAGE)?,
        }),
        "complete" => Ok(Command::Complete {
            index: parse_index(tail, COMPLETE_USAGE)?,
        }),
        "find" => parse_find(tail),
        // Trailing text after bare keywords is ignored, matching the lenient
        // dispatch users expect from `list something`.
        "list" => Ok(Command::List),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(CommandError::InvalidFormat {
            usage: COMMAND_SUMMARY,
        }),
    }
}

fn parse_add(tail: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(tail, &Marker::ALL);
    if !tokens.preamble().is_empty() {
        return Err(CommandError::InvalidFormat { usage: ADD_USAGE });
    }

    let (company, position, deadline) = match (
        tokens.value(Marker::Company),
        tokens.value(Marker::Position),
        tokens.value(Marker::Deadline),
    ) {
        (Some(company), Some(position), Some(deadline)) => (company, position, deadline),
        _ => return Err(CommandError::InvalidFormat { usage: ADD_USAGE }),
    };

    let status = match tokens.value(Marker::Status) {
        Some(raw) => raw.parse()?,
        None => Status::Pending,
    };
    let priority = match tokens.value(Marker::Priority) {
        Some(raw) => raw.parse()?,
        None => Priority::Medium,
    };

    let application = Application {
        company: company.parse()?,
        position: position.parse()?,
        deadline: deadline.parse()?,
        status,
        priority,
        completion: Completion::Uncompleted,
        tags: parse_all(tokens.all_values(Marker::Tag))?,
        requirements: parse_all(tokens.all_values(Marker::Requirement))?,
    };
    Ok(Command::Add(Box::new(application)))
}

fn parse_edit(tail: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(tail, &Marker::ALL);
    let index = parse_index(tokens.preamble(), EDIT_USAGE)?;

    let patch = ApplicationPatch {
        company: parse_slot(&tokens, Marker::Company)?,
        position: parse_slot(&tokens, Marker::Position)?,
        deadline: parse_slot(&tokens, Marker::Deadline)?,
        status: parse_slot(&tokens, Marker::Status)?,
        priority: parse_slot(&tokens, Marker::Priority)?,
        tags: parse_set_slot(tokens.all_values(Marker::Tag))?,
        requirements: parse_set_slot(tokens.all_values(Marker::Requirement))?,
    };

    if patch.is_empty() {
        return Err(CommandError::NoFieldsEdited);
    }
    Ok(Command::Edit { index, patch })
}

fn parse_find(tail: &str) -> Result<Command, CommandError> {
    let keywords: Vec<String> = tail.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(CommandError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find { keywords })
}

/// Parse an index token: 1-based, digits only. Missing where required is a
/// format error (the user got the command shape wrong); present but
/// non-numeric or zero is an index error.
fn parse_index(raw: &str, usage: &'static str) -> Result<usize, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::InvalidFormat { usage });
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(CommandError::InvalidIndex);
    }
    match raw.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(CommandError::InvalidIndex),
    }
}

/// One single-valued patch slot: absent marker leaves the slot unset.
fn parse_slot<T>(tokens: &ArgTokens, marker: Marker) -> Result<Option<T>, CommandError>
where
    T: FromStr<Err = FieldError>,
{
    match tokens.value(marker) {
        Some(raw) => Ok(Some(raw.parse()?)),
        None => Ok(None),
    }
}

/// A set-valued patch slot. Absent marker leaves the slot unset; a single
/// empty value is the explicit "clear the whole set" form; anything else
/// parses every value.
fn parse_set_slot<T>(values: &[String]) -> Result<Option<BTreeSet<T>>, CommandError>
where
    T: FromStr<Err = FieldError> + Ord,
{
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() == 1 && values[0].is_empty() {
        return Ok(Some(BTreeSet::new()));
    }
    parse_all(values).map(Some)
}

fn parse_all<T>(values: &[String]) -> Result<BTreeSet<T>, CommandError>
where
    T: FromStr<Err = FieldError> + Ord,
{
    values
        .iter()
        .map(|raw| raw.parse::<T>().map_err(CommandError::from))
        .collect()
}
