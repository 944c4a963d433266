use crate::model::book::{ApplicationBook, Filter, KeywordMatcher};
use crate::model::field::Completion;
use crate::ops::command::{COMMAND_SUMMARY, Command, CommandError, Outcome};
use crate::ops::parser::parse_command;

/// Parse and execute one raw command line against the book.
pub fn execute_line(book: &mut ApplicationBook, line: &str) -> Result<Outcome, CommandError> {
    let command = parse_command(line)?;
    execute(book, command)
}

/// Execute a typed command against the book.
///
/// Index resolution and the duplicate check happen strictly before any
/// mutation, so a failing command leaves the book exactly as it was. Every
/// mutation resets the filter to show-all so the list reflects the whole book
/// afterwards; `find` installs its own filter instead.
pub fn execute(book: &mut ApplicationBook, command: Command) -> Result<Outcome, CommandError> {
    match command {
        Command::Add(application) => {
            if book.contains_same(&application) {
                return Err(CommandError::DuplicateApplication);
            }
            let message = format!("Added application: {application}");
            book.add(*application);
            book.show_all();
            Ok(Outcome::mutation(message))
        }

        Command::Edit { index, patch } => {
            let canonical = resolve_index(book, index)?;
            let existing = &book.records()[canonical];
            let edited = patch.apply_to(existing);
            // The record being edited is excluded from the duplicate check:
            // only a key that moved onto some *other* record collides.
            if !existing.is_same_application(&edited) && book.contains_same(&edited) {
                return Err(CommandError::DuplicateApplication);
            }
            let message = format!("Edited application: {edited}");
            book.replace_at(canonical, edited);
            book.show_all();
            Ok(Outcome::mutation(message))
        }

        Command::Delete { index } => {
            let canonical = resolve_index(book, index)?;
            let removed = book.remove_at(canonical);
            book.show_all();
            Ok(Outcome::mutation(format!("Deleted application: {removed}")))
        }

        Command::Complete { index } => {
            let canonical = resolve_index(book, index)?;
            let completed = book.records()[canonical].with_completion(Completion::Completed);
            let message = format!("Marked as completed: {completed}");
            book.replace_at(canonical, completed);
            book.show_all();
            Ok(Outcome::mutation(message))
        }

        Command::List => {
            book.show_all();
            Ok(Outcome::info("Listed all applications".to_string()))
        }

        Command::Find { keywords } => {
            book.set_filter(Filter::CompanyKeywords(KeywordMatcher::new(keywords)));
            let count = book.filtered().len();
            let plural = if count == 1 { "" } else { "s" };
            Ok(Outcome::info(format!("{count} application{plural} listed")))
        }

        Command::Clear => {
            book.clear_records();
            book.show_all();
            Ok(Outcome::mutation(
                "Cleared all applications".to_string(),
            ))
        }

        Command::Help => Ok(Outcome::info(format!("commands: {COMMAND_SUMMARY}"))),

        Command::Exit => Ok(Outcome::exit()),
    }
}

/// Map a 1-based display index to a canonical record index, against the
/// *currently filtered* view.
fn resolve_index(book: &ApplicationBook, index: usize) -> Result<usize, CommandError> {
    index
        .checked_sub(1)
        .and_then(|i| book.filtered_indices().get(i).copied())
        .ok_or(CommandError::InvalidDisplayedIndex(index))
}

/// Render the displayed list one record per line, 1-based, the way the UI
/// shows it.
pub fn render_listing(book: &ApplicationBook) -> Vec<String> {
    book.filtered()
        .iter()
        .enumerate()
        .map(|(i, application)| format!("{}. {}", i + 1, application))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::application::Application;
    use crate::model::field::{Priority, Status};

    fn application(company: &str, position: &str) -> Application {
        Application {
            company: company.parse().unwrap(),
            position: position.parse().unwrap(),
            deadline: "2026-01-10".parse().unwrap(),
            status: Status::Pending,
            priority: Priority::Medium,
            completion: Completion::Uncompleted,
            tags: ["remote".parse().unwrap()].into(),
            requirements: BTreeSet::new(),
        }
    }

    fn typical_book() -> ApplicationBook {
        ApplicationBook::from_records(vec![
            application("Amazon", "ML Engineer"),
            application("ByteDance", "Analyst"),
        ])
    }

    #[test]
    fn add_appends_and_reports_the_record() {
        let mut book = typical_book();
        let outcome = execute_line(&mut book, "add c/Grab p/Backend Engineer d/2026-02-01").unwrap();
        assert_eq!(book.len(), 3);
        assert!(outcome.mutated);
        assert!(outcome.message.starts_with("Added application: Grab, Backend Engineer"));
    }

    #[test]
    fn add_duplicate_key_fails_and_book_is_unchanged() {
        let mut book = typical_book();
        let err = execute_line(&mut book, "add c/Amazon p/ML Engineer d/2026-01-01").unwrap_err();
        assert_eq!(err, CommandError::DuplicateApplication);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn add_duplicate_check_is_case_insensitive() {
        let mut book = typical_book();
        let err = execute_line(&mut book, "add c/amazon p/ml engineer d/2026-01-01").unwrap_err();
        assert_eq!(err, CommandError::DuplicateApplication);
    }

    #[test]
    fn edit_merges_and_resets_the_filter() {
        let mut book = typical_book();
        execute_line(&mut book, "find amazon").unwrap();
        assert_eq!(book.filtered().len(), 1);

        let outcome = execute_line(&mut book, "edit 1 p/Data Scientist d/2026-01-15").unwrap();
        let edited = &book.records()[0];
        assert_eq!(edited.company.as_str(), "Amazon");
        assert_eq!(edited.position.as_str(), "Data Scientist");
        assert_eq!(edited.deadline.to_string(), "2026-01-15");
        assert_eq!(edited.status, Status::Pending);
        assert_eq!(edited.priority, Priority::Medium);
        assert_eq!(edited.completion, Completion::Uncompleted);
        // filter is back to show-all after the mutation
        assert_eq!(book.filtered().len(), 2);
        assert!(outcome.message.contains("Amazon, Data Scientist"));
    }

    #[test]
    fn edit_resolves_the_index_against_the_filtered_view() {
        let mut book = typical_book();
        execute_line(&mut book, "find bytedance").unwrap();
        // display index 1 is ByteDance while the filter is active
        execute_line(&mut book, "edit 1 pr/High").unwrap();
        assert_eq!(book.records()[1].priority, Priority::High);
        assert_eq!(book.records()[0].priority, Priority::Medium);
    }

    #[test]
    fn edit_onto_another_records_key_is_a_duplicate() {
        let mut book = typical_book();
        let err = execute_line(&mut book, "edit 2 c/Amazon p/ML Engineer").unwrap_err();
        assert_eq!(err, CommandError::DuplicateApplication);
        // nothing committed
        assert_eq!(book.records()[1].company.as_str(), "ByteDance");
    }

    #[test]
    fn edit_keeping_its_own_key_never_self_collides() {
        let mut book = typical_book();
        let outcome = execute_line(&mut book, "edit 1 d/2027-06-30").unwrap();
        assert!(outcome.mutated);
        assert_eq!(book.records()[0].deadline.to_string(), "2027-06-30");
    }

    #[test]
    fn edit_clears_tags_with_empty_marker() {
        let mut book = typical_book();
        assert!(!book.records()[0].tags.is_empty());
        execute_line(&mut book, "edit 1 t/").unwrap();
        assert!(book.records()[0].tags.is_empty());
        // other fields untouched
        assert_eq!(book.records()[0].company.as_str(), "Amazon");
    }

    #[test]
    fn delete_out_of_filtered_range_fails_and_book_is_unchanged() {
        let mut book = typical_book();
        let err = execute_line(&mut book, "delete 5").unwrap_err();
        assert_eq!(err, CommandError::InvalidDisplayedIndex(5));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn delete_removes_from_the_filtered_view() {
        let mut book = typical_book();
        execute_line(&mut book, "find bytedance").unwrap();
        let outcome = execute_line(&mut book, "delete 1").unwrap();
        assert!(outcome.message.starts_with("Deleted application: ByteDance"));
        assert_eq!(book.len(), 1);
        assert_eq!(book.records()[0].company.as_str(), "Amazon");
        // view reset to the full remaining book
        assert_eq!(book.filtered().len(), 1);
    }

    #[test]
    fn complete_flips_completion_only() {
        let mut book = typical_book();
        let before = book.records()[1].clone();
        let outcome = execute_line(&mut book, "complete 2").unwrap();
        let after = &book.records()[1];
        assert_eq!(after.completion, Completion::Completed);
        assert_eq!(after.company, before.company);
        assert_eq!(after.position, before.position);
        assert_eq!(after.deadline, before.deadline);
        assert_eq!(after.status, before.status);
        assert_eq!(after.tags, before.tags);
        assert!(outcome.message.starts_with("Marked as completed:"));
    }

    #[test]
    fn complete_is_idempotent() {
        let mut book = typical_book();
        execute_line(&mut book, "complete 1").unwrap();
        execute_line(&mut book, "complete 1").unwrap();
        assert_eq!(book.records()[0].completion, Completion::Completed);
    }

    #[test]
    fn find_filters_and_counts() {
        let mut book = typical_book();
        let outcome = execute_line(&mut book, "find amazon").unwrap();
        assert_eq!(outcome.message, "1 application listed");
        assert!(!outcome.mutated);
        assert_eq!(book.filtered().len(), 1);

        let outcome = execute_line(&mut book, "find amazon bytedance").unwrap();
        assert_eq!(outcome.message, "2 applications listed");

        let outcome = execute_line(&mut book, "find nothing").unwrap();
        assert_eq!(outcome.message, "0 applications listed");
        assert!(book.filtered().is_empty());
    }

    #[test]
    fn list_resets_the_filter() {
        let mut book = typical_book();
        execute_line(&mut book, "find amazon").unwrap();
        let outcome = execute_line(&mut book, "list").unwrap();
        assert_eq!(book.filtered().len(), 2);
        assert!(!outcome.mutated);
    }

    #[test]
    fn clear_empties_the_book() {
        let mut book = typical_book();
        let outcome = execute_line(&mut book, "clear").unwrap();
        assert!(book.is_empty());
        assert!(outcome.mutated);
    }

    #[test]
    fn parse_errors_never_touch_the_book() {
        let mut book = typical_book();
        execute_line(&mut book, "find amazon").unwrap();

        for line in [
            "edit 1",
            "edit 1 d/someday",
            "add c/X p/Y",
            "delete zero",
            "archive 1",
        ] {
            assert!(execute_line(&mut book, line).is_err(), "line: {line:?}");
        }
        // book contents and the active filter both survived
        assert_eq!(book.len(), 2);
        assert_eq!(book.filtered().len(), 1);
    }

    #[test]
    fn exit_and_help_report_without_mutating() {
        let mut book = typical_book();
        let outcome = execute_line(&mut book, "exit").unwrap();
        assert!(outcome.exit);
        let outcome = execute_line(&mut book, "help").unwrap();
        assert!(outcome.message.contains("add, edit, delete"));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn render_listing_is_one_based() {
        let book = typical_book();
        let lines = render_listing(&book);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. Amazon, ML Engineer"));
        assert!(lines[1].starts_with("2. ByteDance, Analyst"));
    }
}
