use std::path::{Path, PathBuf};

use crate::cli::commands::{Cli, Commands, RunArgs};
use crate::cli::output::{ListingJson, StatsJson, application_to_json};
use crate::io::config_io;
use crate::io::data_io;
use crate::model::application::Application;
use crate::model::book::ApplicationBook;
use crate::model::field::{Completion, Priority, Status};
use crate::ops::command::Command;
use crate::ops::{executor, parser};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir(cli.data_dir.as_deref());
    match cli.command {
        None => unreachable!("main launches the TUI when no subcommand is given"),
        Some(Commands::Run(args)) => cmd_run(args, &dir),
        Some(Commands::List) => cmd_list(&dir, cli.json),
        Some(Commands::Stats) => cmd_stats(&dir, cli.json),
    }
}

/// Resolve the data directory: `-C` flag or the current directory.
pub fn data_dir(flag: Option<&str>) -> PathBuf {
    flag.map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn load_book(dir: &Path) -> Result<(ApplicationBook, PathBuf), Box<dyn std::error::Error>> {
    let data_path = config_io::data_file_path(dir)?;
    let records = data_io::load_applications(&data_path)?;
    Ok((ApplicationBook::from_records(records), data_path))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_run(args: RunArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let line = args.line.join(" ");
    let (mut book, data_path) = load_book(dir)?;

    let command = parser::parse_command(&line)?;
    let shows_listing = matches!(command, Command::List | Command::Find { .. });
    let outcome = executor::execute(&mut book, command)?;

    println!("{}", outcome.message);
    if shows_listing {
        for row in executor::render_listing(&book) {
            println!("{row}");
        }
    }
    if outcome.mutated {
        data_io::save_applications(&data_path, book.records())?;
    }
    Ok(())
}

fn cmd_list(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (book, _) = load_book(dir)?;
    if json {
        let listing = ListingJson {
            applications: book.records().iter().map(application_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else if book.is_empty() {
        println!("no applications tracked yet (try `dk run add c/... p/... d/...`)");
    } else {
        for line in executor::render_listing(&book) {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_stats(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (book, _) = load_book(dir)?;
    let stats = collect_stats(book.records());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("total:        {}", stats.total);
        println!("completed:    {}", stats.completed);
        println!("uncompleted:  {}", stats.uncompleted);
        println!("pending:      {}", stats.pending);
        println!("accepted:     {}", stats.accepted);
        println!("rejected:     {}", stats.rejected);
        println!("high priority: {}", stats.high_priority);
    }
    Ok(())
}

fn collect_stats(records: &[Application]) -> StatsJson {
    StatsJson {
        total: records.len(),
        completed: count(records, |r| r.completion == Completion::Completed),
        uncompleted: count(records, |r| r.completion == Completion::Uncompleted),
        pending: count(records, |r| r.status == Status::Pending),
        accepted: count(records, |r| r.status == Status::Accepted),
        rejected: count(records, |r| r.status == Status::Rejected),
        high_priority: count(records, |r| r.priority == Priority::High),
    }
}

fn count(records: &[Application], pred: impl Fn(&&Application) -> bool) -> usize {
    records.iter().filter(pred).count()
}
