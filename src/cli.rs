// File: ./src/cli.rs
//! Command-line parsing and help text for the `admitline` binary.
use crate::model::{StatusFilter, TypeFilter};
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Month grid plus the filtered agenda.
    Month {
        month: Option<NaiveDate>,
        status: Option<StatusFilter>,
        event_type: Option<TypeFilter>,
    },
    List {
        status: Option<StatusFilter>,
        event_type: Option<TypeFilter>,
    },
    Toggle {
        id: String,
    },
    Import {
        path: PathBuf,
    },
    Summary,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid month '{}', expected YYYY-MM", s))
}

/// Parses arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut verbose = false;
    let mut status = None;
    let mut event_type = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    root,
                    verbose,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => {
                let val = iter.next().ok_or_else(|| anyhow!("--root requires a path"))?;
                root = Some(PathBuf::from(val));
            }
            "-v" | "--verbose" => verbose = true,
            "-s" | "--status" => {
                let val = iter.next().ok_or_else(|| anyhow!("--status requires a value"))?;
                status = Some(val.parse::<StatusFilter>().map_err(|e| anyhow!(e))?);
            }
            "-t" | "--type" => {
                let val = iter.next().ok_or_else(|| anyhow!("--type requires a value"))?;
                event_type = Some(val.parse::<TypeFilter>().map_err(|e| anyhow!(e))?);
            }
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] | ["month"] => Command::Month {
            month: None,
            status,
            event_type,
        },
        ["month", m] => Command::Month {
            month: Some(parse_month(m)?),
            status,
            event_type,
        },
        ["list"] => Command::List { status, event_type },
        ["toggle", id] => Command::Toggle { id: id.to_string() },
        ["toggle"] => bail!("toggle requires an event id"),
        ["import", path] => Command::Import {
            path: PathBuf::from(path),
        },
        ["import"] => bail!("import requires a file path"),
        ["summary"] => Command::Summary,
        other => bail!("Unknown command: {}", other.join(" ")),
    };

    Ok(CliArgs {
        root,
        verbose,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Admitline v{} - Application deadline calendar and timeline",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [COMMAND]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    month [YYYY-MM]       Month calendar and matching events (default)");
    println!("    list                  Matching events grouped by day");
    println!("    toggle <id>           Flip the completed flag of an event");
    println!("    import <file.json>    Merge events exported from the dashboard API");
    println!("    summary               Pending / completed / overdue counters");
    println!();
    println!("OPTIONS:");
    println!("    -s, --status <all|pending|completed>");
    println!("    -t, --type <all|deadline|reminder|milestone>");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Debug logging on stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CALENDAR MARKERS:");
    println!("    {}", crate::render::legend());
}
