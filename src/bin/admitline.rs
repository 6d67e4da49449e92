use admitline::calendar::build_month_grid;
use admitline::cli::{self, CliArgs, Command};
use admitline::config::Config;
use admitline::context::{AppContext, StandardContext};
use admitline::model::ViewState;
use admitline::render;
use admitline::storage::EventStorage;
use admitline::timeline::{TimelineSummary, build_visible_groups, toggle_completion};
use admitline::view_model::CalendarViewModel;
use anyhow::{Context, Result};
use chrono::Local;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match cli::parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help("admitline");
            std::process::exit(2);
        }
    };

    if cli.command == Command::Help {
        cli::print_help("admitline");
        return Ok(());
    }

    init_logging(cli.verbose)?;
    run(cli)
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn run(cli: CliArgs) -> Result<()> {
    let ctx = StandardContext::new(cli.root);
    let config = Config::load_or_default(&ctx)?;
    let today = Local::now().date_naive();
    log::debug!("Config: {}", Config::get_path_string(&ctx)?);

    match cli.command {
        Command::Month {
            month,
            status,
            event_type,
        } => {
            let events = EventStorage::load(&ctx)?;
            let base = config.initial_view_state(today);
            let state = ViewState::new(
                month.unwrap_or(base.current_month),
                status.unwrap_or(base.status_filter),
                event_type.unwrap_or(base.type_filter),
            );
            let view = CalendarViewModel::build_at(&events, &state, today);

            print!("{}", render::render_month(&view.grid)?);
            println!("{}", render::legend());
            println!();
            print!("{}", render::render_agenda(&view.groups, today, &config)?);
        }
        Command::List { status, event_type } => {
            let events = EventStorage::load(&ctx)?;
            let groups = build_visible_groups(
                &events,
                status.unwrap_or(config.default_status_filter),
                event_type.unwrap_or(config.default_type_filter),
            );
            print!("{}", render::render_agenda(&groups, today, &config)?);
        }
        Command::Toggle { id } => {
            let toggled = EventStorage::modify(&ctx, |events| {
                let updated = toggle_completion(events, &id);
                let toggled = updated.iter().find(|e| e.id == id).cloned();
                *events = updated;
                toggled.map(|event| (event, events.clone()))
            })?;
            let Some((event, events)) = toggled else {
                anyhow::bail!(
                    "No event with id '{}' in {}",
                    id,
                    ctx.get_events_path()?.display()
                );
            };
            let grid = build_month_grid(&events, event.day());
            println!("{} {}", event.checkbox_symbol(), event.title);
            print!("{}", render::render_month(&grid)?);
        }
        Command::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let report = EventStorage::import_from_json(&ctx, &json)?;
            println!(
                "Imported {} new and {} updated events.",
                report.added, report.updated
            );
        }
        Command::Summary => {
            let events = EventStorage::load(&ctx)?;
            let summary = TimelineSummary::compute(&events, today, config.upcoming_days);
            print!("{}", render::render_summary(&summary, &config));
        }
        Command::Help => cli::print_help("admitline"),
    }
    Ok(())
}
