//! Terminal front end for the drink catalog.
//!
//! # Responsibility
//! - Map command-line verbs onto catalog session use-cases.
//! - Drive the shaking countdown in real time.

use barmate_core::db::open_db;
use barmate_core::timer::shake_timer::format_mm_ss;
use barmate_core::{
    core_version, default_catalog, init_logging_from_config, AppConfig, CatalogService,
    CatalogSession, Drink, DrinkRepository, SqliteDrinkRepository, TimerEvent,
};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "barmate", version, about = "Cocktail catalog and shaking timer")]
struct Cli {
    /// SQLite catalog file.
    #[arg(long, global = true, env = "BARMATE_DB_PATH", value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// List drinks whose name contains QUERY.
    List {
        query: Vec<String>,
        /// Only show favourites.
        #[arg(long, short)]
        favourites: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show recipe detail.
    Show {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Toggle the favourite flag.
    #[command(alias = "fav")]
    Favourite {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Print the shareable ingredient message.
    Share {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Run the shaking countdown; Ctrl-C stops it.
    Shake {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Restore the built-in recipes.
    ResetCatalog,
    /// Print the core version.
    Version,
}

impl Command {
    fn verb(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Favourite { .. } => "favourite",
            Self::Share { .. } => "share",
            Self::Shake { .. } => "shake",
            Self::ResetCatalog => "reset-catalog",
            Self::Version => "version",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("barmate: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    if cli.command == Command::Version {
        println!("barmate_core version={}", core_version());
        return Ok(());
    }

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.db {
        config.db_path = path;
    }
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("barmate: logging disabled: {err}");
    }
    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.verb()
    );

    let mut conn = open_db(&config.db_path)?;
    let repo = SqliteDrinkRepository::try_new(&mut conn)?;

    if cli.command == Command::ResetCatalog {
        let inserted = CatalogService::new(repo).reset_catalog(&default_catalog())?;
        println!("catalog restored with {inserted} drinks");
        return Ok(());
    }

    let mut session = CatalogSession::open(repo)?;

    match cli.command {
        Command::List {
            query,
            favourites,
            json,
        } => {
            session.set_search_query(query.join(" "))?;
            session.set_only_favourites(favourites)?;
            print_list(session.filtered_drinks(), json)?;
        }
        Command::Show { name, json } => {
            let drink = find_drink(&session, &name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&drink)?);
            } else {
                print_detail(&drink);
            }
        }
        Command::Favourite { name } => {
            let drink = find_drink(&session, &name)?;
            let updated = session.toggle_favourite(&drink)?;
            let state = if updated.is_favourite {
                "added to"
            } else {
                "removed from"
            };
            println!("{} {state} favourites", updated.name);
        }
        Command::Share { name } => {
            println!("{}", find_drink(&session, &name)?.share_message());
        }
        Command::Shake { name } => {
            let drink = find_drink(&session, &name)?;
            session.select_drink(Some(drink));
            session.navigate_to_shaker();
            run_countdown(&mut session).await?;
        }
        Command::ResetCatalog | Command::Version => {}
    }

    Ok(())
}

/// Ticks the session timer once per second until it finishes or Ctrl-C.
async fn run_countdown<R: DrinkRepository>(session: &mut CatalogSession<R>) -> CliResult<()> {
    let name = session
        .selected_drink()
        .map(|drink| drink.name.clone())
        .unwrap_or_default();
    let full = session.timer().display();
    println!("Shaking {name} for {full}");

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    session.start_timer();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let event = session.tick_timer();
                if event == Some(TimerEvent::Finished) {
                    println!("\r{}  Ready!", format_mm_ss(0));
                    return Ok(());
                }
                print!("\r{}", session.timer().display());
                std::io::stdout().flush()?;
            }
            signal = &mut ctrl_c => {
                signal?;
                session.stop_timer();
                println!("\r{}", stopped_line(&session.timer().display(), &name, &full));
                return Ok(());
            }
        }
    }
}

/// Status line after Ctrl-C; a new `shake` run restarts from the full duration.
fn stopped_line(remaining: &str, name: &str, full: &str) -> String {
    format!("{remaining}  stopped; `barmate shake {name}` starts over from {full}")
}

/// Looks up a drink from its possibly multi-word command-line name.
fn find_drink<R: DrinkRepository>(
    session: &CatalogSession<R>,
    words: &[String],
) -> CliResult<Drink> {
    let name = words.join(" ");
    let name = name.trim();
    session
        .get_drink_by_name(name)?
        .ok_or_else(|| format!("drink not found: {name}").into())
}

fn print_list(drinks: &[Drink], json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(drinks)?);
        return Ok(());
    }
    if drinks.is_empty() {
        println!("No drinks.");
        return Ok(());
    }
    for drink in drinks {
        let marker = if drink.is_favourite { '*' } else { ' ' };
        println!(
            "{marker} {:<24} {}",
            drink.name,
            format_mm_ss(drink.shaking_time_secs)
        );
    }
    Ok(())
}

fn print_detail(drink: &Drink) {
    let favourite = if drink.is_favourite { " *" } else { "" };
    println!("{}{favourite}", drink.name);
    println!();
    println!("Ingredients");
    for ingredient in drink.parsed_ingredients() {
        match ingredient.amount {
            Some(amount) => println!("  - {:<10} {}", amount, ingredient.name),
            None => println!("  - {:<10} {}", "", ingredient.name),
        }
    }
    println!();
    println!("Description");
    println!("  {}", drink.description);
    println!();
    println!("Timer ({}s)", drink.shaking_time_secs);
}

#[cfg(test)]
mod tests {
    use super::{stopped_line, Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn list_collects_query_and_flags() {
        let cli = Cli::try_parse_from(["barmate", "list", "gin", "tonic", "--favourites"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List {
                query: words(&["gin", "tonic"]),
                favourites: true,
                json: false,
            }
        );
    }

    #[test]
    fn list_accepts_short_favourites_flag_and_no_query() {
        let cli = Cli::try_parse_from(["barmate", "list", "-f", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List {
                query: Vec::new(),
                favourites: true,
                json: true,
            }
        );
    }

    #[test]
    fn db_flag_overrides_path() {
        let cli =
            Cli::try_parse_from(["barmate", "--db", "/tmp/bar.db", "shake", "Cuba", "Libre"])
                .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/bar.db")));
        assert_eq!(
            cli.command,
            Command::Shake {
                name: words(&["Cuba", "Libre"]),
            }
        );
    }

    #[test]
    fn fav_alias_and_kebab_case_verbs_resolve() {
        let cli = Cli::try_parse_from(["barmate", "fav", "Negroni"]).unwrap();
        assert_eq!(cli.command.verb(), "favourite");

        let cli = Cli::try_parse_from(["barmate", "reset-catalog"]).unwrap();
        assert_eq!(cli.command, Command::ResetCatalog);
    }

    #[test]
    fn name_commands_require_a_name() {
        assert!(Cli::try_parse_from(["barmate", "show"]).is_err());
        assert!(Cli::try_parse_from(["barmate", "shake"]).is_err());
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(Cli::try_parse_from(["barmate"]).is_err());
        assert!(Cli::try_parse_from(["barmate", "mix"]).is_err());
        assert!(Cli::try_parse_from(["barmate", "list", "--loud"]).is_err());
        assert!(Cli::try_parse_from(["barmate", "--db"]).is_err());
    }

    #[test]
    fn stopped_line_points_at_full_restart() {
        let line = stopped_line("00:12", "Mojito", "00:20");
        assert_eq!(
            line,
            "00:12  stopped; `barmate shake Mojito` starts over from 00:20"
        );
        assert!(!line.contains("Resume"));
    }
}
