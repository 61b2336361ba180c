//! Command-line boundary for the payroll core.
//!
//! # Responsibility
//! - Parse commands, open the payroll database and call core services.
//! - Render results, applying the unknown worker/team labels for dangling ids.
//! - Validate presentation-level input (non-empty names, positive counts).

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use payroll_core::{
    calculate_payment, default_log_level, init_logging, payment_per_worker, resolve_team,
    worker_names_label, ContainerFilter, DateRange, NewContainer, Payroll, SqliteStorage, Team,
    WorkerPatch, UNKNOWN_TEAM_LABEL,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "payroll", version, about = "Container payroll ledger")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = "payroll.sqlite3")]
    db: PathBuf,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Checks core linkage.
    Ping,
    /// Prints the payment for a package count.
    Payment { packages: u32 },
    #[command(subcommand)]
    Worker(WorkerCommand),
    #[command(subcommand)]
    Team(TeamCommand),
    #[command(subcommand)]
    Container(ContainerCommand),
}

#[derive(Debug, Subcommand)]
enum WorkerCommand {
    Add { name: String },
    Rename { id: String, name: String },
    Activate { id: String },
    Deactivate { id: String },
    Delete { id: String },
    List,
}

#[derive(Debug, Subcommand)]
enum TeamCommand {
    Add {
        date: NaiveDate,
        first: String,
        second: String,
    },
    Delete {
        id: String,
    },
    List,
    /// Lists workers not yet paired on a date.
    Available {
        date: NaiveDate,
    },
}

#[derive(Debug, Subcommand)]
enum ContainerCommand {
    Add {
        date: NaiveDate,
        team_id: String,
        packages: u32,
    },
    History(HistoryArgs),
    Earnings {
        worker_id: String,
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Args)]
struct HistoryArgs {
    #[arg(long)]
    worker: Option<String>,
    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Debug, Args)]
struct RangeArgs {
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn to_range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir)?;
    }

    match cli.command {
        Command::Ping => {
            println!("payroll_core ping={}", payroll_core::ping());
            println!("payroll_core version={}", payroll_core::core_version());
            Ok(())
        }
        Command::Payment { packages } => {
            if packages == 0 {
                return Err("package count must be greater than 0".into());
            }
            let payment = calculate_payment(packages);
            println!(
                "packages={packages} payment={payment} per_worker={}",
                payment_per_worker(payment)
            );
            Ok(())
        }
        command => {
            let mut payroll = Payroll::open(SqliteStorage::open(&cli.db)?)?;
            dispatch(&mut payroll, command)?;
            payroll.shutdown()?;
            Ok(())
        }
    }
}

fn dispatch(payroll: &mut Payroll<SqliteStorage>, command: Command) -> CliResult {
    match command {
        Command::Ping | Command::Payment { .. } => Ok(()),
        Command::Worker(command) => run_worker(payroll, command),
        Command::Team(command) => run_team(payroll, command),
        Command::Container(command) => run_container(payroll, command),
    }
}

fn run_worker(payroll: &mut Payroll<SqliteStorage>, command: WorkerCommand) -> CliResult {
    let mut workers = payroll.workers();
    match command {
        WorkerCommand::Add { name } => {
            let name = non_empty(&name, "name")?;
            let worker = workers.add(name)?;
            println!("{}", worker.id);
        }
        WorkerCommand::Rename { id, name } => {
            let name = non_empty(&name, "name")?;
            workers.update(&id, &WorkerPatch::rename(name))?;
        }
        WorkerCommand::Activate { id } => {
            workers.update(&id, &WorkerPatch::set_active(true))?;
        }
        WorkerCommand::Deactivate { id } => {
            workers.update(&id, &WorkerPatch::set_active(false))?;
        }
        WorkerCommand::Delete { id } => workers.delete(&id)?,
        WorkerCommand::List => {
            for worker in workers.list() {
                let status = if worker.active { "active" } else { "inactive" };
                println!("{}\t{}\t{status}", worker.id, worker.name);
            }
        }
    }
    Ok(())
}

fn run_team(payroll: &mut Payroll<SqliteStorage>, command: TeamCommand) -> CliResult {
    match command {
        TeamCommand::Add {
            date,
            first,
            second,
        } => {
            let team = payroll.teams().add(date, first, second)?;
            println!("{}", team.id);
        }
        TeamCommand::Delete { id } => payroll.teams().delete(&id)?,
        TeamCommand::List => {
            let workers = payroll.workers().list().to_vec();
            let teams = payroll.teams();
            for team in teams.list_newest_first() {
                println!(
                    "{}\t{}\t{}",
                    team.id,
                    team.date,
                    worker_names_label(&workers, &team.workers)
                );
            }
        }
        TeamCommand::Available { date } => {
            for worker in payroll.teams().available_workers(date) {
                println!("{}\t{}", worker.id, worker.name);
            }
        }
    }
    Ok(())
}

fn run_container(payroll: &mut Payroll<SqliteStorage>, command: ContainerCommand) -> CliResult {
    match command {
        ContainerCommand::Add {
            date,
            team_id,
            packages,
        } => {
            if packages == 0 {
                return Err("package count must be greater than 0".into());
            }
            team_on_date(payroll.teams().list(), &team_id, date)?;
            let container = payroll.containers().add(&NewContainer {
                date,
                team_id,
                package_count: packages,
            })?;
            println!(
                "{}\tpayment={}\tper_worker={}",
                container.id, container.payment, container.payment_per_worker
            );
        }
        ContainerCommand::History(args) => {
            let filter = ContainerFilter {
                worker_id: args.worker,
                date_range: args.range.to_range(),
            };
            let workers = payroll.workers().list().to_vec();
            let teams = payroll.teams().list().to_vec();
            let ledger = payroll.containers();
            for container in ledger.history(&filter) {
                let members = resolve_team(&teams, &container.team_id)
                    .map(|team| worker_names_label(&workers, &team.workers))
                    .unwrap_or_else(|| UNKNOWN_TEAM_LABEL.to_string());
                println!(
                    "{}\t{}\t{}\t{} / worker ({} total)",
                    container.date,
                    members,
                    container.package_count,
                    container.payment_per_worker,
                    container.payment
                );
            }
        }
        ContainerCommand::Earnings { worker_id, range } => {
            let earnings = payroll
                .containers()
                .earnings(&worker_id, range.to_range());
            println!(
                "containers={} packages={} total={}",
                earnings.containers, earnings.packages, earnings.total_payment
            );
        }
    }
    Ok(())
}

/// Resolves the team a container is recorded for.
///
/// Only teams formed on the container's own date are accepted, so every
/// recorded container pays an existing pair.
fn team_on_date<'a>(teams: &'a [Team], team_id: &str, date: NaiveDate) -> Result<&'a Team, String> {
    let team = resolve_team(teams, team_id).ok_or_else(|| format!("team {team_id} does not exist"))?;
    if team.date != date {
        return Err(format!(
            "team {team_id} was formed on {}, not on {date}",
            team.date
        ));
    }
    Ok(team)
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, Box<dyn Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty").into());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{run_container, ContainerCommand};
    use chrono::NaiveDate;
    use payroll_core::{Payroll, SqliteStorage};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn add(team_id: &str, date: NaiveDate) -> ContainerCommand {
        ContainerCommand::Add {
            date,
            team_id: team_id.to_string(),
            packages: 1500,
        }
    }

    fn payroll() -> Payroll<SqliteStorage> {
        Payroll::open(SqliteStorage::in_memory().unwrap()).unwrap()
    }

    #[test]
    fn container_add_rejects_unknown_team() {
        let mut payroll = payroll();
        let err = run_container(&mut payroll, add("typo-team", day(5))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(payroll.containers().get_all().is_empty());
    }

    #[test]
    fn container_add_rejects_team_from_another_date() {
        let mut payroll = payroll();
        let anna = payroll.workers().add("Anna").unwrap();
        let jan = payroll.workers().add("Jan").unwrap();
        let team = payroll.teams().add(day(1), &anna.id, &jan.id).unwrap();

        let err = run_container(&mut payroll, add(&team.id, day(5))).unwrap_err();
        assert!(err.to_string().contains("formed on 2024-09-01"));
        assert!(payroll.containers().get_all().is_empty());
        assert_eq!(payroll.containers().earnings(&anna.id, None).containers, 0);

        run_container(&mut payroll, add(&team.id, day(1))).unwrap();
        let stored = payroll.containers().get_all().to_vec();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].payment, 85.0);
    }
}
