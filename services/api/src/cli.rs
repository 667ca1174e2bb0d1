use crate::demo::{run_adjust, run_demo, run_schedule_day, run_schedule_week};
use crate::infra::DatasetArgs;
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use line_staffing::error::AppError;
use line_staffing::workflows::staffing::FillStatus;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Line Staffing",
    about = "Assign production line workers, score the result, and plan cover for absences",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build day or week schedules from CSV tables
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
    /// Recommend cover for the absences reported on one date
    Adjust(AdjustArgs),
    /// Walk through scheduling, scoring, and adjustment on a built-in line
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Assign workers for a single date and score the result
    Day(ScheduleDayArgs),
    /// Assign workers for the Monday-Sunday week containing a date
    Week(ScheduleWeekArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleDayArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Product code to schedule
    #[arg(long)]
    pub(crate) product: String,
    /// Target date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// List only positions that are `full` or `short` (text output)
    #[arg(long, value_parser = crate::infra::parse_fill_status, default_value = "all")]
    pub(crate) status: FillStatus,
    /// Print the schedule and scores as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleWeekArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Product code to schedule
    #[arg(long)]
    pub(crate) product: String,
    /// Any date inside the target week (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) week_of: NaiveDate,
    /// Print the weekly schedule as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AdjustArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Leave register: worker id, name, date, type, hours, positions, urgency
    #[arg(long)]
    pub(crate) leaves: PathBuf,
    /// Product code to schedule
    #[arg(long)]
    pub(crate) product: String,
    /// Date whose absences should be covered (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// Print the adjustment plan as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Demo date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Skip the weekly schedule portion of the demo.
    #[arg(long)]
    pub(crate) skip_week: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Schedule {
            command: ScheduleCommand::Day(args),
        } => run_schedule_day(args),
        Command::Schedule {
            command: ScheduleCommand::Week(args),
        } => run_schedule_week(args),
        Command::Adjust(args) => run_adjust(args),
        Command::Demo(args) => run_demo(args),
    }
}
