use crate::{
    commands::Commands,
    error::CliError,
    output::{SliceReport, write_report},
};
use clap::Parser;
use model::{ViewDefinition, ViewSpec};
use planner::{Planner, PlannerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "ivpp", version = "0.1.0", about = "Incremental view path planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger, stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli.command)
}

fn run(command: Commands) -> Result<(), CliError> {
    let args = command.args().clone();
    let view = load_view(&args.view)?;
    let planner = Planner::new(PlannerConfig {
        shortcuts: !args.no_shortcuts,
    });
    let output = args.output.as_deref();

    match command {
        Commands::KeyPath { anchor, .. } => {
            let slice = planner.generate_key_path(&view, &anchor)?;
            write_report(&SliceReport::new(&anchor, slice)?, output)
        }
        Commands::Fields {
            anchor,
            target,
            fields,
            ..
        } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let slice = match target {
                Some(target) => planner.extract_fields_from(&view, &anchor, &target, &fields)?,
                None => planner.extract_fields(&view, &anchor, &fields)?,
            };
            write_report(&SliceReport::new(&anchor, slice)?, output)
        }
        Commands::ComputedKey { anchor, .. } => {
            let slice = planner.extract_keys_reverse(&view, &anchor)?;
            write_report(&SliceReport::new(&anchor, slice)?, output)
        }
        Commands::PlanAll { .. } => {
            let reports = planner
                .key_paths(&view)?
                .into_iter()
                .map(|plan| SliceReport::new(plan.anchor.as_str(), plan.slice))
                .collect::<Result<Vec<_>, _>>()?;
            write_report(&reports, output)
        }
    }
}

fn load_view(path: &str) -> Result<ViewSpec, CliError> {
    info!("Loading view definition: {}", path);

    let source = std::fs::read_to_string(path)?;
    let view = ViewDefinition::from_json(&source)?.resolve()?;

    info!(
        "Loaded view `{}` with {} source(s)",
        view.name,
        view.sources.len()
    );
    Ok(view)
}
