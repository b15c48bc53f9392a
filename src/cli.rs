//! Command-line front end. Parses arguments, drives [`App`], and prints
//! whatever the core hands back.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::app::{App, SaveOutcome, YarnSource};
use crate::compose::calculate;
use crate::models::FiberShare;
use crate::report::{self, format_percent_simple, parse_decimal, sum_status, SumStatus};
use crate::store::{default_data_dir, DataFiles};

/// Exit status for batches that fail validation.
const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "yarn-blend")]
#[command(about = "Compute the fiber composition of a blend of yarns")]
pub struct Cli {
    /// Directory holding yarns.json and fibers.json
    #[arg(long, env = "YARN_BLEND_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print shares with a decimal comma
    #[arg(long, global = true)]
    pub decimal_comma: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the composition of a batch
    Calc(CalcArgs),
    /// Manage saved yarn recipes
    #[command(subcommand)]
    Recipe(RecipeCommand),
    /// Manage the fiber catalog
    #[command(subcommand)]
    Fiber(FiberCommand),
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// `GRAMS:FIBER=PCT+FIBER=PCT` or `GRAMS@RECIPE`; repeat once per yarn
    #[arg(long = "yarn", short = 'y', required = true, value_parser = parse_yarn_source)]
    pub yarns: Vec<YarnSource>,

    /// Print tab-separated rows instead of a table
    #[arg(long)]
    pub tsv: bool,
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    List,
    Show {
        name: String,
    },
    Save {
        name: String,
        /// `FIBER=PCT`, one per fiber
        #[arg(required = true, value_parser = parse_share)]
        shares: Vec<FiberShare>,
        /// Replace an existing recipe of the same name
        #[arg(long)]
        force: bool,
    },
    Delete {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FiberCommand {
    List,
    Add { name: String },
    Remove { name: String },
}

impl Cli {
    pub fn data_files(&self) -> Result<DataFiles> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        debug!(dir = %dir.display(), "using data directory");
        Ok(DataFiles::in_dir(dir))
    }
}

/// Execute the parsed command against loaded application state.
pub fn run(cli: &Cli, app: &mut App) -> Result<ExitCode> {
    match &cli.command {
        Command::Calc(args) => calc(app, args, cli.decimal_comma),
        Command::Recipe(command) => {
            recipe(app, command)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fiber(command) => {
            fiber(app, command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn calc(app: &App, args: &CalcArgs, decimal_comma: bool) -> Result<ExitCode> {
    let entries = app.batch_entries(&args.yarns)?;
    match calculate(&entries) {
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
        Ok(None) => {
            println!("Total weight is 0g. Please enter gram values.");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Some(composition)) => {
            if args.tsv {
                print!("{}", report::to_tsv(&composition, decimal_comma));
            } else {
                print!("{}", report::render_table(&composition, decimal_comma));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn recipe(app: &mut App, command: &RecipeCommand) -> Result<()> {
    match command {
        RecipeCommand::List => {
            for name in app.recipes().names() {
                println!("{name}");
            }
        }
        RecipeCommand::Show { name } => {
            let recipe = app
                .recipes()
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("Recipe '{name}' not found"))?;
            println!("{}", recipe.name);
            for share in &recipe.shares {
                println!("  {}: {}%", share.name, format_percent_simple(share.percentage));
            }
            let sum = recipe.percent_sum();
            match sum_status(sum) {
                SumStatus::Ok => {}
                SumStatus::TooLow => println!("  (total {sum:.1}%: too low)"),
                SumStatus::TooHigh => println!("  (total {sum:.1}%: too high)"),
            }
        }
        RecipeCommand::Save {
            name,
            shares,
            force,
        } => match app.save_recipe(name, shares, *force)? {
            SaveOutcome::Created => println!("Recipe '{}' saved!", name.trim()),
            SaveOutcome::Overwritten => println!("Recipe '{}' updated.", name.trim()),
        },
        RecipeCommand::Delete { name } => {
            app.delete_recipe(name)?;
            println!("Recipe '{name}' deleted.");
        }
    }
    Ok(())
}

fn fiber(app: &mut App, command: &FiberCommand) -> Result<()> {
    match command {
        FiberCommand::List => {
            for name in app.catalog().names() {
                println!("{name}");
            }
        }
        FiberCommand::Add { name } => {
            if app.add_fiber(name)? {
                println!("Fiber '{}' added.", name.trim());
            } else {
                println!("Fiber '{}' already exists.", name.trim());
            }
        }
        FiberCommand::Remove { name } => {
            if app.remove_fiber(name)? {
                println!("Fiber '{name}' removed.");
            } else {
                println!("Fiber '{name}' is not in the catalog.");
            }
        }
    }
    Ok(())
}

/// Parse `FIBER=PCT`. The split happens at the last `=` so fiber names may
/// contain one.
pub fn parse_share(text: &str) -> Result<FiberShare, String> {
    let (name, pct) = text
        .rsplit_once('=')
        .ok_or_else(|| format!("expected FIBER=PCT, got '{text}'"))?;
    let percentage =
        parse_decimal(pct).ok_or_else(|| format!("'{pct}' is not a number (fiber '{name}')"))?;
    Ok(FiberShare::new(name.trim(), percentage))
}

/// Parse `GRAMS:FIBER=PCT+FIBER=PCT` or `GRAMS@RECIPE`.
pub fn parse_yarn_source(text: &str) -> Result<YarnSource, String> {
    if let Some((grams, name)) = text.split_once('@') {
        let grams = parse_grams(grams)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing recipe name in '{text}'"));
        }
        return Ok(YarnSource::Recipe {
            grams,
            name: name.to_string(),
        });
    }

    let (grams, shares) = text
        .split_once(':')
        .ok_or_else(|| format!("expected GRAMS:FIBER=PCT+... or GRAMS@RECIPE, got '{text}'"))?;
    let grams = parse_grams(grams)?;
    let shares = shares
        .split('+')
        .filter(|part| !part.trim().is_empty())
        .map(parse_share)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(YarnSource::Inline { grams, shares })
}

fn parse_grams(text: &str) -> Result<f64, String> {
    parse_decimal(text).ok_or_else(|| format!("'{}' is not a valid gram value", text.trim()))
}
