use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use joinwars_game::{GameConstants, GrowthRule, Planner, TieBreak};

use crate::reports::{self, ReportContext};
use crate::util::parse_currency_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for terminals
    Console,
    /// Markdown tables
    Markdown,
    /// Pretty printed JSON
    Json,
    /// Comma separated rows
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GrowthRuleArg {
    /// Keep the stake: next = 2 * current + starting
    Reinvest,
    /// Pure doubling: next = 2 * current
    Doubling,
}

impl From<GrowthRuleArg> for GrowthRule {
    fn from(arg: GrowthRuleArg) -> Self {
        match arg {
            GrowthRuleArg::Reinvest => Self::Reinvest,
            GrowthRuleArg::Doubling => Self::Doubling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Keep the first strategy found with the bucket's best score
    FirstSeen,
    /// Prefer the cheapest strategy among equal scores
    LowestCost,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstSeen => Self::FirstSeen,
            TieBreakArg::LowestCost => Self::LowestCost,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "joinwars-planner", version)]
#[command(about = "Best JoinWars purchase plan per turn count, for every starting currency")]
pub struct Args {
    /// JSON file with game constants (defaults to the bundled constants)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Starting currencies to plan for (comma-separated)
    #[arg(long)]
    pub starting_currency: Option<String>,

    /// Per-turn growth rule
    #[arg(long, value_enum)]
    pub growth_rule: Option<GrowthRuleArg>,

    /// How equal scores within a bucket are resolved
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Give up on a target after this many turns
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Skip ranking and list every feasible strategy
    #[arg(long)]
    pub raw: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub report: ReportFormat,

    /// Emit per-turn currency for this many turns (20 if bare) instead of strategies
    #[arg(long, num_args = 0..=1, default_missing_value = "20")]
    pub trajectory_horizon: Option<u32>,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbose output (debug logging unless RUST_LOG says otherwise)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn load_from_path(path: &Path) -> Result<GameConstants> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    GameConstants::from_json(&json).with_context(|| format!("failed to load {}", path.display()))
}

/// Apply file and flag overrides, then validate.
pub fn build_planner(args: &Args) -> Result<Planner> {
    let mut constants = match &args.config {
        Some(path) => load_from_path(path)?,
        None => GameConstants::load_from_static(),
    };
    if let Some(list) = &args.starting_currency {
        constants = constants.with_starting_currency_options(parse_currency_list(list)?);
    }
    if let Some(rule) = args.growth_rule {
        constants = constants.with_growth_rule(rule.into());
    }
    if let Some(tie_break) = args.tie_break {
        constants = constants.with_tie_break(tie_break.into());
    }
    if let Some(max_turns) = args.max_turns {
        constants = constants.with_max_turns(max_turns);
    }
    Planner::new(constants).context("invalid game constants")
}

pub fn run(args: &Args) -> Result<()> {
    let planner = build_planner(args)?;
    let mut output_target = OutputTarget::new(args.output.clone())?;

    if args.print_config {
        serde_json::to_writer_pretty(&mut output_target, planner.constants())?;
        writeln!(&mut output_target)?;
    } else if let Some(horizon) = args.trajectory_horizon {
        write_trajectories(&mut output_target, args.report, &planner, horizon)?;
    } else {
        write_strategies(&mut output_target, args, &planner)?;
    }

    output_target.flush_inner()?;
    Ok(())
}

fn write_strategies(out: &mut dyn Write, args: &Args, planner: &Planner) -> Result<()> {
    let plan = if args.raw {
        planner.unranked()
    } else {
        planner.plan()
    };
    log::debug!(
        "{} strategies from {} candidates",
        plan.strategies.len(),
        plan.stats.candidates
    );
    let ctx = ReportContext {
        constants: planner.constants(),
        ranked: !args.raw,
    };
    match args.report {
        ReportFormat::Console => reports::generate_console_report(out, &ctx, &plan),
        ReportFormat::Markdown => reports::generate_markdown_report(out, &ctx, &plan),
        ReportFormat::Json => reports::generate_json_report(out, &ctx, &plan),
        ReportFormat::Csv => reports::generate_csv_report(out, &plan),
    }
}

fn write_trajectories(
    out: &mut dyn Write,
    format: ReportFormat,
    planner: &Planner,
    horizon: u32,
) -> Result<()> {
    let trajectories = planner.trajectories(horizon);
    match format {
        ReportFormat::Console => reports::generate_trajectory_console_report(out, &trajectories),
        ReportFormat::Markdown => reports::generate_trajectory_markdown_report(out, &trajectories),
        ReportFormat::Json => reports::generate_trajectory_json_report(out, &trajectories),
        ReportFormat::Csv => reports::generate_trajectory_csv_report(out, &trajectories),
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
