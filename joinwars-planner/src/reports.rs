use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use joinwars_game::numbers::count_ratio;
use joinwars_game::{GameConstants, Plan, SearchStats, Strategy, Trajectory};

/// Header shared by every strategy report.
pub struct ReportContext<'a> {
    pub constants: &'a GameConstants,
    pub ranked: bool,
}

impl ReportContext<'_> {
    const fn mode(&self) -> &'static str {
        if self.ranked { "ranked" } else { "raw" }
    }
}

#[derive(Serialize)]
struct StrategyReport<'a> {
    mode: &'static str,
    growth_rule: String,
    tie_break: String,
    max_turns: u32,
    stats: &'a SearchStats,
    strategies: &'a [Strategy],
}

pub fn generate_console_report(
    out: &mut dyn Write,
    ctx: &ReportContext<'_>,
    plan: &Plan,
) -> Result<()> {
    writeln!(out, "{}", "🎯 JoinWars Strategy Planner".bright_cyan().bold())?;
    writeln!(out, "{}", "============================".cyan())?;
    writeln!(
        out,
        "Growth rule: {} | Tie break: {} | Max turns: {} | Mode: {}",
        ctx.constants.growth_rule,
        ctx.constants.tie_break,
        ctx.constants.max_turns,
        ctx.mode()
    )?;
    write_console_stats(out, &plan.stats)?;

    if plan.strategies.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "No feasible strategies.".yellow())?;
        return Ok(());
    }

    let mut current_start = None;
    for strategy in &plan.strategies {
        if current_start != Some(strategy.starting_currency) {
            current_start = Some(strategy.starting_currency);
            writeln!(out)?;
            let heading = format!("💰 Starting currency {}", strategy.starting_currency);
            writeln!(out, "{}", heading.bright_yellow().bold())?;
        }
        writeln!(
            out,
            "   {:>3} turns  score {:>6}  cost {:>8}  held {:>8}  mirrors {:>4}  subscribes {:>4}",
            strategy.turns_needed,
            strategy.score.to_string().green(),
            strategy.total_cost,
            strategy.currency_after_growth,
            strategy.resource_a_count,
            strategy.resource_b_count
        )?;
    }
    Ok(())
}

fn write_console_stats(out: &mut dyn Write, stats: &SearchStats) -> Result<()> {
    writeln!(out, "Candidates: {}", stats.candidates)?;
    writeln!(out, "Accepted: {}", stats.accepted.to_string().green())?;
    writeln!(
        out,
        "Rejected: {} (ratio {}, cost {}, score {}, turns {})",
        stats.rejected().to_string().red(),
        stats.ratio_rejected,
        stats.cost_rejected,
        stats.score_rejected,
        stats.turn_rejected
    )?;
    let acceptance_rate = count_ratio(stats.accepted, stats.candidates) * 100.0;
    writeln!(out, "Acceptance rate: {acceptance_rate:.2}%")?;
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    ctx: &ReportContext<'_>,
    plan: &Plan,
) -> Result<()> {
    let report = StrategyReport {
        mode: ctx.mode(),
        growth_rule: ctx.constants.growth_rule.to_string(),
        tie_break: ctx.constants.tie_break.to_string(),
        max_turns: ctx.constants.max_turns,
        stats: &plan.stats,
        strategies: &plan.strategies,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    ctx: &ReportContext<'_>,
    plan: &Plan,
) -> Result<()> {
    writeln!(out, "# JoinWars Strategies\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Mode**: {}", ctx.mode())?;
    writeln!(out, "- **Growth rule**: {}", ctx.constants.growth_rule)?;
    writeln!(out, "- **Tie break**: {}", ctx.constants.tie_break)?;
    writeln!(out, "- **Candidates**: {}", plan.stats.candidates)?;
    writeln!(out, "- **Accepted**: {}\n", plan.stats.accepted)?;

    if plan.strategies.is_empty() {
        writeln!(out, "_No feasible strategies._")?;
        return Ok(());
    }

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Start | Turns | Score | Total cost | Held | Mirrors | Subscribes |"
    )?;
    writeln!(out, "|---:|---:|---:|---:|---:|---:|---:|")?;
    for s in &plan.strategies {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            s.starting_currency,
            s.turns_needed,
            s.score,
            s.total_cost,
            s.currency_after_growth,
            s.resource_a_count,
            s.resource_b_count
        )?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, plan: &Plan) -> Result<()> {
    writeln!(
        out,
        "starting_currency,turns_needed,score,total_cost,currency_after_growth,resource_a_count,resource_b_count,resource_a_cost,resource_b_cost"
    )?;
    for s in &plan.strategies {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            s.starting_currency,
            s.turns_needed,
            s.score,
            s.total_cost,
            s.currency_after_growth,
            s.resource_a_count,
            s.resource_b_count,
            s.resource_a_cost,
            s.resource_b_cost
        )?;
    }
    Ok(())
}

pub fn generate_trajectory_console_report(
    out: &mut dyn Write,
    trajectories: &[Trajectory],
) -> Result<()> {
    writeln!(out, "{}", "📈 Currency Growth".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    for trajectory in trajectories {
        writeln!(out)?;
        let heading = format!("💰 Starting currency {}", trajectory.starting_currency);
        writeln!(out, "{}", heading.bright_yellow().bold())?;
        for (turn, currency) in trajectory.currency.iter().enumerate() {
            writeln!(out, "   turn {turn:>3}: {currency}")?;
        }
    }
    Ok(())
}

pub fn generate_trajectory_json_report(
    out: &mut dyn Write,
    trajectories: &[Trajectory],
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, trajectories)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_trajectory_markdown_report(
    out: &mut dyn Write,
    trajectories: &[Trajectory],
) -> Result<()> {
    writeln!(out, "# JoinWars Currency Growth\n")?;
    let horizon = trajectories
        .iter()
        .map(|t| t.currency.len())
        .max()
        .unwrap_or(0);
    let header: Vec<String> = std::iter::once("Turn".to_string())
        .chain(trajectories.iter().map(|t| format!("Start {}", t.starting_currency)))
        .collect();
    writeln!(out, "| {} |", header.join(" | "))?;
    writeln!(out, "|{}", "---:|".repeat(header.len()))?;
    for turn in 0..horizon {
        let row: Vec<String> = std::iter::once(turn.to_string())
            .chain(trajectories.iter().map(|t| {
                t.currency
                    .get(turn)
                    .map_or_else(String::new, ToString::to_string)
            }))
            .collect();
        writeln!(out, "| {} |", row.join(" | "))?;
    }
    Ok(())
}

/// Long format: one row per (starting currency, turn).
pub fn generate_trajectory_csv_report(
    out: &mut dyn Write,
    trajectories: &[Trajectory],
) -> Result<()> {
    writeln!(out, "starting_currency,turn,currency")?;
    for trajectory in trajectories {
        for (turn, currency) in trajectory.currency.iter().enumerate() {
            writeln!(out, "{},{turn},{currency}", trajectory.starting_currency)?;
        }
    }
    Ok(())
}
