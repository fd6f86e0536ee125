//! solvetrack-report - monthly practice report
//!
//! Reads a task record file and prints streaks, goal progress, a calendar
//! heat map and distributions for one month.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use solvetrack_core::analytics::{
    build_snapshot, AnalyticsSnapshot, CalendarDay, ChartKind, MonthPeriod, SnapshotRequest,
};
use solvetrack_core::format::{
    intensity_glyph, minutes_display, plural, progress_bar, xp_display,
};
use solvetrack_core::{ingest, Config, Difficulty};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solvetrack-report")]
#[command(about = "Monthly report for solved coding tasks")]
#[command(version)]
struct Args {
    /// Task record file (JSON array, {"tasks": [...]} or JSONL)
    #[arg(long)]
    input: PathBuf,

    /// Month to report on (format: YYYY-MM, default: month of --today)
    #[arg(long)]
    month: Option<String>,

    /// Reference date for streaks (format: YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<String>,

    /// Monthly XP target, overrides [goal.months] and [goal].target_xp
    #[arg(long)]
    target: Option<u32>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Print a single chart series as JSON (e.g. daily_xp, weekday_distribution)
    #[arg(long)]
    chart: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = solvetrack_core::logging::init(&config.logging).ok();

    let today = match &args.today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date {:?}. Use YYYY-MM-DD", s))?,
        None => Local::now().date_naive(),
    };

    let period = match &args.month {
        Some(s) => s
            .parse::<MonthPeriod>()
            .context("Invalid month. Use YYYY-MM (e.g., 2024-06)")?,
        None => MonthPeriod::containing(today),
    };

    let request = SnapshotRequest::for_period(period, today)
        .with_target(args.target.or_else(|| config.goal.target_for(period)))
        .with_settings(&config.analytics);

    let normalized = ingest::load_and_normalize(&args.input)
        .with_context(|| format!("failed to read records from {}", args.input.display()))?;
    if normalized.skipped_count() > 0 {
        eprintln!(
            "warning: skipped {}",
            plural(normalized.skipped_count() as u64, "malformed record")
        );
    }

    let snapshot = build_snapshot(&normalized, &request);
    tracing::debug!(input = %args.input.display(), "Report snapshot ready");

    if let Some(chart) = &args.chart {
        let kind = chart
            .parse::<ChartKind>()
            .map_err(|e: String| anyhow::anyhow!("{}", e))
            .with_context(|| {
                let known: Vec<&str> = ChartKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("Known charts: {}", known.join(", "))
            })?;
        println!("{}", serde_json::to_string_pretty(&snapshot.series(kind))?);
        return Ok(());
    }

    match args.export.as_deref() {
        Some("json") => print_json(&snapshot)?,
        Some("md") => print_markdown(&snapshot),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&snapshot),
    }

    Ok(())
}

fn print_terminal(snapshot: &AnalyticsSnapshot) {
    let title = format!("Practice Report: {}", snapshot.period.display_name());

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    let month = &snapshot.month_stats;
    if month.total_tasks == 0 {
        println!("  No tasks found for this month.");
        println!();
    } else {
        println!("SUMMARY");
        println!(
            "   Tasks:    {:<12} XP: {}",
            month.total_tasks,
            xp_display(month.current_xp)
        );
        println!(
            "   Easy:     {:<12} Medium: {:<8} Hard: {}",
            month.easy_count, month.medium_count, month.hard_count
        );
        println!(
            "   Active:   {} of {}",
            month.active_days,
            plural(u64::from(month.days_in_month), "day")
        );
        println!();
    }

    if month.target_xp > 0 {
        let goal = &snapshot.goal_progress;
        println!("GOAL");
        println!(
            "   {} {}% of {} XP",
            progress_bar(goal.percent, 30),
            goal.percent,
            month.target_xp
        );
        if goal.reached {
            println!("   Goal reached!");
        } else {
            println!("   {} XP to go", goal.remaining);
        }
        println!();
    }

    let streak = &snapshot.streak;
    println!("STREAKS");
    println!("   Current:  {}", plural(u64::from(streak.current), "day"));
    if streak.longest > 0 {
        let dates = match (streak.longest_start, streak.longest_end) {
            (Some(start), Some(end)) => {
                format!(" ({} - {})", start.format("%b %d"), end.format("%b %d"))
            }
            _ => String::new(),
        };
        println!(
            "   Longest:  {}{}",
            plural(u64::from(streak.longest), "day"),
            dates
        );
    }
    println!();

    println!("CALENDAR");
    print_calendar(&snapshot.calendar_days);
    println!();

    let time = &snapshot.time_stats;
    if time.timed_tasks > 0 {
        println!("TIME");
        println!(
            "   Average:  {:<12} Total: {}",
            minutes_display(time.average_time),
            minutes_display(time.total_time as f64)
        );
        let by_difficulty: Vec<String> = Difficulty::ALL
            .iter()
            .map(|d| format!("{}: {}", d, minutes_display(time.avg_for(*d))))
            .collect();
        println!("   {}", by_difficulty.join("  "));
        println!();
    }

    if !snapshot.top_days.is_empty() {
        println!("BEST DAYS");
        for (i, day) in snapshot.top_days.iter().enumerate() {
            println!(
                "   {}. {}  {:<10} {} XP",
                i + 1,
                day.date.format("%b %d"),
                plural(u64::from(day.task_count), "task"),
                day.xp_sum
            );
        }
        println!();
    }

    let weekday = snapshot.series(ChartKind::WeekdayDistribution);
    if weekday.values().iter().any(|v| *v > 0.0) {
        println!("BY WEEKDAY");
        for (label, count) in weekday.iter() {
            println!("   {} {:>4}  {}", label, count, "#".repeat(count as usize));
        }
        println!();
    }

    let rank = &snapshot.rank;
    println!("RANK");
    match rank.next {
        Some(next) => println!(
            "   {} ({} XP) - {} XP to {}",
            rank.current.name,
            xp_display(rank.total_xp),
            rank.xp_to_next,
            next.name
        ),
        None => println!(
            "   {} ({} XP)",
            rank.current.name,
            xp_display(rank.total_xp)
        ),
    }
    println!();
}

fn print_calendar(days: &[CalendarDay]) {
    println!("   Mon  Tue  Wed  Thu  Fri  Sat  Sun");
    for week in days.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|day| match day.cell() {
                None => "     ".to_string(),
                Some(cell) => {
                    let marker = if cell.is_today { '*' } else { ' ' };
                    format!(
                        "{:>2}{}{} ",
                        cell.date.format("%-d"),
                        intensity_glyph(cell.intensity),
                        marker
                    )
                }
            })
            .collect();
        println!("   {}", row.concat().trim_end());
    }
}

fn print_markdown(snapshot: &AnalyticsSnapshot) {
    println!("# Practice Report: {}", snapshot.period.display_name());
    println!();

    let month = &snapshot.month_stats;
    if month.total_tasks == 0 {
        println!("*No tasks found for this month.*");
        println!();
    }

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Tasks | {} |", month.total_tasks);
    println!("| XP | {} |", month.current_xp);
    println!(
        "| Easy / Medium / Hard | {} / {} / {} |",
        month.easy_count, month.medium_count, month.hard_count
    );
    println!(
        "| Active days | {} of {} |",
        month.active_days, month.days_in_month
    );
    println!(
        "| Current streak | {} |",
        plural(u64::from(snapshot.streak.current), "day")
    );
    println!(
        "| Longest streak | {} |",
        plural(u64::from(snapshot.streak.longest), "day")
    );
    println!("| Rank | {} |", snapshot.rank.current.name);
    if month.target_xp > 0 {
        println!(
            "| Goal | {}% of {} XP |",
            snapshot.goal_progress.percent, month.target_xp
        );
    }
    println!();

    if !snapshot.top_days.is_empty() {
        println!("## Best Days");
        println!();
        println!("| # | Date | Tasks | XP |");
        println!("|---|------|-------|----|");
        for (i, day) in snapshot.top_days.iter().enumerate() {
            println!(
                "| {} | {} | {} | {} |",
                i + 1,
                day.date,
                day.task_count,
                day.xp_sum
            );
        }
        println!();
    }

    if !snapshot.time_trend.is_empty() {
        println!("## Weekly Time Trend");
        println!();
        println!("| Week of | Timed tasks | Average |");
        println!("|---------|-------------|---------|");
        for point in &snapshot.time_trend {
            println!(
                "| {} | {} | {} |",
                point.week_label,
                point.tasks,
                minutes_display(point.avg_minutes)
            );
        }
        println!();
    }

    if snapshot.skipped_records > 0 {
        println!(
            "*{} skipped as malformed.*",
            plural(snapshot.skipped_records as u64, "record")
        );
    }
}

fn print_json(snapshot: &AnalyticsSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}
