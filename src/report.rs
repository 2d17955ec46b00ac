//! Text and JSON rendering of dashboard metrics

use crate::acwr::{format_chronic, format_ratio};
use crate::dashboard::{DashboardInputs, DashboardMetrics};
use crate::error::Result;
use crate::models::StatusColor;
use crate::plan::format_percent;
use crate::recommendations::PriorityColor;
use colored::{Color, ColoredString, Colorize};
use rust_decimal::Decimal;
use std::fmt::{self, Write};

/// Trend points shown in the text report
const TREND_POINTS: usize = 7;

fn status_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Blue => Color::Blue,
        StatusColor::Yellow => Color::Yellow,
        StatusColor::Orange => Color::TrueColor {
            r: 255,
            g: 165,
            b: 0,
        },
        StatusColor::Red => Color::Red,
    }
}

fn priority_color(color: PriorityColor) -> Color {
    match color {
        PriorityColor::Danger => Color::Red,
        PriorityColor::Warning => Color::Yellow,
        PriorityColor::Success => Color::Green,
    }
}

fn paint(text: &str, color: StatusColor) -> ColoredString {
    text.color(status_color(color))
}

/// Whole arbitrary units, no trailing zeros
pub fn format_load(load: Decimal) -> String {
    load.round_dp(0).normalize().to_string()
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

/// Render the dashboard as colored terminal text
pub fn render_text(inputs: &DashboardInputs, metrics: &DashboardMetrics) -> Result<String> {
    let mut out = String::new();
    write_dashboard(&mut out, inputs, metrics)?;
    Ok(out)
}

fn write_dashboard(
    out: &mut String,
    inputs: &DashboardInputs,
    metrics: &DashboardMetrics,
) -> fmt::Result {
    let title = "TRAINING LOAD DASHBOARD";
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", "=".repeat(title.len()))?;
    writeln!(
        out,
        "Week: {} to {} (today {})",
        inputs.week_start, inputs.week_end, inputs.today
    )?;
    writeln!(out)?;

    heading(out, "WORKLOAD")?;
    let load = &metrics.load;
    let ratio = &metrics.ratio;
    writeln!(out, "Acute load (7 days): {} AU", format_load(load.acute))?;
    let chronic = format_chronic(load.chronic);
    writeln!(
        out,
        "Chronic load ({}): {}",
        load.method,
        if load.chronic.is_zero() {
            chronic
        } else {
            format!("{} AU", chronic)
        }
    )?;
    writeln!(
        out,
        "Load ratio: {} {}",
        format_ratio(ratio.ratio),
        paint(&ratio.label, ratio.color)
    )?;
    writeln!(
        out,
        "Previous week acute: {} AU",
        format_load(metrics.previous_acute)
    )?;

    let recent: Vec<String> = metrics
        .ratio_trend
        .iter()
        .rev()
        .take(TREND_POINTS)
        .rev()
        .map(|point| format_ratio(point.ratio))
        .collect();
    if !recent.is_empty() {
        writeln!(out, "Ratio trend: {}", recent.join(" "))?;
    }
    writeln!(out)?;

    heading(out, "PLAN")?;
    let plan = &metrics.plan;
    writeln!(
        out,
        "Completion: {} ({} of {}) {}",
        format_percent(plan.percent),
        plan.done_count,
        plan.planned_count,
        paint(metrics.plan_status.label(), metrics.plan_status.color())
    )?;
    writeln!(out)?;

    heading(out, "READINESS")?;
    match &metrics.readiness {
        Some(summary) => {
            writeln!(
                out,
                "{} {} ({} samples)",
                summary.value.round_dp(1),
                paint(&summary.label, summary.color),
                summary.sample_count
            )?;
        }
        None => {
            writeln!(out, "{}", "No readiness data".dimmed())?;
        }
    }
    writeln!(out)?;

    heading(out, "RECOMMENDATIONS")?;
    for recommendation in &metrics.recommendations {
        let priority = recommendation.priority;
        writeln!(
            out,
            "[{}] {}: {}",
            priority
                .label()
                .color(priority_color(priority.color()))
                .bold(),
            recommendation.category.label(),
            recommendation.text
        )?;
    }

    Ok(())
}

/// Pretty-printed JSON of the full metrics
pub fn to_json(metrics: &DashboardMetrics) -> Result<String> {
    Ok(serde_json::to_string_pretty(metrics)?)
}
