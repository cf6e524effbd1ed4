//! Rendering of results as text tables or JSON.

use anyhow::{Context, Result};
use paye_core::calculations::common::{format_naira, format_rate};
use paye_core::{RegimeComparison, TakeHomeSummary};
use paye_data::ScenarioOutcome;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled, builder::Builder};

use crate::config::OutputFormat;

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "Scenario")]
    label: String,
    #[tabled(rename = "Tax year")]
    tax_year: String,
    #[tabled(rename = "Gross (annual)")]
    gross: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Net (monthly)")]
    net_monthly: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// JSON shape for one batch outcome.
#[derive(Serialize)]
struct OutcomeJson<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a TakeHomeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

fn summary_rows(summary: &TakeHomeSummary) -> Vec<(&'static str, String)> {
    let computation = &summary.computation;
    let mut rows = vec![
        ("Category", summary.category.label().to_string()),
        ("Gross income", format_naira(summary.gross_annual)),
        (
            "Deductible expenses",
            format_naira(summary.deductible_expenses),
        ),
    ];
    if !computation.relief_applied.is_zero() {
        rows.push(("Relief (CRA)", format_naira(computation.relief_applied)));
    }
    if !computation.rent_relief.is_zero() {
        rows.push(("Rent relief", format_naira(computation.rent_relief)));
    }
    if !computation.threshold_applied.is_zero() {
        rows.push(("Tax-free threshold", format_naira(computation.threshold_applied)));
    }
    rows.extend([
        ("Taxable income", format_naira(computation.taxable_income)),
        ("Tax", format_naira(computation.tax)),
        ("Monthly tax", format_naira(summary.monthly_tax)),
        ("Net income", format_naira(summary.net_annual)),
        ("Net monthly", format_naira(summary.net_monthly)),
        ("Effective rate", format_rate(summary.effective_rate)),
    ]);
    rows
}

fn breakdown_table(summary: &TakeHomeSummary) -> Option<String> {
    let breakdown = &summary.computation.breakdown;
    if breakdown.is_empty() {
        return None;
    }
    let rows = breakdown.iter().map(|line| BandRow {
        label: line.label.clone(),
        amount: format_naira(line.amount),
        rate: format_rate(line.rate),
        tax: format_naira(line.tax),
    });
    Some(Table::new(rows).with(Style::modern()).to_string())
}

fn summary_table(summary: &TakeHomeSummary) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Tax year".to_string(), summary.regime().to_string()]);
    for (field, value) in summary_rows(summary) {
        builder.push_record([field.to_string(), value]);
    }
    let mut out = builder.build().with(Style::modern()).to_string();
    if let Some(breakdown) = breakdown_table(summary) {
        out.push_str("\n\n");
        out.push_str(&breakdown);
    }
    out
}

pub fn render_summary(
    summary: &TakeHomeSummary,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(summary_table(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

fn difference_text(difference: Decimal) -> String {
    if difference < Decimal::ZERO {
        format!("Reform saves {} a year", format_naira(-difference))
    } else if difference > Decimal::ZERO {
        format!("Reform costs {} more a year", format_naira(difference))
    } else {
        "No change between regimes".to_string()
    }
}

pub fn render_comparison(
    comparison: &RegimeComparison,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(comparison);
    }

    let mut builder = Builder::default();
    builder.push_record([
        String::new(),
        comparison.legacy.regime().to_string(),
        comparison.reform.regime().to_string(),
    ]);

    let legacy = summary_rows(&comparison.legacy);
    let reform = summary_rows(&comparison.reform);
    // Relief rows differ between regimes, so align by field name
    let mut fields: Vec<&'static str> = legacy.iter().map(|(f, _)| *f).collect();
    for (field, _) in &reform {
        if !fields.contains(field) {
            fields.push(*field);
        }
    }
    let lookup = |rows: &[(&'static str, String)], field: &str| {
        rows.iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    for field in fields {
        builder.push_record([
            field.to_string(),
            lookup(&legacy, field),
            lookup(&reform, field),
        ]);
    }

    let mut out = builder.build().with(Style::modern()).to_string();
    out.push('\n');
    out.push_str(&difference_text(comparison.tax_difference));
    Ok(out)
}

pub fn render_batch(
    outcomes: &[ScenarioOutcome],
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        let views: Vec<OutcomeJson<'_>> = outcomes
            .iter()
            .map(|o| OutcomeJson {
                label: &o.label,
                summary: o.result.as_ref().ok(),
                error: o.result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        return to_json(&views);
    }

    if outcomes.is_empty() {
        return Ok("(no scenarios)".to_string());
    }

    let rows = outcomes.iter().map(|o| match &o.result {
        Ok(summary) => BatchRow {
            label: o.label.clone(),
            tax_year: summary.regime().label().to_string(),
            gross: format_naira(summary.gross_annual),
            tax: format_naira(summary.tax()),
            net_monthly: format_naira(summary.net_monthly),
            status: "ok".to_string(),
        },
        Err(e) => BatchRow {
            label: o.label.clone(),
            tax_year: "-".to_string(),
            gross: "-".to_string(),
            tax: "-".to_string(),
            net_monthly: "-".to_string(),
            status: format!("error: {e}"),
        },
    });
    Ok(Table::new(rows).with(Style::modern()).to_string())
}
