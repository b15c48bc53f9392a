//! Presentation helpers: number formatting, the result table and its
//! tab-separated export, and the small percent-sum conveniences a form needs
//! while the user is still typing.

use crate::compose::{within_tolerance, CompositionReport};

pub const FIBER_HEADER: &str = "Fiber";
pub const SHARE_HEADER: &str = "Share (%)";

/// How far a yarn's percentages are from 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumStatus {
    Ok,
    TooLow,
    TooHigh,
}

pub fn sum_status(sum: f64) -> SumStatus {
    if within_tolerance(sum) {
        SumStatus::Ok
    } else if sum < 100.0 {
        SumStatus::TooLow
    } else {
        SumStatus::TooHigh
    }
}

/// Top up (or trim) the last share so the list adds up to 100%. Lists that
/// are already close enough, and empty lists, are left alone.
pub fn fill_rest(percentages: &mut [f64]) {
    let sum: f64 = percentages.iter().sum();
    if within_tolerance(sum) {
        return;
    }
    if let Some(last) = percentages.last_mut() {
        *last += 100.0 - sum;
    }
}

/// Parse a user-typed number, accepting `,` as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Whole numbers without decimals, everything else with one.
pub fn format_percent_simple(value: f64) -> String {
    if (value - value.round()).abs() < 1e-7 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Tenths of a percent as a one-decimal string.
pub fn format_tenths(tenths: i64, decimal_comma: bool) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    let separator = if decimal_comma { ',' } else { '.' };
    format!("{sign}{}{separator}{}", abs / 10, abs % 10)
}

/// Heading with the batch weight in grams, two decimals.
pub fn title(report: &CompositionReport, decimal_comma: bool) -> String {
    let grams = format!("{:.2}", report.total_grams);
    let grams = if decimal_comma {
        grams.replace('.', ",")
    } else {
        grams
    };
    format!("Total Composition (Total: {grams} g)")
}

/// Fiber name and formatted share per row, heaviest first.
pub fn result_rows(report: &CompositionReport, decimal_comma: bool) -> Vec<(String, String)> {
    report
        .rows
        .iter()
        .map(|row| (row.name.clone(), format_tenths(row.tenths, decimal_comma)))
        .collect()
}

/// Header line plus one line per fiber, columns separated by tabs and every
/// line terminated by a newline. Meant for pasting into a spreadsheet.
pub fn to_tsv(report: &CompositionReport, decimal_comma: bool) -> String {
    let mut out = format!("{FIBER_HEADER}\t{SHARE_HEADER}\n");
    for (name, share) in result_rows(report, decimal_comma) {
        out.push_str(&name);
        out.push('\t');
        out.push_str(&share);
        out.push('\n');
    }
    out
}

/// Plain-text table with a title line, shares right-aligned.
pub fn render_table(report: &CompositionReport, decimal_comma: bool) -> String {
    let rows = result_rows(report, decimal_comma);
    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once(FIBER_HEADER.len()))
        .max()
        .unwrap_or(0);
    let share_width = SHARE_HEADER.len();

    let mut out = title(report, decimal_comma);
    out.push('\n');
    out.push_str(&format!(
        "{FIBER_HEADER:<name_width$}  {SHARE_HEADER:>share_width$}\n"
    ));
    out.push_str(&format!(
        "{}  {}\n",
        "-".repeat(name_width),
        "-".repeat(share_width)
    ));
    for (name, share) in rows {
        out.push_str(&format!("{name:<name_width$}  {share:>share_width$}\n"));
    }
    out
}
