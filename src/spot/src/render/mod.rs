pub mod box_formatter;
pub mod chart;
pub mod message;

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use colored::Colorize;
use console::Emoji;

use crate::constants::STATS_BOX_WIDTH;
use crate::stats::PriceSummary;
use crate::types::{PriceSample, QueryParameters};
use crate::warning_message;

use box_formatter::BoxFormatter;
use chart::{ChartOptions, PriceChart};

const STATS: Emoji<'_, '_> = Emoji("📊 ", "");
const CHART: Emoji<'_, '_> = Emoji("📈 ", "");

/// Terminal `(columns, rows)`, or `None` when stdout is not attached to a terminal.
pub fn terminal_dimensions() -> Option<(u16, u16)> {
    termion::terminal_size()
        .ok()
        .filter(|(columns, rows)| *columns > 0 && *rows > 0)
}

/// Formats a USD/hr price as currency.
pub fn format_usd(price: f64) -> String {
    format!("${:.6}", price)
}

fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Builds the statistics box.
pub fn format_statistics(query: &QueryParameters, summary: &PriceSummary, width: usize) -> String {
    let mut formatter = BoxFormatter::new(width);

    formatter.add_header("Spot Price History");
    formatter.add_field("Instance type", &query.instance_type, "bold");
    formatter.add_field("Region", &query.region, "cyan");
    formatter.add_field("Product", query.product_description.as_str(), "none");
    formatter.add_field(
        "Availability zone",
        query.availability_zone.as_deref().unwrap_or("all"),
        "none",
    );
    formatter.add_field(
        "Window",
        &format!("last {} hour(s)", query.window_hours),
        "none",
    );
    formatter.add_field("First sample", &format_timestamp(summary.first_timestamp), "none");
    formatter.add_field("Last sample", &format_timestamp(summary.last_timestamp), "none");

    formatter.add_section_header("USD/hr");
    formatter.add_field("Samples", &format_count(summary.samples), "none");
    formatter.add_field("Minimum", &format_usd(summary.min), "green");
    formatter.add_field("Maximum", &format_usd(summary.max), "red");
    formatter.add_field("Mean", &format_usd(summary.mean), "yellow");
    formatter.add_field("Median", &format_usd(summary.median), "yellow");
    formatter.add_field("Std dev", &format_usd(summary.stdev), "none");
    formatter.add_field("Latest", &format_usd(summary.latest), "bold");
    formatter.add_footer();

    formatter.get_output().to_string()
}

/// Writes the statistics and, when enabled and the terminal allows, the price chart.
/// Falls back to statistics only when a chart cannot be drawn.
pub fn render<W: Write>(
    out: &mut W,
    query: &QueryParameters,
    samples: &[PriceSample],
    summary: &PriceSummary,
    options: &ChartOptions,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Statistics for {} in {}",
        STATS, query.instance_type, query.region
    )?;
    write!(out, "{}", format_statistics(query, summary, STATS_BOX_WIDTH))?;

    if !options.enabled {
        return Ok(());
    }

    let Some(chart) = PriceChart::fit_to_terminal(options, PriceChart::label_width(summary))
    else {
        warning_message!("Terminal is too small to draw a chart; showing statistics only.");
        return Ok(());
    };

    writeln!(out)?;
    writeln!(
        out,
        "{}{} {} ({} to {})",
        CHART,
        "Spot price".bold(),
        query.instance_type,
        summary.first_timestamp.format("%m-%d %H:%M"),
        summary.last_timestamp.format("%m-%d %H:%M UTC"),
    )?;
    for line in chart.lines(samples, summary, true) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summarize;
    use crate::types::ProductDescription;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn query() -> QueryParameters {
        QueryParameters {
            region: "us-east-1".into(),
            instance_type: "m5.large".into(),
            window_hours: 12,
            product_description: ProductDescription::default(),
            availability_zone: None,
            window_end: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn samples() -> Vec<PriceSample> {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        [0.0962, 0.0951, 0.0987, 0.0949]
            .iter()
            .enumerate()
            .map(|(i, p)| PriceSample::new(start + Duration::hours(i as i64 * 3), *p))
            .collect()
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(1234567, "1,234,567")]
    fn test_format_count(#[case] count: usize, #[case] expected: &str) {
        assert_eq!(format_count(count), expected);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0345), "$0.034500");
        assert_eq!(format_usd(1.5), "$1.500000");
    }

    #[test]
    fn test_render_contains_currency_statistics() {
        let samples = samples();
        let summary = summarize(&samples).unwrap();
        let options = ChartOptions {
            width: Some(40),
            height: Some(8),
            enabled: true,
        };
        let mut out = Vec::new();

        render(&mut out, &query(), &samples, &summary, &options).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains(&format_usd(summary.min)));
        assert!(output.contains(&format_usd(summary.max)));
        assert!(output.contains(&format_usd(summary.mean)));
        assert!(output.contains("m5.large"));
        assert!(output.contains("latest"));
    }

    #[test]
    fn test_render_without_chart() {
        let samples = samples();
        let summary = summarize(&samples).unwrap();
        let options = ChartOptions {
            enabled: false,
            ..ChartOptions::default()
        };
        let mut out = Vec::new();

        render(&mut out, &query(), &samples, &summary, &options).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains(&format_usd(summary.mean)));
        assert!(!output.contains('●'));
    }
}
