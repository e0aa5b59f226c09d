//! Terminal rendering of a report in the supported output formats.

use crate::OutputFormat;
use clap::ValueEnum;
use console::{StyledObject, style};
use searchpilot_core::{AnalysisRequest, FieldMetric, Report, ScoreBand, Strategy, suggestions};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};

/// Shown instead of any metrics when a fetch fails
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch SEO data.";
pub const FIELD_UNAVAILABLE: &str = "Field metrics not available for this URL.";
pub const LAB_UNAVAILABLE: &str = "Lab metrics not available for this URL.";
const PLACEHOLDER: &str = "—";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Section {
    Field,
    Lab,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub collapsed: Vec<Section>,
}

impl RenderOptions {
    pub fn is_collapsed(&self, section: Section) -> bool {
        self.collapsed.contains(&section)
    }
}

/// Report together with the request it answers and its suggestions
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub url: &'a str,
    pub strategy: Strategy,
    pub report: &'a Report,
    pub suggestions: Vec<&'static str>,
}

impl<'a> ReportView<'a> {
    pub fn new(request: &'a AnalysisRequest, report: &'a Report) -> Self {
        Self {
            url: request.url(),
            strategy: request.strategy(),
            report,
            suggestions: suggestions(report).iter().map(|s| s.text()).collect(),
        }
    }
}

pub fn render<W: Write>(
    out: &mut W,
    view: &ReportView<'_>,
    format: OutputFormat,
    options: &RenderOptions,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(out, view),
        OutputFormat::Table => render_table(out, view),
        OutputFormat::Pretty => render_pretty(out, view, options),
    }
}

pub fn render_error<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", style(FETCH_ERROR_MESSAGE).red())
}

fn render_pretty<W: Write>(
    out: &mut W,
    view: &ReportView<'_>,
    options: &RenderOptions,
) -> io::Result<()> {
    let title = format!("SEO Report: {} [{}]", view.url, view.strategy.label());
    writeln!(out, "\n{}", style(&title).bold().cyan())?;
    writeln!(out, "{}", style("=".repeat(title.chars().count())).cyan())?;

    // Field section
    writeln!(out)?;
    match &view.report.field {
        Some(field) => {
            section_header(out, "Field Metrics (Real-User)", options.is_collapsed(Section::Field))?;
            if !options.is_collapsed(Section::Field) {
                for (_, label, metric) in field.rows() {
                    writeln!(
                        out,
                        "  {:<26} {:>8}  {}",
                        label,
                        format_percentile(metric),
                        style(metric.and_then(|m| m.category.as_deref()).unwrap_or(PLACEHOLDER))
                            .italic()
                    )?;
                }
            }
        }
        None => writeln!(out, "{}", style(FIELD_UNAVAILABLE).dim())?,
    }

    // Lab section
    writeln!(out)?;
    match &view.report.lab {
        Some(lab) => {
            section_header(out, "Lab Metrics (Lighthouse)", options.is_collapsed(Section::Lab))?;
            if !options.is_collapsed(Section::Lab) {
                for (label, score) in lab.scores() {
                    writeln!(out, "  {:<26} {:>8}", label, styled_score(score))?;
                }
                writeln!(
                    out,
                    "  {:<26} {:>8}",
                    "FCP (lab):",
                    lab.fcp.as_deref().unwrap_or(PLACEHOLDER)
                )?;
                writeln!(
                    out,
                    "  {:<26} {:>8}",
                    "LCP (lab):",
                    lab.lcp.as_deref().unwrap_or(PLACEHOLDER)
                )?;
            }
        }
        None => writeln!(out, "{}", style(LAB_UNAVAILABLE).dim())?,
    }

    if !view.suggestions.is_empty() {
        writeln!(out, "\n{}", style("What to Improve Next:").bold())?;
        for hint in &view.suggestions {
            writeln!(out, "  • {}", hint)?;
        }
    }

    writeln!(out)
}

fn section_header<W: Write>(out: &mut W, title: &str, collapsed: bool) -> io::Result<()> {
    if collapsed {
        writeln!(out, "{} {} {}", style("▸").dim(), style(title).bold(), style("(collapsed)").dim())
    } else {
        writeln!(out, "{} {}", style("▾").dim(), style(title).bold())
    }
}

fn styled_score(score: Option<u8>) -> StyledObject<String> {
    match score {
        Some(s) => match ScoreBand::for_score(s) {
            ScoreBand::Good => style(s.to_string()).green().bold(),
            ScoreBand::NeedsImprovement => style(s.to_string()).yellow().bold(),
            ScoreBand::Poor => style(s.to_string()).red().bold(),
        },
        None => style(PLACEHOLDER.to_string()).dim(),
    }
}

/// Whole percentiles print without decimals, CLS-style fractions keep two
fn format_percentile(metric: Option<&FieldMetric>) -> String {
    match metric.and_then(|m| m.percentile) {
        Some(p) if p.fract() == 0.0 => format!("{}", p as i64),
        Some(p) => format!("{:.2}", p),
        None => PLACEHOLDER.to_string(),
    }
}

fn render_json<W: Write>(out: &mut W, view: &ReportView<'_>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(view)?;
    writeln!(out, "{}", json)
}

fn render_table<W: Write>(out: &mut W, view: &ReportView<'_>) -> io::Result<()> {
    let cell = |value: Option<String>| value.unwrap_or_default();

    writeln!(out, "Metric,Value")?;
    row(out, "URL", view.url)?;
    row(out, "Strategy", view.strategy.as_str())?;

    match &view.report.field {
        Some(field) => {
            for (key, _, metric) in field.rows() {
                row(
                    out,
                    &format!("{} Percentile", key),
                    &cell(metric.and_then(|m| m.percentile).map(|p| p.to_string())),
                )?;
                row(
                    out,
                    &format!("{} Category", key),
                    &cell(metric.and_then(|m| m.category.clone())),
                )?;
            }
        }
        None => row(out, "Field metrics", "not available")?,
    }

    match &view.report.lab {
        Some(lab) => {
            for (label, score) in lab.scores() {
                row(out, &format!("{} Score", label), &cell(score.map(|s| s.to_string())))?;
            }
            row(out, "FCP (lab)", &cell(lab.fcp.clone()))?;
            row(out, "LCP (lab)", &cell(lab.lcp.clone()))?;
        }
        None => row(out, "Lab metrics", "not available")?,
    }

    for hint in &view.suggestions {
        row(out, "Suggestion", hint)?;
    }

    Ok(())
}

fn row<W: Write>(out: &mut W, metric: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{},{}", csv_field(metric), csv_field(value))
}

/// Quote a field containing a separator, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchpilot_core::{FieldMetrics, LabMetrics};

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("https://example.com", Strategy::Mobile).unwrap()
    }

    fn rendered(report: &Report, format: OutputFormat, options: &RenderOptions) -> String {
        let request = request();
        let view = ReportView::new(&request, report);
        let mut out = Vec::new();
        render(&mut out, &view, format, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn lab_only() -> Report {
        Report {
            field: None,
            lab: Some(LabMetrics {
                performance: Some(42),
                seo: Some(100),
                accessibility: Some(100),
                best_practices: None,
                fcp: Some("1.2 s".to_string()),
                lcp: None,
            }),
        }
    }

    #[test]
    fn test_pretty_without_field_data() {
        let output = rendered(&lab_only(), OutputFormat::Pretty, &RenderOptions::default());

        assert!(output.contains(FIELD_UNAVAILABLE));
        assert!(output.contains("Lab Metrics (Lighthouse)"));
        assert!(output.contains("PERFORMANCE"));
        assert!(output.contains("42"));
        assert!(output.contains("BEST PRACTICES"));
        assert!(output.contains("1.2 s"));
        assert!(output.contains("What to Improve Next"));
        assert!(output.contains("Reduce JavaScript bundle size"));
    }

    #[test]
    fn test_pretty_placeholders_for_missing_sub_metrics() {
        let report = Report {
            field: Some(FieldMetrics {
                cls: Some(FieldMetric {
                    percentile: Some(0.0),
                    category: None,
                }),
                ..Default::default()
            }),
            lab: None,
        };

        let output = rendered(&report, OutputFormat::Pretty, &RenderOptions::default());

        assert!(output.contains("Cumulative Layout Shift"));
        assert!(output.contains("Time to First Byte"));
        assert!(output.contains("First Contentful Paint"));
        assert!(output.contains(PLACEHOLDER));
        assert!(output.contains(LAB_UNAVAILABLE));
        assert!(!output.contains("What to Improve Next"));
    }

    #[test]
    fn test_collapsed_section_hides_rows() {
        let options = RenderOptions {
            collapsed: vec![Section::Lab],
        };
        let output = rendered(&lab_only(), OutputFormat::Pretty, &options);

        assert!(output.contains("Lab Metrics (Lighthouse)"));
        assert!(output.contains("(collapsed)"));
        assert!(!output.contains("PERFORMANCE"));
    }

    #[test]
    fn test_json_output() {
        let output = rendered(&lab_only(), OutputFormat::Json, &RenderOptions::default());
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["strategy"], "mobile");
        assert!(json["report"]["field"].is_null());
        assert_eq!(json["report"]["lab"]["performance"], 42);
        assert_eq!(json["suggestions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_table_output() {
        let output = rendered(&lab_only(), OutputFormat::Table, &RenderOptions::default());

        assert!(output.starts_with("Metric,Value\n"));
        assert!(output.contains("Strategy,mobile\n"));
        assert!(output.contains("PERFORMANCE Score,42\n"));
        assert!(output.contains("BEST PRACTICES Score,\n"));
        assert!(output.contains("Field metrics,not available\n"));
        assert!(!output.contains("CLS Percentile"));
        assert!(!output.contains("Lab metrics,not available"));

        // Suggestion text contains commas, so it is quoted
        assert!(output.contains(
            "Suggestion,\"Reduce JavaScript bundle size (code-split or tree-shake), and enable gzip/Brotli compression.\"\n"
        ));
    }

    #[test]
    fn test_table_without_lab_data() {
        let report = Report {
            field: Some(FieldMetrics::default()),
            lab: None,
        };
        let output = rendered(&report, OutputFormat::Table, &RenderOptions::default());

        assert!(output.contains("CLS Percentile,\n"));
        assert!(output.contains("Lab metrics,not available\n"));
        assert!(!output.contains("Suggestion,"));
    }

    #[test]
    fn test_table_quotes_url() {
        let request =
            AnalysisRequest::new("https://example.com/?tags=a,b&q=\"x\"", Strategy::Desktop).unwrap();
        let report = lab_only();
        let view = ReportView::new(&request, &report);
        let mut out = Vec::new();
        render(&mut out, &view, OutputFormat::Table, &RenderOptions::default()).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("URL,\"https://example.com/?tags=a,b&q=\"\"x\"\"\"\n"));
        assert!(output.contains("Strategy,desktop\n"));
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_percentile() {
        let metric = |p| FieldMetric {
            percentile: Some(p),
            category: None,
        };
        assert_eq!(format_percentile(Some(&metric(2500.0))), "2500");
        assert_eq!(format_percentile(Some(&metric(0.05))), "0.05");
        assert_eq!(format_percentile(None), PLACEHOLDER);
    }
}
