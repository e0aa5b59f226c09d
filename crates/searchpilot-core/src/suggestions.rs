use crate::report::Report;
use serde::{Deserialize, Serialize};
use std::fmt;

/// TTFB percentile (ms) above which server caching is recommended
const SLOW_TTFB_MS: f64 = 2000.0;

/// Improvement hint derived from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    ReduceBundleSize,
    DeferNonCriticalAssets,
    UniqueTitleAndDescription,
    AccessibleLabels,
    ModernImageFormats,
    ServerCaching,
    ReserveLayoutSpace,
}

impl Suggestion {
    pub fn text(&self) -> &'static str {
        match self {
            Suggestion::ReduceBundleSize => {
                "Reduce JavaScript bundle size (code-split or tree-shake), and enable gzip/Brotli compression."
            }
            Suggestion::DeferNonCriticalAssets => {
                "Defer non-critical JavaScript and CSS, and use a CDN to serve static assets faster."
            }
            Suggestion::UniqueTitleAndDescription => {
                "Ensure each page has a unique title (< 60 chars) and meta description (≈ 150 chars)."
            }
            Suggestion::AccessibleLabels => {
                "Add appropriate ARIA labels, ensure form controls have associated labels, and provide alt text for all images."
            }
            Suggestion::ModernImageFormats => {
                "Serve images in modern formats (WebP/AVIF), and avoid deprecated APIs (check console warnings)."
            }
            Suggestion::ServerCaching => {
                "Improve server response time by caching at the CDN or upgrading your hosting plan."
            }
            Suggestion::ReserveLayoutSpace => {
                "Prevent layout shifts by reserving space for images and embeds via explicit width & height."
            }
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Derive improvement hints from a report.
///
/// Rules are independent and evaluated in a fixed order, so the same report
/// always yields the same list. Absent values never trigger a rule.
pub fn suggestions(report: &Report) -> Vec<Suggestion> {
    let mut hints = Vec::new();

    if let Some(lab) = &report.lab {
        match lab.performance {
            Some(p) if p < 50 => hints.push(Suggestion::ReduceBundleSize),
            Some(p) if p < 90 => hints.push(Suggestion::DeferNonCriticalAssets),
            _ => {}
        }

        if lab.seo.is_some_and(|s| s < 100) {
            hints.push(Suggestion::UniqueTitleAndDescription);
        }
        if lab.accessibility.is_some_and(|s| s < 100) {
            hints.push(Suggestion::AccessibleLabels);
        }
        if lab.best_practices.is_some_and(|s| s < 100) {
            hints.push(Suggestion::ModernImageFormats);
        }
    }

    if let Some(field) = &report.field {
        if field.ttfb_percentile().is_some_and(|t| t > SLOW_TTFB_MS) {
            hints.push(Suggestion::ServerCaching);
        }
        if field.cls_percentile().is_some_and(|c| c > 0.0) {
            hints.push(Suggestion::ReserveLayoutSpace);
        }
    }

    tracing::debug!("Derived {} suggestions", hints.len());

    hints
}
