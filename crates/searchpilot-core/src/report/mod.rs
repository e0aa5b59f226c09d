mod field;
mod lab;

pub use field::FieldExtractor;
pub use lab::LabExtractor;

use crate::Result;
use crate::pagespeed::{PageSpeedResponse, ResponseReader};
use serde::{Deserialize, Serialize};

/// Field and lab metrics extracted from one PageSpeed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub field: Option<FieldMetrics>,
    pub lab: Option<LabMetrics>,
}

/// Real-user metrics from the Chrome UX Report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMetrics {
    pub cls: Option<FieldMetric>,
    pub ttfb: Option<FieldMetric>,
    pub fcp: Option<FieldMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMetric {
    pub percentile: Option<f64>,
    pub category: Option<String>,
}

/// Lighthouse scores (0-100) and formatted lab timings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabMetrics {
    pub performance: Option<u8>,
    pub seo: Option<u8>,
    pub accessibility: Option<u8>,
    pub best_practices: Option<u8>,
    pub fcp: Option<String>,
    pub lcp: Option<String>,
}

/// Colour band of a Lighthouse score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Good,
            50..=89 => ScoreBand::NeedsImprovement,
            _ => ScoreBand::Poor,
        }
    }
}

pub trait Extractor {
    type Output;

    /// `None` when the response carries no data for this metric group
    fn extract(&self, response: &PageSpeedResponse) -> Option<Self::Output>;
}

impl FieldMetrics {
    /// Rows in display order: key, label, metric
    pub fn rows(&self) -> [(&'static str, &'static str, Option<&FieldMetric>); 3] {
        [
            ("CLS", "Cumulative Layout Shift", self.cls.as_ref()),
            ("TTFB", "Time to First Byte", self.ttfb.as_ref()),
            ("FCP", "First Contentful Paint", self.fcp.as_ref()),
        ]
    }

    pub fn ttfb_percentile(&self) -> Option<f64> {
        self.ttfb.as_ref()?.percentile
    }

    pub fn cls_percentile(&self) -> Option<f64> {
        self.cls.as_ref()?.percentile
    }
}

impl LabMetrics {
    /// Scores in display order: label, score
    pub fn scores(&self) -> [(&'static str, Option<u8>); 4] {
        [
            ("PERFORMANCE", self.performance),
            ("SEO", self.seo),
            ("ACCESSIBILITY", self.accessibility),
            ("BEST PRACTICES", self.best_practices),
        ]
    }
}

impl Report {
    /// Build a report from a parsed PageSpeed response
    pub fn from_response(response: &PageSpeedResponse) -> Self {
        let report = Report {
            field: FieldExtractor.extract(response),
            lab: LabExtractor.extract(response),
        };

        tracing::debug!(
            "Extracted report (field: {}, lab: {})",
            report.field.is_some(),
            report.lab.is_some()
        );

        report
    }

    /// Build a report from raw PageSpeed JSON
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let response = ResponseReader::from_value(value)?;
        Ok(Self::from_response(&response))
    }
}
