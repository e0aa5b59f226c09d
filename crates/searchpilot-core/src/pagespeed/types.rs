//! Subset of the PageSpeed Insights v5 `runPagespeed` response that the
//! report reads. Every level is optional and unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level PageSpeed response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpeedResponse {
    #[serde(rename = "loadingExperience", skip_serializing_if = "Option::is_none")]
    pub loading_experience: Option<LoadingExperience>,
    #[serde(rename = "lighthouseResult", skip_serializing_if = "Option::is_none")]
    pub lighthouse_result: Option<LighthouseResult>,
}

/// Chrome UX Report data for the URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadingExperience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LoadingMetrics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadingMetrics {
    #[serde(
        rename = "CUMULATIVE_LAYOUT_SHIFT_SCORE",
        skip_serializing_if = "Option::is_none"
    )]
    pub cumulative_layout_shift: Option<MetricValue>,
    #[serde(
        rename = "EXPERIMENTAL_TIME_TO_FIRST_BYTE",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_to_first_byte: Option<MetricValue>,
    #[serde(
        rename = "FIRST_CONTENTFUL_PAINT_MS",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_contentful_paint: Option<MetricValue>,
}

/// One field metric: 75th percentile plus the FAST/AVERAGE/SLOW bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Lighthouse lab run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LighthouseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<HashMap<String, Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audits: Option<HashMap<String, Audit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Audit {
    #[serde(rename = "displayValue", skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl LighthouseResult {
    /// Score of a category such as `performance` or `best-practices`
    pub fn category_score(&self, name: &str) -> Option<f64> {
        self.categories.as_ref()?.get(name)?.score
    }

    /// Upstream-formatted display value of an audit, e.g. "1.2 s"
    pub fn audit_display_value(&self, name: &str) -> Option<&str> {
        self.audits.as_ref()?.get(name)?.display_value.as_deref()
    }
}
