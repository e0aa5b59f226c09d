use super::{Extractor, FieldMetric, FieldMetrics};
use crate::pagespeed::{MetricValue, PageSpeedResponse};

pub struct FieldExtractor;

impl Extractor for FieldExtractor {
    type Output = FieldMetrics;

    fn extract(&self, response: &PageSpeedResponse) -> Option<Self::Output> {
        let metrics = response.loading_experience.as_ref()?.metrics.as_ref()?;

        tracing::debug!("Extracting field metrics");

        Some(FieldMetrics {
            cls: metrics.cumulative_layout_shift.as_ref().map(to_field_metric),
            ttfb: metrics.time_to_first_byte.as_ref().map(to_field_metric),
            fcp: metrics.first_contentful_paint.as_ref().map(to_field_metric),
        })
    }
}

fn to_field_metric(value: &MetricValue) -> FieldMetric {
    FieldMetric {
        percentile: value.percentile,
        category: value.category.clone(),
    }
}
