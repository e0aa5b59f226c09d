use super::{Extractor, LabMetrics};
use crate::pagespeed::PageSpeedResponse;

pub struct LabExtractor;

impl Extractor for LabExtractor {
    type Output = LabMetrics;

    fn extract(&self, response: &PageSpeedResponse) -> Option<Self::Output> {
        let lighthouse = response.lighthouse_result.as_ref()?;
        // Lab data is only reported when Lighthouse produced categories
        lighthouse.categories.as_ref()?;

        tracing::debug!("Extracting lab metrics");

        let score = |name: &str| lighthouse.category_score(name).map(to_percent);
        let display = |name: &str| lighthouse.audit_display_value(name).map(str::to_string);

        Some(LabMetrics {
            performance: score("performance"),
            seo: score("seo"),
            accessibility: score("accessibility"),
            best_practices: score("best-practices"),
            fcp: display("first-contentful-paint"),
            lcp: display("largest-contentful-paint"),
        })
    }
}

/// Lighthouse score in [0, 1] to a rounded 0-100 integer
fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagespeed::ResponseReader;

    #[test]
    fn test_to_percent_rounding() {
        assert_eq!(to_percent(0.495), 50);
        assert_eq!(to_percent(0.994), 99);
        assert_eq!(to_percent(0.42), 42);
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(1.0), 100);
    }

    #[test]
    fn test_no_categories_is_absent() {
        let json = r#"{"lighthouseResult": {"audits": {}}}"#;
        let response = ResponseReader::from_str(json).unwrap();
        assert!(LabExtractor.extract(&response).is_none());
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let json = r#"{
            "lighthouseResult": {
                "categories": {"performance": {"score": 0.9}},
                "audits": {"largest-contentful-paint": {"displayValue": "2.4 s"}}
            }
        }"#;
        let response = ResponseReader::from_str(json).unwrap();
        let lab = LabExtractor.extract(&response).unwrap();

        assert_eq!(lab.performance, Some(90));
        assert_eq!(lab.seo, None);
        assert_eq!(lab.accessibility, None);
        assert_eq!(lab.best_practices, None);
        assert_eq!(lab.fcp, None);
        assert_eq!(lab.lcp.as_deref(), Some("2.4 s"));
    }
}
