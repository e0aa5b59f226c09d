use super::types::PageSpeedResponse;
use crate::Result;

pub struct ResponseReader;

impl ResponseReader {
    /// Parse a PageSpeed response from a JSON string
    pub fn from_str(content: &str) -> Result<PageSpeedResponse> {
        tracing::debug!("Parsing PageSpeed response from string");

        let response: PageSpeedResponse = serde_json::from_str(content)?;
        log_parsed(&response);

        Ok(response)
    }

    /// Convert an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<PageSpeedResponse> {
        let response: PageSpeedResponse = serde_json::from_value(value)?;
        log_parsed(&response);

        Ok(response)
    }
}

fn log_parsed(response: &PageSpeedResponse) {
    tracing::debug!(
        "Parsed PageSpeed response (field data: {}, lab data: {})",
        response
            .loading_experience
            .as_ref()
            .is_some_and(|l| l.metrics.is_some()),
        response
            .lighthouse_result
            .as_ref()
            .is_some_and(|l| l.categories.is_some())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let response = ResponseReader::from_str("{}").unwrap();
        assert!(response.loading_experience.is_none());
        assert!(response.lighthouse_result.is_none());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"{
            "id": "https://example.com/",
            "loadingExperience": {
                "id": "https://example.com/",
                "initial_url": "https://example.com/"
            },
            "lighthouseResult": {
                "lighthouseVersion": "12.0.0",
                "categories": {
                    "performance": {"id": "performance", "title": "Performance", "score": 0.87}
                },
                "audits": {
                    "first-contentful-paint": {"score": 0.9, "displayValue": "1.1 s", "numericValue": 1100.5}
                }
            }
        }"#;

        let response = ResponseReader::from_str(json).unwrap();
        assert!(response.loading_experience.unwrap().metrics.is_none());

        let lighthouse = response.lighthouse_result.unwrap();
        assert_eq!(lighthouse.category_score("performance"), Some(0.87));
        assert_eq!(lighthouse.category_score("seo"), None);
        assert_eq!(
            lighthouse.audit_display_value("first-contentful-paint"),
            Some("1.1 s")
        );
    }

    #[test]
    fn test_null_score_is_absent() {
        let json = r#"{"lighthouseResult": {"categories": {"seo": {"score": null}}}}"#;
        let response = ResponseReader::from_str(json).unwrap();
        assert_eq!(
            response.lighthouse_result.unwrap().category_score("seo"),
            None
        );
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(ResponseReader::from_str("[1, 2, 3]").is_err());
    }
}
