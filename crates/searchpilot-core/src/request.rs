use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device profile PageSpeed emulates for the analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }

    /// The other strategy
    pub fn toggle(self) -> Self {
        match self {
            Strategy::Mobile => Strategy::Desktop,
            Strategy::Desktop => Strategy::Mobile,
        }
    }

    /// Capitalized label used in headings ("Mobile", "Desktop")
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Mobile => "Mobile",
            Strategy::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Strategy::Mobile),
            "desktop" => Ok(Strategy::Desktop),
            other => Err(Error::InvalidStrategy(other.to_string())),
        }
    }
}

/// A single (url, strategy) analysis the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    url: String,
    strategy: Strategy,
}

impl AnalysisRequest {
    /// Build a request, rejecting blank URLs
    pub fn new(url: impl Into<String>, strategy: Strategy) -> Result<Self> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        Ok(Self { url, strategy })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Same URL analyzed with a different strategy
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            url: self.url.clone(),
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("mobile".parse::<Strategy>().unwrap(), Strategy::Mobile);
        assert_eq!("Desktop".parse::<Strategy>().unwrap(), Strategy::Desktop);
        assert!("tablet".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_toggle() {
        assert_eq!(Strategy::Mobile.toggle(), Strategy::Desktop);
        assert_eq!(Strategy::Desktop.toggle(), Strategy::Mobile);
        assert_eq!(Strategy::default(), Strategy::Mobile);
    }

    #[test]
    fn test_request_rejects_blank_url() {
        assert!(matches!(
            AnalysisRequest::new("   ", Strategy::Mobile),
            Err(Error::EmptyUrl)
        ));
    }

    #[test]
    fn test_request_trims_url() {
        let req = AnalysisRequest::new(" https://example.com ", Strategy::Desktop).unwrap();
        assert_eq!(req.url(), "https://example.com");
        assert_eq!(req.strategy(), Strategy::Desktop);
        assert_eq!(req.with_strategy(Strategy::Mobile).strategy(), Strategy::Mobile);
    }
}
