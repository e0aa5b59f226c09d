pub mod error;
pub mod pagespeed;
pub mod report;
pub mod request;
pub mod suggestions;

pub use error::{Error, Result};
pub use report::{FieldMetric, FieldMetrics, LabMetrics, Report, ScoreBand};
pub use request::{AnalysisRequest, Strategy};
pub use suggestions::{Suggestion, suggestions};
