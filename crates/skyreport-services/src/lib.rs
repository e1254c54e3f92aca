//! Sky Report verdicts: combines weather and sky darkness into a recommendation.

pub mod recommendation;
pub mod report;

pub use recommendation::recommend;
pub use report::{DataSource, SkyReportService, Verdict};
