//! HTTP API for Sky Report.
//!
//! Parses and validates requests, then hands them to
//! [`skyreport_services::SkyReportService`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
