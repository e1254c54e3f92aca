//! Application state for the HTTP server.

use skyreport_services::SkyReportService;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SkyReportService>,
}

impl AppState {
    pub fn new(service: SkyReportService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
