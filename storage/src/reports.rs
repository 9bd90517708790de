//! In-memory report store.

use common::Report;
use dashmap::DashMap;
use uuid::Uuid;

/// Thread-safe registry of incident reports.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: DashMap<Uuid, Report>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a new report.
    pub fn create(
        &self,
        user_id: impl Into<String>,
        description: impl Into<String>,
        image_url: Option<String>,
    ) -> Report {
        let report = Report::new(user_id, description, image_url);
        self.reports.insert(report.id, report.clone());
        report
    }

    /// All reports, newest first.
    pub fn list(&self) -> Vec<Report> {
        let mut all: Vec<Report> = self
            .reports
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}
