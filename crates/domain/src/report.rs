//! Brand analysis reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company details collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyData {
    /// Company name (the only required field).
    pub name: String,
    /// Company website.
    #[serde(default)]
    pub url: Option<String>,
    /// Headquarters location.
    #[serde(default)]
    pub location: Option<String>,
    /// Industry sector.
    #[serde(default)]
    pub industry: Option<String>,
}

impl CompanyData {
    /// Creates intake data with just a company name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            location: None,
            industry: None,
        }
    }
}

/// Lifecycle of an analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Queued, analysis not yet started.
    #[default]
    Pending,
    /// Analysis in progress.
    Processing,
    /// Playbook ready.
    Completed,
    /// Analysis failed.
    Error,
}

impl ReportStatus {
    /// True once the report will no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// A brand analysis report as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report id.
    pub id: String,
    /// The company the report covers.
    pub company: CompanyData,
    /// Current lifecycle status.
    pub status: ReportStatus,
    /// When the analysis was requested.
    pub created_at: DateTime<Utc>,
    /// When the analysis finished, for completed reports.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Rendered playbook, present once completed.
    #[serde(default)]
    pub playbook_html: Option<String>,
    /// Failure description, present for errored reports.
    #[serde(default)]
    pub error: Option<String>,
}

impl Report {
    /// Creates a pending report for a company.
    #[must_use]
    pub fn pending(id: impl Into<String>, company: CompanyData, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            company,
            status: ReportStatus::Pending,
            created_at,
            completed_at: None,
            playbook_html: None,
            error: None,
        }
    }

    /// Marks the report as processing.
    #[must_use]
    pub fn processing(mut self) -> Self {
        self.status = ReportStatus::Processing;
        self
    }

    /// Marks the report completed with its playbook.
    #[must_use]
    pub fn completed(mut self, playbook_html: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.status = ReportStatus::Completed;
        self.playbook_html = Some(playbook_html.into());
        self.completed_at = Some(at);
        self.error = None;
        self
    }

    /// Marks the report failed.
    #[must_use]
    pub fn failed(mut self, error: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.status = ReportStatus::Error;
        self.error = Some(error.into());
        self.completed_at = Some(at);
        self
    }
}
