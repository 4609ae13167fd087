//! Simulated brand analysis.
//!
//! The real analysis backend is external; the client drives a report
//! through pending → processing → completed on logical ticks while the
//! loading screen rotates through stage messages. Everything is
//! counter-based so tests control the pacing exactly.

use dreamtrue_domain::{CompanyData, Report, generate_id};

use crate::ports::Clock;
use crate::store::{Action, SessionStore};

/// One rotating loading-screen message and how long it stays up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisStage {
    /// The message shown while this stage is current.
    pub message: String,
    /// Logical ticks the message stays on screen.
    pub duration_ticks: u32,
}

impl AnalysisStage {
    /// Creates a stage.
    #[must_use]
    pub fn new(message: impl Into<String>, duration_ticks: u32) -> Self {
        Self {
            message: message.into(),
            duration_ticks: duration_ticks.max(1),
        }
    }
}

/// Progress reported after each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisProgress {
    /// The stage message currently on screen.
    pub message: String,
    /// Completion percentage (0..=100).
    pub percent: u8,
    /// True once the report completed.
    pub finished: bool,
}

/// Drives one report through the simulated analysis.
#[derive(Debug)]
pub struct AnalysisSimulation {
    report: Report,
    stages: Vec<AnalysisStage>,
    total_ticks: u32,
    elapsed: u32,
    playbook_html: String,
    finished: bool,
}

impl AnalysisSimulation {
    /// Queues a report for the company and registers it with the store
    /// as the current report.
    #[must_use]
    pub fn start(
        store: &SessionStore,
        clock: &dyn Clock,
        company: CompanyData,
        stages: Vec<AnalysisStage>,
        total_ticks: u32,
        playbook_html: impl Into<String>,
    ) -> Self {
        let report = Report::pending(generate_id(), company, clock.now());
        store.dispatch(Action::AddReport(report.clone()));
        store.dispatch(Action::SetCurrentReport(report.clone()));
        tracing::info!(report = %report.id, company = %report.company.name, "analysis queued");

        Self {
            report,
            stages,
            total_ticks: total_ticks.max(1),
            elapsed: 0,
            playbook_html: playbook_html.into(),
            finished: false,
        }
    }

    /// The id of the report being driven.
    #[must_use]
    pub fn report_id(&self) -> &str {
        &self.report.id
    }

    /// True once the report completed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the simulation by one logical tick, publishing report
    /// status changes through the store. Ticking past completion is a
    /// no-op that keeps reporting the final state.
    pub fn tick(&mut self, store: &SessionStore, clock: &dyn Clock) -> AnalysisProgress {
        if self.finished {
            return self.progress();
        }

        if self.elapsed == 0 {
            self.report = self.report.clone().processing();
            store.dispatch(Action::UpdateReport(self.report.clone()));
        }
        self.elapsed += 1;

        if self.elapsed >= self.total_ticks {
            self.report = self
                .report
                .clone()
                .completed(self.playbook_html.clone(), clock.now());
            store.dispatch(Action::UpdateReport(self.report.clone()));
            self.finished = true;
            tracing::info!(report = %self.report.id, "analysis completed");
        }

        self.progress()
    }

    fn progress(&self) -> AnalysisProgress {
        let percent = (u64::from(self.elapsed.min(self.total_ticks)) * 100
            / u64::from(self.total_ticks)) as u8;
        AnalysisProgress {
            message: self.message_at(self.elapsed).to_string(),
            percent,
            finished: self.finished,
        }
    }

    /// The stage message on screen at a given tick; stages rotate
    /// cyclically for as long as the analysis runs.
    fn message_at(&self, tick: u32) -> &str {
        let cycle: u32 = self.stages.iter().map(|s| s.duration_ticks).sum();
        if cycle == 0 {
            return "";
        }
        let mut position = tick % cycle;
        for stage in &self.stages {
            if position < stage.duration_ticks {
                return &stage.message;
            }
            position -= stage.duration_ticks;
        }
        ""
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use dreamtrue_domain::ReportStatus;
    use pretty_assertions::assert_eq;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).single().unwrap())
    }

    fn stages() -> Vec<AnalysisStage> {
        vec![
            AnalysisStage::new("Reading between the lines of market data.", 2),
            AnalysisStage::new("Turning data chaos into strategic gold.", 2),
        ]
    }

    #[test]
    fn test_analysis_runs_pending_processing_completed() {
        let store = SessionStore::new();
        let clock = clock();
        let mut sim = AnalysisSimulation::start(
            &store,
            &clock,
            CompanyData::named("Acme"),
            stages(),
            3,
            "<h1>Acme playbook</h1>",
        );

        let state = store.snapshot();
        assert_eq!(state.reports.len(), 1);
        assert_eq!(state.reports[0].status, ReportStatus::Pending);

        let progress = sim.tick(&store, &clock);
        assert!(!progress.finished);
        assert_eq!(
            store.snapshot().reports[0].status,
            ReportStatus::Processing
        );

        sim.tick(&store, &clock);
        let progress = sim.tick(&store, &clock);
        assert!(progress.finished);
        assert_eq!(progress.percent, 100);

        let report = &store.snapshot().reports[0];
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.playbook_html.as_deref(), Some("<h1>Acme playbook</h1>"));
        assert_eq!(report.completed_at, Some(clock.now()));
    }

    #[test]
    fn test_stage_messages_rotate_cyclically() {
        let store = SessionStore::new();
        let clock = clock();
        let mut sim = AnalysisSimulation::start(
            &store,
            &clock,
            CompanyData::named("Acme"),
            stages(),
            100,
            "<p>done</p>",
        );

        let first = sim.tick(&store, &clock).message;
        sim.tick(&store, &clock);
        let third = sim.tick(&store, &clock).message;
        assert_ne!(first, third);

        // One full cycle later the first message is back.
        sim.tick(&store, &clock);
        let fifth = sim.tick(&store, &clock).message;
        assert_eq!(fifth, first);
    }

    #[test]
    fn test_tick_after_completion_is_stable() {
        let store = SessionStore::new();
        let clock = clock();
        let mut sim = AnalysisSimulation::start(
            &store,
            &clock,
            CompanyData::named("Acme"),
            stages(),
            1,
            "<p>done</p>",
        );

        let done = sim.tick(&store, &clock);
        let again = sim.tick(&store, &clock);
        assert_eq!(done, again);
        assert_eq!(store.snapshot().reports.len(), 1);
    }

    #[test]
    fn test_current_report_tracks_completion() {
        let store = SessionStore::new();
        let clock = clock();
        let mut sim = AnalysisSimulation::start(
            &store,
            &clock,
            CompanyData::named("Acme"),
            stages(),
            1,
            "<p>done</p>",
        );
        sim.tick(&store, &clock);

        let current = store.snapshot().current_report.unwrap();
        assert_eq!(current.status, ReportStatus::Completed);
    }
}
