use std::time::Instant;

use crate::state::SagaState;

/// Status of a step in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Step executed successfully.
    Executed,
    /// Step failed during execution.
    Failed,
    /// Step was compensated successfully.
    Compensated,
    /// Step compensation failed.
    CompensationFailed,
}

/// Record of a step's execution in the saga.
#[derive(Debug)]
pub struct StepRecord {
    /// Name of the step.
    pub name: String,
    /// Current status.
    pub status: StepStatus,
    /// When the step started executing.
    pub started_at: Instant,
    /// When the step completed (execution or compensation).
    pub completed_at: Option<Instant>,
    /// Description of compensation (if applicable).
    pub compensation_description: Option<String>,
}

/// Audit log of one saga run: the attempted steps and the state transitions.
#[derive(Debug, Default)]
pub struct SagaAuditLog {
    records: Vec<StepRecord>,
    state: SagaState,
    transitions: Vec<(SagaState, SagaState)>,
    compensation_order: Vec<usize>,
}

impl SagaAuditLog {
    /// Create a new empty audit log in the [`SagaState::Pending`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step execution starting and return its record index.
    pub(crate) fn record_start(&mut self, name: &str) -> usize {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
            compensation_description: None,
        });
        self.records.len() - 1
    }

    pub(crate) fn record_failure(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Failed;
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn record_success(&mut self, index: usize, compensation_description: String) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Executed;
            record.completed_at = Some(Instant::now());
            record.compensation_description = Some(compensation_description);
        }
    }

    pub(crate) fn record_compensated(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Compensated;
            record.completed_at = Some(Instant::now());
            self.compensation_order.push(index);
        }
    }

    pub(crate) fn record_compensation_failed(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::CompensationFailed;
            record.completed_at = Some(Instant::now());
            self.compensation_order.push(index);
        }
    }

    pub(crate) fn transition_to(&mut self, next: SagaState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal saga transition {} -> {next}",
            self.state
        );
        self.transitions.push((self.state, next));
        self.state = next;
    }

    /// Get all records in the audit log.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// State the run ended in.
    #[must_use]
    pub fn final_state(&self) -> SagaState {
        self.state
    }

    /// Every transition taken, in order.
    #[must_use]
    pub fn transitions(&self) -> &[(SagaState, SagaState)] {
        &self.transitions
    }

    /// Names of the steps compensation was attempted on, in the order it ran.
    #[must_use]
    pub fn compensation_order(&self) -> Vec<&str> {
        self.compensation_order
            .iter()
            .filter_map(|&index| self.records.get(index))
            .map(|record| record.name.as_str())
            .collect()
    }

    /// Get a summary of the saga execution for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Compensated => "↩",
                StepStatus::CompensationFailed => "⚠",
            };
            lines.push(format!("{status} {}", record.name));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_audit_log_is_empty_and_pending() {
        let log = SagaAuditLog::new();
        assert!(log.records().is_empty());
        assert!(log.transitions().is_empty());
        assert_eq!(log.final_state(), SagaState::Pending);
    }

    #[test]
    fn record_start_adds_step_with_executed_status() {
        let mut log = SagaAuditLog::new();
        let index = log.record_start("test_step");

        assert_eq!(index, 0);
        assert_eq!(log.records()[0].name, "test_step");
        assert_eq!(log.records()[0].status, StepStatus::Executed);
        assert!(log.records()[0].completed_at.is_none());
    }

    #[test]
    fn record_failure_updates_indexed_step() {
        let mut log = SagaAuditLog::new();
        let index = log.record_start("step_1");
        log.record_failure(index);

        assert_eq!(log.records()[0].status, StepStatus::Failed);
        assert!(log.records()[0].completed_at.is_some());
    }

    #[test]
    fn record_success_stores_description() {
        let mut log = SagaAuditLog::new();
        let index = log.record_start("step_1");
        log.record_success(index, "undo step_1".to_string());

        assert_eq!(
            log.records()[0].compensation_description.as_deref(),
            Some("undo step_1")
        );
    }

    #[test]
    fn duplicate_names_are_tracked_independently() {
        let mut log = SagaAuditLog::new();
        let first = log.record_start("same");
        log.record_success(first, "undo".to_string());
        let second = log.record_start("same");
        log.record_success(second, "undo".to_string());

        log.record_compensated(second);

        assert_eq!(log.records()[0].status, StepStatus::Executed);
        assert_eq!(log.records()[1].status, StepStatus::Compensated);
    }

    #[test]
    fn compensation_order_follows_call_order() {
        let mut log = SagaAuditLog::new();
        for name in ["a", "b", "c"] {
            let index = log.record_start(name);
            log.record_success(index, "undo".to_string());
        }

        log.record_compensated(2);
        log.record_compensation_failed(1);
        log.record_compensated(0);

        assert_eq!(log.compensation_order(), vec!["c", "b", "a"]);
    }

    #[test]
    fn transitions_are_recorded_in_order() {
        let mut log = SagaAuditLog::new();
        log.transition_to(SagaState::Running);
        log.transition_to(SagaState::Compensating);
        log.transition_to(SagaState::RolledBack);

        assert_eq!(
            log.transitions(),
            &[
                (SagaState::Pending, SagaState::Running),
                (SagaState::Running, SagaState::Compensating),
                (SagaState::Compensating, SagaState::RolledBack),
            ]
        );
        assert_eq!(log.final_state(), SagaState::RolledBack);
    }

    #[test]
    fn summary_shows_every_status() {
        let mut log = SagaAuditLog::new();
        let a = log.record_start("compensated_step");
        log.record_success(a, "undo".to_string());
        log.record_compensated(a);
        let b = log.record_start("comp_failed_step");
        log.record_success(b, "undo".to_string());
        log.record_compensation_failed(b);
        let c = log.record_start("failed_step");
        log.record_failure(c);
        let d = log.record_start("executed_step");
        log.record_success(d, "undo".to_string());

        let summary = log.summary();
        assert!(summary.contains("↩ compensated_step"));
        assert!(summary.contains("⚠ comp_failed_step"));
        assert!(summary.contains("✗ failed_step"));
        assert!(summary.contains("✓ executed_step"));
    }
}
