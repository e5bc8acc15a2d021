use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::steps::PlanStep;

/// Receives every step of a planning run as it happens
pub trait PlanObserver: Send + Sync + std::fmt::Debug {
    fn on_step(&self, step: &PlanStep);
}

/// Forwards steps to `tracing` under the `tripagent::steps` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PlanObserver for TracingObserver {
    fn on_step(&self, step: &PlanStep) {
        let description = step.describe();
        if step.is_error() {
            warn!(target: "tripagent::steps", "{}", description);
        } else {
            info!(target: "tripagent::steps", "{}", description);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PlanObserver for NoopObserver {
    fn on_step(&self, _step: &PlanStep) {}
}

/// Keeps a copy of every step; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    steps: Arc<Mutex<Vec<PlanStep>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<PlanStep> {
        self.steps
            .lock()
            .map(|steps| steps.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.steps.lock().map(|steps| steps.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlanObserver for RecordingObserver {
    fn on_step(&self, step: &PlanStep) {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push(step.clone());
        }
    }
}

/// Steps of a single run, reported to the observer as they are added
#[derive(Debug)]
pub(crate) struct StepLog<'a> {
    observer: &'a dyn PlanObserver,
    steps: Vec<PlanStep>,
}

impl<'a> StepLog<'a> {
    pub(crate) fn new(observer: &'a dyn PlanObserver) -> Self {
        Self {
            observer,
            steps: Vec::new(),
        }
    }

    pub(crate) fn add_step(&mut self, step: PlanStep) {
        self.observer.on_step(&step);
        self.steps.push(step);
    }

    pub(crate) fn into_steps(self) -> Vec<PlanStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_shares_buffer() {
        let recorder = RecordingObserver::new();
        let handle = recorder.clone();
        let mut log = StepLog::new(&recorder);

        log.add_step(PlanStep::Failure {
            message: "timeout".to_string(),
        });

        assert_eq!(handle.len(), 1);
        assert_eq!(log.into_steps().len(), 1);
    }

    #[test]
    fn test_noop_observer_still_collects_steps() {
        let mut log = StepLog::new(&NoopObserver);
        log.add_step(PlanStep::Prompt {
            content: "Plan a trip".to_string(),
            system: None,
        });
        assert_eq!(log.into_steps().len(), 1);
    }
}
