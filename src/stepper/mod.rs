// Step completion bookkeeping for a wizard instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which steps have been visited/completed and which one was last durably
/// saved.
///
/// Invariants:
/// - whenever `is_current_step_saved` is true, `last_saved_step` equals the
///   `current_step` value at the moment the flag was set;
/// - `completed_steps` only grows (membership matters, not order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepProgress {
    current_step: usize,
    completed_steps: BTreeSet<usize>,
    is_current_step_saved: bool,
    last_saved_step: Option<usize>,
}

impl StepProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn is_step_completed(&self, step: usize) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn is_current_step_saved(&self) -> bool {
        self.is_current_step_saved
    }

    pub fn last_saved_step(&self) -> Option<usize> {
        self.last_saved_step
    }

    /// Enter a step. Entering any step, even a previously visited one, marks
    /// it provisionally unsaved until explicitly confirmed saved again.
    pub fn set_current_step(&mut self, step: usize) {
        self.current_step = step;
        self.is_current_step_saved = false;
    }

    /// Idempotently record a step as completed.
    pub fn mark_step_completed(&mut self, step: usize) {
        self.completed_steps.insert(step);
    }

    /// Confirm (or un-confirm) that the current step was durably saved.
    /// `true` also records the current step as the last saved one; `false`
    /// only clears the flag and leaves `last_saved_step` untouched.
    pub fn set_current_step_saved(&mut self, saved: bool) {
        self.is_current_step_saved = saved;
        if saved {
            self.last_saved_step = Some(self.current_step);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
