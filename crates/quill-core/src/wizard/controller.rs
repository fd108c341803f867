//! Transition controller: current step, completion flags and navigation.

use std::sync::Arc;

use log::debug;
use serde::Serialize;

use super::{Outcome, Rejection, StepDefinition, WizardData, WizardDefinition};
use crate::models::StepId;

/// One running instance of a wizard definition.
///
/// The current index is always in range; every navigation method returns an
/// [`Outcome`] and none of them can fail or panic.
#[derive(Debug, Clone)]
pub struct Wizard {
    definition: Arc<WizardDefinition>,
    current: usize,
    data: WizardData,
    completed: Vec<bool>,
}

/// Serializable view of a wizard for rendering and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub wizard: String,
    pub current: StepId,
    pub position: usize,
    pub total: usize,
    pub steps: Vec<StepSnapshot>,
    pub data: WizardData,
}

/// Per-step part of a [`WizardSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub id: StepId,
    pub title: String,
    pub completed: bool,
    pub current: bool,
    /// Guard requirement, `None` for unguarded steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    pub satisfied: bool,
}

impl Wizard {
    /// Start a session on the first step with empty data.
    pub fn new(definition: Arc<WizardDefinition>) -> Self {
        let completed = vec![false; definition.step_count()];
        Self {
            definition,
            current: 0,
            data: WizardData::new(),
            completed,
        }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.definition.steps()[self.current]
    }

    pub fn current_id(&self) -> &StepId {
        &self.current_step().id
    }

    pub fn data(&self) -> &WizardData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut WizardData {
        &mut self.data
    }

    /// Whether the step at `index` was ever left forward with its guard satisfied.
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// The current step has no successor.
    pub fn is_terminal(&self) -> bool {
        self.current == self.definition.last_index()
    }

    /// Whether `go_next` would move, for enabling a "next" control up front.
    pub fn can_go_next(&self) -> bool {
        !self.is_terminal() && self.current_step().is_satisfied(&self.data)
    }

    /// Whether `go_to(target)` would move or stay on an already reached step.
    pub fn can_reach(&self, target: &str) -> bool {
        match self.definition.index_of(target) {
            Some(index) if index <= self.current => true,
            Some(index) => self.definition.first_blocked_before(index, &self.data).is_none(),
            None => false,
        }
    }

    /// Advance one step if the current step's guard holds.
    pub fn go_next(&mut self) -> Outcome {
        if self.is_terminal() {
            return Outcome::Rejected(Rejection::AtBoundary {
                step: self.current_id().clone(),
            });
        }

        let step = self.current_step();
        if !step.is_satisfied(&self.data) {
            let reason = step
                .guard
                .as_ref()
                .map(|g| g.description().to_string())
                .unwrap_or_default();
            return Outcome::Rejected(Rejection::GuardRejected {
                step: step.id.clone(),
                reason,
            });
        }

        self.completed[self.current] = true;
        self.move_to(self.current + 1)
    }

    /// Go back one step. Never guarded.
    pub fn go_previous(&mut self) -> Outcome {
        if self.current == 0 {
            return Outcome::Rejected(Rejection::AtBoundary {
                step: self.current_id().clone(),
            });
        }
        self.move_to(self.current - 1)
    }

    /// Jump to `target`.
    ///
    /// Steps at or before the current one are always reachable. Later steps
    /// are reachable only when every step before the target (the first one
    /// included) is satisfied by the current data.
    pub fn go_to(&mut self, target: &str) -> Outcome {
        let Some(index) = self.definition.index_of(target) else {
            return Outcome::Rejected(Rejection::InvalidTarget {
                target: target.to_string(),
            });
        };

        if index > self.current {
            if let Some(blocked) = self.definition.first_blocked_before(index, &self.data) {
                return Outcome::Rejected(Rejection::Unreachable {
                    target: self.definition.steps()[index].id.clone(),
                    blocked_by: self.definition.steps()[blocked].id.clone(),
                });
            }
            for flag in &mut self.completed[..index] {
                *flag = true;
            }
        }

        if index == self.current {
            return Outcome::Stayed {
                step: self.current_id().clone(),
            };
        }
        self.move_to(index)
    }

    /// Return to the first step and discard all data and completion flags.
    pub fn reset(&mut self) -> Outcome {
        self.current = 0;
        self.data.clear();
        self.completed.iter_mut().for_each(|flag| *flag = false);
        debug!("wizard '{}' reset", self.definition.name());
        Outcome::Reset
    }

    /// Capture the state for display or serialization.
    pub fn snapshot(&self) -> WizardSnapshot {
        let steps = self
            .definition
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepSnapshot {
                id: step.id.clone(),
                title: step.title.clone(),
                completed: self.is_completed(index),
                current: index == self.current,
                requirement: step.guard.as_ref().map(|g| g.description().to_string()),
                satisfied: step.is_satisfied(&self.data),
            })
            .collect();

        WizardSnapshot {
            wizard: self.definition.name().to_string(),
            current: self.current_id().clone(),
            position: self.current + 1,
            total: self.definition.step_count(),
            steps,
            data: self.data.clone(),
        }
    }

    fn move_to(&mut self, index: usize) -> Outcome {
        let from = self.current_id().clone();
        self.current = index;
        Outcome::Moved {
            from,
            to: self.current_id().clone(),
        }
    }
}
