//! Wizard definitions: the fixed, ordered step sequence and its guards.

use std::collections::HashSet;

use super::{Guard, WizardData};
use crate::{
    error::{Result, StudioError},
    models::StepId,
};

/// One named stage of a linear wizard.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: String,
    /// Requirement for leaving the step forward; `None` is always passable
    pub guard: Option<Guard>,
}

impl StepDefinition {
    /// Whether the step may be left forward with the given data.
    pub fn is_satisfied(&self, data: &WizardData) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard.allows(data))
    }
}

/// Ordered, immutable list of steps shared by every session of one flow.
#[derive(Debug, Clone)]
pub struct WizardDefinition {
    name: String,
    steps: Vec<StepDefinition>,
    processing_step: Option<StepId>,
    reserved_keys: Vec<String>,
}

impl WizardDefinition {
    /// Start building a definition.
    pub fn builder(name: impl Into<String>) -> WizardBuilder {
        WizardBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Number of steps; never zero.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// The step where the processing backend is invoked, if any.
    pub fn processing_step(&self) -> Option<&StepId> {
        self.processing_step.as_ref()
    }

    /// Whether `key` is owned by the wizard's host and closed to events.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.iter().any(|k| k == key)
    }

    /// Evaluate the guard of `step`. Unknown steps can never be left.
    pub fn can_leave(&self, step: &str, data: &WizardData) -> bool {
        self.steps
            .iter()
            .find(|s| s.id == step)
            .is_some_and(|s| s.is_satisfied(data))
    }

    /// First step before `target` whose guard is unsatisfied.
    pub(crate) fn first_blocked_before(&self, target: usize, data: &WizardData) -> Option<usize> {
        self.steps
            .iter()
            .take(target)
            .position(|s| !s.is_satisfied(data))
    }
}

/// Builder for [`WizardDefinition`].
#[derive(Debug)]
pub struct WizardBuilder {
    name: String,
    steps: Vec<StepDefinition>,
    processing_step: Option<StepId>,
    reserved_keys: Vec<String>,
}

impl WizardBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            processing_step: None,
            reserved_keys: Vec::new(),
        }
    }

    /// Append a step without a guard.
    pub fn step(mut self, id: impl Into<StepId>, title: impl Into<String>) -> Self {
        self.steps.push(StepDefinition {
            id: id.into(),
            title: title.into(),
            guard: None,
        });
        self
    }

    /// Append a step that may only be left once `guard` holds.
    pub fn guarded_step(
        mut self,
        id: impl Into<StepId>,
        title: impl Into<String>,
        guard: Guard,
    ) -> Self {
        self.steps.push(StepDefinition {
            id: id.into(),
            title: title.into(),
            guard: Some(guard),
        });
        self
    }

    /// Mark the step that starts processing.
    pub fn processing_step(mut self, id: impl Into<StepId>) -> Self {
        self.processing_step = Some(id.into());
        self
    }

    /// Reserve a data key. `Set` and `Remove` events on it are rejected;
    /// only the session writes it.
    pub fn reserved_key(mut self, key: impl Into<String>) -> Self {
        self.reserved_keys.push(key.into());
        self
    }

    /// Validate and build the definition.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::InvalidDefinition` when there are no steps, a
    /// step id is blank or repeated, or the processing step is not part of
    /// the sequence.
    pub fn build(self) -> Result<WizardDefinition> {
        if self.steps.is_empty() {
            return Err(StudioError::InvalidDefinition {
                reason: format!("wizard '{}' has no steps", self.name),
            });
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.id.as_str().trim().is_empty() {
                return Err(StudioError::InvalidDefinition {
                    reason: format!("wizard '{}' has a step with a blank id", self.name),
                });
            }
            if !seen.insert(step.id.as_str()) {
                return Err(StudioError::InvalidDefinition {
                    reason: format!("duplicate step id '{}'", step.id),
                });
            }
        }

        if let Some(processing) = &self.processing_step {
            if !seen.contains(processing.as_str()) {
                return Err(StudioError::InvalidDefinition {
                    reason: format!("processing step '{processing}' is not part of the wizard"),
                });
            }
        }

        Ok(WizardDefinition {
            name: self.name,
            steps: self.steps,
            processing_step: self.processing_step,
            reserved_keys: self.reserved_keys,
        })
    }
}
