// Execution pipeline
//
// Resolves a workflow from the registry and folds the step executor over its
// step list in order. Each step's output is the complete input to the next;
// the first failure aborts the chain, annotated with the failing step's id.
// Branching does not exist: Step.next is ignored.

use std::sync::Arc;

use crate::error::EngineError;
use crate::registry::WorkflowRegistry;
use crate::steps::apply_step;
use crate::workflow::Record;

/// Runs workflows against records. Stateless apart from the shared registry
/// handle; concurrent executions never share record data.
pub struct WorkflowEngine {
    registry: Arc<WorkflowRegistry>,
}

impl WorkflowEngine {
    pub fn new(registry: Arc<WorkflowRegistry>) -> Self {
        Self { registry }
    }

    /// Execute a stored workflow against an input record.
    ///
    /// Steps run strictly in list order; on failure no partial result is
    /// returned and no subsequent steps run. A workflow with no steps returns
    /// a copy of the input.
    pub fn execute(&self, workflow_id: u64, input: &Record) -> Result<Record, EngineError> {
        let workflow = self.registry.get(workflow_id)?;

        let mut record = input.clone();
        for step in &workflow.steps {
            record = apply_step(step, &record)
                .map_err(|source| EngineError::step_failed(step.id.as_str(), source))?;
        }

        Ok(record)
    }
}
