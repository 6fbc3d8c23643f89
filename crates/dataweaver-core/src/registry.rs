// In-memory workflow registry
//
// Single-writer, multi-reader store for workflow definitions. The id counter
// lives under the same lock as the map, so ids stay unique and monotonic under
// concurrent creates. The registry is volatile: definitions live only as long
// as the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::EngineError;
use crate::workflow::{NewWorkflow, Workflow};

struct RegistryInner {
    workflows: HashMap<u64, Arc<Workflow>>,
    next_id: u64,
}

/// In-memory store of all created workflows, keyed by id.
///
/// Constructed once at process start and shared via `Arc`; tests instantiate
/// isolated registries the same way.
pub struct WorkflowRegistry {
    inner: RwLock<RegistryInner>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                workflows: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new workflow and return its assigned id.
    ///
    /// Ids are sequential starting at 1 and never reused. No validation is
    /// performed on the definition; creation is infallible.
    pub fn create(&self, new: NewWorkflow) -> u64 {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let workflow = Workflow {
            id,
            name: new.name,
            description: new.description,
            steps: new.steps,
            config: new.config,
            created_at: Utc::now(),
        };
        inner.workflows.insert(id, Arc::new(workflow));
        id
    }

    /// Look up a stored workflow by id.
    pub fn get(&self, id: u64) -> Result<Arc<Workflow>, EngineError> {
        self.inner
            .read()
            .workflows
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound(id))
    }

    /// Number of stored workflows
    pub fn count(&self) -> usize {
        self.inner.read().workflows.len()
    }
}

impl Default for WorkflowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
