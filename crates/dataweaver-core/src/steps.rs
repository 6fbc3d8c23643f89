// Step execution
//
// Each handler is a pure function of (step, input record) and returns a fresh
// record; inputs are never mutated in place. validate/filter/map are identity
// passes today but keep their own match arms so each can grow real semantics
// without touching dispatch.

use serde_json::Value;

use crate::error::StepError;
use crate::workflow::{Record, Step, StepKind};

/// Config key holding the old-name -> new-name mapping for transform steps.
const FIELD_MAPPING_KEY: &str = "field_mapping";

/// Apply a single step to a record, producing a new record.
pub fn apply_step(step: &Step, record: &Record) -> Result<Record, StepError> {
    let kind = StepKind::parse(&step.step_type)
        .ok_or_else(|| StepError::UnknownType(step.step_type.clone()))?;

    match kind {
        StepKind::Transform => Ok(apply_transform(step, record)),
        StepKind::Validate => Ok(record.clone()),
        StepKind::Filter => Ok(record.clone()),
        StepKind::Map => Ok(record.clone()),
    }
}

/// Rename fields per `config["field_mapping"]`.
///
/// Mapping entries with a non-string new name are skipped, as are entries
/// whose old key is absent from the record. Entries apply in the mapping's
/// insertion order, so when two entries target the same new key the
/// last-applied one wins. The value lands under the new key before the old
/// key is removed, so an entry mapping a key to itself deletes the field.
fn apply_transform(step: &Step, record: &Record) -> Record {
    let mut result = record.clone();

    let Some(Value::Object(mapping)) = step.config.get(FIELD_MAPPING_KEY) else {
        return result;
    };

    for (old_key, new_key) in mapping {
        if let Some(new_key) = new_key.as_str() {
            if let Some(value) = result.get(old_key).cloned() {
                result.insert(new_key.to_string(), value);
                result.remove(old_key);
            }
        }
    }

    result
}
