// DataWeaver core engine
//
// This crate provides the transport-agnostic heart of the service:
// - Schema detection: pure inference of a flat field-level schema from a JSON sample
// - Workflow model: workflows as ordered lists of typed transformation steps
// - Workflow registry: in-memory, concurrency-safe create/read with sequential ids
// - Step executor + execution pipeline: dispatch per step kind, fold over step lists
//
// Key design decisions:
// - No I/O and no async in this crate; the API crate owns HTTP concerns
// - Registry lifecycle is injected (constructed once, shared via Arc) - no globals
// - Step.type travels as a raw string so unknown types are accepted at creation
//   and surface as typed errors at execution time
// - Records are serde_json object maps; steps never mutate their input in place

pub mod engine;
pub mod error;
pub mod registry;
pub mod schema;
pub mod steps;
pub mod workflow;

pub use engine::WorkflowEngine;
pub use error::{EngineError, SchemaError, StepError};
pub use registry::WorkflowRegistry;
pub use schema::{detect_from_json, Field, FieldType, Schema};
pub use workflow::{NewWorkflow, Record, Step, StepKind, Workflow};
