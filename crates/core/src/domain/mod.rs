// Domain Layer - Invocation entities, all scoped to a single call

pub mod invocation;
pub mod outcome;

// Re-exports
pub use invocation::{CapturedOutput, InvocationRequest, SimulatedPaths};
pub use outcome::{RunReport, Termination};
