/// Constants, errors and helpers shared by the deploy and release tools.
pub mod common;
/// Chart descriptor handling.
pub mod chart;
/// External command construction and execution.
pub mod command;
/// Deploy plan derivation and execution.
pub mod deploy;
/// Multi-repository release workflow.
pub mod release;
/// Repository identity discovery from local manifests.
pub mod repository;
/// Messages for the operator.
pub mod user_prompt;
