//! The renderer worker.
//!
//! Turns a validated render request into a video artifact, off the
//! request-handling path. The actual video production sits behind the
//! [`pipeline::RenderPipeline`] seam; [`worker::dispatch_render`] wraps
//! it in a supervisor that guarantees exactly one terminal registry
//! write no matter how the pipeline ends.

pub mod command;
pub mod error;
pub mod pipeline;
pub mod script;
pub mod worker;

pub use command::CommandPipeline;
pub use error::RenderError;
pub use pipeline::RenderPipeline;
pub use script::SceneScript;
