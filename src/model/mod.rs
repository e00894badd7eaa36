pub mod action;
pub mod envelope;
pub mod file;

pub use action::Action;
pub use envelope::ResponseEnvelope;
pub use file::{StageOutput, VirtualFile};
