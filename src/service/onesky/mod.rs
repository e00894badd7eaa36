pub mod auth;
pub mod client;
pub mod emitter;
pub mod stage;
#[cfg(test)]
pub(crate) mod testing;

pub use client::OneSkyClient;
pub use stage::TranslationStage;
