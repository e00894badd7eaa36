pub mod onesky;
pub mod output;
