mod config;

pub use config::{FetchConfig, RawOptions};
