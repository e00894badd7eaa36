pub mod hash;
pub mod path;
pub mod time;
