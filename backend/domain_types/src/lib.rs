pub mod environment;
pub mod errors;
pub mod types;
