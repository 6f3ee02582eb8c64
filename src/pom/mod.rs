pub mod coordinator;
pub mod cross_platform;
pub mod dynamic_runtime;
pub mod error;
pub mod field_style;
pub mod java_writer;
pub mod pom_model;
pub mod synthesizer;
