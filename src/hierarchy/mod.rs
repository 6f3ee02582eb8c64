pub mod hierarchy_model;
pub mod parser;
