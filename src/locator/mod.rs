pub mod extractor;
pub mod locator_model;
pub mod naming;
