pub mod ai_model;
pub mod code_fence;
pub mod error;
pub mod model_assisted;
