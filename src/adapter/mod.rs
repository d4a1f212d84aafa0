pub mod huggingface;

pub use huggingface::{InferenceClient, InferenceConfig};
