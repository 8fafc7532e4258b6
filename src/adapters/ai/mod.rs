//! Generative model adapters.

mod gemini;

pub use gemini::GeminiClient;
