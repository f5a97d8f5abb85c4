//! Client code for mcp-docqa.
//!
//! This crate provides the Gemini generation client and citation reference
//! extraction shared by the server.

pub mod gemini;
pub mod references;

pub use gemini::{
    DocumentSource, GeminiClient, GeminiConfig, GeminiError, GeminiModel, GenerateRequest, GeneratedAnswer,
};

pub use references::{DocumentRef, Locator, Reference, extract_references};
