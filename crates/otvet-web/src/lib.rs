//! Web UI shell for the otvet question-answering service
//!
//! One page, one API endpoint: the form posts a question, the pipeline
//! retrieves passages, calls the generation endpoint and returns the first
//! sentence of the continuation.

mod handlers;
mod qa;
mod router;

pub use handlers::FALLBACK_ANSWER;
pub use qa::QaEngine;
pub use router::{AppContext, router};

// Re-export core types
pub use otvet_core::{Error, Result};
