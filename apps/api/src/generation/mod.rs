//! Generation module — the LLM-backed collaborators (resume renderer and
//! email composer) plus their HTTP handlers.

pub mod email;
pub mod handlers;
pub mod prompts;
pub mod resume;
