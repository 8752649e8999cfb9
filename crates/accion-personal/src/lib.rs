//! Core engine for the "Acción de Personal" HR self-service portal.
//!
//! Three components make up the core: the directory lookup adapter that turns
//! the internal personnel API into a supervisor roster, the request-form state
//! machine with its conditional-field and derivation rules, and the submission
//! pipeline that forwards a form snapshot to the automation webhook.

pub mod config;
pub mod directory;
pub mod error;
pub mod form;
pub mod submission;
pub mod telemetry;
