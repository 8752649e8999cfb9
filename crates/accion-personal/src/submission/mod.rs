//! Submission pipeline: form snapshot, attachment embedding, webhook POST,
//! and the tri-state outcome.

pub mod payload;
pub mod pipeline;

pub use payload::{encode_attachment, SubmissionPayload, PAYMENT_DAY_OF_MONTH};
pub use pipeline::{SubmissionOutcome, WebhookClient, DEFAULT_REJECTION_MESSAGE};
