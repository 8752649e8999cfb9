//! Request-form state machine: conditional-field rules, derivations, and the
//! submit-readiness predicate.

pub mod domain;
pub mod session;
pub mod state;
pub mod transitions;

pub use domain::{country_for_email, Attachment, RequestReason, VacationType};
pub use session::{FormSession, SessionError};
pub use state::{NotReady, RequestForm};
pub use transitions::{on_reason_change, on_vacation_type_change, ClearedFields};
