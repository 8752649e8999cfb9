//! Directory lookup adapter: turns the internal "active users" API into the
//! supervisor roster offered by the approver selector.

pub mod client;
pub mod envelope;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use client::{DirectoryClient, RelayOutcome};
pub use envelope::{unwrap_roster, RosterShape};

/// Position keywords that mark a personnel record as supervisory.
pub const SUPERVISORY_KEYWORDS: [&str; 8] = [
    "JEFE",
    "GERENTE",
    "DIRECTOR",
    "LIDER",
    "SUPERVISOR",
    "COORDINADOR",
    "MANAGER",
    "HEAD",
];

/// Placeholder name the upstream backend emits when a record has no usable name.
const NAME_UNAVAILABLE: &str = "Nombre no disponible";

/// Filtered, display-formatted projection of a personnel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub display_name: String,
    pub email: String,
}

impl Supervisor {
    /// Sentinel entry shown when the roster could not be fetched. The empty
    /// email renders it non-selectable without crashing the form.
    pub fn unavailable(message: &str) -> Self {
        Self {
            display_name: message.to_string(),
            email: String::new(),
        }
    }
}

/// Project raw personnel records into the supervisor roster.
///
/// Keeps a record iff its uppercased `position` contains one of the
/// supervisory keywords, then formats `"{name} - {position}"` and drops
/// entries without a usable name or email.
pub fn project_supervisors(records: Vec<Value>) -> Vec<Supervisor> {
    records.into_iter().filter_map(supervisor_from_record).collect()
}

fn supervisor_from_record(record: Value) -> Option<Supervisor> {
    let record = record.as_object()?;

    let position = record
        .get("position")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    let uppercased = position.to_uppercase();
    if !SUPERVISORY_KEYWORDS
        .iter()
        .any(|keyword| uppercased.contains(keyword))
    {
        return None;
    }

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    let email = record
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    if name.is_empty() || name == NAME_UNAVAILABLE || email.is_empty() {
        return None;
    }

    let display_name = if position.is_empty() {
        name.to_string()
    } else {
        format!("{name} - {position}")
    };

    Some(Supervisor {
        display_name,
        email: email.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let roster = project_supervisors(vec![
            json!({ "name": "Ana", "email": "ana@red.com.sv", "position": "Gerente de Ventas" }),
            json!({ "name": "Bruno", "email": "bruno@red.com.sv", "position": "Senior Software Engineer" }),
            json!({ "name": "Carla", "email": "carla@red.com.sv", "position": "subdirectora" }),
        ]);
        let names: Vec<_> = roster.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ana - Gerente de Ventas", "Carla - subdirectora"]
        );
    }

    #[test]
    fn team_lead_is_not_a_listed_keyword() {
        // "LEAD" is not in the keyword set, only "LIDER".
        let roster = project_supervisors(vec![
            json!({ "name": "Dina", "email": "dina@red.com.sv", "position": "Team Lead" }),
            json!({ "name": "Eva", "email": "eva@red.com.sv", "position": "Lider de Proyecto" }),
        ]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].display_name, "Eva - Lider de Proyecto");
    }

    #[test]
    fn records_without_usable_name_or_email_are_dropped() {
        let roster = project_supervisors(vec![
            json!({ "name": "", "email": "x@red.com.sv", "position": "Jefe" }),
            json!({ "name": "Nombre no disponible", "email": "y@red.com.sv", "position": "Jefe" }),
            json!({ "name": "Zoe", "email": "", "position": "Jefe" }),
            json!({ "name": "Zoe", "position": "Jefe" }),
            json!(null),
            json!("Jefe"),
        ]);
        assert!(roster.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_bare_name() {
        // A record can match on a keyword elsewhere yet carry no position text
        // only in theory; the formatting rule still guards the empty case.
        let roster = project_supervisors(vec![
            json!({ "name": "Hugo", "email": "hugo@red.com.sv", "position": "SUPERVISOR" }),
        ]);
        assert_eq!(roster[0].display_name, "Hugo - SUPERVISOR");
    }

    #[test]
    fn sentinel_supervisor_has_empty_email() {
        let sentinel = Supervisor::unavailable("Error de autorización API");
        assert_eq!(sentinel.display_name, "Error de autorización API");
        assert!(sentinel.email.is_empty());
    }
}
