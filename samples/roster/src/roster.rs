//! Roster records and loading.

use collectables::eager::{EagerCollection, Fields};
use collectables::key::Key;
use serde::Deserialize;
use thiserror::Error;

/// One member of staff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub salary: u64,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Fields for Employee {
    fn field(&self, name: &str) -> Option<Key> {
        match name {
            "name" => Some(Key::from(&self.name)),
            "department" => Some(Key::from(&self.department)),
            _ => None,
        }
    }
}

/// Errors raised while loading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("roster has no employees")]
    Empty,
}

/// The roster used when no file is given.
pub const DEFAULT_ROSTER: &str = r#"[
    { "name": "Azdy", "department": "IT", "salary": 9000, "skills": ["Rust", "SQL"] },
    { "name": "Fahmi", "department": "IT", "salary": 8500, "skills": ["Rust", "PHP"] },
    { "name": "Azkan", "department": "HR", "salary": 6000, "skills": ["Hiring"] },
    { "name": "Gibran", "department": "Finance", "salary": 7000, "skills": ["SQL", "Excel"] },
    { "name": "Hasyim", "department": "HR", "salary": 6500 }
]"#;

/// Parses a roster from a JSON array of employees.
///
/// # Errors
///
/// Returns [`RosterError::Parse`] for malformed JSON and
/// [`RosterError::Empty`] for an empty array.
pub fn parse_roster(json: &str) -> Result<EagerCollection<Employee>, RosterError> {
    let roster: EagerCollection<Employee> = serde_json::from_str(json)?;
    if roster.is_empty() {
        return Err(RosterError::Empty);
    }
    tracing::debug!(employees = roster.len(), "roster parsed");
    Ok(roster)
}

/// Reads and parses a roster file.
///
/// # Errors
///
/// Returns [`RosterError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_roster`].
pub fn load_roster(path: &std::path::Path) -> Result<EagerCollection<Employee>, RosterError> {
    let json = std::fs::read_to_string(path)?;
    parse_roster(&json)
}
