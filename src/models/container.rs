// ABOUTME: Container snapshot model and the naming convention that marks a container as a server
// Snapshots are fetched once per run and never mutated

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Server containers end in an underscore followed by an 8-character lowercase hex token.
    pub static ref NAMING_CONVENTION: Regex =
        Regex::new(r"^.*_[a-f0-9]{8}$").expect("naming convention pattern is valid");
}

/// Read-only view of a container as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub names: Vec<String>,
    pub state: Option<String>,
}

impl Container {
    pub fn new(id: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            id: id.into(),
            names,
            state: Some("running".to_string()),
        }
    }

    /// The container's name when it has exactly one.
    pub fn sole_name(&self) -> Option<&str> {
        match self.names.as_slice() {
            [name] => Some(name.as_str()),
            _ => None,
        }
    }

    /// Name for menus and notices. Docker prefixes names with `/`.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|name| name.trim_start_matches('/'))
            .unwrap_or(&self.id)
    }

    /// Whether this container has exactly one name and it matches `pattern`.
    pub fn matches(&self, pattern: &Regex) -> bool {
        self.sole_name().is_some_and(|name| pattern.is_match(name))
    }

    /// Short form of the container id, as the docker CLI prints it.
    pub fn short_id(&self) -> &str {
        self.id.get(..12).unwrap_or(&self.id)
    }
}

impl From<bollard::models::ContainerSummary> for Container {
    fn from(summary: bollard::models::ContainerSummary) -> Self {
        Self {
            id: summary.id.unwrap_or_default(),
            names: summary.names.unwrap_or_default(),
            state: summary.state,
        }
    }
}

pub fn matches_naming_convention(name: &str) -> bool {
    NAMING_CONVENTION.is_match(name)
}
