//! Station references.

use std::fmt;

use serde::Serialize;

/// A station (or stop) as reported by the journey search service.
///
/// Identity is the `id`; the name is for display only. Two stations with the
/// same id but different names compare equal.
///
/// # Examples
///
/// ```
/// use split_server::domain::Station;
///
/// let a = Station::new("8000105", Some("Frankfurt(Main)Hbf"));
/// let b = Station::new("8000105", None::<String>);
/// assert_eq!(a, b);
/// assert_eq!(b.display_name(), "8000105");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Station {
    /// Create a station reference.
    pub fn new(id: impl Into<String>, name: Option<impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            name: name.map(Into::into),
        }
    }

    /// Name for display, falling back to the id when the name is unknown.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl std::hash::Hash for Station {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
