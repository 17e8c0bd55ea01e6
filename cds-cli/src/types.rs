//! Common types used across CLI modules

/// Reference to an action as typed on the command line
///
/// Either `group/name`, or a bare `name` whose group is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRef {
    /// Group and name given explicitly
    Qualified { group: String, name: String },
    /// Name only
    Name(String),
}

impl ActionRef {
    /// Parse `group/name` or `name`
    ///
    /// Only the first `/` separates the group; anything after it belongs to
    /// the name.
    pub fn parse(input: &str) -> Self {
        match input.split_once('/') {
            Some((group, name)) if !group.is_empty() && !name.is_empty() => {
                ActionRef::Qualified {
                    group: group.to_string(),
                    name: name.to_string(),
                }
            }
            _ => ActionRef::Name(input.to_string()),
        }
    }

    /// The action name
    pub fn name(&self) -> &str {
        match self {
            ActionRef::Qualified { name, .. } => name,
            ActionRef::Name(name) => name,
        }
    }

    /// The group, when given
    pub fn group(&self) -> Option<&str> {
        match self {
            ActionRef::Qualified { group, .. } => Some(group),
            ActionRef::Name(_) => None,
        }
    }
}

impl std::fmt::Display for ActionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRef::Qualified { group, name } => write!(f, "{}/{}", group, name),
            ActionRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for ActionRef {
    fn from(s: &str) -> Self {
        ActionRef::parse(s)
    }
}
