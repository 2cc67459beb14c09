//! Edge labels and the roles they play in bounded reachability

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label carried by an edge in the input file
///
/// Upstream generators write either integer labels (`0 3 17`) or symbolic
/// ones (`1 b 2`). A token that parses as a signed integer is always an
/// integer label, so `3` in the file and `3` in a config file compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Symbol(String),
}

impl Label {
    /// Classify a raw token from the edge file or the command line
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(n) => Label::Int(n),
            Err(_) => Label::Symbol(token.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(n) => write!(f, "{}", n),
            Label::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(token: &str) -> Self {
        Label::parse(token)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Int(n) => serializer.serialize_i64(*n),
            Label::Symbol(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLabel::deserialize(deserializer)? {
            RawLabel::Int(n) => Label::Int(n),
            RawLabel::Text(s) => Label::parse(&s),
        })
    }
}

/// clap value parser for label flags
pub fn parse_label_arg(token: &str) -> Result<Label, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("label must not be empty".to_string());
    }
    if token.chars().any(char::is_whitespace) {
        return Err(format!("label '{}' must not contain whitespace", token));
    }
    Ok(Label::parse(token))
}

/// Role an edge plays in the bounded reachability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeRole {
    /// Direct edge to a reachable target (seeds the bounded sets)
    Terminal,
    /// Edge whose source inherits the target's bounded set
    Link,
    /// Edge from a query source into the bounded relation
    Query,
}

/// Which labels are terminal, link and (optionally) query labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSet {
    pub terminal: Label,
    pub link: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Label>,
}

impl Default for LabelSet {
    /// Label convention of the layered-network generator: `3` marks targets,
    /// `2` links intermediate vertices and `1` marks query sources.
    fn default() -> Self {
        LabelSet {
            terminal: Label::Int(3),
            link: Label::Int(2),
            query: Some(Label::Int(1)),
        }
    }
}

impl LabelSet {
    pub fn new(terminal: Label, link: Label) -> Self {
        LabelSet {
            terminal,
            link,
            query: None,
        }
    }

    /// Classify an edge label; `None` means the edge is ignored
    pub fn role(&self, label: &Label) -> Option<EdgeRole> {
        if *label == self.terminal {
            Some(EdgeRole::Terminal)
        } else if *label == self.link {
            Some(EdgeRole::Link)
        } else if self.query.as_ref() == Some(label) {
            Some(EdgeRole::Query)
        } else {
            None
        }
    }

    /// Reject label sets where two roles share a label
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ReachError;

        if self.terminal == self.link {
            return Err(ReachError::Config(format!(
                "terminal and link labels must differ (both are '{}')",
                self.terminal
            )));
        }
        if let Some(query) = &self.query {
            if *query == self.terminal || *query == self.link {
                return Err(ReachError::Config(format!(
                    "query label '{}' clashes with the terminal or link label",
                    query
                )));
            }
        }
        Ok(())
    }
}
