//! Edge input records.
//!
//! Edges reference nodes by their stable string identifiers. An edge whose
//! endpoints are not both present in the current node set is inert.

use serde::Deserialize;

/// A directed edge as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeInput {
    pub source: String,
    pub target: String,
}

impl EdgeInput {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for EdgeInput {
    fn from((source, target): (S, T)) -> Self {
        Self::new(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_from_tuple() {
        let edge: EdgeInput = ("A", "B").into();
        assert_eq!(edge.source, "A");
        assert_eq!(edge.target, "B");
        assert!(!edge.is_self_loop());
        assert!(EdgeInput::new("A", "A").is_self_loop());
    }

    #[test]
    fn test_deserialize_edge() {
        let edges: Vec<EdgeInput> =
            serde_json::from_str(r#"[{"source":"REQ-1","target":"TASK-7"}]"#).unwrap();
        assert_eq!(edges, vec![EdgeInput::new("REQ-1", "TASK-7")]);
    }
}
