//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use tutor_domain::{ConfigIssue, ConfigIssueCode, Topology};

/// Raw session configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Agent topology: "lens" or "pipeline"
    pub topology: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default().to_string(),
        }
    }
}

impl FileSessionConfig {
    /// Parse topology string into [`Topology`]
    ///
    /// Accepts: "lens", "parallel", "pipeline", "sequential" (and short forms)
    pub fn parse_topology(&self) -> (Topology, Vec<ConfigIssue>) {
        match self.topology.parse::<Topology>() {
            Ok(topology) => (topology, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "session.topology".to_string(),
                        value: self.topology.clone(),
                        valid_values: vec!["lens".to_string(), "pipeline".to_string()],
                    },
                    format!(
                        "session.topology: unknown value '{}', falling back to 'lens'",
                        self.topology
                    ),
                );
                (Topology::default(), vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_topology() {
        let config = FileSessionConfig {
            topology: "pipeline".to_string(),
        };
        let (topology, issues) = config.parse_topology();
        assert_eq!(topology, Topology::SequentialPipeline);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_parse_unknown_topology_falls_back() {
        let config = FileSessionConfig {
            topology: "round-robin".to_string(),
        };
        let (topology, issues) = config.parse_topology();
        assert_eq!(topology, Topology::ParallelLens);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
