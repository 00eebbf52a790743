//! Scripted command sequences.
//!
//! A scenario is a YAML list of commands plus an optional seed and expected
//! final state hash. Running it never stops at a rejected step: every step is
//! reported, and the run ends with the session's state hash.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use adtlab_telemetry::EventLogger;

use crate::command::{Command, Outcome};
use crate::error::EngineError;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Overrides `records.shuffle_seed` for the session the scenario runs in.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub expected_hash: Option<String>,
    pub steps: Vec<Command>,
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, EngineError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_yaml(&text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResult {
    Applied { outcome: Outcome },
    Rejected { kind: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub op: String,
    pub result: StepResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
    pub state_hash: String,
}

impl ScenarioReport {
    pub fn rejected(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.result, StepResult::Rejected { .. }))
            .count()
    }

    /// Compares the final hash with `expected`.
    #[instrument(skip(self))]
    pub fn validate_hash(&self, expected: &str) -> Result<(), EngineError> {
        debug!("Validating scenario hash");
        if self.state_hash != expected {
            error!("Hash mismatch! Expected: {}", expected);
            return Err(EngineError::Validation(format!(
                "Scenario validation failed!\nExpected: {}\nActual: {}",
                expected, self.state_hash
            )));
        }
        info!("Scenario validation successful");
        Ok(())
    }
}

impl Session {
    /// Applies every step of `scenario` in order.
    ///
    /// `scenario.seed` is not consulted here; it only matters when the session
    /// is initialized. When the scenario carries an expected hash, a mismatch
    /// is returned as an error.
    #[instrument(skip_all, fields(steps = scenario.steps.len()))]
    pub fn run(&mut self, scenario: &Scenario) -> Result<ScenarioReport, EngineError> {
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (index, command) in scenario.steps.iter().cloned().enumerate() {
            let op = command.name().to_string();
            let result = match self.apply(command) {
                Ok(outcome) => StepResult::Applied { outcome },
                Err(err) => StepResult::Rejected {
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                },
            };
            steps.push(StepReport { index, op, result });
        }

        let report = ScenarioReport {
            steps,
            state_hash: self.state_hash()?,
        };
        EventLogger::log_event(
            "scenario_complete",
            &[
                ("steps", report.steps.len().to_string()),
                ("rejected", report.rejected().to_string()),
                ("hash", report.state_hash.clone()),
            ],
        );

        if let Some(expected) = &scenario.expected_hash {
            report.validate_hash(expected)?;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adtlab_config::AdtlabConfig;
    use adtlab_records::MemoryStore;
    use adtlab_simulator::Simulator;
    use tracing_test::traced_test;

    const BUCKET_SCENARIO: &str = r#"
steps:
  - { op: hash_put, key: ab, value: "1" }
  - { op: hash_put, key: ba, value: "2" }
  - { op: hash_get, key: ab }
  - { op: hash_resize, bucket_count: 30 }
  - { op: stack_pop }
  - { op: hash_stats }
"#;

    fn empty_session() -> Session {
        Session::new(&AdtlabConfig::default()).unwrap()
    }

    #[test]
    fn rejected_steps_do_not_stop_the_run() {
        let scenario = Scenario::from_yaml(BUCKET_SCENARIO).unwrap();
        let report = empty_session().run(&scenario).unwrap();

        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.rejected(), 2);
        assert_eq!(report.steps[3].op, "hash_resize");
        assert!(matches!(
            &report.steps[3].result,
            StepResult::Rejected { kind, .. } if kind == "invalid_configuration"
        ));
        assert!(matches!(
            &report.steps[4].result,
            StepResult::Rejected { message, .. } if message == "stack is empty"
        ));
        match &report.steps[5].result {
            StepResult::Applied {
                outcome: Outcome::Stats { stats },
            } => {
                assert_eq!(stats.count, 2);
                assert_eq!(stats.longest_chain, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn replay_is_deterministic() {
        let scenario = Scenario::from_yaml(BUCKET_SCENARIO).unwrap();
        let first = empty_session().run(&scenario).unwrap();
        let second = empty_session().run(&scenario).unwrap();
        assert_eq!(first.state_hash, second.state_hash);
        assert_eq!(first.state_hash.len(), 64);
    }

    #[test]
    fn expected_hash_is_checked() {
        let mut scenario = Scenario::from_yaml(BUCKET_SCENARIO).unwrap();
        let hash = empty_session().run(&scenario).unwrap().state_hash;

        scenario.expected_hash = Some(hash);
        assert!(empty_session().run(&scenario).is_ok());

        scenario.expected_hash = Some("00".repeat(32));
        let err = empty_session().run(&scenario).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn resize_to_five_keeps_eight_entries() {
        let mut yaml = String::from("steps:\n");
        for key in ["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8"] {
            yaml.push_str(&format!("  - {{ op: hash_put, key: {}, value: v }}\n", key));
        }
        yaml.push_str("  - { op: hash_resize, bucket_count: 5 }\n");

        let mut session = empty_session();
        let report = session.run(&Scenario::from_yaml(&yaml).unwrap()).unwrap();
        assert_eq!(report.rejected(), 0);

        let stats = session.hash_table().stats();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.bucket_count, 5);
        assert_eq!(session.hash_table().len(), 8);
        for key in ["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8"] {
            assert!(session.hash_table().get(key).is_ok());
        }
    }

    #[traced_test]
    #[test]
    fn run_logs_rejections() {
        let scenario = Scenario::from_yaml(BUCKET_SCENARIO).unwrap();
        empty_session().run(&scenario).unwrap();
        assert!(logs_contain("operation rejected"));
        assert!(logs_contain("stack is empty"));
    }

    #[tokio::test]
    async fn missing_scenario_file_is_io_error() {
        let err = Scenario::load("does/not/exist.yaml").await.unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[tokio::test]
    async fn shipped_demo_scenario_runs() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../scenarios/basics.yaml");
        let scenario = Scenario::load(path).await.unwrap();
        assert_eq!(scenario.seed, Some(42));
        assert!(matches!(
            &scenario.steps[0],
            Command::TreeInsert { record } if record.id == 100
        ));

        let mut config = AdtlabConfig::default();
        config.records.shuffle_seed = scenario.seed.unwrap_or_default();
        let store = MemoryStore::from_config(&config.records).await.unwrap();
        let mut session = Session::initialize(&config, &store).await.unwrap();

        let report = session.run(&scenario).unwrap();
        assert_eq!(report.steps.len(), 24);
        let rejected: Vec<usize> = report
            .steps
            .iter()
            .filter(|s| matches!(s.result, StepResult::Rejected { .. }))
            .map(|s| s.index)
            .collect();
        assert_eq!(rejected, vec![2, 15, 22]);
        assert_eq!(report.steps[22].op, "hash_resize");
    }
}
