//! Configuration loading for polder runs.
//!
//! Loads `polder-config.yaml` into strongly-typed structs. Every field
//! carries a serde default, so a partial (or empty) file still yields a
//! runnable configuration. Parsing is purely mechanical here; semantic
//! validation of the parameter values happens when the simulation state
//! is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use polder_types::Scenario;
use polder_world::{NetworkParams, SurfaceParams};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying IO error.
        #[from]
        source: std::io::Error,
    },

    /// Parsing the YAML content failed.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Run length, seeding, and scenario selection.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Household population parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Social-network topology and its family-specific parameters.
    #[serde(default)]
    pub network: NetworkParams,

    /// Synthetic flood-surface geometry.
    #[serde(default)]
    pub surface: SurfaceParams,

    /// Society-level inputs read by the government and the households.
    #[serde(default)]
    pub society: SocietyConfig,
}

impl RunConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Run length, seeding, and scenario selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the run's single random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of periods to run.
    #[serde(default = "default_periods")]
    pub periods: u64,

    /// Scenario regime selecting the recurrence coefficients.
    #[serde(default = "default_scenario")]
    pub scenario: Scenario,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            periods: default_periods(),
            scenario: default_scenario(),
        }
    }
}

/// Household population parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of household agents; one per social-graph node.
    #[serde(default = "default_households")]
    pub households: u32,

    /// Lower bound of the uniform savings draw per household.
    #[serde(default = "default_savings_min")]
    pub savings_min: f64,

    /// Upper bound of the uniform savings draw per household.
    #[serde(default = "default_savings_max")]
    pub savings_max: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            households: default_households(),
            savings_min: default_savings_min(),
            savings_max: default_savings_max(),
        }
    }
}

/// Society-level inputs, both in [0, 1].
///
/// A value that is absent or out of range is replaced by a uniform draw
/// when the simulation state is built, with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SocietyConfig {
    /// Political situation feeding initial perceptions and the government.
    #[serde(default)]
    pub political_situation: Option<f64>,

    /// Welfare baseline feeding the government budget.
    #[serde(default)]
    pub welfare: Option<f64>,
}

// ---- Default value functions ----

const fn default_seed() -> u64 {
    1
}

const fn default_periods() -> u64 {
    20
}

const fn default_scenario() -> Scenario {
    Scenario::Baseline
}

const fn default_households() -> u32 {
    50
}

const fn default_savings_min() -> f64 {
    500.0
}

const fn default_savings_max() -> f64 {
    5000.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use polder_types::Topology;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RunConfig::default();
        assert_eq!(config.simulation.seed, 1);
        assert_eq!(config.simulation.periods, 20);
        assert_eq!(config.simulation.scenario, Scenario::Baseline);
        assert_eq!(config.population.households, 50);
        assert!(config.population.savings_min < config.population.savings_max);
        assert_eq!(config.network.topology, Topology::SmallWorld);
        assert_eq!(config.society.political_situation, None);
        assert_eq!(config.society.welfare, None);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
simulation:
  seed: 42
  periods: 30
  scenario: memoryless-policy-b
population:
  households: 25
  savings_min: 100.0
  savings_max: 2500.0
network:
  topology: preferential-attachment
  connection_probability: 0.2
  edges_per_node: 4
  nearest_neighbours: 6
surface:
  width: 40
  height: 30
  max_depth: 5.0
  floodplain_radius: 12.0
society:
  political_situation: 0.35
  welfare: 0.8
"#;
        let config = RunConfig::parse(yaml).unwrap();
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.simulation.periods, 30);
        assert_eq!(config.simulation.scenario, Scenario::MemorylessPolicyB);
        assert_eq!(config.population.households, 25);
        assert_eq!(config.network.topology, Topology::PreferentialAttachment);
        assert_eq!(config.network.edges_per_node, 4);
        assert_eq!(config.surface.width, 40);
        assert_eq!(config.surface.height, 30);
        assert_eq!(config.society.political_situation, Some(0.35));
        assert_eq!(config.society.welfare, Some(0.8));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "simulation:\n  seed: 7\n";
        let config = RunConfig::parse(yaml).unwrap();

        // Seed is overridden
        assert_eq!(config.simulation.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.simulation.periods, 20);
        assert_eq!(config.population.households, 50);
        assert_eq!(config.network.topology, Topology::SmallWorld);
    }

    #[test]
    fn parse_empty_yaml() {
        let yaml = "";
        let config = RunConfig::parse(yaml);
        assert!(config.is_ok());
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let yaml = "simulation:\n  seed: [not a number\n";
        let config = RunConfig::parse(yaml);
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("polder-config.yaml");
        if path.exists() {
            let config = RunConfig::from_file(&path);
            assert!(config.is_ok(), "project config should parse: {config:?}");
        }
    }

    #[test]
    fn missing_file_reports_io_error() {
        let config = RunConfig::from_file(Path::new("/nonexistent/polder.yaml"));
        assert!(matches!(config, Err(ConfigError::Io { .. })));
    }
}
