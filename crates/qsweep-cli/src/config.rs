//! Sweep configuration.
//!
//! Loaded from, highest precedence first:
//! 1. Environment variables (`QSWEEP_` prefix)
//! 2. A YAML configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use qsweep_algos::{Molecule, SweepPlan};

/// Complete driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Grover search sizes
    #[serde(default)]
    pub grover: GroverConfig,

    /// Heisenberg chain sizes and evolution parameters
    #[serde(default)]
    pub heisenberg: HeisenbergConfig,

    /// Phase estimation sizes
    #[serde(default)]
    pub qpe: QpeConfig,

    /// Chemistry ansatz molecules
    #[serde(default)]
    pub vqe: VqeConfig,

    /// Local simulator settings
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Grover sweep settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroverConfig {
    /// Register widths
    #[serde(default = "default_grover_sizes")]
    pub sizes: Vec<usize>,

    /// Measure the search register
    #[serde(default = "default_true")]
    pub measure: bool,
}

/// Heisenberg sweep settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeisenbergConfig {
    /// Chain lengths
    #[serde(default = "default_heisenberg_lengths")]
    pub lengths: Vec<usize>,

    /// Exchange coupling J
    #[serde(default = "default_coupling")]
    pub coupling: f64,

    /// Trotter step size
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Total evolution time
    #[serde(default = "default_total_time")]
    pub total_time: f64,
}

/// Phase estimation sweep settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QpeConfig {
    /// Counting register widths
    #[serde(default = "default_qpe_sizes")]
    pub sizes: Vec<usize>,

    /// `Rz` angle whose phase is estimated
    #[serde(default = "default_theta")]
    pub theta: f64,
}

/// Chemistry ansatz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VqeConfig {
    /// Molecules: "h2", "lih", "beh2"
    #[serde(default = "default_molecules")]
    pub molecules: Vec<Molecule>,

    /// Excitation angle
    #[serde(default = "default_vqe_angle")]
    pub angle: f64,
}

/// Local simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Widest circuit the simulator accepts
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Measurement seed (set via QSWEEP_SEED)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_grover_sizes() -> Vec<usize> {
    SweepPlan::default().grover_sizes
}

fn default_heisenberg_lengths() -> Vec<usize> {
    SweepPlan::default().heisenberg_lengths
}

fn default_coupling() -> f64 {
    1.0
}

fn default_dt() -> f64 {
    0.5
}

fn default_total_time() -> f64 {
    5.0
}

fn default_qpe_sizes() -> Vec<usize> {
    SweepPlan::default().qpe_sizes
}

fn default_theta() -> f64 {
    1.0
}

fn default_molecules() -> Vec<Molecule> {
    Molecule::ALL.to_vec()
}

fn default_vqe_angle() -> f64 {
    0.1
}

fn default_max_qubits() -> u32 {
    // Wider entries are skipped in simulate mode; estimate mode is unaffected.
    16
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GroverConfig {
    fn default() -> Self {
        GroverConfig {
            sizes: default_grover_sizes(),
            measure: default_true(),
        }
    }
}

impl Default for HeisenbergConfig {
    fn default() -> Self {
        HeisenbergConfig {
            lengths: default_heisenberg_lengths(),
            coupling: default_coupling(),
            dt: default_dt(),
            total_time: default_total_time(),
        }
    }
}

impl Default for QpeConfig {
    fn default() -> Self {
        QpeConfig {
            sizes: default_qpe_sizes(),
            theta: default_theta(),
        }
    }
}

impl Default for VqeConfig {
    fn default() -> Self {
        VqeConfig {
            molecules: default_molecules(),
            angle: default_vqe_angle(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_qubits: default_max_qubits(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl SweepConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: SweepConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file if given, then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => SweepConfig::default(),
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `QSWEEP_*` environment variables into this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge overrides looked up through `lookup`.
    ///
    /// Only variables that are set override the current values. A set
    /// variable that does not parse is an error rather than being ignored.
    pub fn merge_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QSWEEP_SEED") {
            let seed = v.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("QSWEEP_SEED must be an integer, got '{v}'"))
            })?;
            self.simulator.seed = Some(seed);
        }

        if let Some(v) = lookup("QSWEEP_MAX_QUBITS") {
            self.simulator.max_qubits = v.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "QSWEEP_MAX_QUBITS must be an integer, got '{v}'"
                ))
            })?;
        }

        if let Some(v) = lookup("QSWEEP_LOG") {
            self.logging.level = v.trim().to_ascii_lowercase();
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f64| {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::ValidationError(format!(
                    "{name} must be positive, got {v}"
                )))
            }
        };
        let sizes = |name: &str, v: &[usize]| {
            if v.contains(&0) {
                Err(ConfigError::ValidationError(format!(
                    "{name} must not contain 0"
                )))
            } else {
                Ok(())
            }
        };

        sizes("grover.sizes", &self.grover.sizes)?;
        sizes("heisenberg.lengths", &self.heisenberg.lengths)?;
        sizes("qpe.sizes", &self.qpe.sizes)?;

        positive("heisenberg.dt", self.heisenberg.dt)?;
        if !(self.heisenberg.total_time >= 0.0 && self.heisenberg.total_time.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "heisenberg.total_time must be non-negative, got {}",
                self.heisenberg.total_time
            )));
        }
        if !self.heisenberg.coupling.is_finite() {
            return Err(ConfigError::ValidationError(
                "heisenberg.coupling must be finite".to_string(),
            ));
        }
        if !self.qpe.theta.is_finite() {
            return Err(ConfigError::ValidationError(
                "qpe.theta must be finite".to_string(),
            ));
        }
        if !self.vqe.angle.is_finite() {
            return Err(ConfigError::ValidationError(
                "vqe.angle must be finite".to_string(),
            ));
        }

        if self.simulator.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "simulator.max_qubits must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// Sizes and parameters handed to the catalog.
    pub fn plan(&self) -> SweepPlan {
        SweepPlan {
            grover_sizes: self.grover.sizes.clone(),
            measure: self.grover.measure,
            heisenberg_lengths: self.heisenberg.lengths.clone(),
            coupling: self.heisenberg.coupling,
            dt: self.heisenberg.dt,
            total_time: self.heisenberg.total_time,
            qpe_sizes: self.qpe.sizes.clone(),
            theta: self.qpe.theta,
            molecules: self.vqe.molecules.clone(),
            vqe_angle: self.vqe.angle,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.grover.sizes, vec![5, 10, 15, 20, 25]);
        assert_eq!(config.heisenberg.dt, 0.5);
        assert_eq!(config.qpe.theta, 1.0);
        assert_eq!(config.vqe.molecules.len(), 3);
        assert_eq!(config.simulator.max_qubits, 16);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
        assert_eq!(config.plan(), SweepPlan::default());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "grover:\n  sizes: [3, 4]\nvqe:\n  molecules: [h2, lih]\nsimulator:\n  seed: 7"
        )
        .unwrap();

        let config = SweepConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grover.sizes, vec![3, 4]);
        assert!(config.grover.measure);
        assert_eq!(config.vqe.molecules, vec![Molecule::H2, Molecule::LiH]);
        assert_eq!(config.vqe.angle, 0.1);
        assert_eq!(config.simulator.seed, Some(7));
        assert_eq!(config.heisenberg.lengths, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_missing_file() {
        let err = SweepConfig::from_file("/nonexistent/qsweep.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "qpe:\n  sizes: three").unwrap();
        let err = SweepConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = SweepConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.qpe.sizes = vec![3, 0];
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.heisenberg.dt = 0.0;
        assert!(config.validate().is_err());

        let mut config = SweepConfig::default();
        config.simulator.max_qubits = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = SweepConfig::default()
            .merge_env_from(lookup(&[
                ("QSWEEP_SEED", "42"),
                ("QSWEEP_LOG", "DEBUG"),
                ("QSWEEP_MAX_QUBITS", "12"),
            ]))
            .unwrap();
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.simulator.max_qubits, 12);
    }

    #[test]
    fn test_env_absent_keeps_values() {
        let mut base = SweepConfig::default();
        base.simulator.seed = Some(3);
        let merged = base.clone().merge_env_from(lookup(&[])).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_env_unparsable() {
        let err = SweepConfig::default()
            .merge_env_from(lookup(&[("QSWEEP_SEED", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
