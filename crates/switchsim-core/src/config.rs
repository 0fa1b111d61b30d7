use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_VERSION: u32 = 1;

pub const DEFAULT_NUM_PORTS: usize = 8;
pub const DEFAULT_BUFFER_SIZE: usize = 64;
pub const DEFAULT_MAX_PACKETS: u64 = 2000;
pub const DEFAULT_BURST_PROBABILITY: f64 = 0.2;
pub const DEFAULT_WEIGHT: u32 = 3;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfigInput {
    pub version: u32,
    pub num_ports: Option<usize>,
    pub buffer_size: Option<usize>,
    pub max_packets: Option<u64>,
    pub burst_probability: Option<f64>,
    pub weights: Option<Vec<u32>>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub version: u32,
    /// Input and output port count.
    pub num_ports: usize,
    /// Per-input-queue capacity in packets.
    pub buffer_size: usize,
    /// Run ends once this many packets have been generated.
    pub max_packets: u64,
    /// Per-tick probability that the burst flag is raised.
    pub burst_probability: f64,
    /// Static per-output-port weight for the weighted discipline.
    pub weights: Vec<u32>,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            num_ports: DEFAULT_NUM_PORTS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_packets: DEFAULT_MAX_PACKETS,
            burst_probability: DEFAULT_BURST_PROBABILITY,
            weights: vec![DEFAULT_WEIGHT; DEFAULT_NUM_PORTS],
            seed: None,
        }
    }
}

impl SimConfigInput {
    pub fn resolve(self) -> Result<SimConfig, ConfigError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        let num_ports = self.num_ports.unwrap_or(DEFAULT_NUM_PORTS);

        let config = SimConfig {
            version,
            num_ports,
            buffer_size: self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE),
            max_packets: self.max_packets.unwrap_or(DEFAULT_MAX_PACKETS),
            burst_probability: self
                .burst_probability
                .unwrap_or(DEFAULT_BURST_PROBABILITY),
            weights: self
                .weights
                .unwrap_or_else(|| vec![DEFAULT_WEIGHT; num_ports]),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl SimConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(SimConfig::default());
        }
        let parsed: SimConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }

    /// Checks the invariants a run depends on. Fields are public, so configs
    /// built in code must pass through here as well as parsed ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.num_ports == 0 {
            return Err(ConfigError::Zero { field: "num_ports" });
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::Zero {
                field: "buffer_size",
            });
        }
        if self.max_packets == 0 {
            return Err(ConfigError::Zero {
                field: "max_packets",
            });
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.burst_probability) {
            return Err(ConfigError::BurstProbability(self.burst_probability));
        }
        if self.weights.len() != self.num_ports {
            return Err(ConfigError::WeightCount {
                expected: self.num_ports,
                actual: self.weights.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        let cfg = SimConfig::from_toml_str("  \n").unwrap();
        assert_eq!(cfg, SimConfig::default());
        assert_eq!(cfg.num_ports, 8);
        assert_eq!(cfg.buffer_size, 64);
        assert_eq!(cfg.max_packets, 2000);
        assert_eq!(cfg.weights, vec![3; 8]);
    }

    #[test]
    fn parse_toml_config_basic() {
        let toml = r#"
            version = 1
            num_ports = 4
            buffer_size = 2
            max_packets = 100
            burst_probability = 0.5
            weights = [1, 2, 3, 4]
            seed = 7
        "#;

        let cfg = SimConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.num_ports, 4);
        assert_eq!(cfg.buffer_size, 2);
        assert_eq!(cfg.max_packets, 100);
        assert_eq!(cfg.burst_probability, 0.5);
        assert_eq!(cfg.weights, vec![1, 2, 3, 4]);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn default_weights_follow_port_count() {
        let cfg = SimConfig::from_toml_str("num_ports = 3").unwrap();
        assert_eq!(cfg.weights, vec![DEFAULT_WEIGHT; 3]);
    }

    #[test]
    fn weight_count_mismatch_is_rejected() {
        let err = SimConfig::from_toml_str("num_ports = 2\nweights = [1, 2, 3]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WeightCount {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SimConfig::from_toml_str("version = 9"),
            Err(ConfigError::UnsupportedVersion(9))
        ));
        assert!(matches!(
            SimConfig::from_toml_str("buffer_size = 0"),
            Err(ConfigError::Zero {
                field: "buffer_size"
            })
        ));
        assert!(matches!(
            SimConfig::from_toml_str("burst_probability = 1.5"),
            Err(ConfigError::BurstProbability(_))
        ));
        assert!(matches!(
            SimConfig::from_toml_str("num_ports = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_hand_built_configs() {
        let zero_ports = SimConfig {
            num_ports: 0,
            weights: Vec::new(),
            ..SimConfig::default()
        };
        assert!(matches!(
            zero_ports.validate(),
            Err(ConfigError::Zero { field: "num_ports" })
        ));

        let nan_burst = SimConfig {
            burst_probability: f64::NAN,
            ..SimConfig::default()
        };
        assert!(matches!(
            nan_burst.validate(),
            Err(ConfigError::BurstProbability(p)) if p.is_nan()
        ));

        let short_weights = SimConfig {
            weights: vec![1, 2],
            ..SimConfig::default()
        };
        assert!(matches!(
            short_weights.validate(),
            Err(ConfigError::WeightCount {
                expected: 8,
                actual: 2
            })
        ));

        let no_budget = SimConfig {
            max_packets: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            no_budget.validate(),
            Err(ConfigError::Zero {
                field: "max_packets"
            })
        ));
    }
}
