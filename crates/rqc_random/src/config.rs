//! Random circuit configuration
//!
//! Gantree: L2_Random → RandomCircuitConfig
//!
//! Seed, conditioning and measurement options for the layered sampler, plus
//! a request type for generation calls described in untyped JSON.

use crate::catalog::GateCatalog;
use rqc_core::{sampling, Probability, RqcError, RqcResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// How a layer's leftover capacity is filled
/// Gantree: SlackFill // 슬랙 채움 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SlackFill {
    /// Draw from the whole catalog; a two-qubit draw can overshoot by one
    #[default]
    AnyGate,

    /// Draw from single-qubit descriptors only; layers are always exact
    SingleQubitOnly,
}

/// Generator configuration
/// Gantree: RandomCircuitConfig // 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomCircuitConfig {
    /// Random seed; `None` draws a fresh seed per call
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,

    /// Attach random classical conditions
    pub conditional: bool,

    /// Per-operation probability of a classical condition
    /// Gantree: conditional_probability: f64 // 조건 확률 (0.1)
    pub conditional_probability: f64,

    /// Append a full-width measurement after the last layer
    pub measure: bool,

    /// Slack fill mode
    pub slack_fill: SlackFill,
}

impl RandomCircuitConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create the default configuration (self-seeded)
    pub fn new() -> Self {
        Self {
            seed: None,
            conditional: true,
            conditional_probability: sampling::CONDITIONAL_PROBABILITY,
            measure: true,
            slack_fill: SlackFill::AnyGate,
        }
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> RqcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> RqcResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable/disable classical conditions
    pub fn with_conditional(mut self, enabled: bool) -> Self {
        self.conditional = enabled;
        self
    }

    /// Set condition probability
    pub fn with_conditional_probability(mut self, probability: f64) -> Self {
        self.conditional_probability = probability;
        self
    }

    /// Enable/disable the trailing measurement
    pub fn with_measure(mut self, enabled: bool) -> Self {
        self.measure = enabled;
        self
    }

    /// Set slack fill mode
    pub fn with_slack_fill(mut self, slack_fill: SlackFill) -> Self {
        self.slack_fill = slack_fill;
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Effective condition probability (zero when conditioning is off)
    pub fn condition_probability(&self) -> RqcResult<Probability> {
        if !self.conditional {
            return Ok(Probability::ZERO);
        }
        Probability::new(self.conditional_probability)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> RqcResult<()> {
        Probability::new(self.conditional_probability)?;
        Ok(())
    }
}

impl Default for RandomCircuitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RandomCircuitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seed = match self.seed {
            Some(seed) => seed.to_string(),
            None => "random".to_string(),
        };
        write!(
            f,
            "RandomCircuitConfig(seed={}, conditional={} p={:.3}, measure={}, slack={:?})",
            seed, self.conditional, self.conditional_probability, self.measure, self.slack_fill
        )
    }
}

// ============================================================================
// Circuit Request
// ============================================================================

/// One generation call: width, depth, basis gates and configuration
/// Gantree: CircuitRequest // 생성 요청
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitRequest {
    /// Number of qubits
    pub num_qubits: usize,
    /// Number of layers
    pub depth: usize,
    /// Gate catalog built from the request's basis gates
    pub catalog: GateCatalog,
    /// Generator configuration
    pub config: RandomCircuitConfig,
}

impl CircuitRequest {
    /// Parse a request object:
    /// `{"num_qubits": 2, "depth": 8, "basis_gates": ["CX", "X"], "config": {...}}`
    ///
    /// `config` is optional.
    pub fn from_json_value(value: &Value) -> RqcResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            RqcError::ConfigError(format!("request must be a JSON object, got {}", value))
        })?;

        let num_qubits = parse_count(object.get("num_qubits"), "num_qubits")?;
        let depth = parse_count(object.get("depth"), "depth")?;

        let basis_gates = object
            .get("basis_gates")
            .ok_or_else(|| RqcError::InvalidBasisGates("missing 'basis_gates'".into()))?;
        let catalog = GateCatalog::from_json_value(basis_gates)?;

        let config = match object.get("config") {
            Some(config) => serde_json::from_value::<RandomCircuitConfig>(config.clone())?,
            None => RandomCircuitConfig::default(),
        };
        config.validate()?;

        Ok(Self {
            num_qubits,
            depth,
            catalog,
            config,
        })
    }

    /// Parse a request from a JSON string
    pub fn from_json_str(json: &str) -> RqcResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }
}

fn parse_count(value: Option<&Value>, name: &'static str) -> RqcResult<usize> {
    let value = value.ok_or_else(|| RqcError::InvalidCount {
        name,
        value: "missing".into(),
    })?;
    value
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| RqcError::InvalidCount {
            name,
            value: value.to_string(),
        })
}

// ============================================================================
// Tests
// ============================================================================
