//! Error types for RQC
//!
//! Gantree: L0_Foundation → Errors
//!
//! Errors raised while building gate catalogs, configuring the generator
//! and appending operations to a circuit.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for RQC
/// Gantree: RqcError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RqcError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Invalid angle
    #[error("Invalid angle {0}: must be finite")]
    InvalidAngle(f64),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// No recognized basis gate reached the sampler
    /// Gantree: EmptyCatalog // 빈 카탈로그
    #[error("Gate catalog is empty: none of the basis gates {0:?} is recognized")]
    EmptyCatalog(Vec<String>),

    /// Catalog has no single-qubit gate to fill layer slack with
    #[error("Gate catalog has no single-qubit gate to fill layer slack")]
    NoSingleQubitGates,

    /// Count given through untyped input is negative or not an integer
    #[error("Invalid {name}: {value} (must be a non-negative integer)")]
    InvalidCount { name: &'static str, value: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// Basis gate input is not a sequence of tokens
    /// Gantree: InvalidBasisGates(String) // 입력 형태
    #[error("Invalid basis gates: {0}")]
    InvalidBasisGates(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Operation on non-existent qubit
    #[error("Operation references qubit {qubit} but circuit has only {num_qubits} qubits")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// Operation on non-existent classical bit
    #[error("Operation references clbit {clbit} but register has only {width} bits")]
    ClbitOutOfRange { clbit: usize, width: usize },

    /// Same qubit given twice to one operation
    #[error("Operation uses qubit {0} more than once")]
    DuplicateQubit(usize),

    /// Operand count does not match the gate arity
    #[error("Gate '{gate}' acts on {expected} qubits, got {actual}")]
    ArityMismatch {
        gate: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Parameter count does not match the gate definition
    #[error("Gate '{gate}' takes {expected} parameters, got {actual}")]
    ParamCountMismatch {
        gate: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Condition or measurement refers to a missing register
    #[error("Classical register '{0}' not found")]
    RegisterNotFound(String),

    /// Register already attached
    #[error("Classical register '{0}' already exists")]
    DuplicateRegister(String),

    /// Condition value does not fit the register
    #[error("Condition value {value} does not fit register '{register}' of width {width}")]
    ConditionOutOfRange {
        register: String,
        value: u64,
        width: usize,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for RQC operations
/// Gantree: RqcResult<T> // type alias
pub type RqcResult<T> = Result<T, RqcError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for RqcError {
    fn from(err: serde_json::Error) -> Self {
        RqcError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for RqcError {
    fn from(err: std::io::Error) -> Self {
        RqcError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl RqcError {
    /// Check if error comes from generator configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RqcError::EmptyCatalog(_)
                | RqcError::NoSingleQubitGates
                | RqcError::InvalidCount { .. }
                | RqcError::ConfigError(_)
                | RqcError::InvalidProbability(_)
        )
    }

    /// Check if error comes from a malformed argument shape
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RqcError::InvalidBasisGates(_))
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            RqcError::QubitOutOfRange { .. }
                | RqcError::ClbitOutOfRange { .. }
                | RqcError::DuplicateQubit(_)
                | RqcError::ArityMismatch { .. }
                | RqcError::ParamCountMismatch { .. }
                | RqcError::RegisterNotFound(_)
                | RqcError::DuplicateRegister(_)
                | RqcError::ConditionOutOfRange { .. }
                | RqcError::InvalidAngle(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
