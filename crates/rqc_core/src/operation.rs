//! Circuit operations for RQC
//!
//! Gantree: L1_Circuit → Operation
//!
//! An operation is a gate kind applied to concrete qubits with concrete
//! parameters, optionally guarded by a classical condition.

use crate::constants::registers::{CREG_NAME, QREG_NAME};
use crate::error::{RqcError, RqcResult};
use crate::gate::GateKind;
use crate::types::{Angle, ClbitId, ParamVec, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Condition
// ============================================================================

/// Classical condition: the operation runs only if `register == value`
/// Gantree: Condition // 고전 조건
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Name of the classical register compared against
    pub register: String,
    /// Integer value the register must hold
    pub value: u64,
}

impl Condition {
    /// Create a new condition
    pub fn new(register: impl Into<String>, value: u64) -> Self {
        Self {
            register: register.into(),
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if({}=={})", self.register, self.value)
    }
}

// ============================================================================
// Operation
// ============================================================================

/// A gate placed on qubits
/// Gantree: Operation // 연산
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    kind: GateKind,
    qubits: Vec<QubitId>,
    params: ParamVec,
    clbits: Vec<ClbitId>,
    condition: Option<Condition>,
}

impl Operation {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a gate operation, validating operand and parameter counts
    /// Gantree: gate(kind, qubits, params) -> Result<Self> // 게이트 연산
    pub fn gate(kind: GateKind, qubits: Vec<QubitId>, params: ParamVec) -> RqcResult<Self> {
        if kind.is_measurement() {
            return Err(RqcError::ConfigError(
                "measurements are created with Operation::measure".into(),
            ));
        }
        if qubits.len() != kind.num_qubits() {
            return Err(RqcError::ArityMismatch {
                gate: kind.name(),
                expected: kind.num_qubits(),
                actual: qubits.len(),
            });
        }
        if params.len() != kind.num_params() {
            return Err(RqcError::ParamCountMismatch {
                gate: kind.name(),
                expected: kind.num_params(),
                actual: params.len(),
            });
        }
        if let Some(&bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(RqcError::InvalidAngle(bad));
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(RqcError::DuplicateQubit(*q));
            }
        }

        Ok(Self {
            kind,
            qubits,
            params,
            clbits: Vec::new(),
            condition: None,
        })
    }

    /// Measure `qubit` into classical bit `clbit`
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: GateKind::Measure,
            qubits: vec![qubit],
            params: Vec::new(),
            clbits: vec![clbit],
            condition: None,
        }
    }

    /// Attach a classical condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Gate kind
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Operand qubits in gate order
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Gate parameters
    pub fn params(&self) -> &[Angle] {
        &self.params
    }

    /// Classical bits written (measurements only)
    pub fn clbits(&self) -> &[ClbitId] {
        &self.clbits
    }

    /// Classical condition, if any
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Check if operation is classically conditioned
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to an OpenQASM 2.0 statement
    /// Gantree: to_qasm(&self) -> String // QASM 변환
    pub fn to_qasm(&self) -> String {
        self.to_qasm_with(|clbit| format!("{}[{}]", CREG_NAME, clbit))
    }

    /// Convert to QASM, resolving classical bits through `clbit_label`
    pub(crate) fn to_qasm_with(&self, clbit_label: impl Fn(ClbitId) -> String) -> String {
        let mut line = String::new();

        if let Some(cond) = &self.condition {
            line.push_str(&cond.to_string());
            line.push(' ');
        }

        line.push_str(self.kind.name());
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
            line.push_str(&format!("({})", params.join(",")));
        }

        let qubits: Vec<String> = self
            .qubits
            .iter()
            .map(|q| format!("{}[{}]", QREG_NAME, q))
            .collect();
        line.push(' ');
        line.push_str(&qubits.join(","));

        if let Some(&clbit) = self.clbits.first() {
            line.push_str(" -> ");
            line.push_str(&clbit_label(clbit));
        }

        line.push(';');
        line
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
