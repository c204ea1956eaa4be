//! # RQC Random
//!
//! Layered random circuit generation from a list of basis-gate tokens.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rqc_random // L2: Random generation (완료)
//!     L2_Random // 랜덤 회로 생성 (완료)
//!         GateCatalog // 기저 게이트 카탈로그 (완료)
//!         RandomCircuitConfig // 생성 설정 (완료)
//!         LayerSampler // 레이어 샘플러 (완료)
//!         RandomCircuitGenerator // 회로 생성기 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rqc_random::prelude::*;
//!
//! let circuit = RandomCircuitGenerator::with_seed(42)
//!     .generate(2, 8, &["CX", "X"])
//!     .unwrap();
//!
//! assert_eq!(circuit.num_layers(), 8);
//! assert_eq!(circuit.count_measurements(), 2);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use rqc_random::prelude::*;
//!
//! let config = RandomCircuitConfig::new()
//!     .with_seed(7)
//!     .with_conditional(false)
//!     .with_slack_fill(SlackFill::SingleQubitOnly);
//!
//! let circuit = generate_random_circuit_with_config(4, 3, &["H", "CZ"], &config).unwrap();
//! assert_eq!(circuit.count_conditional(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Gate catalog (Gantree: L2_Random → GateCatalog)
pub mod catalog;

/// Generator configuration (Gantree: L2_Random → RandomCircuitConfig)
pub mod config;

/// Layered sampler (Gantree: L2_Random → LayerSampler)
pub mod sampler;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::{GateCatalog, GateDescriptor, BASIS_GATE_TABLE};
pub use config::{CircuitRequest, RandomCircuitConfig, SlackFill};
pub use sampler::{
    generate_random_circuit, generate_random_circuit_with_config,
    generate_random_circuit_with_rng, LayerPlan, LayerSampler, RandomCircuitGenerator,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use rqc_random::prelude::*;
    //! ```

    pub use crate::catalog::{GateCatalog, GateDescriptor};
    pub use crate::config::{CircuitRequest, RandomCircuitConfig, SlackFill};
    pub use crate::sampler::{
        generate_random_circuit, generate_random_circuit_with_config,
        generate_random_circuit_with_rng, LayerPlan, LayerSampler, RandomCircuitGenerator,
    };
    pub use rqc_core::prelude::*;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::BASIS_GATE_TABLE;
    use std::collections::HashSet;

    /// Gates the original `qelib1.inc` declares
    const QELIB1: &[&str] = &[
        "u3", "u2", "u1", "cx", "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rx", "ry",
        "rz", "cz", "cy", "ch", "ccx", "crz", "cu1", "cu3",
    ];

    /// Gate name of a QASM statement, skipping an `if(...)` prefix
    fn statement_name(stmt: &str) -> &str {
        let stmt = stmt.trim();
        let stmt = match stmt.strip_prefix("if(") {
            Some(rest) => rest.split_once(')').map_or(rest, |(_, r)| r.trim()),
            None => stmt,
        };
        stmt.split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or("")
    }

    #[test]
    fn test_request_to_circuit() {
        let request = CircuitRequest::from_json_str(
            r#"{"num_qubits": 3, "depth": 4, "basis_gates": ["RZ", "SX", "CX", "bogus"],
                "config": {"seed": 12}}"#,
        )
        .unwrap();
        assert_eq!(request.catalog.unrecognized(), ["bogus".to_string()]);

        let circuit = RandomCircuitGenerator::with_config(request.config.clone())
            .generate_from_catalog(request.num_qubits, request.depth, &request.catalog)
            .unwrap();

        assert_eq!(circuit.num_layers(), 4);
        assert_eq!(circuit.num_clbits(), 3);
        assert!(circuit.validate().is_ok());
        for op in circuit.operations() {
            assert!(matches!(
                op.kind(),
                GateKind::Rz | GateKind::Sx | GateKind::Cx | GateKind::Measure
            ));
        }
    }

    #[test]
    fn test_qasm_and_json_export() {
        let circuit = RandomCircuitGenerator::with_seed(21)
            .generate(3, 5, &["H", "CZ", "iSwap"])
            .unwrap();

        let qasm = circuit.to_qasm();
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[3];"));
        assert!(qasm.contains("creg c[3];"));
        assert!(qasm.contains("measure q[2] -> c[2];"));

        let restored = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(restored, circuit);
    }

    #[test]
    fn test_depth_bounds_layers() {
        let config = RandomCircuitConfig::new().with_seed(3).with_conditional(false);
        let circuit = RandomCircuitGenerator::with_config(config)
            .generate(4, 6, &["H", "CX"])
            .unwrap();
        // Each layer adds at most one, the final measurement one more
        assert!(circuit.depth() <= 7);
        assert!(circuit.depth() >= 2);
    }

    #[test]
    fn test_qasm_declares_every_gate_it_calls() {
        let tokens: Vec<&str> = BASIS_GATE_TABLE.iter().map(|(name, _)| *name).collect();
        let circuit = RandomCircuitGenerator::with_seed(17)
            .generate(6, 200, &tokens)
            .unwrap();
        let qasm = circuit.to_qasm();

        let mut known: HashSet<&str> = QELIB1.iter().copied().collect();
        known.extend(["U", "CX", "measure", "reset"]);
        let mut used = HashSet::new();

        for line in qasm.lines().map(str::trim) {
            if line.is_empty()
                || ["OPENQASM", "include", "qreg", "creg"]
                    .iter()
                    .any(|p| line.starts_with(p))
            {
                continue;
            }
            if let Some(decl) = line.strip_prefix("gate ") {
                let name = statement_name(decl);
                let (_, body) = decl.split_once('{').unwrap();
                for stmt in body.trim_end_matches('}').split(';') {
                    if stmt.trim().is_empty() {
                        continue;
                    }
                    let callee = statement_name(stmt);
                    assert!(known.contains(callee), "{} calls undeclared {}", name, callee);
                }
                known.insert(name);
                continue;
            }
            let name = statement_name(line);
            assert!(known.contains(name), "undeclared gate {}", name);
            used.insert(name);
        }

        for name in ["xx_minus_yy", "xx_plus_yy", "ecr", "iswap", "r", "cu", "sx"] {
            assert!(used.contains(name), "{} never sampled", name);
        }
    }
}
