//! # RQC Core
//!
//! Circuit data model for the RQC random quantum circuit generator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! rqc_core // L0+L1: Foundation + Circuit (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 샘플링/레지스터 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Circuit // 회로 구조 (완료)
//!         Gate // 게이트 종류 (완료)
//!         Operation // 연산 + 고전 조건 (완료)
//!         Circuit // 회로 구조체 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rqc_core::prelude::*;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.add_register(ClassicalRegister::new("c", 2)).unwrap();
//! circuit
//!     .append_layer(vec![Operation::gate(GateKind::Cx, vec![0, 1], vec![]).unwrap()])
//!     .unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_layers(), 1);
//! println!("{}", circuit.to_qasm());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Gate kinds (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Operations and conditions (Gantree: L1_Circuit → Operation)
pub mod operation;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

// ============================================================================
// Re-exports
// ============================================================================

pub use circuit::{Circuit, ClassicalRegister};
pub use constants::{registers, sampling};
pub use error::{RqcError, RqcResult};
pub use gate::GateKind;
pub use operation::{Condition, Operation};
pub use types::{Angle, ClbitId, ParamVec, Probability, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use rqc_core::prelude::*;
    //! ```

    pub use crate::circuit::{Circuit, ClassicalRegister};
    pub use crate::constants::{registers, sampling};
    pub use crate::error::{RqcError, RqcResult};
    pub use crate::gate::GateKind;
    pub use crate::operation::{Condition, Operation};
    pub use crate::types::{Angle, ClbitId, ParamVec, Probability, QubitId};
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

    #[test]
    fn test_layered_circuit_with_measurement() {
        let mut circuit = Circuit::new(3);
        circuit
            .add_register(ClassicalRegister::new(registers::CREG_NAME, 3))
            .unwrap();

        circuit
            .append_layer(vec![
                Operation::gate(GateKind::Rzz, vec![2, 0], vec![1.0]).unwrap(),
                Operation::gate(GateKind::Sx, vec![1], vec![]).unwrap(),
            ])
            .unwrap();
        circuit
            .append_layer(vec![
                Operation::gate(GateKind::U, vec![0], vec![0.1, 0.2, 0.3]).unwrap(),
                Operation::gate(GateKind::ISwap, vec![1, 2], vec![])
                    .unwrap()
                    .with_condition(Condition::new("c", 5)),
            ])
            .unwrap();
        circuit.measure_all().unwrap();

        assert_eq!(circuit.num_layers(), 2);
        assert_eq!(circuit.count_measurements(), 3);
        assert_eq!(circuit.count_2q(), 2);
        assert_eq!(circuit.count_conditional(), 1);
        // Measurements are not part of any layer
        let layered: usize = circuit.layers().map(|l| l.len()).sum();
        assert_eq!(layered + 3, circuit.len());
    }

    #[test]
    fn test_condition_bound_matches_register() {
        let reg = ClassicalRegister::new("c", 4);
        let bound = sampling::condition_bound(4);
        assert!(reg.fits(bound - 1));
        assert!(!reg.fits(bound));

        let wide = ClassicalRegister::new("c", 70);
        assert!(wide.fits(sampling::condition_bound(70) - 1));
        assert!(wide.fits(u64::MAX));
    }

    #[test]
    fn test_probability_default() {
        let p = Probability::new(sampling::CONDITIONAL_PROBABILITY).unwrap();
        assert!((p.value() - 0.1).abs() < 1e-12);
    }
}
