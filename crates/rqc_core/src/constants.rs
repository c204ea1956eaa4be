//! Constants for RQC
//!
//! Gantree: L0_Foundation → Constants
//!
//! Sampling defaults and register limits used by the random generator.

// ============================================================================
// Sampling Constants
// Gantree: sampling // 샘플링 상수
// ============================================================================

pub mod sampling {
    //! Defaults for layered random circuit sampling

    /// Probability that a sampled operation gets a classical condition
    /// Gantree: CONDITIONAL_PROBABILITY: f64 = 0.1
    pub const CONDITIONAL_PROBABILITY: f64 = 0.1;

    /// Upper bound on the number of register bits a condition value spans
    pub const MAX_CONDITION_BITS: usize = 63;

    /// Upper end (exclusive) of the parameter range, 2π
    pub const PARAM_UPPER: f64 = std::f64::consts::TAU;

    /// Exclusive upper bound of condition values for a circuit width
    ///
    /// `2^min(num_qubits, 63)`
    pub fn condition_bound(num_qubits: usize) -> u64 {
        1u64 << num_qubits.min(MAX_CONDITION_BITS)
    }
}

// ============================================================================
// Register Constants
// ============================================================================

pub mod registers {
    //! Register naming used by generated circuits and QASM export

    /// Name of the quantum register in exported QASM
    pub const QREG_NAME: &str = "q";

    /// Name of the classical register attached by the generator
    pub const CREG_NAME: &str = "c";
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_bound() {
        assert_eq!(sampling::condition_bound(1), 2);
        assert_eq!(sampling::condition_bound(5), 32);
        assert_eq!(sampling::condition_bound(63), 1 << 63);
        // Wide circuits saturate at 63 bits
        assert_eq!(sampling::condition_bound(100), 1 << 63);
    }

    #[test]
    fn test_param_upper() {
        approx::assert_relative_eq!(sampling::PARAM_UPPER, 2.0 * std::f64::consts::PI);
    }
}
