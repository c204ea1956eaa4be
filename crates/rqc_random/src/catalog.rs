//! Gate catalog construction
//!
//! Gantree: L2_Random → GateCatalog
//!
//! Maps basis-gate name tokens onto gate descriptors through a static
//! table. The table is walked in order and an entry is taken whenever its
//! token appears in the input, so the catalog order never depends on the
//! order (or repetition) of the input tokens.

use rqc_core::{GateKind, RqcError, RqcResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// Gate Descriptor
// ============================================================================

/// Gate kind with the arity and parameter count used for sampling
/// Gantree: GateDescriptor // 게이트 기술자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GateDescriptor {
    kind: GateKind,
    num_qubits: usize,
    num_params: usize,
}

impl GateDescriptor {
    /// Create a descriptor
    pub const fn new(kind: GateKind, num_qubits: usize, num_params: usize) -> Self {
        Self {
            kind,
            num_qubits,
            num_params,
        }
    }

    /// Gate kind
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Number of qubits consumed
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of parameters drawn
    pub fn num_params(&self) -> usize {
        self.num_params
    }
}

impl fmt::Display for GateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}q, {}p)", self.kind, self.num_qubits, self.num_params)
    }
}

// ============================================================================
// Token Table
// ============================================================================

const fn d(kind: GateKind, num_qubits: usize, num_params: usize) -> GateDescriptor {
    GateDescriptor::new(kind, num_qubits, num_params)
}

/// Recognized basis-gate tokens, in catalog order.
///
/// "R" appears twice: it selects both Reset and the R(θ, φ) rotation.
pub const BASIS_GATE_TABLE: &[(&str, GateDescriptor)] = &[
    ("R", d(GateKind::Reset, 1, 0)),
    ("I", d(GateKind::I, 1, 0)),
    ("SX", d(GateKind::Sx, 1, 0)),
    ("X", d(GateKind::X, 1, 0)),
    ("RZ", d(GateKind::Rz, 1, 1)),
    ("R", d(GateKind::R, 1, 2)),
    ("H", d(GateKind::H, 1, 0)),
    ("P", d(GateKind::Phase, 1, 1)),
    ("RX", d(GateKind::Rx, 1, 1)),
    ("RY", d(GateKind::Ry, 1, 1)),
    ("S", d(GateKind::S, 1, 0)),
    ("Sdg", d(GateKind::Sdg, 1, 0)),
    ("SXdg", d(GateKind::Sxdg, 1, 0)),
    ("T", d(GateKind::T, 1, 0)),
    ("Tdg", d(GateKind::Tdg, 1, 0)),
    ("U", d(GateKind::U, 1, 3)),
    ("U1", d(GateKind::U1, 1, 1)),
    ("U2", d(GateKind::U2, 1, 2)),
    ("U3", d(GateKind::U3, 1, 3)),
    ("Y", d(GateKind::Y, 1, 0)),
    ("Z", d(GateKind::Z, 1, 0)),
    ("CX", d(GateKind::Cx, 2, 0)),
    ("DCX", d(GateKind::Dcx, 2, 0)),
    ("CH", d(GateKind::Ch, 2, 0)),
    ("CP", d(GateKind::CPhase, 2, 1)),
    ("CRX", d(GateKind::Crx, 2, 1)),
    ("CRY", d(GateKind::Cry, 2, 1)),
    ("CRZ", d(GateKind::Crz, 2, 1)),
    ("CSX", d(GateKind::Csx, 2, 0)),
    ("CU", d(GateKind::Cu, 2, 4)),
    ("CU1", d(GateKind::Cu1, 2, 1)),
    ("CU3", d(GateKind::Cu3, 2, 3)),
    ("CY", d(GateKind::Cy, 2, 0)),
    ("CZ", d(GateKind::Cz, 2, 0)),
    ("RXX", d(GateKind::Rxx, 2, 1)),
    ("RYY", d(GateKind::Ryy, 2, 1)),
    ("RZZ", d(GateKind::Rzz, 2, 1)),
    ("RZX", d(GateKind::Rzx, 2, 1)),
    ("XX-YY", d(GateKind::XxMinusYy, 2, 2)),
    ("XX+YY", d(GateKind::XxPlusYy, 2, 2)),
    ("ECR", d(GateKind::Ecr, 2, 0)),
    ("CS", d(GateKind::Cs, 2, 0)),
    ("CSdg", d(GateKind::Csdg, 2, 0)),
    ("Swap", d(GateKind::Swap, 2, 0)),
    ("iSwap", d(GateKind::ISwap, 2, 0)),
];

/// Check if a token is in the table
pub fn is_recognized(token: &str) -> bool {
    BASIS_GATE_TABLE.iter().any(|(name, _)| *name == token)
}

// ============================================================================
// Gate Catalog
// ============================================================================

/// Immutable list of descriptors the sampler draws from
/// Gantree: GateCatalog // 게이트 카탈로그
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GateCatalog {
    descriptors: Vec<GateDescriptor>,
    /// Input tokens that matched no table entry, in input order
    unrecognized: Vec<String>,
}

impl GateCatalog {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build a catalog from basis-gate tokens
    /// Gantree: from_basis_gates(tokens) -> Self // 카탈로그 생성
    ///
    /// Unrecognized tokens are ignored; an empty result is not an error here.
    pub fn from_basis_gates<I, S>(basis_gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = basis_gates.into_iter().collect();
        let present: HashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();

        let descriptors = BASIS_GATE_TABLE
            .iter()
            .filter(|(name, _)| present.contains(name))
            .map(|(_, desc)| *desc)
            .collect();

        let mut unrecognized: Vec<String> = Vec::new();
        for token in &tokens {
            let token: &str = token.as_ref();
            if !is_recognized(token) && !unrecognized.iter().any(|u| u == token) {
                unrecognized.push(token.to_string());
            }
        }

        Self {
            descriptors,
            unrecognized,
        }
    }

    /// Build a catalog from untyped JSON (an array of strings)
    pub fn from_json_value(value: &Value) -> RqcResult<Self> {
        let items = value.as_array().ok_or_else(|| {
            RqcError::InvalidBasisGates(format!("expected an array of strings, got {}", value))
        })?;

        let tokens = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().ok_or_else(|| {
                    RqcError::InvalidBasisGates(format!(
                        "element {} is not a string: {}",
                        i, item
                    ))
                })
            })
            .collect::<RqcResult<Vec<&str>>>()?;

        Ok(Self::from_basis_gates(tokens))
    }

    /// Build a catalog from a JSON string such as `["CX", "X"]`
    pub fn from_json_str(json: &str) -> RqcResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| RqcError::InvalidBasisGates(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Build a catalog from every recognized token
    pub fn all() -> Self {
        Self::from_basis_gates(BASIS_GATE_TABLE.iter().map(|(name, _)| *name))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Descriptors in catalog order
    pub fn descriptors(&self) -> &[GateDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if no token was recognized
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Tokens that matched nothing
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    /// Sub-catalog of single-qubit descriptors
    pub fn single_qubit(&self) -> GateCatalog {
        GateCatalog {
            descriptors: self
                .descriptors
                .iter()
                .filter(|desc| desc.num_qubits() == 1)
                .copied()
                .collect(),
            unrecognized: Vec::new(),
        }
    }

    /// Fail with a configuration error if nothing can be sampled
    pub fn ensure_non_empty(&self) -> RqcResult<()> {
        if self.is_empty() {
            return Err(RqcError::EmptyCatalog(self.unrecognized.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for GateCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.descriptors.iter().map(|d| d.to_string()).collect();
        write!(f, "GateCatalog[{}]", names.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_matches_gate_kinds() {
        for (name, desc) in BASIS_GATE_TABLE {
            assert_eq!(
                desc.num_qubits(),
                desc.kind().num_qubits(),
                "arity of {}",
                name
            );
            assert_eq!(
                desc.num_params(),
                desc.kind().num_params(),
                "params of {}",
                name
            );
        }
        assert_eq!(BASIS_GATE_TABLE.len(), 45);
    }

    #[test]
    fn test_cx_x_catalog() {
        let catalog = GateCatalog::from_basis_gates(["CX", "X"]);
        assert_eq!(
            catalog.descriptors(),
            &[
                GateDescriptor::new(GateKind::X, 1, 0),
                GateDescriptor::new(GateKind::Cx, 2, 0),
            ]
        );
    }

    #[test]
    fn test_r_maps_to_reset_and_rotation() {
        let catalog = GateCatalog::from_basis_gates(vec!["R".to_string()]);
        assert_eq!(
            catalog.descriptors(),
            &[
                GateDescriptor::new(GateKind::Reset, 1, 0),
                GateDescriptor::new(GateKind::R, 1, 2),
            ]
        );
    }

    #[test]
    fn test_order_follows_table() {
        let a = GateCatalog::from_basis_gates(["Swap", "H", "CU"]);
        let b = GateCatalog::from_basis_gates(["CU", "Swap", "H"]);
        assert_eq!(a, b);
        let kinds: Vec<GateKind> = a.descriptors().iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec![GateKind::H, GateKind::Cu, GateKind::Swap]);
    }

    #[test]
    fn test_duplicate_tokens_collapse() {
        let catalog = GateCatalog::from_basis_gates(["X", "X", "X"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unrecognized_tokens_ignored() {
        let catalog = GateCatalog::from_basis_gates(["cx", "Toffoli", "H", "cx"]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.unrecognized(), &["cx".to_string(), "Toffoli".to_string()]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = GateCatalog::from_basis_gates(Vec::<String>::new());
        assert!(catalog.is_empty());

        let catalog = GateCatalog::from_basis_gates(["foo"]);
        assert!(catalog.is_empty());
        let err = catalog.ensure_non_empty().unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(err, RqcError::EmptyCatalog(vec!["foo".into()]));
    }

    #[test]
    fn test_all_catalog() {
        let catalog = GateCatalog::all();
        assert_eq!(catalog.len(), BASIS_GATE_TABLE.len());
        assert!(catalog.unrecognized().is_empty());
        assert_eq!(catalog.single_qubit().len(), 21);
    }

    #[test]
    fn test_from_json() {
        let catalog = GateCatalog::from_json_value(&json!(["CX", "X"])).unwrap();
        assert_eq!(catalog.len(), 2);

        let catalog = GateCatalog::from_json_str(r#"["XX+YY", "iSwap"]"#).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_json_bad_shape() {
        let err = GateCatalog::from_json_value(&json!("CX")).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = GateCatalog::from_json_value(&json!(["CX", 3])).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("element 1"));

        let err = GateCatalog::from_json_str("[\"CX\"").unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
