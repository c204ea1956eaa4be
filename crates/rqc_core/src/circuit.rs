//! Quantum circuit structure for RQC
//!
//! Gantree: L1_Circuit → Circuit
//!
//! An append-only circuit: qubits addressed by index, classical registers,
//! and an ordered operation log grouped into layers.

use crate::constants::registers::QREG_NAME;
use crate::error::{RqcError, RqcResult};
use crate::gate::{GateKind, QASM_CUSTOM_GATES};
use crate::operation::Operation;
use crate::types::ClbitId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

// ============================================================================
// Classical Register
// ============================================================================

/// Named classical register
/// Gantree: ClassicalRegister // 고전 레지스터
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    width: usize,
}

impl ClassicalRegister {
    /// Create a new register
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// Register name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if `value` is representable in this register
    pub fn fits(&self, value: u64) -> bool {
        self.width >= 64 || value < (1u64 << self.width)
    }
}

// ============================================================================
// Circuit
// ============================================================================

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Classical registers; clbit ids run across them in attach order
    registers: Vec<ClassicalRegister>,

    /// Operation log
    operations: Vec<Operation>,

    /// Index ranges into `operations`, one per layer
    layers: Vec<Range<usize>>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit with no registers
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            registers: Vec::new(),
            operations: Vec::new(),
            layers: Vec::new(),
        }
    }

    // ========================================================================
    // Registers
    // ========================================================================

    /// Attach a classical register
    /// Gantree: add_register(&mut, ClassicalRegister) -> Result // 레지스터 추가
    pub fn add_register(&mut self, register: ClassicalRegister) -> RqcResult<()> {
        if self.register(register.name()).is_some() {
            return Err(RqcError::DuplicateRegister(register.name().to_string()));
        }
        self.registers.push(register);
        Ok(())
    }

    /// Attached classical registers
    pub fn registers(&self) -> &[ClassicalRegister] {
        &self.registers
    }

    /// Look up a register by name
    pub fn register(&self, name: &str) -> Option<&ClassicalRegister> {
        self.registers.iter().find(|r| r.name() == name)
    }

    /// Total number of classical bits
    pub fn num_clbits(&self) -> usize {
        self.registers.iter().map(|r| r.width()).sum()
    }

    /// Resolve a global clbit id to `(register, local index)`
    fn locate_clbit(&self, clbit: ClbitId) -> Option<(&ClassicalRegister, usize)> {
        let mut offset = 0;
        for reg in &self.registers {
            if clbit < offset + reg.width() {
                return Some((reg, clbit - offset));
            }
            offset += reg.width();
        }
        None
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append one operation outside any layer
    /// Gantree: append(&mut, Operation) -> Result // 연산 추가
    pub fn append(&mut self, op: Operation) -> RqcResult<()> {
        self.check_operation(&op)?;
        self.operations.push(op);
        Ok(())
    }

    /// Append a layer of operations acting on disjoint qubits
    ///
    /// The whole layer is validated before anything is appended.
    pub fn append_layer(&mut self, ops: Vec<Operation>) -> RqcResult<()> {
        for op in &ops {
            self.check_operation(op)?;
        }
        check_disjoint(&ops)?;

        let start = self.operations.len();
        self.operations.extend(ops);
        self.layers.push(start..self.operations.len());
        Ok(())
    }

    /// Measure every qubit `i` into clbit `i`
    /// Gantree: measure_all(&mut) -> Result // 전체 측정
    pub fn measure_all(&mut self) -> RqcResult<()> {
        let width = self.num_clbits();
        if width < self.num_qubits {
            return Err(RqcError::ClbitOutOfRange {
                clbit: self.num_qubits.saturating_sub(1),
                width,
            });
        }
        for q in 0..self.num_qubits {
            self.operations.push(Operation::measure(q, q));
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get operations in append order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Check if circuit has no operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Number of layers appended with `append_layer`
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Operations of layer `index`
    ///
    /// `None` also covers a range that does not fit the operation log,
    /// which only an unvalidated deserialized circuit can hold.
    pub fn layer(&self, index: usize) -> Option<&[Operation]> {
        self.layers
            .get(index)
            .and_then(|range| self.operations.get(range.clone()))
    }

    /// Iterate over layers in order
    pub fn layers(&self) -> impl Iterator<Item = &[Operation]> + '_ {
        self.layers
            .iter()
            .map(move |range| self.operations.get(range.clone()).unwrap_or_default())
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];
        let mut clbit_depths = vec![0usize; self.num_clbits()];
        let reg_offsets = self.register_offsets();

        for op in &self.operations {
            let mut clbits: Vec<ClbitId> = op.clbits().to_vec();
            // A condition reads its whole register
            if let Some(cond) = op.condition() {
                if let Some((offset, reg)) = reg_offsets
                    .iter()
                    .zip(&self.registers)
                    .find(|(_, r)| r.name() == cond.register)
                {
                    clbits.extend(*offset..*offset + reg.width());
                }
            }

            let max_depth = op
                .qubits()
                .iter()
                .filter_map(|&q| qubit_depths.get(q))
                .chain(clbits.iter().filter_map(|&c| clbit_depths.get(c)))
                .max()
                .copied()
                .unwrap_or(0);

            for &q in op.qubits() {
                if let Some(d) = qubit_depths.get_mut(q) {
                    *d = max_depth + 1;
                }
            }
            for &c in &clbits {
                if let Some(d) = clbit_depths.get_mut(c) {
                    *d = max_depth + 1;
                }
            }
        }

        qubit_depths
            .into_iter()
            .chain(clbit_depths)
            .max()
            .unwrap_or(0)
    }

    fn register_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.registers.len());
        let mut offset = 0;
        for reg in &self.registers {
            offsets.push(offset);
            offset += reg.width();
        }
        offsets
    }

    /// Get total operation count
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Count single-qubit unitary gates
    /// Gantree: count_1q(&self) -> usize // 1Q 수
    pub fn count_1q(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.kind().is_single_qubit())
            .count()
    }

    /// Count two-qubit gates
    /// Gantree: count_2q(&self) -> usize // 2Q 수
    pub fn count_2q(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.kind().is_two_qubit())
            .count()
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.kind().is_measurement())
            .count()
    }

    /// Count classically conditioned operations
    pub fn count_conditional(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.is_conditional())
            .count()
    }

    /// Count parameterized gates
    pub fn count_parameterized(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.kind().is_parameterized())
            .count()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_operation(&self, op: &Operation) -> RqcResult<()> {
        let kind = op.kind();
        if op.qubits().len() != kind.num_qubits() {
            return Err(RqcError::ArityMismatch {
                gate: kind.name(),
                expected: kind.num_qubits(),
                actual: op.qubits().len(),
            });
        }
        if op.params().len() != kind.num_params() {
            return Err(RqcError::ParamCountMismatch {
                gate: kind.name(),
                expected: kind.num_params(),
                actual: op.params().len(),
            });
        }

        for &qubit in op.qubits() {
            if qubit >= self.num_qubits {
                return Err(RqcError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }

        let width = self.num_clbits();
        for &clbit in op.clbits() {
            if clbit >= width {
                return Err(RqcError::ClbitOutOfRange { clbit, width });
            }
        }

        if let Some(cond) = op.condition() {
            let reg = self
                .register(&cond.register)
                .ok_or_else(|| RqcError::RegisterNotFound(cond.register.clone()))?;
            if !reg.fits(cond.value) {
                return Err(RqcError::ConditionOutOfRange {
                    register: cond.register.clone(),
                    value: cond.value,
                    width: reg.width(),
                });
            }
        }

        Ok(())
    }

    /// Re-check every operation and layer against the circuit shape
    pub fn validate(&self) -> RqcResult<()> {
        for op in &self.operations {
            self.check_operation(op)?;
        }

        // Layers are ordered and never overlap; operations appended outside
        // a layer may sit between them.
        let mut prev_end = 0;
        for range in &self.layers {
            let ops = self
                .operations
                .get(range.clone())
                .filter(|_| range.start >= prev_end)
                .ok_or_else(|| {
                    RqcError::ConfigError(format!(
                        "layer range {:?} invalid after {} in {} operations",
                        range,
                        prev_end,
                        self.operations.len()
                    ))
                })?;
            check_disjoint(ops)?;
            prev_end = range.end;
        }
        Ok(())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = Vec::new();

        // Header
        lines.push("OPENQASM 2.0;".to_string());
        lines.push("include \"qelib1.inc\";".to_string());

        // Declarations for kinds qelib1.inc lacks
        for kind in self.custom_gates_used() {
            if let Some(def) = kind.qasm_definition() {
                lines.push(def.to_string());
            }
        }
        lines.push(String::new());

        // Register declarations
        if self.num_qubits > 0 {
            lines.push(format!("qreg {}[{}];", QREG_NAME, self.num_qubits));
        }
        for reg in &self.registers {
            lines.push(format!("creg {}[{}];", reg.name(), reg.width()));
        }
        lines.push(String::new());

        for op in &self.operations {
            lines.push(op.to_qasm_with(|clbit| match self.locate_clbit(clbit) {
                Some((reg, local)) => format!("{}[{}]", reg.name(), local),
                None => format!("?[{}]", clbit),
            }));
        }

        lines.join("\n")
    }

    /// Custom kinds needed by the operation log, in declaration order
    fn custom_gates_used(&self) -> Vec<GateKind> {
        let mut used: HashSet<GateKind> = HashSet::new();
        for op in &self.operations {
            let kind = op.kind();
            if !kind.is_qelib1() {
                used.insert(kind);
                used.extend(kind.qasm_requires().iter().copied());
            }
        }
        QASM_CUSTOM_GATES
            .iter()
            .copied()
            .filter(|kind| used.contains(kind))
            .collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> RqcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and validate
    pub fn from_json(json: &str) -> RqcResult<Self> {
        let circuit: Circuit = serde_json::from_str(json)?;
        circuit.validate()?;
        Ok(circuit)
    }
}

/// Reject a layer that touches any qubit twice
fn check_disjoint(ops: &[Operation]) -> RqcResult<()> {
    let mut seen = HashSet::new();
    for op in ops {
        for &q in op.qubits() {
            if !seen.insert(q) {
                return Err(RqcError::DuplicateQubit(q));
            }
        }
    }
    Ok(())
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} clbits, {} operations)",
            self.num_qubits,
            self.num_clbits(),
            self.operations.len()
        )?;
        writeln!(f, "  Layers: {}", self.num_layers())?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        writeln!(f, "  Conditional: {}", self.count_conditional())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Condition;
    use crate::types::QubitId;

    fn op(kind: GateKind, qubits: Vec<QubitId>) -> Operation {
        let params = vec![0.5; kind.num_params()];
        Operation::gate(kind, qubits, params).unwrap()
    }

    fn with_creg(num_qubits: usize) -> Circuit {
        let mut circuit = Circuit::new(num_qubits);
        circuit
            .add_register(ClassicalRegister::new("c", num_qubits))
            .unwrap();
        circuit
    }

    #[test]
    fn test_circuit_new() {
        let circuit = Circuit::new(5);
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_append_out_of_range() {
        let mut circuit = Circuit::new(3);
        assert!(circuit.append(op(GateKind::H, vec![0])).is_ok());
        let err = circuit.append(op(GateKind::H, vec![5])).unwrap_err();
        assert!(matches!(err, RqcError::QubitOutOfRange { qubit: 5, .. }));
    }

    #[test]
    fn test_duplicate_register() {
        let mut circuit = with_creg(2);
        let err = circuit
            .add_register(ClassicalRegister::new("c", 2))
            .unwrap_err();
        assert_eq!(err, RqcError::DuplicateRegister("c".into()));
    }

    #[test]
    fn test_append_layer() {
        let mut circuit = Circuit::new(3);
        circuit
            .append_layer(vec![op(GateKind::Cx, vec![2, 0]), op(GateKind::X, vec![1])])
            .unwrap();
        circuit.append_layer(vec![op(GateKind::H, vec![0])]).unwrap();

        assert_eq!(circuit.num_layers(), 2);
        assert_eq!(circuit.layer(0).unwrap().len(), 2);
        assert_eq!(circuit.layer(1).unwrap()[0].kind(), GateKind::H);
        assert!(circuit.layer(2).is_none());
        assert_eq!(circuit.layers().count(), 2);
    }

    #[test]
    fn test_append_layer_rejects_reused_qubit() {
        let mut circuit = Circuit::new(3);
        let err = circuit
            .append_layer(vec![op(GateKind::Cx, vec![0, 1]), op(GateKind::X, vec![1])])
            .unwrap_err();
        assert_eq!(err, RqcError::DuplicateQubit(1));
        // Nothing was appended
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_layers(), 0);
    }

    #[test]
    fn test_condition_checked() {
        let mut circuit = with_creg(2);
        let ok = op(GateKind::X, vec![0]).with_condition(Condition::new("c", 3));
        assert!(circuit.append(ok).is_ok());

        let too_big = op(GateKind::X, vec![0]).with_condition(Condition::new("c", 4));
        assert!(matches!(
            circuit.append(too_big),
            Err(RqcError::ConditionOutOfRange { value: 4, .. })
        ));

        let missing = op(GateKind::X, vec![0]).with_condition(Condition::new("d", 0));
        assert_eq!(
            circuit.append(missing).unwrap_err(),
            RqcError::RegisterNotFound("d".into())
        );
    }

    #[test]
    fn test_measure_all() {
        let mut circuit = with_creg(3);
        circuit.measure_all().unwrap();

        assert_eq!(circuit.count_measurements(), 3);
        for (i, m) in circuit.operations().iter().enumerate() {
            assert_eq!(m.qubits(), &[i]);
            assert_eq!(m.clbits(), &[i]);
        }
    }

    #[test]
    fn test_measure_all_needs_register() {
        let mut circuit = Circuit::new(2);
        assert!(circuit.measure_all().is_err());
    }

    #[test]
    fn test_depth() {
        let mut circuit = with_creg(3);
        circuit.append(op(GateKind::H, vec![0])).unwrap();
        circuit.append(op(GateKind::H, vec![1])).unwrap();
        circuit.append(op(GateKind::Cx, vec![0, 1])).unwrap();
        circuit.append(op(GateKind::H, vec![2])).unwrap();
        assert_eq!(circuit.depth(), 2);

        // Conditioned op waits on the whole register
        circuit.append(Operation::measure(0, 0)).unwrap();
        circuit
            .append(op(GateKind::X, vec![2]).with_condition(Condition::new("c", 1)))
            .unwrap();
        assert_eq!(circuit.depth(), 4);
    }

    #[test]
    fn test_gate_counts() {
        let mut circuit = with_creg(3);
        circuit
            .append_layer(vec![
                op(GateKind::Rx, vec![0]),
                op(GateKind::Reset, vec![1]),
                op(GateKind::X, vec![2]).with_condition(Condition::new("c", 0)),
            ])
            .unwrap();
        circuit.append(op(GateKind::Cz, vec![0, 1])).unwrap();

        assert_eq!(circuit.count_1q(), 2);
        assert_eq!(circuit.count_2q(), 1);
        assert_eq!(circuit.count_parameterized(), 1);
        assert_eq!(circuit.count_conditional(), 1);
        assert_eq!(circuit.len(), 4);
    }

    #[test]
    fn test_to_qasm() {
        let mut circuit = with_creg(2);
        circuit.append(op(GateKind::H, vec![0])).unwrap();
        circuit
            .append(op(GateKind::Cx, vec![0, 1]).with_condition(Condition::new("c", 2)))
            .unwrap();
        circuit.measure_all().unwrap();

        let qasm = circuit.to_qasm();
        assert!(qasm.contains("OPENQASM 2.0"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("creg c[2];"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("if(c==2) cx q[0],q[1];"));
        assert!(qasm.contains("measure q[1] -> c[1];"));
    }

    #[test]
    fn test_to_qasm_resolves_second_register() {
        let mut circuit = Circuit::new(2);
        circuit.add_register(ClassicalRegister::new("a", 1)).unwrap();
        circuit.add_register(ClassicalRegister::new("b", 1)).unwrap();
        circuit.measure_all().unwrap();

        let qasm = circuit.to_qasm();
        assert!(qasm.contains("measure q[0] -> a[0];"));
        assert!(qasm.contains("measure q[1] -> b[0];"));
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let mut circuit = with_creg(2);
        circuit
            .append_layer(vec![op(GateKind::Swap, vec![1, 0])])
            .unwrap();
        circuit.measure_all().unwrap();

        let json = circuit.to_json().unwrap();
        let parsed = Circuit::from_json(&json).unwrap();
        assert_eq!(parsed, circuit);

        let corrupted = json.replacen("\"num_qubits\": 2", "\"num_qubits\": 1", 1);
        assert!(Circuit::from_json(&corrupted).is_err());
    }

    #[test]
    fn test_to_qasm_declares_custom_gates() {
        let mut circuit = with_creg(2);
        circuit.append_layer(vec![op(GateKind::Ecr, vec![1, 0])]).unwrap();
        circuit.append_layer(vec![op(GateKind::R, vec![0])]).unwrap();
        circuit.append_layer(vec![op(GateKind::Cx, vec![0, 1])]).unwrap();

        let qasm = circuit.to_qasm();
        let lines: Vec<&str> = qasm.lines().collect();
        let decl = |name: &str| {
            lines
                .iter()
                .position(|l| l.starts_with(&format!("gate {}", name)))
        };

        // ecr is built from rzx, which must be declared first
        let rzx = decl("rzx(").unwrap();
        let ecr = decl("ecr ").unwrap();
        assert!(rzx < ecr);
        assert!(decl("r(").is_some());
        assert!(decl("cx").is_none());
        assert!(decl("iswap").is_none());

        let first_use = lines.iter().position(|l| l.starts_with("ecr ")).unwrap();
        assert!(ecr < first_use);
    }

    #[test]
    fn test_to_qasm_plain_circuit_has_no_declarations() {
        let mut circuit = with_creg(2);
        circuit.append(op(GateKind::Crz, vec![0, 1])).unwrap();
        circuit.append(op(GateKind::U3, vec![1])).unwrap();
        assert!(!circuit.to_qasm().contains("gate "));
    }

    #[test]
    fn test_from_json_rejects_reused_qubit_in_layer() {
        let mut circuit = Circuit::new(1);
        circuit.append_layer(vec![op(GateKind::X, vec![0])]).unwrap();
        circuit.append_layer(vec![op(GateKind::X, vec![0])]).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_str(&circuit.to_json().unwrap()).unwrap();
        value["layers"] = serde_json::json!([{"start": 0, "end": 2}]);
        let merged = value.to_string();

        assert_eq!(
            Circuit::from_json(&merged).unwrap_err(),
            RqcError::DuplicateQubit(0)
        );
    }

    #[test]
    fn test_from_json_rejects_overlapping_layers() {
        let mut circuit = Circuit::new(2);
        circuit.append_layer(vec![op(GateKind::X, vec![0])]).unwrap();
        circuit.append(op(GateKind::H, vec![1])).unwrap();
        circuit.append_layer(vec![op(GateKind::X, vec![1])]).unwrap();
        // A gap between layers is fine
        let json = circuit.to_json().unwrap();
        assert!(Circuit::from_json(&json).is_ok());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["layers"] = serde_json::json!([{"start": 0, "end": 2}, {"start": 1, "end": 3}]);
        let err = Circuit::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, RqcError::ConfigError(_)));

        value["layers"] = serde_json::json!([{"start": 2, "end": 5}]);
        assert!(Circuit::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_unvalidated_layers_do_not_panic() {
        let mut circuit = Circuit::new(1);
        circuit.append_layer(vec![op(GateKind::X, vec![0])]).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_str(&circuit.to_json().unwrap()).unwrap();
        value["layers"] = serde_json::json!([{"start": 0, "end": 9}]);
        let raw: Circuit = serde_json::from_value(value).unwrap();

        assert!(raw.layer(0).is_none());
        assert_eq!(raw.layers().map(|l| l.len()).sum::<usize>(), 0);
        assert!(raw.validate().is_err());
    }
}
