//! Gate kinds for RQC
//!
//! Gantree: L1_Circuit → Gate
//!
//! Every operation a random circuit can contain. A `GateKind` carries no
//! operands; qubits, parameters and conditions live on the `Operation`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate kind enumeration
/// Gantree: GateKind // 게이트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Identity gate
    I,
    /// sqrt(X)
    Sx,
    /// Inverse of sqrt(X)
    Sxdg,
    /// Pauli-X gate
    X,
    /// Pauli-Y gate
    Y,
    /// Pauli-Z gate
    Z,
    /// Hadamard gate
    H,
    /// S gate (sqrt(Z))
    S,
    /// S-dagger gate
    Sdg,
    /// T gate (fourth root of Z)
    T,
    /// T-dagger gate
    Tdg,

    // ========================================================================
    // Single-Qubit Parameterized Gates
    // ========================================================================
    /// Rotation around X-axis
    Rx,
    /// Rotation around Y-axis
    Ry,
    /// Rotation around Z-axis
    Rz,
    /// Rotation R(θ, φ) around an axis in the XY plane
    R,
    /// Phase gate P(λ)
    Phase,
    /// General single-qubit rotation U(θ, φ, λ)
    U,
    /// U1(λ)
    U1,
    /// U2(φ, λ)
    U2,
    /// U3(θ, φ, λ)
    U3,

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT
    Cx,
    /// Double CNOT
    Dcx,
    /// Controlled-Hadamard
    Ch,
    /// Controlled-Y
    Cy,
    /// Controlled-Z
    Cz,
    /// Controlled-sqrt(X)
    Csx,
    /// Controlled-S
    Cs,
    /// Controlled-S-dagger
    Csdg,
    /// Controlled-phase CP(λ)
    CPhase,
    /// Controlled-Rx
    Crx,
    /// Controlled-Ry
    Cry,
    /// Controlled-Rz
    Crz,
    /// Controlled-U(θ, φ, λ, γ)
    Cu,
    /// Controlled-U1
    Cu1,
    /// Controlled-U3
    Cu3,
    /// XX Ising interaction
    Rxx,
    /// YY Ising interaction
    Ryy,
    /// ZZ Ising interaction
    Rzz,
    /// ZX interaction
    Rzx,
    /// XX-YY interaction (θ, β)
    XxMinusYy,
    /// XX+YY interaction (θ, β)
    XxPlusYy,
    /// Echoed cross-resonance gate
    Ecr,
    /// SWAP gate
    Swap,
    /// iSWAP gate
    ISwap,

    // ========================================================================
    // Non-Unitary
    // ========================================================================
    /// Reset qubit to |0⟩
    Reset,
    /// Measure qubit into a classical bit
    Measure,
}

impl GateKind {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Number of qubits the gate acts on
    /// Gantree: num_qubits(&self) -> usize // 큐비트 수
    pub fn num_qubits(&self) -> usize {
        match self {
            GateKind::Cx
            | GateKind::Dcx
            | GateKind::Ch
            | GateKind::Cy
            | GateKind::Cz
            | GateKind::Csx
            | GateKind::Cs
            | GateKind::Csdg
            | GateKind::CPhase
            | GateKind::Crx
            | GateKind::Cry
            | GateKind::Crz
            | GateKind::Cu
            | GateKind::Cu1
            | GateKind::Cu3
            | GateKind::Rxx
            | GateKind::Ryy
            | GateKind::Rzz
            | GateKind::Rzx
            | GateKind::XxMinusYy
            | GateKind::XxPlusYy
            | GateKind::Ecr
            | GateKind::Swap
            | GateKind::ISwap => 2,
            _ => 1,
        }
    }

    /// Number of continuous parameters the gate takes
    /// Gantree: num_params(&self) -> usize // 파라미터 수
    pub fn num_params(&self) -> usize {
        match self {
            GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::Phase
            | GateKind::U1
            | GateKind::CPhase
            | GateKind::Crx
            | GateKind::Cry
            | GateKind::Crz
            | GateKind::Cu1
            | GateKind::Rxx
            | GateKind::Ryy
            | GateKind::Rzz
            | GateKind::Rzx => 1,
            GateKind::R | GateKind::U2 | GateKind::XxMinusYy | GateKind::XxPlusYy => 2,
            GateKind::U | GateKind::U3 | GateKind::Cu3 => 3,
            GateKind::Cu => 4,
            _ => 0,
        }
    }

    /// Check if gate is single-qubit (unitary)
    pub fn is_single_qubit(&self) -> bool {
        self.num_qubits() == 1 && !self.is_non_unitary()
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        self.num_qubits() == 2
    }

    /// Check if gate is parameterized
    pub fn is_parameterized(&self) -> bool {
        self.num_params() > 0
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, GateKind::Measure)
    }

    /// Check if gate is reset or measurement
    pub fn is_non_unitary(&self) -> bool {
        matches!(self, GateKind::Reset | GateKind::Measure)
    }

    /// Number of classical bits the operation writes
    pub fn num_clbits(&self) -> usize {
        if self.is_measurement() {
            1
        } else {
            0
        }
    }

    /// Get OpenQASM gate name
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::Sx => "sx",
            GateKind::Sxdg => "sxdg",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::R => "r",
            GateKind::Phase => "p",
            GateKind::U => "u",
            GateKind::U1 => "u1",
            GateKind::U2 => "u2",
            GateKind::U3 => "u3",
            GateKind::Cx => "cx",
            GateKind::Dcx => "dcx",
            GateKind::Ch => "ch",
            GateKind::Cy => "cy",
            GateKind::Cz => "cz",
            GateKind::Csx => "csx",
            GateKind::Cs => "cs",
            GateKind::Csdg => "csdg",
            GateKind::CPhase => "cp",
            GateKind::Crx => "crx",
            GateKind::Cry => "cry",
            GateKind::Crz => "crz",
            GateKind::Cu => "cu",
            GateKind::Cu1 => "cu1",
            GateKind::Cu3 => "cu3",
            GateKind::Rxx => "rxx",
            GateKind::Ryy => "ryy",
            GateKind::Rzz => "rzz",
            GateKind::Rzx => "rzx",
            GateKind::XxMinusYy => "xx_minus_yy",
            GateKind::XxPlusYy => "xx_plus_yy",
            GateKind::Ecr => "ecr",
            GateKind::Swap => "swap",
            GateKind::ISwap => "iswap",
            GateKind::Reset => "reset",
            GateKind::Measure => "measure",
        }
    }
}

// ============================================================================
// QASM Definitions
// ============================================================================

/// Kinds that the original `qelib1.inc` does not declare, in definition order
///
/// A kind appears after every kind its body calls.
pub const QASM_CUSTOM_GATES: &[GateKind] = &[
    GateKind::Sx,
    GateKind::Sxdg,
    GateKind::Phase,
    GateKind::U,
    GateKind::R,
    GateKind::Swap,
    GateKind::Dcx,
    GateKind::CPhase,
    GateKind::Crx,
    GateKind::Cry,
    GateKind::Csx,
    GateKind::Cs,
    GateKind::Csdg,
    GateKind::Cu,
    GateKind::Rxx,
    GateKind::Ryy,
    GateKind::Rzz,
    GateKind::Rzx,
    GateKind::Ecr,
    GateKind::ISwap,
    GateKind::XxMinusYy,
    GateKind::XxPlusYy,
];

impl GateKind {
    /// Check if `qelib1.inc` (or the language itself) provides this kind
    pub fn is_qelib1(&self) -> bool {
        self.qasm_definition().is_none()
    }

    /// OpenQASM 2.0 `gate` declaration for kinds outside `qelib1.inc`
    /// Gantree: qasm_definition(&self) -> Option<&str> // QASM 게이트 정의
    ///
    /// Bodies only call `U`, `CX`, the 23 `qelib1.inc` gates, and the
    /// kinds listed by [`GateKind::qasm_requires`].
    pub fn qasm_definition(&self) -> Option<&'static str> {
        let def = match self {
            GateKind::Sx => "gate sx a { sdg a; h a; sdg a; }",
            GateKind::Sxdg => "gate sxdg a { s a; h a; s a; }",
            GateKind::Phase => "gate p(lambda) a { U(0,0,lambda) a; }",
            GateKind::U => "gate u(theta,phi,lambda) a { U(theta,phi,lambda) a; }",
            GateKind::R => "gate r(theta,phi) a { u3(theta,phi - pi/2,-phi + pi/2) a; }",
            GateKind::Swap => "gate swap a,b { cx a,b; cx b,a; cx a,b; }",
            GateKind::Dcx => "gate dcx a,b { cx a,b; cx b,a; }",
            GateKind::CPhase => "gate cp(lambda) a,b { cu1(lambda) a,b; }",
            GateKind::Crx => {
                "gate crx(lambda) a,b { u1(pi/2) b; cx a,b; u3(-lambda/2,0,0) b; cx a,b; \
                 u3(lambda/2,-pi/2,0) b; }"
            }
            GateKind::Cry => {
                "gate cry(lambda) a,b { ry(lambda/2) b; cx a,b; ry(-lambda/2) b; cx a,b; }"
            }
            GateKind::Csx => "gate csx a,b { h b; cu1(pi/2) a,b; h b; }",
            GateKind::Cs => "gate cs a,b { cu1(pi/2) a,b; }",
            GateKind::Csdg => "gate csdg a,b { cu1(-pi/2) a,b; }",
            GateKind::Cu => {
                "gate cu(theta,phi,lambda,gamma) a,b { u1(gamma) a; u1((lambda+phi)/2) a; \
                 u1((lambda-phi)/2) b; cx a,b; u3(-theta/2,0,-(phi+lambda)/2) b; cx a,b; \
                 u3(theta/2,phi,0) b; }"
            }
            GateKind::Rxx => {
                "gate rxx(theta) a,b { u3(pi/2,theta,0) a; h b; cx a,b; u1(-theta) b; \
                 cx a,b; h b; u2(-pi,pi-theta) a; }"
            }
            GateKind::Ryy => {
                "gate ryy(theta) a,b { rx(pi/2) a; rx(pi/2) b; cx a,b; rz(theta) b; \
                 cx a,b; rx(-pi/2) a; rx(-pi/2) b; }"
            }
            GateKind::Rzz => "gate rzz(theta) a,b { cx a,b; u1(theta) b; cx a,b; }",
            GateKind::Rzx => {
                "gate rzx(theta) a,b { h b; cx a,b; rz(theta) b; cx a,b; h b; }"
            }
            GateKind::Ecr => "gate ecr a,b { rzx(pi/4) a,b; x a; rzx(-pi/4) a,b; }",
            GateKind::ISwap => "gate iswap a,b { s a; s b; h a; cx a,b; cx b,a; h b; }",
            GateKind::XxMinusYy => {
                "gate xx_minus_yy(theta,beta) a,b { rz(-beta) b; rz(-pi/2) a; sx a; \
                 rz(pi/2) a; s b; cx a,b; ry(0.5*theta) a; ry(-0.5*theta) b; cx a,b; \
                 sdg b; rz(-pi/2) a; sxdg a; rz(pi/2) a; rz(beta) b; }"
            }
            GateKind::XxPlusYy => {
                "gate xx_plus_yy(theta,beta) a,b { rz(beta) a; rz(-pi/2) b; sx b; \
                 rz(pi/2) b; s a; cx b,a; ry(-0.5*theta) b; ry(-0.5*theta) a; cx b,a; \
                 sdg a; rz(-pi/2) b; sxdg b; rz(pi/2) b; rz(-beta) a; }"
            }
            _ => return None,
        };
        Some(def)
    }

    /// Custom kinds whose declarations this kind's declaration calls
    pub fn qasm_requires(&self) -> &'static [GateKind] {
        match self {
            GateKind::Ecr => &[GateKind::Rzx],
            GateKind::XxMinusYy | GateKind::XxPlusYy => &[GateKind::Sx, GateKind::Sxdg],
            _ => &[],
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
