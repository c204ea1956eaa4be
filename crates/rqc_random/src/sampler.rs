//! Layered random sampler
//!
//! Gantree: L2_Random → LayerSampler
//!
//! Each layer draws `num_qubits` descriptors, keeps the longest prefix that
//! fits the qubit count, fills the slack with more draws, then places the
//! descriptors on a freshly shuffled qubit ordering. Parameters and
//! classical conditions are drawn for the whole layer in one pass.
//!
//! Random draws happen in a fixed order per layer (gates, slack gates,
//! parameters, shuffle, condition flags, condition values), so a seeded
//! generator reproduces the same circuit.

use crate::catalog::{GateCatalog, GateDescriptor};
use crate::config::{RandomCircuitConfig, SlackFill};
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rqc_core::{
    registers, sampling, Circuit, ClassicalRegister, Condition, Operation, Probability, QubitId,
    RqcError, RqcResult,
};

// ============================================================================
// Layer Plan
// ============================================================================

/// Descriptors chosen for one layer, before qubits are assigned
/// Gantree: LayerPlan // 레이어 계획
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlan {
    descriptors: Vec<GateDescriptor>,
    prefix_len: usize,
}

impl LayerPlan {
    /// All descriptors in draw order (prefix followed by slack draws)
    pub fn descriptors(&self) -> &[GateDescriptor] {
        &self.descriptors
    }

    /// Descriptors kept from the initial draw
    pub fn prefix(&self) -> &[GateDescriptor] {
        &self.descriptors[..self.prefix_len]
    }

    /// Descriptors drawn to fill slack
    pub fn slack_draws(&self) -> &[GateDescriptor] {
        &self.descriptors[self.prefix_len..]
    }

    /// Qubits used by the kept prefix
    pub fn prefix_qubits(&self) -> usize {
        self.prefix().iter().map(|d| d.num_qubits()).sum()
    }

    /// Qubits requested by the whole plan
    pub fn total_qubits(&self) -> usize {
        self.descriptors.iter().map(|d| d.num_qubits()).sum()
    }

    /// Parameters requested by the whole plan
    pub fn total_params(&self) -> usize {
        self.descriptors.iter().map(|d| d.num_params()).sum()
    }

    /// Qubits requested beyond `num_qubits`
    pub fn overshoot(&self, num_qubits: usize) -> usize {
        self.total_qubits().saturating_sub(num_qubits)
    }
}

// ============================================================================
// Layer Sampler
// ============================================================================

/// Samples layers for one circuit
/// Gantree: LayerSampler // 레이어 샘플러
pub struct LayerSampler<'a> {
    num_qubits: usize,
    catalog: &'a GateCatalog,
    slack_catalog: GateCatalog,
    /// Index draws are `u64` so the stream does not depend on pointer width
    gate_dist: Uniform<u64>,
    slack_dist: Uniform<u64>,
    param_dist: Uniform<f64>,
    condition_probability: Probability,
    condition_bound: u64,
    register: String,
    /// Persistent qubit ordering, reshuffled in place every layer
    qubit_order: Vec<QubitId>,
}

impl<'a> LayerSampler<'a> {
    /// Create a sampler for `num_qubits` qubits
    /// Gantree: new(n, catalog, config) -> Result<Self> // 생성자
    pub fn new(
        num_qubits: usize,
        catalog: &'a GateCatalog,
        config: &RandomCircuitConfig,
    ) -> RqcResult<Self> {
        catalog.ensure_non_empty()?;
        config.validate()?;

        let slack_catalog = match config.slack_fill {
            SlackFill::AnyGate => catalog.clone(),
            SlackFill::SingleQubitOnly => {
                let single = catalog.single_qubit();
                if single.is_empty() {
                    return Err(RqcError::NoSingleQubitGates);
                }
                single
            }
        };

        Ok(Self {
            num_qubits,
            catalog,
            gate_dist: Uniform::new(0, catalog.len() as u64),
            slack_dist: Uniform::new(0, slack_catalog.len() as u64),
            slack_catalog,
            param_dist: Uniform::new(0.0, sampling::PARAM_UPPER),
            condition_probability: config.condition_probability()?,
            condition_bound: sampling::condition_bound(num_qubits),
            register: registers::CREG_NAME.to_string(),
            qubit_order: (0..num_qubits).collect(),
        })
    }

    /// Draw the descriptors for one layer
    /// Gantree: plan_layer(&self, rng) -> LayerPlan // 레이어 계획
    pub fn plan_layer<R: Rng + ?Sized>(&self, rng: &mut R) -> LayerPlan {
        let n = self.num_qubits;
        let mut descriptors: Vec<GateDescriptor> = (0..n)
            .map(|_| draw(self.catalog, &self.gate_dist, rng))
            .collect();

        // Cumulative arity is strictly increasing, so the first descriptor
        // that does not fit ends the prefix.
        let mut used = 0;
        let mut prefix_len = 0;
        for desc in &descriptors {
            if used + desc.num_qubits() > n {
                break;
            }
            used += desc.num_qubits();
            prefix_len += 1;
        }
        descriptors.truncate(prefix_len);

        let slack = n - used;
        descriptors.extend(
            (0..slack).map(|_| draw(&self.slack_catalog, &self.slack_dist, rng)),
        );

        LayerPlan {
            descriptors,
            prefix_len,
        }
    }

    /// Draw one layer and turn it into operations
    /// Gantree: sample_layer(&mut, rng) -> Result<(LayerPlan, Vec<Operation>)> // 레이어 샘플
    pub fn sample_layer<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> RqcResult<(LayerPlan, Vec<Operation>)> {
        let plan = self.plan_layer(rng);

        let params: Vec<f64> = (0..plan.total_params())
            .map(|_| self.param_dist.sample(rng))
            .collect();

        self.qubit_order.shuffle(rng);

        let p = self.condition_probability.value();
        let is_conditional: Vec<bool> = if p > 0.0 {
            plan.descriptors().iter().map(|_| rng.gen_bool(p)).collect()
        } else {
            vec![false; plan.descriptors().len()]
        };
        let mut condition_values = is_conditional
            .iter()
            .filter(|&&c| c)
            .map(|_| rng.gen_range(0..self.condition_bound))
            .collect::<Vec<u64>>()
            .into_iter();

        let mut ops = Vec::with_capacity(plan.descriptors().len());
        let mut q_start = 0;
        let mut p_start = 0;
        for (desc, &is_cond) in plan.descriptors().iter().zip(&is_conditional) {
            let q_end = q_start + desc.num_qubits();
            let p_end = p_start + desc.num_params();
            let condition = if is_cond {
                condition_values.next()
            } else {
                None
            };

            if q_end > self.num_qubits {
                log::debug!(
                    "Skipping {} at qubits {}..{}: only {} qubits in layer",
                    desc.kind(),
                    q_start,
                    q_end,
                    self.num_qubits
                );
            } else {
                let mut op = Operation::gate(
                    desc.kind(),
                    self.qubit_order[q_start..q_end].to_vec(),
                    params[p_start..p_end].to_vec(),
                )?;
                if let Some(value) = condition {
                    op = op.with_condition(Condition::new(self.register.clone(), value));
                }
                ops.push(op);
            }

            q_start = q_end;
            p_start = p_end;
        }

        log::trace!(
            "Layer: {} descriptors, {} qubits planned, {} operations",
            plan.descriptors().len(),
            plan.total_qubits(),
            ops.len()
        );

        Ok((plan, ops))
    }
}

fn draw<R: Rng + ?Sized>(
    catalog: &GateCatalog,
    dist: &Uniform<u64>,
    rng: &mut R,
) -> GateDescriptor {
    // Below the catalog length, so the cast is lossless
    catalog.descriptors()[dist.sample(rng) as usize]
}

// ============================================================================
// Generator
// ============================================================================

/// Random circuit generator
/// Gantree: RandomCircuitGenerator // 랜덤 회로 생성기
#[derive(Debug, Clone, Default)]
pub struct RandomCircuitGenerator {
    config: RandomCircuitConfig,
}

impl RandomCircuitGenerator {
    /// Create a self-seeding generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create generator with seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(RandomCircuitConfig::new().with_seed(seed))
    }

    /// Create generator from a configuration
    pub fn with_config(config: RandomCircuitConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &RandomCircuitConfig {
        &self.config
    }

    /// Generate a circuit from basis-gate tokens
    /// Gantree: generate(n, depth, basis) -> Result<Circuit> // 회로 생성
    pub fn generate<S: AsRef<str>>(
        &self,
        num_qubits: usize,
        depth: usize,
        basis_gates: &[S],
    ) -> RqcResult<Circuit> {
        if num_qubits == 0 {
            return Ok(Circuit::new(0));
        }
        let catalog = GateCatalog::from_basis_gates(basis_gates);
        self.generate_from_catalog(num_qubits, depth, &catalog)
    }

    /// Generate a circuit from a prepared catalog
    pub fn generate_from_catalog(
        &self,
        num_qubits: usize,
        depth: usize,
        catalog: &GateCatalog,
    ) -> RqcResult<Circuit> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        log::debug!("Generating random circuit with seed {}", seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_with_rng(num_qubits, depth, catalog, &mut rng)
    }

    /// Generate a circuit drawing from a caller-owned generator
    ///
    /// The configured seed is ignored; `rng` is used as is.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        num_qubits: usize,
        depth: usize,
        catalog: &GateCatalog,
        rng: &mut R,
    ) -> RqcResult<Circuit> {
        if num_qubits == 0 {
            return Ok(Circuit::new(0));
        }

        if !catalog.unrecognized().is_empty() {
            log::debug!("Ignoring unrecognized basis gates: {:?}", catalog.unrecognized());
        }

        let mut sampler = LayerSampler::new(num_qubits, catalog, &self.config)?;
        log::debug!(
            "Sampling {} layers on {} qubits from {} gate descriptors",
            depth,
            num_qubits,
            catalog.len()
        );

        let mut circuit = Circuit::new(num_qubits);
        circuit.add_register(ClassicalRegister::new(registers::CREG_NAME, num_qubits))?;

        for _ in 0..depth {
            let (_, ops) = sampler.sample_layer(rng)?;
            circuit.append_layer(ops)?;
        }

        if self.config.measure {
            circuit.measure_all()?;
        }

        Ok(circuit)
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Generate a self-seeded random circuit with the default configuration
/// Gantree: generate_random_circuit(n, depth, basis) -> Result<Circuit> // 진입점
pub fn generate_random_circuit<S: AsRef<str>>(
    num_qubits: usize,
    depth: usize,
    basis_gates: &[S],
) -> RqcResult<Circuit> {
    RandomCircuitGenerator::new().generate(num_qubits, depth, basis_gates)
}

/// Generate a random circuit with an explicit configuration
pub fn generate_random_circuit_with_config<S: AsRef<str>>(
    num_qubits: usize,
    depth: usize,
    basis_gates: &[S],
    config: &RandomCircuitConfig,
) -> RqcResult<Circuit> {
    RandomCircuitGenerator::with_config(config.clone()).generate(num_qubits, depth, basis_gates)
}

/// Generate a random circuit drawing from a caller-owned generator
pub fn generate_random_circuit_with_rng<S: AsRef<str>, R: Rng + ?Sized>(
    num_qubits: usize,
    depth: usize,
    basis_gates: &[S],
    config: &RandomCircuitConfig,
    rng: &mut R,
) -> RqcResult<Circuit> {
    if num_qubits == 0 {
        return Ok(Circuit::new(0));
    }
    let catalog = GateCatalog::from_basis_gates(basis_gates);
    RandomCircuitGenerator::with_config(config.clone()).generate_with_rng(
        num_qubits,
        depth,
        &catalog,
        rng,
    )
}

// ============================================================================
// Tests
// ============================================================================
