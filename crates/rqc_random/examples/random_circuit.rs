//! RQC Random Circuit Demo
//!
//! Generates a 2-qubit, depth-8 layered random circuit from the full
//! basis-gate token list and prints its summary, layers and QASM.
//!
//! Pass a seed as the first argument to reproduce a circuit.

use rqc_random::prelude::*;
use rqc_random::BASIS_GATE_TABLE;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                   RQC Layered Random Circuit Demo                    ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let num_qubits = 2;
    let depth = 8;
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => rand::random(),
    };

    // Every recognized token; the repeated "R" collapses in the catalog
    let tokens: Vec<&str> = BASIS_GATE_TABLE.iter().map(|(name, _)| *name).collect();

    let catalog = GateCatalog::from_basis_gates(&tokens);
    let config = RandomCircuitConfig::new().with_seed(seed);

    println!("Configuration:");
    println!("  • Qubits: {}", num_qubits);
    println!("  • Depth: {}", depth);
    println!("  • Catalog: {} descriptors", catalog.len());
    println!("  • {}", config);
    println!();

    let circuit = RandomCircuitGenerator::with_config(config).generate_from_catalog(
        num_qubits,
        depth,
        &catalog,
    )?;

    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  {}", circuit);
    println!("═══════════════════════════════════════════════════════════════════════\n");

    for (i, layer) in circuit.layers().enumerate() {
        let ops: Vec<String> = layer.iter().map(|op| op.to_string()).collect();
        println!("  Layer {:>2}: {}", i, ops.join(" | "));
    }
    println!();

    println!("{}", circuit.to_qasm());
    Ok(())
}
