//! Quantum Phase Estimation Demo
//!
//! Estimates the eigenphase of the phase gate `P(θ)` on its `|1⟩`
//! eigenstate using a local noiseless simulator.

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use qpe_adapter_sim::SimulatorBackend;
use qpe_algo::{
    PhaseEstimate, build_phase_estimation, build_qft, estimate_phase, inverse_qft_box, qft_box,
};
use qpe_demos::{
    create_spinner, excited_state, phase_unitary, print_header, print_histogram, print_info,
    print_result, print_section, print_success, qft3_reference,
};
use qpe_hal::{Backend, BackendConfig, BackendFactory, Counts};
use qpe_ir::Circuit;
use qpe_qasm3::emit;

#[derive(Parser, Debug)]
#[command(name = "demo-qpe")]
#[command(about = "Demonstrate quantum phase estimation on a local simulator")]
struct Args {
    /// Number of measurement qubits (precision is 1/2^m turns)
    #[arg(short = 'm', long, default_value = "4", env = "QPE_RESOLUTION")]
    resolution: u32,

    /// Phase gate angle θ in half-turns; the eigenphase is θ/2
    #[arg(short = 'a', long, default_value = "0.73", env = "QPE_ANGLE")]
    angle: f64,

    /// Number of shots
    #[arg(short, long, default_value = "1000", env = "QPE_SHOTS")]
    shots: u32,

    /// Seed for reproducible sampling
    #[arg(long, env = "QPE_SEED")]
    seed: Option<u64>,

    /// Show generated QASM code
    #[arg(long)]
    show_qasm: bool,

    /// Number of outcomes shown in the histogram
    #[arg(long, default_value = "4")]
    top: usize,

    /// Print a JSON report instead of the narrative
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Machine-readable summary of one run.
#[derive(Debug, Serialize)]
struct Report<'a> {
    resolution: u32,
    angle: f64,
    shots: u32,
    expected_phase: f64,
    estimate: &'a PhaseEstimate,
    error: f64,
    counts: &'a Counts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let state_prep = excited_state()?;
    let unitary = phase_unitary(args.angle)?;
    let circuit = build_phase_estimation(args.resolution, &state_prep, &unitary)?;

    if !args.json {
        print_header("Quantum Phase Estimation Demo");
        show_qft(args.resolution)?;
        show_circuit(&args, &circuit);
    }

    let mut config = BackendConfig::new("simulator");
    if let Some(seed) = args.seed {
        config = config.with_extra("seed", serde_json::json!(seed));
    }
    let backend = SimulatorBackend::from_config(config)?;

    let flat = circuit.decompose_boxes();
    debug!(ops = flat.num_ops(), depth = flat.depth(), "decomposed boxes");

    let spinner = (!args.json).then(|| create_spinner("Simulating..."));
    let result = backend.run(&flat, args.shots).await?;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    info!(
        backend = backend.name(),
        shots = result.shots,
        distinct = result.counts.len(),
        "execution finished"
    );

    let estimate = estimate_phase(&result.counts)?;
    let error = estimate.error_against(args.angle);

    if args.json {
        let report = Report {
            resolution: args.resolution,
            angle: args.angle,
            shots: args.shots,
            expected_phase: args.angle / 2.0,
            estimate: &estimate,
            error,
            counts: &result.counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Measurement Results");
    print_result("Shots", result.shots);
    print_result("Distinct outcomes", result.counts.len());
    if let Some(ms) = result.execution_time_ms {
        print_result("Simulation time", format!("{ms} ms"));
    }
    println!();
    print_histogram(&result.counts, args.top);

    print_section("Phase Estimate");
    print_result("Most frequent", &estimate);
    print_result("Estimated phase", format!("{:.6} turns", estimate.phase));
    print_result("Exact phase θ/2", format!("{:.6} turns", args.angle / 2.0));
    print_result("Error |θ - 2·phase|", format!("{error:.3}"));

    #[allow(clippy::cast_precision_loss)]
    let resolution = 1.0 / (1u64 << args.resolution) as f64;
    println!();
    if (estimate.phase - args.angle / 2.0).abs() <= resolution {
        print_success(&format!("Estimate within 1/2^{} of the exact phase", args.resolution));
    } else {
        print_info("Estimate outside one resolution step; try more shots or bits");
    }

    Ok(())
}

/// Build the 3-qubit QFT by hand and with the builder, then the QFT box
/// pair used by the estimation circuit.
fn show_qft(m: u32) -> Result<()> {
    print_section("Quantum Fourier Transform");

    let by_hand = qft3_reference()?;
    let built = build_qft(3)?;
    print_result("QFT(3) gates", format_counts(&built));
    print_result("QFT(3) depth", built.depth());
    if !by_hand.instructions().eq(built.instructions()) {
        bail!("hand-written QFT(3) differs from the builder");
    }
    print_success("Hand-written QFT(3) matches the builder");

    let qft = qft_box(m)?;
    let inverse = inverse_qft_box(m)?;
    print_result(
        "Boxes",
        format!(
            "{} ({} ops), {} ({} ops)",
            qft.name(),
            qft.instructions().len(),
            inverse.name(),
            inverse.instructions().len()
        ),
    );
    Ok(())
}

fn show_circuit(args: &Args, circuit: &Circuit) {
    print_section("Phase Estimation Circuit");
    print_result("Unitary", format!("P({}π)", args.angle));
    print_result("Measurement qubits", args.resolution);
    print_result("Total qubits", circuit.num_qubits());
    print_result("Classical bits", circuit.num_clbits());
    print_result("Operations", format_counts(circuit));
    print_result("Depth", circuit.depth());

    if args.show_qasm {
        print_section("Generated QASM3");
        println!("{}", emit(circuit));
    }
}

fn format_counts(circuit: &Circuit) -> String {
    circuit
        .count_ops()
        .iter()
        .map(|(name, n)| format!("{name}×{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}
