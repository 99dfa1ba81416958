//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qpe_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qpe_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Noiseless local statevector backend.
///
/// Circuits may contain boxes and controlled boxes; they are decomposed
/// before simulation. Measurements must be terminal: once a qubit has been
/// measured no further gate may touch it. The final state is computed once
/// per job and all shots are sampled from it.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    /// Jobs by id. A completed job is dropped once its result is read.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    rng: Mutex<StdRng>,
    max_qubits: u32,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, Some(seed))
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let capabilities = Capabilities::simulator(max_qubits).with_name(config.name.clone());
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(rng),
            max_qubits,
        }
    }

    /// Reasons the circuit cannot be simulated, empty if it can.
    fn check_circuit(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = vec![];
        if circuit.num_qubits() > self.max_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            ));
        }

        let mut measured = vec![false; circuit.num_qubits()];
        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Measure => {
                    for q in &inst.qubits {
                        measured[q.index()] = true;
                    }
                }
                InstructionKind::Gate(_) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        reasons.push(format!(
                            "gate '{}' acts on {q} after it was measured",
                            inst.name()
                        ));
                        break;
                    }
                }
            }
        }
        reasons
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let flat = circuit.decompose_boxes();
        debug!(
            qubits = flat.num_qubits(),
            ops = flat.num_ops(),
            shots,
            "starting simulation"
        );

        let mut sv = Statevector::new(flat.num_qubits());
        // clbit index -> measured qubit
        let mut readout: Vec<Option<usize>> = vec![None; flat.num_clbits()];
        for inst in flat.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => sv.apply_gate(gate, &inst.qubits)?,
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        readout[c.index()] = Some(q.index());
                    }
                }
            }
        }

        let outcomes = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sv.sample_many(shots, &mut *rng)
        };

        let mut counts = Counts::new();
        for outcome in outcomes {
            counts.insert(outcome_to_bitstring(outcome, &readout), 1);
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, distinct = counts.len(), "simulation completed");

        #[allow(clippy::cast_possible_truncation)]
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    fn with_job<T>(&self, job_id: &JobId, f: impl FnOnce(&mut SimJob) -> T) -> HalResult<T> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get_mut(&job_id.0)
            .map(f)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

/// Character `i` is the bit of the qubit read into classical bit `i`;
/// classical bits that were never written read as `0`.
fn outcome_to_bitstring(outcome: usize, readout: &[Option<usize>]) -> String {
    readout
        .iter()
        .map(|q| match q {
            Some(q) if (outcome >> q) & 1 == 1 => '1',
            _ => '0',
        })
        .collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.check_circuit(circuit);
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (must be between 1 and {})",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        let reasons = self.check_circuit(circuit);
        if !reasons.is_empty() {
            return Err(HalError::Unsupported(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots, circuit.name()).with_backend(self.name());
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }
        debug!(job = %job_id, "submitted job");

        // Simulation runs to completion inside submit.
        self.with_job(&job_id, |j| j.job.transition(JobStatus::Running))?;
        let outcome = self.run_simulation(circuit, shots);
        self.with_job(&job_id, |j| match outcome {
            Ok(result) => {
                j.result = Some(result);
                j.job.transition(JobStatus::Completed);
            }
            Err(e) => j.job.transition(JobStatus::Failed(e.to_string())),
        })?;

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.with_job(job_id, |j| j.job.status.clone())
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if job.result.is_none() {
            return Err(HalError::ResultNotReady(job_id.0.clone()));
        }
        debug!(job = %job_id, "result collected, releasing job");
        jobs.remove(&job_id.0)
            .and_then(|j| j.result)
            .ok_or_else(|| HalError::ResultNotReady(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.with_job(job_id, |j| j.job.transition(JobStatus::Cancelled))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .get_extra::<u32>("max_qubits")?
            .unwrap_or(DEFAULT_MAX_QUBITS);
        if max_qubits == 0 || max_qubits > 30 {
            return Err(HalError::Configuration(format!(
                "max_qubits must be between 1 and 30, got {max_qubits}"
            )));
        }
        let seed = config.get_extra::<u64>("seed")?;
        Ok(Self::build(config, max_qubits, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::{ClbitId, QubitId};

    fn bell() -> Circuit {
        let mut c = Circuit::with_size("bell", 2, 2);
        c.h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        c
    }

    #[test]
    fn test_outcome_to_bitstring() {
        // qubit 0 -> c1, qubit 2 -> c0, c2 unwritten
        let readout = [Some(2), Some(0), None];
        assert_eq!(outcome_to_bitstring(0b101, &readout), "110");
        assert_eq!(outcome_to_bitstring(0b100, &readout), "100");
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(backend.availability().await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::with_seed(1);
        let job_id = backend.submit(&bell(), 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_result_releases_job() {
        let backend = SimulatorBackend::with_seed(3);
        let job_id = backend.submit(&bell(), 10).await.unwrap();
        assert_eq!(backend.result(&job_id).await.unwrap().shots, 10);

        assert!(matches!(
            backend.result(&job_id).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(matches!(
            backend.status(&job_id).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(backend.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_runs_are_reproducible() {
        let a = SimulatorBackend::with_seed(99).run(&bell(), 200).await.unwrap();
        let b = SimulatorBackend::with_seed(99).run(&bell(), 200).await.unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);
        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.submit(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

        let validation = backend.validate(&circuit).await.unwrap();
        assert!(!validation.is_valid());
    }

    #[tokio::test]
    async fn test_invalid_shots() {
        let backend = SimulatorBackend::new();
        let result = backend.submit(&bell(), 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_gate_after_measure_rejected() {
        let mut c = Circuit::with_size("mid", 1, 1);
        c.measure(QubitId(0), ClbitId(0)).unwrap().x(QubitId(0)).unwrap();

        let backend = SimulatorBackend::new();
        assert!(matches!(
            backend.submit(&c, 10).await,
            Err(HalError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let missing = JobId::from("nope");
        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(matches!(
            backend.cancel(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("local")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(5));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.name(), "local");
        assert_eq!(backend.capabilities().num_qubits, 8);

        let bad = BackendConfig::new("local").with_extra("max_qubits", serde_json::json!(0));
        assert!(matches!(
            SimulatorBackend::from_config(bad),
            Err(HalError::Configuration(_))
        ));
    }
}
