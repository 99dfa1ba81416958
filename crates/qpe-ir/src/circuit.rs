//! High-level circuit builder API.

use std::collections::BTreeMap;

use crate::angle::Angle;
use crate::circuit_box::CircuitBox;
use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{ControlledGate, Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, ClassicalRegister, QuantumRegister, Qubit, QubitId};

/// A quantum circuit: an ordered sequence of instructions over a fixed set
/// of qubits and classical bits.
///
/// Builder methods validate operands and return `&mut Self` so calls can be
/// chained with `?`.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.dag.add_qubit();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = self.dag.add_qubit();
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        self.qregs.push(QuantumRegister {
            name,
            qubits: ids.clone(),
        });
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.dag.add_clbit();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = self.dag.add_clbit();
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        self.cregs.push(ClassicalRegister {
            name,
            clbits: ids.clone(),
        });
        ids
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Tdg, [qubit])
    }

    /// Apply Rx rotation.
    pub fn rx(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Rx(theta.into()), [qubit])
    }

    /// Apply Ry rotation.
    pub fn ry(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Ry(theta.into()), [qubit])
    }

    /// Apply Rz rotation.
    pub fn rz(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Rz(theta.into()), [qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::P(lambda.into()), [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::CZ, [control, target])
    }

    /// Apply controlled phase gate.
    pub fn cp(
        &mut self,
        lambda: impl Into<Angle>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.standard(StandardGate::CP(lambda.into()), [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Swap, [q1, q2])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    fn standard(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply a box to `qubits` (one qubit per box input, in order).
    pub fn add_box(&mut self, circuit_box: &CircuitBox, qubits: &[QubitId]) -> IrResult<&mut Self> {
        self.gate(circuit_box.clone(), qubits.iter().copied())
    }

    /// Apply a box controlled on `controls`.
    pub fn add_controlled_box(
        &mut self,
        circuit_box: &CircuitBox,
        controls: &[QubitId],
        targets: &[QubitId],
    ) -> IrResult<&mut Self> {
        let num_controls =
            u32::try_from(controls.len()).map_err(|_| IrError::InvalidControlCount)?;
        let gate = circuit_box.controlled(num_controls)?;
        self.gate(gate, controls.iter().chain(targets).copied())
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure `qubits[i]` into `clbits[i]`.
    pub fn measure_qubits(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::QubitMapMismatch {
                expected: qubits.len(),
                got: clbits.len(),
            });
        }
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        let clbits: Vec<_> = self.clbits.iter().map(|c| c.id).take(qubits.len()).collect();
        self.measure_qubits(&qubits, &clbits)
    }

    /// Append every instruction of `other`, relabelling its qubit `i` as
    /// `qubit_map[i]`. Classical bits are carried over unchanged.
    pub fn append(&mut self, other: &Circuit, qubit_map: &[QubitId]) -> IrResult<&mut Self> {
        if qubit_map.len() != other.num_qubits() {
            return Err(IrError::QubitMapMismatch {
                expected: other.num_qubits(),
                got: qubit_map.len(),
            });
        }
        for inst in other.instructions() {
            self.dag.apply(inst.remapped(qubit_map))?;
        }
        Ok(self)
    }

    /// A copy of this circuit with all gates inverted in reverse order.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut out = self.empty_like();
        let ops: Vec<&Instruction> = self.instructions().collect();
        for inst in ops.into_iter().rev() {
            let inv = inst
                .inverse()
                .ok_or_else(|| IrError::NonUnitary(self.name.clone()))?;
            out.dag.push(inv);
        }
        Ok(out)
    }

    /// A copy of this circuit under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Circuit {
        let mut out = self.clone();
        out.name = name.into();
        out
    }

    /// A new circuit in which every box is inlined and every controlled
    /// wrapper is pushed down onto primitive gates.
    ///
    /// The result contains only standard gates, controlled standard gates
    /// and measurements, over the same qubits and classical bits.
    pub fn decompose_boxes(&self) -> Circuit {
        let mut out = self.empty_like();
        for inst in self.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => flatten_gate(gate, &inst.qubits, &[], &mut out),
                InstructionKind::Measure => {
                    out.dag.push(inst.clone());
                }
            }
        }
        out
    }

    /// Append an instruction that is already valid for this circuit.
    pub(crate) fn push_unchecked(&mut self, instruction: Instruction) {
        self.dag.push(instruction);
    }

    fn empty_like(&self) -> Circuit {
        Circuit {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            dag: {
                let mut dag = CircuitDag::new();
                for _ in 0..self.num_qubits() {
                    dag.add_qubit();
                }
                for _ in 0..self.num_clbits() {
                    dag.add_clbit();
                }
                dag
            },
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// Whether any instruction is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions().any(Instruction::is_measure)
    }

    /// Instruction counts keyed by label.
    ///
    /// Controlled gates get one `c` prefix per control, so a singly
    /// controlled box named `U` is counted as `cU`.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions() {
            let label = match inst.as_gate() {
                Some(gate) => format!("{}{}", "c".repeat(gate.num_controls() as usize), gate.name()),
                None => inst.name().to_string(),
            };
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a quantum register by name.
    pub fn qreg(&self, name: &str) -> Option<&QuantumRegister> {
        self.qregs.iter().find(|r| r.name == name)
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name == name)
    }
}

/// Inline `gate` applied to `qubits` with extra `controls` into `out`.
fn flatten_gate(gate: &Gate, qubits: &[QubitId], controls: &[QubitId], out: &mut Circuit) {
    match gate {
        Gate::Standard(g) => {
            if controls.is_empty() {
                out.dag.push(Instruction::gate(*g, qubits.iter().copied()));
            } else {
                #[allow(clippy::cast_possible_truncation)]
                let controlled = ControlledGate::new(controls.len() as u32, Gate::Standard(*g));
                // `controls` is non-empty, so construction cannot fail.
                if let Ok(c) = controlled {
                    out.dag
                        .push(Instruction::gate(c, controls.iter().chain(qubits).copied()));
                }
            }
        }
        Gate::Boxed(b) => {
            for inst in b.instructions() {
                if let InstructionKind::Gate(inner) = &inst.kind {
                    let mapped: Vec<QubitId> =
                        inst.qubits.iter().map(|q| qubits[q.index()]).collect();
                    flatten_gate(inner, &mapped, controls, out);
                }
            }
        }
        Gate::Controlled(c) => {
            let k = c.num_controls() as usize;
            let mut all_controls = controls.to_vec();
            all_controls.extend_from_slice(&qubits[..k]);
            flatten_gate(c.base(), &qubits[k..], &all_controls, out);
        }
    }
}
