//! Dependency graph over circuit instructions.
//!
//! Every instruction is a node; an edge `a -> b` on wire `w` means `b` is
//! the next operation after `a` touching `w`. The graph is append-only, so
//! node index order is always a valid topological order and is exactly the
//! order in which instructions were applied.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// Append-only instruction DAG.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
    /// Last operation on each wire.
    wire_front: FxHashMap<WireId, NodeIndex>,
    num_qubits: usize,
    num_clbits: usize,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit wire, returning its id.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId::from(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a classical wire, returning its id.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId::from(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Validate an instruction against the wires of this DAG.
    #[allow(clippy::cast_possible_truncation)]
    pub fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = Some(instruction.name().to_string());

        if let Some(gate) = instruction.as_gate() {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        } else if instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::QubitCountMismatch {
                gate_name: "measure".into(),
                expected: instruction.clbits.len() as u32,
                got: instruction.qubits.len() as u32,
            });
        }

        for &qubit in &instruction.qubits {
            if qubit.index() >= self.num_qubits {
                return Err(IrError::InvalidQubitIndex {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.index() >= self.num_clbits {
                return Err(IrError::InvalidClbitIndex {
                    clbit,
                    num_clbits: self.num_clbits,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.validate(&instruction)?;
        Ok(self.push(instruction))
    }

    /// Append an instruction already known to be valid for this DAG.
    pub(crate) fn push(&mut self, instruction: Instruction) -> NodeIndex {
        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .map(|&q| WireId::Qubit(q))
            .chain(instruction.clbits.iter().map(|&c| WireId::Clbit(c)))
            .collect();

        let op_node = self.graph.add_node(instruction);
        for wire in wires {
            if let Some(prev) = self.wire_front.insert(wire, op_node) {
                self.graph.add_edge(prev, op_node, wire);
            }
        }
        op_node
    }

    /// Iterate over operations in application order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Get the instruction at a node.
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node)
    }

    /// Operations that must run immediately before `node`.
    pub fn predecessors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.source())
    }

    /// Number of qubit wires.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of classical wires.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Length of the longest dependency chain.
    pub fn depth(&self) -> usize {
        let mut depths: Vec<usize> = Vec::with_capacity(self.graph.node_count());
        let mut max_depth = 0usize;

        for node in self.graph.node_indices() {
            let max_pred_depth = self
                .predecessors(node)
                .map(|p| depths[p.index()])
                .max()
                .unwrap_or(0);
            let node_depth = max_pred_depth + 1;
            max_depth = max_depth.max(node_depth);
            depths.push(node_depth);
        }

        max_depth
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<Instruction, WireId, u32> {
        &self.graph
    }
}
