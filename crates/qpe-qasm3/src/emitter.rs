//! QASM3 emitter for serializing circuits.

use rustc_hash::{FxHashMap, FxHashSet};

use qpe_ir::{Angle, Circuit, CircuitBox, Gate, Instruction, InstructionKind, QubitId};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

/// Angle in radians, as a multiple of `pi` when it is a small dyadic
/// fraction of a half-turn.
pub fn format_angle(angle: Angle) -> String {
    let v = angle.as_half_turns();
    if v == 0.0 {
        return "0".into();
    }
    for d in 0..=10_i32 {
        let denom = 2f64.powi(d);
        let k = v * denom;
        if (k - k.round()).abs() < 1e-10 {
            #[allow(clippy::cast_possible_truncation)]
            let k = k.round() as i64;
            let numer = match k {
                1 => "pi".to_string(),
                -1 => "-pi".to_string(),
                _ => format!("{k}*pi"),
            };
            return if d == 0 {
                numer
            } else {
                format!("{numer}/{}", 1_u64 << d)
            };
        }
    }
    format!("{:.6}", angle.radians())
}

struct Emitter {
    output: String,
    indent: usize,
    /// Defined boxes and their emitted names, grouped by box name.
    defined: FxHashMap<String, Vec<(CircuitBox, String)>>,
    /// Every emitted definition name.
    taken: FxHashSet<String>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
            defined: FxHashMap::default(),
            taken: FxHashSet::default(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        // Box definitions, innermost first.
        let before = self.output.len();
        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                self.define_boxes(gate);
            }
        }
        if self.output.len() > before {
            self.writeln("");
        }

        self.emit_declarations(circuit);

        for inst in circuit.instructions() {
            let line = match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let operands = join(inst.qubits.iter().map(|q| qubit_name(circuit, *q)));
                    format!("{} {operands};", self.gate_call(gate))
                }
                InstructionKind::Measure => {
                    let (q, c) = (inst.qubits[0], inst.clbits[0]);
                    format!(
                        "{} = measure {};",
                        circuit.clbits()[c.index()],
                        qubit_name(circuit, q)
                    )
                }
            };
            self.writeln(&line);
        }
    }

    fn emit_declarations(&mut self, circuit: &Circuit) {
        for reg in circuit.qregs() {
            self.writeln(&format!("qubit[{}] {};", reg.qubits.len(), reg.name));
        }
        for q in circuit.qubits().iter().filter(|q| q.register.is_none()) {
            self.writeln(&format!("qubit {q};"));
        }
        for reg in circuit.cregs() {
            self.writeln(&format!("bit[{}] {};", reg.clbits.len(), reg.name));
        }
        for c in circuit.clbits().iter().filter(|c| c.register.is_none()) {
            self.writeln(&format!("bit {c};"));
        }
        if circuit.num_qubits() + circuit.num_clbits() > 0 {
            self.writeln("");
        }
    }

    /// Emit a `gate` definition for every box reachable from `gate` that
    /// has not been defined yet.
    ///
    /// Boxes are told apart by name and body. A box whose name is already
    /// taken by a different body is emitted as `name_1`, `name_2`, ...
    fn define_boxes(&mut self, gate: &Gate) {
        match gate {
            Gate::Standard(_) => {}
            Gate::Controlled(c) => self.define_boxes(c.base()),
            Gate::Boxed(b) => {
                if self.box_name(b).is_some() {
                    return;
                }
                for inst in b.instructions() {
                    if let Some(inner) = inst.as_gate() {
                        self.define_boxes(inner);
                    }
                }
                let name = self.fresh_name(b.name());
                self.defined
                    .entry(b.name().to_string())
                    .or_default()
                    .push((b.clone(), name.clone()));
                self.emit_definition(b, &name);
            }
        }
    }

    /// Emitted name of an already defined box.
    fn box_name(&self, b: &CircuitBox) -> Option<&str> {
        self.defined
            .get(b.name())?
            .iter()
            .find(|(defined, _)| defined == b)
            .map(|(_, name)| name.as_str())
    }

    fn fresh_name(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut suffix = 0;
        while self.taken.contains(&name) {
            suffix += 1;
            name = format!("{base}_{suffix}");
        }
        self.taken.insert(name.clone());
        name
    }

    fn emit_definition(&mut self, b: &CircuitBox, name: &str) {
        let params = join((0..b.num_qubits()).map(|i| QubitId(i).to_string()));
        self.writeln(&format!("gate {name} {params} {{"));
        self.indent += 1;
        for inst in b.instructions() {
            self.emit_local(inst);
        }
        self.indent -= 1;
        self.writeln("}");
    }

    fn emit_local(&mut self, inst: &Instruction) {
        if let Some(gate) = inst.as_gate() {
            let operands = join(inst.qubits.iter().map(ToString::to_string));
            let line = format!("{} {operands};", self.gate_call(gate));
            self.writeln(&line);
        }
    }

    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            self.output.push_str(&"    ".repeat(self.indent));
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    /// `name`, `name(param)` or `ctrl(k) @ name(param)`.
    fn gate_call(&self, gate: &Gate) -> String {
        match gate {
            Gate::Standard(g) => match g.angle() {
                Some(a) => format!("{}({})", g.name(), format_angle(a)),
                None => g.name().to_string(),
            },
            Gate::Boxed(b) => self.box_name(b).unwrap_or(b.name()).to_string(),
            Gate::Controlled(c) => {
                let modifier = match c.num_controls() {
                    1 => "ctrl".to_string(),
                    k => format!("ctrl({k})"),
                };
                format!("{modifier} @ {}", self.gate_call(c.base()))
            }
        }
    }
}

fn qubit_name(circuit: &Circuit, q: QubitId) -> String {
    circuit.qubits()[q.index()].to_string()
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
