use std::collections::HashMap;

use cranelift_entity::{PrimaryMap, SecondaryMap, entity_impl};
use sigset_core::Fr;

use crate::compiler::gate::opcode::Opcode;

#[derive(Default)]
pub struct ConstPool {
	pub pool: HashMap<Fr, Wire>,
}

impl ConstPool {
	pub fn new() -> Self {
		ConstPool::default()
	}

	pub fn get(&self, value: Fr) -> Option<Wire> {
		self.pool.get(&value).cloned()
	}

	pub fn insert(&mut self, value: Fr, wire: Wire) {
		let prev = self.pool.insert(value, wire);
		assert!(prev.is_none());
	}
}

/// A wire through which a value flows in and out of gates.
///
/// The difference from `ValueIndex` is that a wire is abstract. A wire only receives its final
/// position in the value vector when the circuit is built.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Wire(u32);
entity_impl!(Wire);

#[derive(Copy, Clone)]
pub enum WireKind {
	Constant(Fr),
	Inout,
	Witness,
	/// An internal wire is a wire created inside a gate.
	Internal,
}

#[derive(Copy, Clone)]
pub struct WireData {
	pub kind: WireKind,
}

/// Gate ID - identifies a gate in the graph
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gate(u32);
entity_impl!(Gate);

/// A handy struct that allows a more type safe destructure.
pub struct GateParam<'a> {
	pub inputs: &'a [Wire],
	pub outputs: &'a [Wire],
	pub internal: &'a [Wire],
	pub imm: &'a [u32],
	pub coeffs: &'a [Fr],
}

/// Describes a particular gate in the gate graph, it's type, input and output wires and
/// compile-time parameters.
pub struct GateData {
	/// The code of operation of this gate.
	pub opcode: Opcode,

	/// The input and output wires of this gate.
	///
	/// They are laid out in the following order:
	///
	/// - Inputs
	/// - Outputs
	/// - Internal
	///
	/// The number of wires in every group is specified by the opcode's shape.
	pub wires: Vec<Wire>,

	/// Small compile-time parameters, such as bit widths.
	pub immediates: Vec<u32>,

	/// Field coefficients, used by linear combinations.
	pub coefficients: Vec<Fr>,

	/// The dimensions of gates with a variable number of wires.
	pub dimensions: Vec<usize>,
}

impl GateData {
	pub fn gate_param(&self) -> GateParam<'_> {
		let shape = self.opcode.shape(&self.dimensions);
		let end_input = shape.n_in;
		let end_output = end_input + shape.n_out;
		let end_internal = end_output + shape.n_internal;
		GateParam {
			inputs: &self.wires[..end_input],
			outputs: &self.wires[end_input..end_output],
			internal: &self.wires[end_output..end_internal],
			imm: &self.immediates,
			coeffs: &self.coefficients,
		}
	}

	/// Ensures the gate has the right shape.
	pub fn validate_shape(&self) {
		let shape = self.opcode.shape(&self.dimensions);
		assert_eq!(
			self.wires.len(),
			shape.n_in + shape.n_out + shape.n_internal,
			"{:?}: wrong number of wires",
			self.opcode
		);
		assert_eq!(self.immediates.len(), shape.n_imm, "{:?}: wrong immediates", self.opcode);
		assert_eq!(self.coefficients.len(), shape.n_coeff, "{:?}: wrong coefficients", self.opcode);
	}
}

pub struct GateGraph {
	pub gates: PrimaryMap<Gate, GateData>,
	pub wires: PrimaryMap<Wire, WireData>,

	/// Human readable names of the assertions, reported when a witness does not satisfy them.
	pub assertion_names: SecondaryMap<Gate, String>,

	pub const_pool: ConstPool,
	pub n_inout: usize,
	pub n_witness: usize,
	pub n_internal: usize,

	/// The wire holding the constant `1`. It is always the first wire of the graph.
	pub one: Wire,
}

impl Default for GateGraph {
	fn default() -> Self {
		Self::new()
	}
}

impl GateGraph {
	pub fn new() -> Self {
		let mut graph = GateGraph {
			gates: PrimaryMap::new(),
			wires: PrimaryMap::new(),
			assertion_names: SecondaryMap::new(),
			const_pool: ConstPool::new(),
			n_inout: 0,
			n_witness: 0,
			n_internal: 0,
			one: Wire::from_u32(0),
		};
		graph.one = graph.add_constant(Fr::from(1u64));
		graph
	}

	/// Runs a validation pass ensuring all the invariants hold.
	pub fn validate(&self) {
		for gate in self.gates.values() {
			gate.validate_shape();
		}
	}

	pub fn add_inout(&mut self) -> Wire {
		self.n_inout += 1;
		self.wires.push(WireData {
			kind: WireKind::Inout,
		})
	}

	pub fn add_witness(&mut self) -> Wire {
		self.n_witness += 1;
		self.wires.push(WireData {
			kind: WireKind::Witness,
		})
	}

	pub fn add_internal(&mut self) -> Wire {
		self.n_internal += 1;
		self.wires.push(WireData {
			kind: WireKind::Internal,
		})
	}

	pub fn add_constant(&mut self, value: Fr) -> Wire {
		if let Some(wire) = self.const_pool.get(value) {
			return wire;
		}
		let wire = self.wires.push(WireData {
			kind: WireKind::Constant(value),
		});
		self.const_pool.insert(value, wire);
		wire
	}

	/// Emits a gate with the given opcode, inputs and outputs.
	pub fn emit_gate(
		&mut self,
		opcode: Opcode,
		inputs: impl IntoIterator<Item = Wire>,
		outputs: impl IntoIterator<Item = Wire>,
	) -> Gate {
		self.emit_gate_generic(opcode, inputs, outputs, &[], Vec::new(), Vec::new())
	}

	/// Emits a gate with the given opcode, inputs, outputs and a single immediate argument.
	pub fn emit_gate_imm(
		&mut self,
		opcode: Opcode,
		inputs: impl IntoIterator<Item = Wire>,
		outputs: impl IntoIterator<Item = Wire>,
		imm32: u32,
	) -> Gate {
		self.emit_gate_generic(opcode, inputs, outputs, &[imm32], Vec::new(), Vec::new())
	}

	/// Creates a gate inline with the given opcode's shape parametrized with the inputs, outputs,
	/// immediates, coefficients and dimensions.
	///
	/// Panics if the resulting opcode shape is not valid.
	pub fn emit_gate_generic(
		&mut self,
		opcode: Opcode,
		inputs: impl IntoIterator<Item = Wire>,
		outputs: impl IntoIterator<Item = Wire>,
		immediates: &[u32],
		coefficients: Vec<Fr>,
		dimensions: Vec<usize>,
	) -> Gate {
		let shape = opcode.shape(&dimensions);
		let mut wires: Vec<Wire> = Vec::with_capacity(shape.n_in + shape.n_out + shape.n_internal);
		wires.extend(inputs);
		wires.extend(outputs);
		for _ in 0..shape.n_internal {
			wires.push(self.add_internal());
		}
		let data = GateData {
			opcode,
			wires,
			immediates: immediates.to_vec(),
			coefficients,
			dimensions,
		};
		data.validate_shape();

		self.gates.push(data)
	}

	/// Return the number of constants this graph defines.
	pub fn n_const(&self) -> usize {
		self.const_pool.pool.len()
	}
}
