use std::{
	cell::{RefCell, RefMut},
	rc::Rc,
};

use cranelift_entity::SecondaryMap;
use sigset_core::{Fr, ValueIndex, ValueVecLayout};

pub mod circuit;
pub mod constraint_builder;
pub mod gate;
pub mod gate_graph;


pub use circuit::{Circuit, PopulateError, WitnessFiller};
use gate::Opcode;
pub use gate_graph::Wire;
use gate_graph::{GateGraph, WireKind};

pub(crate) struct Shared {
	pub(crate) graph: GateGraph,
}

/// # Clone
///
/// This is a light-weight reference. Cloning is cheap.
#[derive(Clone)]
pub struct CircuitBuilder {
	name: String,
	shared: Rc<RefCell<Option<Shared>>>,
}

impl Default for CircuitBuilder {
	fn default() -> Self {
		CircuitBuilder {
			name: String::new(),
			shared: Rc::new(RefCell::new(Some(Shared {
				graph: GateGraph::new(),
			}))),
		}
	}
}

impl CircuitBuilder {
	pub fn new() -> Self {
		CircuitBuilder::default()
	}

	/// # Preconditions
	///
	/// Must be called only once.
	pub fn build(&self) -> Circuit {
		let shared = self.shared.borrow_mut().take();
		let Some(shared) = shared else {
			panic!("CircuitBuilder::build called twice");
		};
		shared.graph.validate();

		// `ValueVec` expects the wires to be in a certain order. Specifically:
		//
		// 1. const
		// 2. inout
		// 3. witness
		// 4. internal
		//
		// The sort is stable, so the constant 1 created with the graph stays at index 0.
		let mut indexed_wires: Vec<(Wire, u8)> = shared
			.graph
			.wires
			.iter()
			.map(|(wire, wire_data)| {
				let priority = match wire_data.kind {
					WireKind::Constant(_) => 0,
					WireKind::Inout => 1,
					WireKind::Witness => 2,
					WireKind::Internal => 3,
				};
				(wire, priority)
			})
			.collect();
		indexed_wires.sort_by_key(|(_, priority)| *priority);

		let mut wire_mapping = SecondaryMap::new();
		for (sorted_index, (wire, _)) in indexed_wires.iter().enumerate() {
			wire_mapping[*wire] = ValueIndex(sorted_index as u32);
		}

		let graph = &shared.graph;
		let value_vec_layout =
			ValueVecLayout::new(graph.n_const(), graph.n_inout, graph.n_witness, graph.n_internal);
		Circuit::new(shared, value_vec_layout, wire_mapping)
	}

	/// Returns a builder that prefixes assertion names with `name`.
	pub fn subcircuit(&self, name: impl Into<String>) -> CircuitBuilder {
		CircuitBuilder {
			name: self.assertion_name(name),
			shared: self.shared.clone(),
		}
	}

	fn graph_mut(&self) -> RefMut<'_, GateGraph> {
		RefMut::map(self.shared.borrow_mut(), |shared| match shared {
			Some(shared) => &mut shared.graph,
			None => panic!("CircuitBuilder used after build"),
		})
	}

	fn assertion_name(&self, name: impl Into<String>) -> String {
		let name = name.into();
		if self.name.is_empty() {
			name
		} else {
			format!("{}.{name}", self.name)
		}
	}

	pub fn add_constant(&self, value: Fr) -> Wire {
		self.graph_mut().add_constant(value)
	}

	pub fn add_constant_u64(&self, value: u64) -> Wire {
		self.add_constant(Fr::from(value))
	}

	/// The wire holding the constant `1`.
	pub fn one(&self) -> Wire {
		self.graph_mut().one
	}

	pub fn zero(&self) -> Wire {
		self.add_constant_u64(0)
	}

	/// Creates a public wire.
	///
	/// Public wires appear in the value vector in creation order, which makes the creation order
	/// part of the public-signal layout.
	pub fn add_inout(&self) -> Wire {
		self.graph_mut().add_inout()
	}

	pub fn add_witness(&self) -> Wire {
		self.graph_mut().add_witness()
	}

	pub fn add_internal(&self) -> Wire {
		self.graph_mut().add_internal()
	}

	/// Returns `Σ coeff_i * wire_i + constant`.
	pub fn lin_comb(&self, terms: &[(Wire, Fr)], constant: Fr) -> Wire {
		let out = self.add_internal();
		let mut coefficients: Vec<Fr> = terms.iter().map(|(_, c)| *c).collect();
		coefficients.push(constant);
		self.graph_mut().emit_gate_generic(
			Opcode::LinComb,
			terms.iter().map(|(w, _)| *w),
			[out],
			&[],
			coefficients,
			vec![terms.len()],
		);
		out
	}

	/// Returns the sum of all `wires`.
	pub fn sum(&self, wires: &[Wire]) -> Wire {
		let terms: Vec<(Wire, Fr)> = wires.iter().map(|&w| (w, Fr::from(1u64))).collect();
		self.lin_comb(&terms, Fr::from(0u64))
	}

	pub fn add(&self, a: Wire, b: Wire) -> Wire {
		self.sum(&[a, b])
	}

	pub fn sub(&self, a: Wire, b: Wire) -> Wire {
		self.lin_comb(&[(a, Fr::from(1u64)), (b, -Fr::from(1u64))], Fr::from(0u64))
	}

	pub fn mul(&self, a: Wire, b: Wire) -> Wire {
		let out = self.add_internal();
		self.graph_mut().emit_gate(Opcode::Mul, [a, b], [out]);
		out
	}

	/// Returns `bit * (x - 1) + 1`, i.e. `x` if `bit = 1` and `1` if `bit = 0`.
	///
	/// `bit` must be constrained to be boolean by the caller.
	pub fn select_or_one(&self, bit: Wire, x: Wire) -> Wire {
		let x_minus_one = self.lin_comb(&[(x, Fr::from(1u64))], -Fr::from(1u64));
		let gated = self.mul(bit, x_minus_one);
		self.lin_comb(&[(gated, Fr::from(1u64))], Fr::from(1u64))
	}

	pub fn assert_eq(&self, name: impl Into<String>, x: Wire, y: Wire) {
		self.emit_assertion(name, Opcode::AssertEq, [x, y]);
	}

	pub fn assert_zero(&self, name: impl Into<String>, x: Wire) {
		self.emit_assertion(name, Opcode::AssertZero, [x]);
	}

	pub fn assert_bool(&self, name: impl Into<String>, x: Wire) {
		self.emit_assertion(name, Opcode::AssertBool, [x]);
	}

	/// Asserts that `x * y = 0`.
	pub fn assert_product_zero(&self, name: impl Into<String>, x: Wire, y: Wire) {
		self.emit_assertion(name, Opcode::AssertProductZero, [x, y]);
	}

	fn emit_assertion<const N: usize>(
		&self,
		name: impl Into<String>,
		opcode: Opcode,
		inputs: [Wire; N],
	) {
		let name = self.assertion_name(name);
		let mut graph = self.graph_mut();
		let gate = graph.emit_gate(opcode, inputs, []);
		graph.assertion_names[gate] = name;
	}

	/// Decomposes `x` into `n_bits` little-endian bits, which range checks `x < 2^n_bits`.
	pub fn split_bits(&self, name: impl Into<String>, x: Wire, n_bits: usize) -> Vec<Wire> {
		let name = self.assertion_name(name);
		let bits: Vec<Wire> = (0..n_bits).map(|_| self.add_internal()).collect();
		let mut graph = self.graph_mut();
		let gate = graph.emit_gate_generic(
			Opcode::SplitBits,
			[x],
			bits.iter().copied(),
			&[],
			Vec::new(),
			vec![n_bits],
		);
		graph.assertion_names[gate] = name;
		bits
	}

	/// Constrains `x < 2^n_bits`.
	pub fn range_check(&self, name: impl Into<String>, x: Wire, n_bits: usize) {
		self.split_bits(name, x, n_bits);
	}

	/// Splits `t` into `(lo, hi)` with `t = lo + 2^n_bits * hi`.
	///
	/// Neither output is range checked.
	pub fn split_limb(&self, t: Wire, n_bits: usize) -> (Wire, Wire) {
		let lo = self.add_internal();
		let hi = self.add_internal();
		self.graph_mut()
			.emit_gate_imm(Opcode::SplitLimb, [t], [lo, hi], n_bits as u32);
		(lo, hi)
	}

	/// Computes the quotient and remainder of `dividend / divisor` on the prover side.
	///
	/// The outputs are unconstrained.
	pub fn biguint_divide_hint(
		&self,
		name: impl Into<String>,
		dividend: &[Wire],
		divisor: &[Wire],
		quotient_limbs: usize,
		limb_bits: usize,
	) -> (Vec<Wire>, Vec<Wire>) {
		let name = self.assertion_name(name);
		let quotient: Vec<Wire> = (0..quotient_limbs).map(|_| self.add_internal()).collect();
		let remainder: Vec<Wire> = (0..divisor.len()).map(|_| self.add_internal()).collect();
		let mut graph = self.graph_mut();
		let gate = graph.emit_gate_generic(
			Opcode::BigUintDivideHint,
			dividend.iter().chain(divisor).copied(),
			quotient.iter().chain(&remainder).copied(),
			&[],
			Vec::new(),
			vec![dividend.len(), divisor.len(), quotient_limbs, limb_bits],
		);
		graph.assertion_names[gate] = name;
		(quotient, remainder)
	}

	/// Computes `b - a - 1` on the prover side. The output is unconstrained.
	pub fn biguint_lt_gap_hint(
		&self,
		name: impl Into<String>,
		a: &[Wire],
		b: &[Wire],
		limb_bits: usize,
	) -> Vec<Wire> {
		assert_eq!(a.len(), b.len(), "biguint_lt_gap_hint: operands must have the same limbs");
		let name = self.assertion_name(name);
		let gap: Vec<Wire> = (0..a.len()).map(|_| self.add_internal()).collect();
		let mut graph = self.graph_mut();
		let gate = graph.emit_gate_generic(
			Opcode::BigUintLtGapHint,
			a.iter().chain(b).copied(),
			gap.iter().copied(),
			&[],
			Vec::new(),
			vec![a.len(), limb_bits],
		);
		graph.assertion_names[gate] = name;
		gap
	}

	/// Returns the unconstrained pair `(is_zero(x), x^-1)`, with `x^-1 = 0` for `x = 0`.
	pub fn is_zero_hint(&self, x: Wire) -> (Wire, Wire) {
		let z = self.add_internal();
		let inv = self.add_internal();
		self.graph_mut().emit_gate(Opcode::IsZeroHint, [x], [z, inv]);
		(z, inv)
	}

	/// Returns a boolean wire that is `1` iff `x = 0`.
	///
	/// # Constraints
	///
	/// - `z * (z - 1) = 0`
	/// - `z * x = 0`
	/// - `(z - 1) * (inv * x - 1) = 0`
	pub fn is_zero(&self, name: impl Into<String>, x: Wire) -> Wire {
		let name = name.into();
		let (z, inv) = self.is_zero_hint(x);
		self.assert_bool(format!("{name}.indicator_bool"), z);
		self.assert_product_zero(format!("{name}.indicator_times_value"), z, x);
		let z_minus_one = self.lin_comb(&[(z, Fr::from(1u64))], -Fr::from(1u64));
		let inv_x = self.mul(inv, x);
		let inv_x_minus_one = self.lin_comb(&[(inv_x, Fr::from(1u64))], -Fr::from(1u64));
		self.assert_product_zero(format!("{name}.inverse"), z_minus_one, inv_x_minus_one);
		z
	}
}
