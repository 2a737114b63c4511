use std::{error, fmt};

use cranelift_entity::SecondaryMap;
use sigset_core::{ConstraintSystem, Fr, ValueIndex, ValueVec, ValueVecLayout};

use super::{Shared, gate};
use crate::compiler::{
	constraint_builder::ConstraintBuilder,
	gate_graph::{Wire, WireKind},
};

const MAX_ASSERTION_MESSAGES: usize = 100;

/// Error returned when populating wire witness fails due to assertion failures.
#[derive(Debug)]
pub struct PopulateError {
	/// List of assertion failure messages (limited to MAX_ASSERTION_MESSAGES).
	pub messages: Vec<String>,
	/// Total count of assertion failures (may exceed messages.len()).
	pub total_count: usize,
}

impl fmt::Display for PopulateError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "assertions failed:")?;
		for message in &self.messages {
			writeln!(f, "{message}")?;
		}
		if self.total_count > self.messages.len() {
			writeln!(f, "(Some assertions are omitted. Total: {})", self.total_count)?;
		}
		Ok(())
	}
}

impl error::Error for PopulateError {}

pub struct WitnessFiller<'a> {
	pub(crate) circuit: &'a Circuit,
	pub(crate) value_vec: ValueVec,
	pub(crate) assertion_failed_message_vec: Vec<(String, String)>,
	pub(crate) assertion_failed_count: usize,
}

impl<'a> WitnessFiller<'a> {
	pub fn flag_assertion_failed(
		&mut self,
		assertion_name: &str,
		condition: impl FnOnce(&mut Self) -> String,
	) {
		self.assertion_failed_count += 1;
		if self.assertion_failed_message_vec.len() < MAX_ASSERTION_MESSAGES {
			let assertion_message = condition(self);
			self.assertion_failed_message_vec
				.push((assertion_name.to_string(), assertion_message));
		}
	}

	pub fn into_value_vec(self) -> ValueVec {
		self.value_vec
	}
}

impl<'a> std::ops::Index<Wire> for WitnessFiller<'a> {
	type Output = Fr;

	fn index(&self, wire: Wire) -> &Self::Output {
		&self.value_vec[self.circuit.witness_index(wire)]
	}
}

impl<'a> std::ops::IndexMut<Wire> for WitnessFiller<'a> {
	fn index_mut(&mut self, wire: Wire) -> &mut Self::Output {
		&mut self.value_vec[self.circuit.witness_index(wire)]
	}
}

pub struct Circuit {
	shared: Shared,
	value_vec_layout: ValueVecLayout,
	wire_mapping: SecondaryMap<Wire, ValueIndex>,
}

impl Circuit {
	/// Creates a new circuit with the given shared data and wire mapping. Only used during building
	/// by the circuit builder.
	pub(super) fn new(
		shared: Shared,
		value_vec_layout: ValueVecLayout,
		wire_mapping: SecondaryMap<Wire, ValueIndex>,
	) -> Self {
		value_vec_layout.validate();
		Self {
			shared,
			value_vec_layout,
			wire_mapping,
		}
	}

	/// For the given wire, returns its index in the witness vector.
	#[inline(always)]
	pub fn witness_index(&self, wire: Wire) -> ValueIndex {
		self.wire_mapping[wire]
	}

	pub fn value_vec_layout(&self) -> &ValueVecLayout {
		&self.value_vec_layout
	}

	pub fn new_witness_filler(&self) -> WitnessFiller<'_> {
		WitnessFiller {
			circuit: self,
			value_vec: ValueVec::new(self.value_vec_layout.clone()),
			assertion_failed_message_vec: Vec::new(),
			assertion_failed_count: 0,
		}
	}

	/// Populates non-input values (wires) in the witness.
	///
	/// Specifically, this will evaluate the circuit gate-by-gate and save the results in the
	/// witness vector.
	///
	/// This function expects that the input wires are already filled. The input wires are
	///
	/// - [`super::CircuitBuilder::add_inout`],
	/// - [`super::CircuitBuilder::add_witness`].
	///
	/// The wires created by [`super::CircuitBuilder::add_constant`] are automatically populated by
	/// this function as well.
	///
	/// # Errors
	///
	/// In case the circuit is not satisfiable (any assertion fails), this function will return
	/// an error with a list of assertion failure messages.
	pub fn populate_wire_witness(&self, w: &mut WitnessFiller) -> Result<(), PopulateError> {
		for (wire, wire_data) in self.shared.graph.wires.iter() {
			if let WireKind::Constant(value) = wire_data.kind {
				w[wire] = value;
			}
		}

		for (gate_id, _) in self.shared.graph.gates.iter() {
			gate::evaluate(gate_id, &self.shared.graph, w);
		}

		if w.assertion_failed_count > 0 {
			return Err(PopulateError {
				messages: w
					.assertion_failed_message_vec
					.iter()
					.map(|(name, message)| format!("{name} failed: {message}"))
					.collect(),
				total_count: w.assertion_failed_count,
			});
		}

		Ok(())
	}

	/// Builds a constraint system from this circuit.
	pub fn constraint_system(&self) -> ConstraintSystem {
		let graph = &self.shared.graph;
		let mut builder = ConstraintBuilder::new(graph.one);
		for (gate_id, _) in graph.gates.iter() {
			gate::constrain(gate_id, graph, &mut builder);
		}

		let mut constants = vec![Fr::from(0u64); graph.n_const()];
		for (wire, wire_data) in graph.wires.iter() {
			if let WireKind::Constant(value) = wire_data.kind {
				constants[self.wire_mapping[wire].0 as usize] = value;
			}
		}

		ConstraintSystem::new(
			constants,
			self.value_vec_layout.clone(),
			builder.build(&self.wire_mapping),
		)
	}

	/// Returns the number of gates in this circuit.
	///
	/// Depending on what type of gates this circuit uses, the number of constraints might be
	/// significantly larger.
	pub fn n_gates(&self) -> usize {
		self.shared.graph.gates.len()
	}
}
