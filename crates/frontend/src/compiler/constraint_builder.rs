use cranelift_entity::SecondaryMap;
use sigset_core::{Fr, R1csConstraint, Term, ValueIndex};

use crate::compiler::Wire;

/// A `coeff * wire` summand of a linear combination over wires.
#[derive(Copy, Clone, Debug)]
pub struct WireTerm {
	pub wire: Wire,
	pub coeff: Fr,
}

/// Operand built from wire expressions
pub type WireOperand = Vec<WireTerm>;

/// An operand that evaluates to zero.
pub fn empty() -> WireOperand {
	vec![]
}

/// An operand holding a single wire.
pub fn plain(wire: Wire) -> WireOperand {
	vec![WireTerm {
		wire,
		coeff: Fr::from(1u64),
	}]
}

/// `coeff * wire`.
pub fn scaled(wire: Wire, coeff: Fr) -> WireTerm {
	WireTerm { wire, coeff }
}

/// `x - y`.
pub fn sub2(x: Wire, y: Wire) -> WireOperand {
	vec![scaled(x, Fr::from(1u64)), scaled(y, -Fr::from(1u64))]
}

/// R1CS constraint using Wire references
pub struct WireR1csConstraint {
	pub a: WireOperand,
	pub b: WireOperand,
	pub c: WireOperand,
}

impl WireR1csConstraint {
	fn into_constraint(self, wire_mapping: &SecondaryMap<Wire, ValueIndex>) -> R1csConstraint {
		R1csConstraint {
			a: convert_operand(self.a, wire_mapping),
			b: convert_operand(self.b, wire_mapping),
			c: convert_operand(self.c, wire_mapping),
		}
	}
}

fn convert_operand(
	operand: WireOperand,
	wire_mapping: &SecondaryMap<Wire, ValueIndex>,
) -> Vec<Term> {
	operand
		.into_iter()
		.map(|term| Term::scaled(wire_mapping[term.wire], term.coeff))
		.collect()
}

/// Builder for creating constraints using Wire references
pub struct ConstraintBuilder {
	one: Wire,
	pub constraints: Vec<WireR1csConstraint>,
}

impl ConstraintBuilder {
	pub fn new(one: Wire) -> Self {
		Self {
			one,
			constraints: Vec::new(),
		}
	}

	/// The wire holding the constant `1`.
	pub fn one(&self) -> Wire {
		self.one
	}

	/// Build a rank-1 constraint: `A * B = C`
	pub fn r1cs(&mut self) -> R1csConstraintBuilder<'_> {
		R1csConstraintBuilder::new(self)
	}

	/// Convert all wire-based constraints to ValueIndex-based constraints.
	pub fn build(self, wire_mapping: &SecondaryMap<Wire, ValueIndex>) -> Vec<R1csConstraint> {
		self.constraints
			.into_iter()
			.map(|c| c.into_constraint(wire_mapping))
			.collect()
	}
}

pub struct R1csConstraintBuilder<'a> {
	builder: &'a mut ConstraintBuilder,
	a: WireOperand,
	b: WireOperand,
	c: WireOperand,
}

impl<'a> R1csConstraintBuilder<'a> {
	fn new(builder: &'a mut ConstraintBuilder) -> Self {
		Self {
			builder,
			a: empty(),
			b: empty(),
			c: empty(),
		}
	}

	pub fn a(mut self, operand: WireOperand) -> Self {
		self.a = operand;
		self
	}

	pub fn b(mut self, operand: WireOperand) -> Self {
		self.b = operand;
		self
	}

	pub fn c(mut self, operand: WireOperand) -> Self {
		self.c = operand;
		self
	}

	pub fn build(self) {
		self.builder.constraints.push(WireR1csConstraint {
			a: self.a,
			b: self.b,
			c: self.c,
		});
	}
}
