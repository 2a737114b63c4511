use sigset_core::CircuitShape;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DivisionError {
	#[error("division by zero")]
	DivisionByZero,
	#[error("quotient does not fit into {quotient_limbs} limbs")]
	QuotientOverflow { quotient_limbs: usize },
	#[error("limb {limb:#x} does not fit into {limb_bits} bits")]
	LimbOutOfRange { limb: u64, limb_bits: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WitnessError {
	#[error("the key set is empty")]
	EmptyKeySet,
	#[error("{actual} keys supplied, the circuit holds {max}")]
	TooManyKeys { max: usize, actual: usize },
	#[error("exponent of key {index} has {bits} bits, the circuit holds {max}")]
	ExponentTooWide { index: usize, bits: u64, max: usize },
	#[error("modulus of key {index} has {bits} bits, the circuit holds {max}")]
	ModulusTooWide { index: usize, bits: u64, max: usize },
	#[error("modulus of key {index} must be greater than one")]
	DegenerateModulus { index: usize },
	#[error("{what} has {bits} bits, the circuit holds {max}")]
	ValueTooWide { what: &'static str, bits: u64, max: usize },
	#[error("key set was built for \"{key_set}\" but the circuit is \"{circuit}\"")]
	ShapeMismatch {
		key_set: CircuitShape,
		circuit: CircuitShape,
	},
	#[error("no key in the set verifies the signature over the message")]
	NoMatchingKey,
}
