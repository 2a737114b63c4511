#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConstraintSystemError {
	#[error("the data length doesn't match layout: expected {expected}, got {actual}")]
	ValueVecLenMismatch { expected: usize, actual: usize },
	#[error("expected {expected} public signals, got {actual}")]
	PublicSignalsLenMismatch { expected: usize, actual: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
	#[error("{field} must be at least 1")]
	Empty { field: &'static str },
	#[error("limb width must be between 1 and 64 bits, got {limb_bits}")]
	LimbWidth { limb_bits: usize },
	#[error(
		"limb products need {required} bits of headroom but the field only holds {available} bits"
	)]
	Headroom { required: usize, available: usize },
}
