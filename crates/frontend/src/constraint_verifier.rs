//! Simple constraint verifier for testing

use sigset_core::{ConstraintSystem, Fr, R1csConstraint, Term, ValueVec};

/// Evaluates an operand (linear combination of values) from the witness
fn eval_operand(witness: &ValueVec, operand: &[Term]) -> Fr {
	operand
		.iter()
		.map(|term| term.coeff * witness[term.index])
		.sum()
}

/// Verifies that a rank-1 constraint is satisfied: A * B = C
pub fn verify_r1cs_constraint(witness: &ValueVec, constraint: &R1csConstraint) -> Result<(), String> {
	let a = eval_operand(witness, &constraint.a);
	let b = eval_operand(witness, &constraint.b);
	let c = eval_operand(witness, &constraint.c);

	if a * b != c {
		Err(format!("R1CS constraint failed: {a} * {b} != {c}"))
	} else {
		Ok(())
	}
}

/// Verifies all constraints in a constraint system are satisfied by the witness
pub fn verify_constraints(cs: &ConstraintSystem, witness: &ValueVec) -> Result<(), String> {
	if witness.size() != cs.value_vec_len() {
		return Err(format!(
			"witness has {} values, the constraint system expects {}",
			witness.size(),
			cs.value_vec_len()
		));
	}
	if witness.constants() != cs.constants.as_slice() {
		return Err("witness constants differ from the constraint system".to_string());
	}
	for (i, constraint) in cs.constraints.iter().enumerate() {
		verify_r1cs_constraint(witness, constraint)
			.map_err(|e| format!("constraint {i} failed: {e}"))?;
	}
	Ok(())
}
