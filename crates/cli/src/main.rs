use std::{
	fs::File,
	io::{BufReader, BufWriter},
	path::{Path, PathBuf},
	process::ExitCode,
	sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::OsRng;
use sigset_core::CircuitShape;
use sigset_frontend::{
	circuits::{SignatureCircuit, Variant},
	constraint_verifier::verify_constraints,
	witness::{KeySet, WitnessBundle},
};
use sigset_prover::{ProveRequest, ProverSession};
use sigset_prover_interface::{Error, Groth16Backend, ProofArtifact};
use sigset_ssh::{HashAlgorithm, SignatureAlgorithm, SignatureContext};
use sigset_verifier::VerifierSession;
use tracing_subscriber::EnvFilter;

mod inputs;

#[derive(Parser)]
#[command(name = "sigset")]
#[command(about = "Prove that one of a set of RSA keys signed a message, without saying which")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

/// The circuit a proof is made for. Prover and verifier must pass the same values.
#[derive(Args, Debug)]
struct CircuitArgs {
	/// Number of keys in a key set
	#[arg(long, default_value_t = 4)]
	keys: usize,

	/// Width of one limb in bits
	#[arg(long, default_value_t = 64)]
	limb_bits: usize,

	/// Number of limbs of a modulus, a signature and a message
	#[arg(long, default_value_t = 32)]
	limbs: usize,

	/// Number of bits of every public exponent
	#[arg(long, default_value_t = 17)]
	exp_bits: usize,

	/// Circuit variant: selector, zero-product or merkle
	#[arg(long, default_value_t = Variant::Selector)]
	variant: Variant,
}

impl CircuitArgs {
	fn shape(&self) -> Result<CircuitShape> {
		Ok(CircuitShape::new(self.keys, self.limb_bits, self.limbs, self.exp_bits)?)
	}
}

/// What the signature signs besides the data, as agreed between prover and verifier.
#[derive(Args, Debug)]
struct ContextArgs {
	/// Signed data
	#[arg(long)]
	data: PathBuf,

	/// Namespace the data was signed in (`ssh-keygen -Y sign -n`)
	#[arg(long, default_value = "file")]
	namespace: String,

	/// Hash of the signed data: sha256 or sha512
	#[arg(long, default_value_t = HashAlgorithm::Sha512)]
	hash: HashAlgorithm,

	/// RSA signature scheme: rsa-sha2-256 or rsa-sha2-512
	#[arg(long, default_value_t = SignatureAlgorithm::RsaSha512)]
	algorithm: SignatureAlgorithm,
}

impl ContextArgs {
	fn context(&self) -> SignatureContext {
		SignatureContext {
			namespace: self.namespace.clone(),
			reserved: Vec::new(),
			hash_algorithm: self.hash,
			algorithm: self.algorithm,
		}
	}
}

#[derive(Args, Debug)]
struct SignedInput {
	/// authorized_keys style file with the key set
	#[arg(long)]
	authorized_keys: PathBuf,

	/// Armored SSH signature over the data
	#[arg(long)]
	signature: PathBuf,

	/// Signed data
	#[arg(long)]
	data: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
	/// Build the circuit and check a witness for a signature without proving
	Check {
		#[command(flatten)]
		circuit: CircuitArgs,
		#[command(flatten)]
		input: SignedInput,
	},
	/// Generate Groth16 proving and verifying keys for a circuit
	Setup {
		#[command(flatten)]
		circuit: CircuitArgs,
		/// Output file for the keys
		#[arg(long)]
		out: PathBuf,
		/// Write the verifying key only
		#[arg(long)]
		verifier_only: bool,
	},
	/// Prove that a key of the set signed the data
	Prove {
		#[command(flatten)]
		circuit: CircuitArgs,
		#[command(flatten)]
		input: SignedInput,
		/// Keys written by `setup`
		#[arg(long)]
		proving_keys: PathBuf,
		/// Output file for the proof
		#[arg(long)]
		out: PathBuf,
	},
	/// Verify a proof against a key set and the signed data
	Verify {
		#[command(flatten)]
		circuit: CircuitArgs,
		#[command(flatten)]
		context: ContextArgs,
		/// authorized_keys style file with the key set
		#[arg(long)]
		authorized_keys: PathBuf,
		/// Keys written by `setup`
		#[arg(long)]
		verifying_keys: PathBuf,
		/// Proof written by `prove`
		#[arg(long)]
		proof: PathBuf,
	},
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();

	match run(Cli::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			match err.downcast_ref::<Error>() {
				Some(protocol_err) => eprintln!("error[{}]: {err:#}", protocol_err.code()),
				None => eprintln!("error: {err:#}"),
			}
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<()> {
	match cli.command {
		Commands::Check { circuit, input } => check(&circuit, &input),
		Commands::Setup {
			circuit,
			out,
			verifier_only,
		} => setup(&circuit, &out, verifier_only),
		Commands::Prove {
			circuit,
			input,
			proving_keys,
			out,
		} => prove(&circuit, &input, &proving_keys, &out),
		Commands::Verify {
			circuit,
			context,
			authorized_keys,
			verifying_keys,
			proof,
		} => verify(&circuit, &context, &authorized_keys, &verifying_keys, &proof),
	}
}

fn check(args: &CircuitArgs, input: &SignedInput) -> Result<()> {
	let shape = args.shape()?;
	let request = prove_request(input)?;
	let circuit = SignatureCircuit::build(shape, args.variant);
	let cs = circuit.constraint_system();

	let key_set = KeySet::new(shape, request.keys).map_err(Error::from)?;
	let bundle = WitnessBundle::assemble(&shape, &key_set, &request.signature, &request.message)
		.map_err(Error::from)?;
	let values = circuit
		.populate(&bundle)
		.map_err(|err| Error::WitnessGeneration(err.to_string()))?;
	verify_constraints(&cs, &values).map_err(Error::WitnessGeneration)?;
	println!(
		"witness satisfies all {} constraints of the {} circuit ({shape})",
		cs.n_constraints(),
		args.variant
	);
	Ok(())
}

fn setup(args: &CircuitArgs, out: &Path, verifier_only: bool) -> Result<()> {
	let circuit = SignatureCircuit::build(args.shape()?, args.variant);
	let mut backend = Groth16Backend::setup(&circuit.constraint_system(), &mut OsRng)?;
	if verifier_only {
		backend = backend.verifier_only();
	}
	let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
	backend.write_keys(BufWriter::new(file))?;
	tracing::info!(path = %out.display(), "wrote keys");
	Ok(())
}

fn prove(args: &CircuitArgs, input: &SignedInput, proving_keys: &Path, out: &Path) -> Result<()> {
	let backend = read_backend(proving_keys)?;
	let session = ProverSession::new(args.shape()?, args.variant, Arc::new(backend))?;
	let artifact = session.prove(&prove_request(input)?)?;
	let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
	artifact.write_to(BufWriter::new(file))?;
	println!("wrote a {} byte proof to {}", artifact.proof.len(), out.display());
	Ok(())
}

fn verify(
	args: &CircuitArgs,
	context: &ContextArgs,
	authorized_keys: &Path,
	verifying_keys: &Path,
	proof: &Path,
) -> Result<()> {
	let keys = inputs::read_keys(authorized_keys)?;
	let data = inputs::read_data(&context.data)?;
	let message = inputs::message(&context.context(), &data, &keys)?;

	let backend = read_backend(verifying_keys)?;
	let session = VerifierSession::new(args.shape()?, args.variant, Arc::new(backend))?;
	let file = File::open(proof).with_context(|| format!("opening {}", proof.display()))?;
	let artifact = ProofArtifact::read_from(BufReader::new(file))?;
	session.verify(&inputs::key_pairs(&keys), &message, &artifact)?;
	println!("proof verified: one of the {} keys signed the data", keys.len());
	Ok(())
}

fn read_backend(path: &Path) -> Result<Groth16Backend> {
	let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
	Groth16Backend::read_keys(BufReader::new(file))
		.with_context(|| format!("reading keys from {}", path.display()))
}

fn prove_request(input: &SignedInput) -> Result<ProveRequest> {
	let keys = inputs::read_keys(&input.authorized_keys)?;
	let signature = inputs::read_signature(&input.signature)?;
	let data = inputs::read_data(&input.data)?;
	let message = inputs::message(&signature.context(), &data, &keys)?;
	Ok(ProveRequest {
		keys: inputs::key_pairs(&keys),
		signature: signature.signature,
		message,
	})
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_circuit_flags() {
		let cli = Cli::try_parse_from([
			"sigset",
			"setup",
			"--keys",
			"8",
			"--limbs",
			"16",
			"--variant",
			"zero-product",
			"--out",
			"keys.bin",
		])
		.unwrap();
		let Commands::Setup { circuit, .. } = cli.command else {
			panic!("expected the setup command");
		};
		assert_eq!(circuit.shape().unwrap(), CircuitShape::rsa(1024, 8).unwrap());
		assert_eq!(circuit.variant, Variant::ZeroProduct);

		assert!(
			Cli::try_parse_from(["sigset", "setup", "--variant", "or", "--out", "keys.bin"])
				.is_err()
		);
	}
}
