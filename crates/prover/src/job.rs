use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	thread::JoinHandle,
};

use sigset_prover_interface::{ProofArtifact, Result};

/// A proof running on a background thread.
///
/// Cancellation is cooperative: it is observed before every backend attempt, so a backend call
/// that is already running completes first.
pub struct ProofJob {
	handle: JoinHandle<Result<ProofArtifact>>,
	cancelled: Arc<AtomicBool>,
}

impl ProofJob {
	pub(crate) fn new(
		handle: JoinHandle<Result<ProofArtifact>>,
		cancelled: Arc<AtomicBool>,
	) -> Self {
		Self { handle, cancelled }
	}

	/// Asks the job to stop. [`Self::wait`] then returns
	/// [`sigset_prover_interface::Error::Cancelled`] unless the proof was already done.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Relaxed)
	}

	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Blocks until the job is done.
	pub fn wait(self) -> Result<ProofArtifact> {
		match self.handle.join() {
			Ok(result) => result,
			Err(panic) => std::panic::resume_unwind(panic),
		}
	}
}
