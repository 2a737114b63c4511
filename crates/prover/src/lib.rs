mod job;
mod session;

pub use job::ProofJob;
pub use session::*;
