use std::time::Duration;

/// Configuration of a proving session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	max_attempts: usize,
	retry_delay: Duration,
	check_witness: bool,
}

impl SessionConfig {
	/// Create a new builder for SessionConfig
	pub fn builder() -> SessionConfigBuilder {
		SessionConfigBuilder::default()
	}

	/// How many times a failing backend is invoked before giving up
	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	/// Pause between two backend attempts
	pub fn retry_delay(&self) -> Duration {
		self.retry_delay
	}

	/// Whether a populated witness is checked against the constraints before proving
	pub fn check_witness(&self) -> bool {
		self.check_witness
	}
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			retry_delay: Duration::from_millis(100),
			check_witness: true,
		}
	}
}

/// Builder for SessionConfig
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
	max_attempts: Option<usize>,
	retry_delay: Option<Duration>,
	check_witness: Option<bool>,
}

impl SessionConfigBuilder {
	/// Set the number of backend attempts
	pub fn max_attempts(mut self, attempts: usize) -> Self {
		self.max_attempts = Some(attempts);
		self
	}

	/// Set the pause between backend attempts
	pub fn retry_delay(mut self, delay: Duration) -> Self {
		self.retry_delay = Some(delay);
		self
	}

	/// Enable or disable the witness check
	pub fn check_witness(mut self, check: bool) -> Self {
		self.check_witness = Some(check);
		self
	}

	/// Build the SessionConfig
	pub fn build(self) -> SessionConfig {
		let mut config = SessionConfig::default();

		if let Some(attempts) = self.max_attempts {
			// At least one attempt, at most a handful
			config.max_attempts = attempts.clamp(1, 10);
		}

		if let Some(delay) = self.retry_delay {
			config.retry_delay = delay;
		}

		if let Some(check) = self.check_witness {
			config.check_witness = check;
		}

		config
	}
}
