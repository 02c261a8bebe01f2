//! Wall-clock timing of a unit of work
//!
//! Reports go through `tracing` at info level and are only emitted when the
//! caller asks for them with a `verbose` flag.

use std::time::{Duration, Instant};

use tracing::info;

/// Run `work`, then report how long it took if `verbose` is set.
pub fn log_time<T>(name: &str, verbose: bool, work: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = work();
    if verbose {
        info!("{}", format_elapsed(name, start.elapsed()));
    }
    result
}

/// Timer started on construction, reporting on demand.
#[derive(Debug)]
pub struct ScopedTimer {
    name: String,
    verbose: bool,
    start: Instant,
}

impl ScopedTimer {
    pub fn start(name: impl Into<String>, verbose: bool) -> Self {
        Self {
            name: name.into(),
            verbose,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Report the time elapsed so far, tagged with `msg`.
    pub fn report(&self, msg: &str) {
        if self.verbose {
            info!("{}", format_checkpoint(&self.name, msg, self.elapsed()));
        }
    }
}

/// `"<name> took 1.23 seconds to run."`
pub fn format_elapsed(name: &str, elapsed: Duration) -> String {
    format!("{name} took {:.2} seconds to run.", elapsed.as_secs_f64())
}

/// `"<name> | <msg> | total elapsed time: 1.23 seconds to run."`
pub fn format_checkpoint(name: &str, msg: &str, elapsed: Duration) -> String {
    format!(
        "{name} | {msg} | total elapsed time: {:.2} seconds to run.",
        elapsed.as_secs_f64()
    )
}
