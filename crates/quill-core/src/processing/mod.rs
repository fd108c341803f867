//! Processing of PDF tool jobs.
//!
//! The timer, the progress randomness and the backend are all injected so
//! the whole lifecycle can be driven deterministically in tests:
//!
//! - [`Clock`]: delay between ticks ([`TokioClock`], [`InstantClock`])
//! - [`ProgressSource`]: increment per tick ([`FixedProgress`],
//!   [`RandomProgress`])
//! - [`ProcessingBackend`]: does the actual work ([`SimulatedBackend`])

pub mod backend;
pub mod clock;
pub mod driver;
pub mod progress;

pub use backend::{ProcessingBackend, ProcessingJob, ProcessingReceipt, SimulatedBackend};
pub use clock::{Clock, InstantClock, Sleep, TokioClock};
pub use driver::{run_processing, ProcessingReport, DEFAULT_TICK};
pub use progress::{FixedProgress, ProgressSource, RandomProgress};
