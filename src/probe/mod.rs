/*!
 * Duration probing for video files.
 *
 * The evaluator only needs one number per video: its duration in seconds.
 * This module defines the seam behind which that number is obtained:
 * - `ffprobe`: runs the external ffprobe binary with a timeout
 * - `mock`: canned durations and failures for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProbeError;

pub mod ffprobe;
pub mod mock;

pub use ffprobe::FfprobeProber;
pub use mock::MockProber;

/// Common trait for anything that can report a video's duration
#[async_trait]
pub trait DurationProber: Send + Sync + Debug {
    /// Return the duration of the file at `path`, in seconds
    ///
    /// # Arguments
    /// * `path` - Full path of the file to probe
    ///
    /// # Returns
    /// * `Result<f64, ProbeError>` - Duration in seconds or the reason it is unknown
    async fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}
