use thiserror::Error;

/// Errors that cross the scan boundary to the caller.
///
/// Everything else the pipeline can run into degrades into sentinel
/// field values or the simulation payload instead of failing the scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no non-loopback IPv4 interface available")]
    NoInterface,
}

/// Failure of the reachability sweep *mechanism* itself.
///
/// Distinct from per-host unreachability (which is just `alive = false`):
/// this fires when the underlying raw socket cannot be opened at all,
/// typically for lack of privilege. The orchestrator answers it with the
/// fixed demonstration payload rather than an empty result.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("reachability probing unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}
