//! Sequential sweep of the candidate list with the calibrated configuration.

use indexmap::IndexMap;
use log::debug;

use crate::config::Config;
use crate::error::Error;
use crate::measurement::{ProbeRunner, ProbeVariant};
use crate::result::{CalibrationParameters, LinkResult};
use crate::statistics::is_elevated_by;

/// Measure every candidate URL and classify it against the calibration
/// baseline.
///
/// Candidates are processed strictly sequentially: one URL's full series is
/// collected before the next URL touches the surface, so runs never
/// cross-contaminate its state. The returned map preserves candidate order;
/// an empty candidate list yields an empty map and is not an error.
///
/// By the time this runs, calibration has already proven a working
/// configuration, so measurement failures here are defects and propagate.
pub async fn scan_candidates<P: ProbeRunner>(
    probe: &mut P,
    config: &Config,
    params: &CalibrationParameters,
    candidates: &[String],
) -> Result<IndexMap<String, LinkResult>, Error> {
    probe.apply_obfuscation(params.blur)?;

    let mut results = IndexMap::with_capacity(candidates.len());
    for url in candidates {
        let test_series = probe
            .collect(ProbeVariant::Candidate(url), params.reps)
            .await?;
        let visited = is_elevated_by(&test_series, &params.baseline_series, config.elevation_margin)?;
        debug!(
            "{url}: {}",
            if visited { "visited" } else { "unvisited" }
        );
        results.insert(
            url.clone(),
            LinkResult {
                url: url.clone(),
                visited,
                test_series,
                baseline_series: params.baseline_series.clone(),
            },
        );
    }
    Ok(results)
}
