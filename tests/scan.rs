//! End-to-end scan scenarios: scripted probes for the verdict logic, and the
//! simulated page for the full clock-to-report pipeline.

use std::collections::HashSet;

use history_oracle::helpers::SimulatedPage;
use history_oracle::{
    Config, Error, FrameProbe, HistoryOracle, Outcome, ProbeRunner, ProbeVariant, RunFlag,
    SurfaceError, TimeSeries,
};

const REFERENCE: &str = "https://example.com/current-page";

/// A probe that fabricates elevated series for URLs in its visited set.
#[derive(Default)]
struct StubProbe {
    visited: HashSet<String>,
    /// Subject and repetition count of every collection, in order.
    collects: Vec<(String, u32)>,
    provisioned: Option<usize>,
}

impl StubProbe {
    fn with_visited(urls: &[&str]) -> Self {
        Self {
            visited: urls.iter().map(|u| (*u).to_owned()).collect(),
            ..Default::default()
        }
    }
}

impl ProbeRunner for StubProbe {
    fn provision(&mut self, target_count: usize) -> Result<(), SurfaceError> {
        self.provisioned = Some(target_count);
        Ok(())
    }

    fn apply_obfuscation(&mut self, _intensity: f64) -> Result<(), SurfaceError> {
        Ok(())
    }

    async fn collect(&mut self, variant: ProbeVariant<'_>, reps: u32) -> Result<TimeSeries, Error> {
        let (subject, elevated) = match variant {
            ProbeVariant::Baseline => ("<baseline>".to_owned(), false),
            ProbeVariant::Reference(url) | ProbeVariant::Candidate(url) => {
                (url.to_owned(), self.visited.contains(url))
            }
        };
        self.collects.push((subject, reps));
        let value = if elevated { 40.0 } else { 20.0 };
        Ok(vec![value; 2 * reps as usize])
    }
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| (*u).to_owned()).collect()
}

#[tokio::test]
async fn known_visited_candidate_is_classified_visited() {
    let mut probe = StubProbe::with_visited(&[REFERENCE]);
    let oracle = HistoryOracle::new();
    let candidates = urls(&[REFERENCE]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .expect("run completes");

    assert!(report.results[REFERENCE].visited);
    assert_eq!(report.visited_urls(), vec![REFERENCE]);
}

#[tokio::test]
async fn series_equal_to_baseline_is_classified_unvisited() {
    // The candidate's series matches the baseline exactly; equal medians
    // fail the strict margin.
    let mut probe = StubProbe::with_visited(&[REFERENCE]);
    let oracle = HistoryOracle::new();
    let candidates = urls(&["https://cold.example"]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .unwrap();

    let result = &report.results["https://cold.example"];
    assert!(!result.visited);
    assert_eq!(result.test_series, result.baseline_series);
}

#[tokio::test]
async fn empty_candidate_list_still_completes() {
    let mut probe = StubProbe::with_visited(&[REFERENCE]);
    let oracle = HistoryOracle::new();

    let outcome = oracle.run(&mut probe, REFERENCE, &[]).await;

    let report = outcome.completed().expect("empty scan is not an error");
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn results_preserve_candidate_order_and_cover_every_url() {
    let mut probe = StubProbe::with_visited(&[REFERENCE, "https://b.example"]);
    let oracle = HistoryOracle::new();
    let candidates = urls(&["https://c.example", "https://a.example", "https://b.example"]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .unwrap();

    let keys: Vec<&str> = report.results.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["https://c.example", "https://a.example", "https://b.example"]);
    assert!(report.results["https://b.example"].visited);
    assert!(!report.results["https://a.example"].visited);
}

#[tokio::test]
async fn scan_reuses_calibrated_repetitions_and_baseline() {
    let mut probe = StubProbe::with_visited(&[REFERENCE]);
    let oracle = HistoryOracle::new();
    let candidates = urls(&["https://a.example", "https://b.example"]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .unwrap();

    // Calibration descends 3 -> 2, so every candidate runs 2 repetitions.
    assert_eq!(report.calibration.reps, 2);
    assert_eq!(report.calibration.attempts, 1);
    for result in report.results.values() {
        assert_eq!(result.test_series.len(), 2 * report.calibration.reps as usize);
        assert_eq!(result.baseline_series.len(), 2 * report.calibration.reps as usize);
    }

    // Candidates were measured strictly sequentially, in list order, after
    // calibration's baseline/reference pairs.
    let tail: Vec<(String, u32)> = probe.collects[probe.collects.len() - 2..].to_vec();
    assert_eq!(
        tail,
        vec![
            ("https://a.example".to_owned(), 2),
            ("https://b.example".to_owned(), 2),
        ]
    );
    assert_eq!(probe.provisioned, Some(Config::default().surface_targets));
}

#[tokio::test]
async fn undetectable_reference_reports_unavailable() {
    // Reference never elevated: calibration exhausts its retries and the
    // run resolves to the terminal "doesn't work here" outcome.
    let mut probe = StubProbe::default();
    let oracle = HistoryOracle::new();
    let candidates = urls(&["https://a.example"]);

    match oracle.run(&mut probe, REFERENCE, &candidates).await {
        Outcome::Unavailable(info) => {
            assert_eq!(info.attempts, 4);
            assert!(!info.reason.is_empty());
        }
        Outcome::Completed(_) => panic!("calibration should not succeed"),
    }
}

#[tokio::test]
async fn trigger_is_a_no_op_while_a_run_is_in_flight() {
    let mut probe = StubProbe::with_visited(&[REFERENCE]);
    let oracle = HistoryOracle::new();
    let flag = RunFlag::new();
    let candidates = urls(&[REFERENCE]);

    let token = flag.try_acquire().unwrap();
    let outcome = oracle.trigger(&flag, &mut probe, REFERENCE, &candidates).await;
    assert!(outcome.is_none());
    assert!(probe.collects.is_empty(), "a guarded trigger must not measure");

    drop(token);
    let outcome = oracle.trigger(&flag, &mut probe, REFERENCE, &candidates).await;
    assert!(outcome.expect("flag released").is_completed());
    assert!(!flag.is_running(), "flag is released after the run");
}

// ============================================================================
// Simulated-page pipeline
// ============================================================================

#[tokio::test]
async fn simulated_page_end_to_end() {
    let page = SimulatedPage::new();
    page.mark_visited(REFERENCE);
    page.mark_visited("https://hot.example");

    let oracle = HistoryOracle::new();
    let mut probe = FrameProbe::new(page.clock(), page.surface(), oracle.config());
    let candidates = urls(&[REFERENCE, "https://hot.example", "https://cold.example"]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .expect("simulated page supports the side channel");

    assert!(report.results[REFERENCE].visited);
    assert!(report.results["https://hot.example"].visited);
    assert!(!report.results["https://cold.example"].visited);

    // The cheapest validated level: one step below the starting point.
    assert_eq!(report.calibration.reps, 2);
    assert_eq!(report.calibration.blur, 40.0);
    // The scan leaves the surface at the accepted obfuscation level,
    // provisioned at the configured density.
    assert_eq!(page.obfuscation(), 40.0);
    assert_eq!(page.provisioned_targets(), 500);
}

#[tokio::test]
async fn simulated_jitter_is_absorbed_by_the_margin() {
    // Half a millisecond of per-frame noise moves every delta by at most
    // one millisecond, which the 10% margin absorbs comfortably.
    let page = SimulatedPage::with_seed(42).jitter_ms(0.5);
    page.mark_visited(REFERENCE);

    let oracle = HistoryOracle::new();
    let mut probe = FrameProbe::new(page.clock(), page.surface(), oracle.config());
    let candidates = urls(&[REFERENCE, "https://cold.example"]);

    let report = oracle
        .run(&mut probe, REFERENCE, &candidates)
        .await
        .completed()
        .expect("jittered page still calibrates");

    assert!(report.results[REFERENCE].visited);
    assert!(!report.results["https://cold.example"].visited);
}
