#![allow(clippy::unwrap_used)]
// End-to-end engine tests over an in-memory metric source: collection
// policies, chunked fetching, failure isolation, and the full
// collect → aggregate → summarize pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use gatewatch_api::Datapoint;
use gatewatch_core::{
    collect_gateway_samples, Analyzer, AnalyzerOptions, AnalysisScope, CollectOptions, CoreError,
    Gateway, GatewayKind, GatewayStatus, KindTotals, MetricsSource, TimeRange,
};

// ── In-memory metric source ─────────────────────────────────────────

type PairKey = (String, String);

#[derive(Default)]
struct FakeSource {
    /// Datapoints per (gateway, metric), across the whole range.
    data: HashMap<PairKey, Vec<Datapoint>>,
    /// Pairs whose existence probe answers "no data".
    missing: HashSet<PairKey>,
    /// Pairs whose fetch fails.
    failing: HashSet<PairKey>,
    /// Recorded fetch windows, in call order.
    calls: Mutex<Vec<(String, String, DateTime<Utc>, DateTime<Utc>)>>,
}

impl FakeSource {
    fn insert(&mut self, gateway: &str, metric: &str, points: Vec<Datapoint>) {
        self.data.insert((gateway.into(), metric.into()), points);
    }

    fn mark_missing(&mut self, gateway: &str, metric: &str) {
        self.missing.insert((gateway.into(), metric.into()));
    }

    fn mark_failing(&mut self, gateway: &str, metric: &str) {
        self.failing.insert((gateway.into(), metric.into()));
    }

    fn fetch_count_for(&self, gateway: &str, metric: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(g, m, _, _)| g == gateway && m == metric)
            .count()
    }
}

impl MetricsSource for FakeSource {
    async fn fetch(
        &self,
        gateway_id: &str,
        metric: &str,
        window: TimeRange,
        _period_seconds: u32,
    ) -> Result<Vec<Datapoint>, gatewatch_api::Error> {
        let key = (gateway_id.to_owned(), metric.to_owned());
        if self.failing.contains(&key) {
            return Err(gatewatch_api::Error::Api {
                message: "backend unavailable".into(),
                code: None,
                status: 500,
            });
        }
        self.calls.lock().unwrap().push((
            key.0.clone(),
            key.1.clone(),
            window.start(),
            window.end(),
        ));
        let points = self
            .data
            .get(&key)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.timestamp >= window.start() && p.timestamp < window.end())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(points)
    }

    async fn exists(
        &self,
        gateway_id: &str,
        metric: &str,
    ) -> Result<bool, gatewatch_api::Error> {
        Ok(!self
            .missing
            .contains(&(gateway_id.to_owned(), metric.to_owned())))
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

fn nat(id: &str) -> Gateway {
    Gateway {
        id: id.into(),
        kind: GatewayKind::Nat,
        name: id.into(),
        network_id: Some("vpc-1".into()),
        network_name: Some("prod".into()),
    }
}

fn igw(id: &str) -> Gateway {
    Gateway {
        id: id.into(),
        kind: GatewayKind::Igw,
        name: id.into(),
        network_id: Some("vpc-1".into()),
        network_name: Some("prod".into()),
    }
}

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
}

fn range_days(days: i64) -> TimeRange {
    TimeRange::new(origin(), origin() + Duration::days(days)).unwrap()
}

fn point(offset_periods: i64, sum: f64) -> Datapoint {
    Datapoint {
        timestamp: origin() + Duration::seconds(21_600 * offset_periods),
        sum,
        average: 0.0,
        maximum: 0.0,
        minimum: 0.0,
    }
}

fn scope() -> AnalysisScope {
    AnalysisScope {
        account_id: "123456789012".into(),
        region: "eu-west-1".into(),
    }
}

// ── Collector tests ─────────────────────────────────────────────────

#[tokio::test]
async fn chunked_range_issues_one_fetch_per_window() {
    let mut source = FakeSource::default();
    source.insert("nat-1", "BytesInFromSource", vec![point(0, 1.0)]);

    let samples = collect_gateway_samples(
        &source,
        &nat("nat-1"),
        range_days(65),
        &CollectOptions::default(),
    )
    .await
    .unwrap();

    // 65 days at a 30-day chunk = 3 windows per metric.
    assert_eq!(source.fetch_count_for("nat-1", "BytesInFromSource"), 3);
    assert_eq!(source.fetch_count_for("nat-1", "ActiveConnectionCount"), 3);

    // Windows are contiguous and chronological per metric.
    let calls = source.calls.lock().unwrap();
    let windows: Vec<_> = calls
        .iter()
        .filter(|(_, m, _, _)| m == "BytesInFromSource")
        .collect();
    assert_eq!(windows[0].3, windows[1].2);
    assert_eq!(windows[1].3, windows[2].2);
    drop(calls);

    assert_eq!(samples.len(), 1);
}

#[tokio::test]
async fn nat_metrics_are_never_probed_or_zero_filled() {
    // No data anywhere: NAT collection yields an empty table, not
    // synthetic samples.
    let source = FakeSource::default();

    let samples = collect_gateway_samples(
        &source,
        &nat("nat-1"),
        range_days(10),
        &CollectOptions::default(),
    )
    .await
    .unwrap();

    assert!(samples.is_empty());
}

#[tokio::test]
async fn missing_igw_metric_becomes_one_zero_sample_at_start() {
    let mut source = FakeSource::default();
    source.mark_missing("igw-1", "BytesInFromDestination");

    let range = range_days(10);
    let samples = collect_gateway_samples(&source, &igw("igw-1"), range, &CollectOptions::default())
        .await
        .unwrap();

    let synthetic: Vec<_> = samples
        .iter()
        .filter(|s| s.metric == "BytesInFromDestination")
        .collect();
    assert_eq!(synthetic.len(), 1);
    assert_eq!(synthetic[0].timestamp, range.start());
    assert_eq!(synthetic[0].sum, 0.0);
    assert_eq!(synthetic[0].maximum, 0.0);

    // The probe short-circuits the per-window fetch entirely.
    assert_eq!(source.fetch_count_for("igw-1", "BytesInFromDestination"), 0);
}

#[tokio::test]
async fn igw_metric_with_positive_probe_but_no_data_still_zero_fills() {
    // The probe says the metric exists, yet every window comes back
    // empty: the pair is still represented downstream.
    let source = FakeSource::default();

    let range = range_days(10);
    let samples = collect_gateway_samples(&source, &igw("igw-1"), range, &CollectOptions::default())
        .await
        .unwrap();

    // All 8 catalog metrics zero-filled at the range start.
    assert_eq!(samples.len(), 8);
    assert!(samples.iter().all(|s| s.sum == 0.0 && s.timestamp == range.start()));
}

#[tokio::test]
async fn unordered_upstream_datapoints_are_sorted_per_metric() {
    let mut source = FakeSource::default();
    source.insert(
        "nat-1",
        "BytesInFromSource",
        vec![point(2, 30.0), point(0, 10.0), point(1, 20.0)],
    );

    let samples = collect_gateway_samples(
        &source,
        &nat("nat-1"),
        range_days(10),
        &CollectOptions::default(),
    )
    .await
    .unwrap();

    let sums: Vec<f64> = samples.iter().map(|s| s.sum).collect();
    assert_eq!(sums, vec![10.0, 20.0, 30.0]);
}

#[tokio::test]
async fn chunk_failure_aborts_the_gateway_with_context() {
    let mut source = FakeSource::default();
    source.insert("nat-1", "BytesInFromSource", vec![point(0, 10.0)]);
    source.mark_failing("nat-1", "PacketsOutToSource");

    let result = collect_gateway_samples(
        &source,
        &nat("nat-1"),
        range_days(10),
        &CollectOptions::default(),
    )
    .await;

    match result {
        Err(CoreError::Fetch {
            gateway_id, metric, ..
        }) => {
            assert_eq!(gateway_id, "nat-1");
            assert_eq!(metric, "PacketsOutToSource");
        }
        other => panic!("expected Fetch error, got: {other:?}"),
    }
}

// ── Analyzer tests ──────────────────────────────────────────────────

#[tokio::test]
async fn full_pipeline_for_one_nat_gateway() {
    let mut source = FakeSource::default();
    // T0 and T2 idle, T1 carries traffic on a single metric.
    for metric in ["BytesInFromSource", "BytesOutToSource"] {
        source.insert(
            "nat-1",
            metric,
            vec![point(0, 0.0), point(2, 0.0)],
        );
    }
    source.insert("nat-1", "BytesInFromDestination", vec![point(1, 1000.0)]);

    let analyzer = Analyzer::new(source);
    let report = analyzer
        .analyze(scope(), &[nat("nat-1")], range_days(10))
        .await;

    assert_eq!(report.failures.len(), 0);
    assert_eq!(report.summaries.len(), 1);

    let summary = &report.summaries[0];
    assert_eq!(summary.total_periods, 3);
    assert_eq!(summary.idle_periods, 2);
    assert_eq!(summary.idle_percentage, 66.67);
    assert_eq!(summary.traffic.bytes_in, 1000.0);
    assert_eq!(summary.total_bytes, 1000.0);
    // 3 periods × 21600 s.
    assert_eq!(summary.bytes_per_second_avg, 0.02);

    // The flat sample table is exposed for detail reporting.
    assert_eq!(report.samples.len(), 5);
    assert_eq!(report.scope.account_id, "123456789012");
}

#[tokio::test]
async fn igw_with_no_data_at_all_is_inactive_and_fully_idle() {
    let source = FakeSource::default();

    let analyzer = Analyzer::new(source);
    let report = analyzer
        .analyze(scope(), &[igw("igw-1")], range_days(10))
        .await;

    let summary = &report.summaries[0];
    // Eight zero-filled metrics share one timestamp.
    assert_eq!(summary.total_periods, 1);
    assert_eq!(summary.idle_periods, 1);
    assert_eq!(summary.idle_percentage, 100.0);
    match summary.kind_totals {
        KindTotals::Igw { status, .. } => assert_eq!(status, GatewayStatus::Inactive),
        KindTotals::Nat { .. } => panic!("expected IGW totals"),
    }
}

#[tokio::test]
async fn one_failing_gateway_does_not_abort_the_others() {
    let mut source = FakeSource::default();
    source.insert("nat-ok", "BytesInFromSource", vec![point(0, 5.0)]);
    source.mark_failing("nat-bad", "BytesInFromDestination");

    let analyzer = Analyzer::new(source);
    let report = analyzer
        .analyze(
            scope(),
            &[nat("nat-bad"), nat("nat-ok")],
            range_days(10),
        )
        .await;

    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].gateway_id, "nat-ok");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].gateway_id, "nat-bad");
    assert!(report.failures[0].error.contains("BytesInFromDestination"));
}

#[tokio::test]
async fn report_rows_are_ordered_by_kind_then_id() {
    let mut source = FakeSource::default();
    for gateway in ["nat-b", "nat-a"] {
        source.insert(gateway, "BytesInFromSource", vec![point(0, 1.0)]);
    }

    let analyzer = Analyzer::with_options(
        source,
        AnalyzerOptions {
            concurrency: 8,
            ..AnalyzerOptions::default()
        },
    );
    let report = analyzer
        .analyze(
            scope(),
            &[igw("igw-z"), nat("nat-b"), nat("nat-a")],
            range_days(10),
        )
        .await;

    let ids: Vec<_> = report
        .summaries
        .iter()
        .map(|s| s.gateway_id.as_str())
        .collect();
    assert_eq!(ids, vec!["nat-a", "nat-b", "igw-z"]);
}
