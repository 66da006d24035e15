//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    HistogramVec, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Outbound calls
    pub external_calls: CounterVec,

    // Pipeline
    pub audits: CounterVec,
    pub stage_duration: HistogramVec,

    // Partial results
    pub skipped_items: CounterVec,

    // Outcomes
    pub verdicts: CounterVec,
    pub citation_reports: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let external_calls = register_counter_vec_with_registry!(
            Opts::new("auditor_external_calls_total", "Outbound calls by service and outcome"),
            &["service", "status"],
            registry
        )?;

        let audits = register_counter_vec_with_registry!(
            Opts::new("auditor_audits_total", "Pipeline runs by outcome"),
            &["status"],
            registry
        )?;

        let stage_duration = register_histogram_vec_with_registry!(
            "auditor_stage_duration_seconds",
            "Pipeline stage duration in seconds",
            &["stage"],
            registry
        )?;

        let skipped_items = register_counter_vec_with_registry!(
            Opts::new("auditor_skipped_items_total", "Loop items skipped after a failure"),
            &["loop"],
            registry
        )?;

        let verdicts = register_counter_vec_with_registry!(
            Opts::new("auditor_claim_verdicts_total", "Aggregated claim verdicts by label"),
            &["label"],
            registry
        )?;

        let citation_reports = register_counter_vec_with_registry!(
            Opts::new("auditor_citation_reports_total", "Citation reports by cleanliness"),
            &["status"],
            registry
        )?;

        Ok(Self {
            registry,
            external_calls,
            audits,
            stage_duration,
            skipped_items,
            verdicts,
            citation_reports,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record an outbound call
    pub fn record_external_call(&self, service: &str, success: bool) {
        let status = if success { "success" } else { "error" };
        self.external_calls.with_label_values(&[service, status]).inc();
    }

    /// Record a finished pipeline run
    pub fn record_audit(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.audits.with_label_values(&[status]).inc();
    }

    /// Record items skipped inside a loop
    pub fn record_skipped(&self, loop_name: &str, count: usize) {
        if count > 0 {
            self.skipped_items
                .with_label_values(&[loop_name])
                .inc_by(count as f64);
        }
    }

    /// Record an aggregated claim verdict
    pub fn record_verdict(&self, label: &str) {
        self.verdicts.with_label_values(&[label]).inc();
    }

    /// Record a citation report
    pub fn record_citation_report(&self, clean: bool) {
        let status = if clean { "clean" } else { "flagged" };
        self.citation_reports.with_label_values(&[status]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Helper macro to time operations
#[macro_export]
macro_rules! time_operation {
    ($histogram:expr, $label:expr, $operation:expr) => {{
        let timer = $histogram.with_label_values(&[$label]).start_timer();
        let result = $operation;
        timer.observe_duration();
        result
    }};
}
