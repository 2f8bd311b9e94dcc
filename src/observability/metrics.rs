use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::{Arc, OnceLock};


// Declare the static OnceLock to hold the Metrics.
static METRICS_INSTANCE: OnceLock<Arc<Metrics>> = OnceLock::new();

/// Initializes on first use and returns the process-wide `Metrics`.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| {
        info!("Initializing Metrics ...");
        Metrics::new()
    })
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Router metrics
    pub view_renders: IntCounterVec,
    pub unknown_views: IntCounter,
    pub answer_checks: IntCounterVec,

    // Identity metrics
    pub federation_attempts: IntCounter,
    pub federation_failures: IntCounterVec,
    pub credential_refresh: IntCounterVec,
    pub credential_refresh_duration: Histogram,
    pub session_refresh: IntCounterVec,

    // Config/runtime
    pub config_parse_failures: IntCounter,
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("learnjs".into()), None).expect("valid registry prefix");

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Router
            view_renders: IntCounterVec::new(Opts::new("view_renders_total", "Views rendered into the container"), &["view"]).expect("metric"),
            unknown_views: IntCounter::new("unknown_view_total", "Fragments naming an unregistered view").expect("metric"),
            answer_checks: IntCounterVec::new(Opts::new("answer_checks_total", "Answers checked by problem and outcome"), &["problem", "outcome"]).expect("metric"),

            // Identity
            federation_attempts: IntCounter::new("federation_attempts_total", "Google sign-ins handed to the federator").expect("metric"),
            federation_failures: IntCounterVec::new(Opts::new("federation_failures_total", "Failed federations by reason"), &["reason"]).expect("metric"),
            credential_refresh: IntCounterVec::new(Opts::new("credential_refresh_total", "Cloud credentials refreshes by outcome"), &["outcome"]).expect("metric"),
            credential_refresh_duration: Histogram::with_opts(HistogramOpts::new("credential_refresh_duration_seconds", "Cloud credentials refresh duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).expect("metric"),
            session_refresh: IntCounterVec::new(Opts::new("session_refresh_total", "Silent re-authentications by outcome"), &["outcome"]).expect("metric"),

            // Config/runtime
            config_parse_failures: IntCounter::new("config_parse_failures_total", "Config files that failed to parse").expect("metric"),
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").expect("metric"),
            up: IntGauge::new("up", "1 if service is healthy").expect("metric"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.view_renders.clone()),
            Box::new(metrics.unknown_views.clone()),
            Box::new(metrics.answer_checks.clone()),
            Box::new(metrics.federation_attempts.clone()),
            Box::new(metrics.federation_failures.clone()),
            Box::new(metrics.credential_refresh.clone()),
            Box::new(metrics.credential_refresh_duration.clone()),
            Box::new(metrics.session_refresh.clone()),
            Box::new(metrics.config_parse_failures.clone()),
            Box::new(metrics.config_validation_errors.clone()),
            Box::new(metrics.up.clone()),
        ];
        for collector in collectors {
            reg.register(collector).expect("metric registered once");
        }

        metrics
    }
}
