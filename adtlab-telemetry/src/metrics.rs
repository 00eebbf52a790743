//! ## adtlab-telemetry::metrics
//! **Prometheus registry for simulator operations**
//!
//! Counts applied and rejected operations per structure and tracks the
//! current size of each structure.

use prometheus::{IntCounterVec, IntGaugeVec, Opts, Registry};

/// Outcome label values.
pub const APPLIED: &str = "applied";
pub const REJECTED: &str = "rejected";

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub operations: IntCounterVec,
    pub structure_size: IntGaugeVec,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();

        let operations = IntCounterVec::new(
            Opts::new("adtlab_operations_total", "Simulator operations by outcome"),
            &["structure", "op", "outcome"],
        )
        .expect("valid counter definition");

        let structure_size = IntGaugeVec::new(
            Opts::new("adtlab_structure_size", "Elements currently held per structure"),
            &["structure"],
        )
        .expect("valid gauge definition");

        registry
            .register(Box::new(operations.clone()))
            .expect("metric registered once");
        registry
            .register(Box::new(structure_size.clone()))
            .expect("metric registered once");

        Self {
            registry,
            operations,
            structure_size,
        }
    }

    pub fn record_operation(&self, structure: &str, op: &str, applied: bool) {
        let outcome = if applied { APPLIED } else { REJECTED };
        self.operations
            .with_label_values(&[structure, op, outcome])
            .inc();
    }

    pub fn set_size(&self, structure: &str, size: usize) {
        self.structure_size
            .with_label_values(&[structure])
            .set(size as i64);
    }

    pub fn operation_count(&self, structure: &str, op: &str, applied: bool) -> u64 {
        let outcome = if applied { APPLIED } else { REJECTED };
        self.operations
            .with_label_values(&[structure, op, outcome])
            .get()
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
