use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::error::{ControlsError, Result};
use crate::registry::Outcome;

#[derive(Debug, Clone, Default)]
pub struct ControlStats {
    pub invocations: u64,
    pub rejections: u64,
}

/// Prometheus counters for control invocations.
#[derive(Clone)]
pub struct ControlMetrics {
    registry: Arc<Registry>,
    invocations: IntCounterVec,
    rejections: IntCounter,
}

impl ControlMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let invocations = IntCounterVec::new(
            Opts::new("controls_invocations_total", "Total number of control invocations")
                .const_label("component", "controls"),
            &["control", "outcome"],
        )?;

        let rejections = IntCounter::with_opts(Opts::new(
            "controls_rejections_total",
            "Total number of validator verdicts that rejected input",
        ))?;

        registry.register(Box::new(invocations.clone()))?;
        registry.register(Box::new(rejections.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            invocations,
            rejections,
        })
    }

    pub fn record(&self, control: &str, outcome: &Outcome, input: Option<&str>) {
        self.invocations
            .with_label_values(&[control, outcome.label(input)])
            .inc();

        if outcome.is_rejection() {
            self.rejections.inc();
        }
    }

    /// Invocations of one control across all outcome labels.
    pub fn invocations(&self, control: &str) -> u64 {
        self.invocation_samples()
            .into_iter()
            .filter(|(name, _)| name == control)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn stats(&self) -> ControlStats {
        ControlStats {
            invocations: self.invocation_samples().iter().map(|(_, count)| count).sum(),
            rejections: self.rejections.get(),
        }
    }

    /// (control label, count) for every recorded series.
    fn invocation_samples(&self) -> Vec<(String, u64)> {
        self.registry
            .gather()
            .iter()
            .filter(|family| family.get_name() == "controls_invocations_total")
            .flat_map(|family| family.get_metric().iter())
            .map(|metric| {
                let control = metric
                    .get_label()
                    .iter()
                    .find(|pair| pair.get_name() == "control")
                    .map(|pair| pair.get_value().to_string())
                    .unwrap_or_default();
                (control, metric.get_counter().get_value() as u64)
            })
            .collect()
    }

    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ControlsError::Unknown(e.to_string()))
    }
}
