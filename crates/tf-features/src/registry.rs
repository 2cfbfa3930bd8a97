//! `FeatureSet`: the ordered list of features a run extracts.

use std::sync::Arc;

use tf_core::{AgentId, ErrorPolicy, ExtractConfig, TimeWindow};
use tf_plan::{Plan, Population};
use tf_trace::TraceSet;

use crate::{
    AgentFailure, Feature, FeatureError, FeatureInput, FeatureResult, FeatureRow, FeatureTable,
    FeatureValue, FnFeature, TraceDistance, plan_features,
};

/// Named features evaluated per agent, in registration order.
///
/// # Example
///
/// ```rust,ignore
/// let features = FeatureSet::standard(&config)?
///     .with_trace_distances(Arc::new(traces), &[(7.0, 8.0)])?
///     .with_flag("parked_9_16", |i| plan_features::is_activity_ongoing_during(i.plan, 32_400.0, 57_600.0));
/// let table = features.extract(&population, ErrorPolicy::Isolate)?;
/// ```
#[derive(Default)]
pub struct FeatureSet {
    features:    Vec<Box<dyn Feature>>,
    num_threads: Option<usize>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five plan features of a standard run:
    ///
    /// | Name                         | Value                                   |
    /// |------------------------------|-----------------------------------------|
    /// | `longest_stop_s`             | longest stop between car trips          |
    /// | `longest_stop_<h0>_<h1>_s`   | same, clipped to `stop_range_hours`     |
    /// | `longest_trip_m`             | longest car leg                         |
    /// | `total_stop_s`               | sum of stop durations                   |
    /// | `total_trip_m`               | total car distance                      |
    pub fn standard(config: &ExtractConfig) -> FeatureResult<Self> {
        let range = config.stop_range()?;
        let (h0, h1) = config.stop_range_hours;
        Ok(Self::new()
            .with_number("longest_stop_s", |i| plan_features::longest_stop_duration(i.plan))
            .with_number(format!("longest_stop_{h0}_{h1}_s"), move |i| {
                plan_features::longest_stop_duration_in_window(i.plan, &range)
            })
            .with_number("longest_trip_m", |i| Ok(plan_features::longest_car_leg_distance(i.plan)))
            .with_number("total_stop_s", |i| plan_features::total_stop_duration(i.plan))
            .with_number("total_trip_m", |i| Ok(plan_features::total_car_leg_distance(i.plan)))
            .with_threads(config.num_threads))
    }

    /// Register a numeric feature.
    pub fn with_number<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&FeatureInput<'_>) -> FeatureResult<f64> + Send + Sync + 'static,
    {
        self.with_feature(FnFeature::new(name, move |i| {
            func(i).map(FeatureValue::Number)
        }))
    }

    /// Register a boolean feature.
    pub fn with_flag<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&FeatureInput<'_>) -> FeatureResult<bool> + Send + Sync + 'static,
    {
        self.with_feature(FnFeature::new(name, move |i| {
            func(i).map(FeatureValue::Flag)
        }))
    }

    pub fn with_feature(mut self, feature: impl Feature) -> Self {
        self.features.push(Box::new(feature));
        self
    }

    /// Register one `distance_<h0>_<h1>_m` feature per hour window, each
    /// answered from `traces`.
    pub fn with_trace_distances(
        mut self,
        traces:  Arc<TraceSet>,
        windows: &[(f64, f64)],
    ) -> FeatureResult<Self> {
        for &(h0, h1) in windows {
            let window = TimeWindow::from_hours(h0, h1)?;
            let feature = TraceDistance::new(format!("distance_{h0}_{h1}_m"), Arc::clone(&traces), window)?;
            self = self.with_feature(feature);
        }
        Ok(self)
    }

    /// Rayon worker count for [`extract`][Self::extract].  `None` uses the
    /// global pool.  Ignored without the `parallel` feature.
    pub fn with_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name().to_owned()).collect()
    }

    /// Evaluate every feature for one agent, stopping at its first failure.
    pub fn evaluate(&self, agent: AgentId, plan: &Plan) -> Result<FeatureRow, AgentFailure> {
        let input = FeatureInput { agent, plan };
        let mut values = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            match feature.compute(&input) {
                Ok(v) => values.push(v),
                Err(error) => {
                    return Err(AgentFailure { agent, feature: feature.name().to_owned(), error });
                }
            }
        }
        Ok(FeatureRow { agent, values })
    }

    /// Evaluate every feature for every agent of `population`.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::Isolate`] a failing agent is left out of the rows
    /// and listed in [`FeatureTable::failures`]; the call itself only fails
    /// if the thread pool cannot be built.  With [`ErrorPolicy::FailFast`]
    /// the failure of the first agent (in population order) is returned as
    /// [`FeatureError::Failed`].
    pub fn extract(&self, population: &Population, policy: ErrorPolicy) -> FeatureResult<FeatureTable> {
        let results = self.evaluate_all(population)?;

        let mut table = FeatureTable { names: self.names(), ..FeatureTable::default() };
        for result in results {
            match result {
                Ok(row) => table.rows.push(row),
                Err(failure) => match policy {
                    ErrorPolicy::FailFast => {
                        return Err(FeatureError::Failed {
                            agent:   failure.agent,
                            feature: failure.feature,
                            source:  Box::new(failure.error),
                        });
                    }
                    ErrorPolicy::Isolate => {
                        log::warn!("{}: feature {:?} failed: {}", failure.agent, failure.feature, failure.error);
                        table.failures.push(failure);
                    }
                },
            }
        }

        log::info!(
            "extracted {} features for {} agents ({} failed)",
            table.names.len(),
            table.rows.len(),
            table.failures.len(),
        );
        Ok(table)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(&self, population: &Population) -> FeatureResult<Vec<Result<FeatureRow, AgentFailure>>> {
        Ok(population.iter().map(|(agent, plan)| self.evaluate(agent, plan)).collect())
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(&self, population: &Population) -> FeatureResult<Vec<Result<FeatureRow, AgentFailure>>> {
        use rayon::prelude::*;

        let agents: Vec<(AgentId, &Plan)> = population.iter().collect();
        // Indexed collect keeps population order.
        let run = || -> Vec<Result<FeatureRow, AgentFailure>> {
            agents.par_iter().map(|&(agent, plan)| self.evaluate(agent, plan)).collect()
        };

        match self.num_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| tf_core::CoreError::Config(format!("cannot build thread pool: {e}")))?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }
}
