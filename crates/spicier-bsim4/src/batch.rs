//! Parallel instance derivation using rayon.
//!
//! Every instance of one model at one temperature shares the model's
//! [`ModelTemp`] and therefore its size cache. Instances are independent
//! otherwise, so a netlist with thousands of devices can be derived on all
//! cores. Identical geometries still build their size bundle once: the cache
//! keeps the first bundle inserted and hands it to every later caller.

use std::sync::Arc;

use rayon::prelude::*;

use crate::derive::{InstanceDerived, SeriesNodes};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::instance::InstanceParams;
use crate::model::ModelTemp;

/// Configuration for batch derivation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum instance count for parallel execution (below this, sequential is faster).
    pub min_parallel: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { min_parallel: 16 }
    }
}

impl BatchConfig {
    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_parallel = min;
        self
    }
}

/// Derive one named instance against `mt`.
///
/// Instance fallbacks are resolved against the model first; their warnings
/// are kept ahead of the derivation's own diagnostics.
pub fn derive_one(mt: &Arc<ModelTemp>, name: &str, params: &InstanceParams) -> Result<InstanceDerived> {
    let mut diagnostics = Diagnostics::new(name);
    let inst = params.resolve(&mt.params, &mut diagnostics);
    let series = SeriesNodes::for_instance(&mt.params, &inst, &mut diagnostics);
    let mut derived = InstanceDerived::new(name, mt, &inst, series)?;
    diagnostics.absorb(&derived.diagnostics);
    derived.diagnostics = diagnostics;
    Ok(derived)
}

/// Derive every `(name, params)` pair against the shared model state.
///
/// Results come back in input order. A failing instance does not stop the
/// others.
pub fn derive_all(
    mt: &Arc<ModelTemp>,
    instances: &[(String, InstanceParams)],
    config: &BatchConfig,
) -> Vec<Result<InstanceDerived>> {
    let parallel = instances.len() >= config.min_parallel && rayon::current_num_threads() > 1;
    log::debug!(
        "deriving {} instances of {} ({})",
        instances.len(),
        mt.name(),
        if parallel { "parallel" } else { "sequential" }
    );

    if parallel {
        instances
            .par_iter()
            .map(|(name, params)| derive_one(mt, name, params))
            .collect()
    } else {
        instances
            .iter()
            .map(|(name, params)| derive_one(mt, name, params))
            .collect()
    }
}
