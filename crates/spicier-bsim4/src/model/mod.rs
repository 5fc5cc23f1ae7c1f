//! BSIM4 model cards.
//!
//! A [`Bsim4Model`] holds the parameters exactly as the user gave them.
//! [`Bsim4Model::setup`] resolves defaults once, and
//! [`Bsim4Model::at_temperature`] hands out the shared per-temperature
//! state (with its size cache) that every instance of the model uses.

mod setup;
mod table;
mod temperature;

pub use table::{BinnedValues, ModelParams};
pub use temperature::{JunctionSide, ModelTemp};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::consts::{CELSIUS_TO_KELVIN, REFTEMP};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::param::{MosfetType, Param};

impl ModelParams {
    /// Default parameters for the given channel type.
    pub fn with_type(mos_type: MosfetType) -> Self {
        Self {
            mos_type,
            ..Self::default()
        }
    }

    /// Look up any parameter (scalar, binned base, or `l`/`w`/`p` term).
    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        if Self::SCALAR_NAMES.contains(&name) {
            self.scalar_mut(name)
        } else {
            self.binned_mut(name)
        }
    }

    /// `type` in the BSIM4 equations: +1 for NMOS, -1 for PMOS.
    pub fn type_sign(&self) -> f64 {
        self.mos_type.sign()
    }
}

/// Setter-side unit normalisation.
///
/// Doping concentrations given in m⁻³ are converted to cm⁻³ and `tnom` is
/// read in degrees Celsius.
fn normalise(key: &str, value: f64) -> f64 {
    match key {
        "ndep" | "lndep" | "wndep" | "pndep" if value > 1.0e20 => value * 1.0e-6,
        "nsd" | "lnsd" | "wnsd" | "pnsd" | "ngate" | "lngate" | "wngate" | "pngate"
            if value > 1.0e23 =>
        {
            value * 1.0e-6
        }
        "tnom" => value + CELSIUS_TO_KELVIN,
        _ => value,
    }
}

/// A BSIM4 model card.
#[derive(Debug)]
pub struct Bsim4Model {
    name: String,
    /// Parameters as given.
    params: ModelParams,
    /// Parameters with defaults resolved, present once set up.
    resolved: Option<Arc<ModelParams>>,
    diagnostics: Diagnostics,
    /// Per-temperature state, keyed by the bit pattern of the temperature.
    temps: Mutex<HashMap<u64, Arc<ModelTemp>>>,
}

impl Bsim4Model {
    /// Create an NMOS model with default parameters.
    pub fn nmos(name: impl Into<String>) -> Self {
        Self::with_params(name, ModelParams::with_type(MosfetType::Nmos))
    }

    /// Create a PMOS model with default parameters.
    pub fn pmos(name: impl Into<String>) -> Self {
        Self::with_params(name, ModelParams::with_type(MosfetType::Pmos))
    }

    /// Create a model from an existing parameter set.
    pub fn with_params(name: impl Into<String>, params: ModelParams) -> Self {
        let name = name.into();
        Self {
            diagnostics: Diagnostics::new(name.clone()),
            name,
            params,
            resolved: None,
            temps: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters as given by the user.
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Parameters after default resolution.
    pub fn resolved(&self) -> Result<&ModelParams> {
        self.resolved
            .as_deref()
            .ok_or_else(|| Error::NotSetUp(self.name.clone()))
    }

    /// Warnings raised by the last [`setup`](Self::setup).
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_set_up(&self) -> bool {
        self.resolved.is_some()
    }

    /// Set a parameter by SPICE name.
    ///
    /// Besides the table names this accepts the `nmos`/`pmos` flags and
    /// `vtho` as an alias of `vth0`. Any change discards the resolved
    /// parameters; call [`setup`](Self::setup) again before use.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let key = name.to_ascii_lowercase();
        match key.as_str() {
            "nmos" => {
                if value != 0.0 {
                    self.params.mos_type = MosfetType::Nmos;
                }
            }
            "pmos" => {
                if value != 0.0 {
                    self.params.mos_type = MosfetType::Pmos;
                }
            }
            _ => {
                let key = if key == "vtho" { "vth0" } else { key.as_str() };
                let value = normalise(key, value);
                self.params
                    .param_mut(key)
                    .ok_or_else(|| Error::UnknownParameter(name.to_string()))?
                    .set(value);
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Set a parameter from SPICE text such as `1.8n` or `10meg`.
    pub fn set_str(&mut self, name: &str, text: &str) -> Result<()> {
        let value = spicier_core::units::parse_value_strict(text)?;
        self.set(name, value)
    }

    fn invalidate(&mut self) {
        self.resolved = None;
        self.temps
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Resolve defaults and validate the model selectors.
    ///
    /// Idempotent: defaults only ever fill parameters that were not given.
    pub fn setup(&mut self) -> Result<()> {
        let mut diagnostics = Diagnostics::new(self.name.clone());
        let mut params = self.params.clone();
        setup::apply_defaults(&mut params, REFTEMP, &mut diagnostics);
        self.diagnostics = diagnostics;
        self.resolved = Some(Arc::new(params));
        self.temps
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    /// Shared model state at circuit temperature `temp` (kelvin).
    ///
    /// Built on first request and reused afterwards, so every instance of
    /// the model at one temperature shares one size cache.
    pub fn at_temperature(&self, temp: f64) -> Result<Arc<ModelTemp>> {
        let resolved = self
            .resolved
            .as_ref()
            .ok_or_else(|| Error::NotSetUp(self.name.clone()))?;
        let mut temps = self.temps.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = temps.get(&temp.to_bits()) {
            return Ok(Arc::clone(existing));
        }
        let state = Arc::new(ModelTemp::new(&self.name, resolved, temp));
        temps.insert(temp.to_bits(), Arc::clone(&state));
        Ok(state)
    }
}
