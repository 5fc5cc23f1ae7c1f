//! The BSIM4 device driven through the host lifecycle.
//!
//! [`Bsim4Mosfet`] ties the stages together behind
//! [`spicier_core::Element`]: `setup` wires the internal nodes and reserves
//! the state block, `temperature` derives the instance parameters, `load`
//! accepts the operating point of the large-signal solve, and `ac_load`,
//! `noise` and `truncate` consume the two.

use std::sync::Arc;

use spicier_core::{AcMatrix, Element, NodeAllocator, NodeId, StateAllocator, StateHistory, Truncator};

use crate::ac;
use crate::derive::{InstanceDerived, SeriesNodes};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::instance::InstanceParams;
use crate::model::Bsim4Model;
use crate::noise::Bsim4Noise;
use crate::op::OperatingPoint;
use crate::states;
use crate::truncate;

/// Node handles of one device.
///
/// Internal nodes that the instance does not need are aliases of the
/// external pin they would sit behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bsim4Nodes {
    pub drain: NodeId,
    /// External gate
    pub gate: NodeId,
    pub source: NodeId,
    pub bulk: NodeId,
    pub drain_prime: NodeId,
    /// Intrinsic gate (rgateMod > 0)
    pub gate_prime: NodeId,
    /// Mid gate (rgateMod 3)
    pub gate_mid: NodeId,
    pub source_prime: NodeId,
    /// Intrinsic body (rbodyMod 1, 2)
    pub bulk_prime: NodeId,
    /// Drain-side body node (rbodyMod 1, 2)
    pub drain_body: NodeId,
    /// Source-side body node (rbodyMod 1, 2)
    pub source_body: NodeId,
    /// Transient NQS charge node (trnqsMod 1)
    pub charge: Option<NodeId>,
}

impl Bsim4Nodes {
    /// Every internal node collapsed onto its external pin.
    pub fn collapsed(drain: NodeId, gate: NodeId, source: NodeId, bulk: NodeId) -> Self {
        Self {
            drain,
            gate,
            source,
            bulk,
            drain_prime: drain,
            gate_prime: gate,
            gate_mid: gate,
            source_prime: source,
            bulk_prime: bulk,
            drain_body: bulk,
            source_body: bulk,
            charge: None,
        }
    }

    fn allocate(
        owner: &str,
        pins: [NodeId; 4],
        inst: &InstanceParams,
        series: SeriesNodes,
        nodes: &mut dyn NodeAllocator,
    ) -> Self {
        let [drain, gate, source, bulk] = pins;
        let mut n = Self::collapsed(drain, gate, source, bulk);
        if series.drain {
            n.drain_prime = nodes.create_internal(owner, "drain");
        }
        if series.source {
            n.source_prime = nodes.create_internal(owner, "source");
        }

        let rgatemod = inst.rgatemod.as_i32();
        if rgatemod > 0 {
            n.gate_prime = nodes.create_internal(owner, "gate");
        }
        if rgatemod == 3 {
            n.gate_mid = nodes.create_internal(owner, "midgate");
        }

        if inst.rbodymod.as_i32() != 0 {
            n.drain_body = nodes.create_internal(owner, "dbody");
            n.bulk_prime = nodes.create_internal(owner, "body");
            n.source_body = nodes.create_internal(owner, "sbody");
        }

        if inst.trnqsmod.as_i32() != 0 {
            n.charge = Some(nodes.create_internal(owner, "charge"));
        }
        n
    }
}

/// Whether two resolved parameter sets allocate the same internal nodes.
fn same_node_selectors(a: &InstanceParams, b: &InstanceParams) -> bool {
    a.rgatemod.as_i32() == b.rgatemod.as_i32()
        && a.rbodymod.as_i32() == b.rbodymod.as_i32()
        && a.trnqsmod.as_i32() == b.trnqsmod.as_i32()
}

/// Wiring fixed at setup.
#[derive(Debug, Clone)]
struct Wiring {
    inst: InstanceParams,
    series: SeriesNodes,
    nodes: Bsim4Nodes,
    state_base: usize,
    diagnostics: Diagnostics,
}

/// A BSIM4 MOSFET instance.
#[derive(Debug)]
pub struct Bsim4Mosfet {
    name: String,
    /// Drain, gate, source and bulk pin names.
    pins: [String; 4],
    model: Arc<Bsim4Model>,
    /// Instance parameters as given.
    pub params: InstanceParams,
    wiring: Option<Wiring>,
    derived: Option<InstanceDerived>,
    op: Option<OperatingPoint>,
}

impl Bsim4Mosfet {
    /// Create an instance of `model` wired to the named pins.
    ///
    /// The model must be set up before the instance is.
    pub fn new(
        name: impl Into<String>,
        pins: [&str; 4],
        model: Arc<Bsim4Model>,
        params: InstanceParams,
    ) -> Self {
        Self {
            name: name.into(),
            pins: pins.map(str::to_string),
            model,
            params,
            wiring: None,
            derived: None,
            op: None,
        }
    }

    pub fn model(&self) -> &Bsim4Model {
        &self.model
    }

    /// Node handles, present after setup.
    pub fn nodes(&self) -> Option<&Bsim4Nodes> {
        self.wiring.as_ref().map(|w| &w.nodes)
    }

    /// First slot of the device's state block, present after setup.
    pub fn state_base(&self) -> Option<usize> {
        self.wiring.as_ref().map(|w| w.state_base)
    }

    /// Derived parameters of the last temperature stage.
    pub fn derived(&self) -> Option<&InstanceDerived> {
        self.derived.as_ref()
    }

    pub fn operating_point(&self) -> Option<&OperatingPoint> {
        self.op.as_ref()
    }

    /// Warnings of the setup and temperature stages.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match (&self.derived, &self.wiring) {
            (Some(d), _) => Some(&d.diagnostics),
            (None, Some(w)) => Some(&w.diagnostics),
            (None, None) => None,
        }
    }

    /// Change an instance parameter. Derived parameters are discarded and
    /// must be rebuilt by the temperature stage.
    ///
    /// A change that adds or removes internal nodes also discards the
    /// wiring, so the device has to be set up again.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        self.params.set(name, value)?;
        self.derived = None;
        let Some(w) = &mut self.wiring else {
            return Ok(());
        };
        let m = self.model.resolved()?;
        let mut diag = Diagnostics::new(self.name.as_str());
        let inst = self.params.resolve(m, &mut diag);
        let series = SeriesNodes::for_instance(m, &inst, &mut diag);
        if series != w.series || !same_node_selectors(&inst, &w.inst) {
            log::debug!("{}: {name} changes the internal nodes; setup required", self.name);
            self.wiring = None;
            self.op = None;
            return Ok(());
        }
        w.inst = inst;
        w.diagnostics = diag;
        Ok(())
    }

    /// Query a named quantity: terminal voltages and the NQS charge from
    /// the state history, everything else from the operating point.
    pub fn ask(&self, name: &str, history: &dyn StateHistory) -> Result<Option<f64>> {
        let base = self.wired()?.state_base;
        let slot = match name.to_ascii_lowercase().as_str() {
            "vbs" => Some(states::VBS),
            "vgs" => Some(states::VGS),
            "vds" => Some(states::VDS),
            "qdef" => Some(states::QDEF),
            _ => None,
        };
        if let Some(slot) = slot {
            return Ok(Some(history.current(base + slot)));
        }
        Ok(self.loaded()?.query(name))
    }

    fn wired(&self) -> Result<&Wiring> {
        self.wiring
            .as_ref()
            .ok_or_else(|| Error::DeviceNotSetUp(self.name.clone()))
    }

    fn ready(&self) -> Result<&InstanceDerived> {
        self.derived
            .as_ref()
            .ok_or_else(|| Error::NotDerived(self.name.clone()))
    }

    fn loaded(&self) -> Result<&OperatingPoint> {
        self.op
            .as_ref()
            .ok_or_else(|| Error::NoOperatingPoint(self.name.clone()))
    }
}

impl Element for Bsim4Mosfet {
    type Error = Error;
    type OperatingPoint = OperatingPoint;
    type Noise = Bsim4Noise;

    fn name(&self) -> &str {
        &self.name
    }

    fn setup(
        &mut self,
        nodes: &mut dyn NodeAllocator,
        slots: &mut dyn StateAllocator,
    ) -> Result<()> {
        let m = self.model.resolved()?;
        let mut diagnostics = Diagnostics::new(self.name.as_str());
        let inst = self.params.resolve(m, &mut diagnostics);
        let series = SeriesNodes::for_instance(m, &inst, &mut diagnostics);

        let pins = self.pins.each_ref().map(|pin| nodes.bind(pin));
        let wired = Bsim4Nodes::allocate(&self.name, pins, &inst, series, nodes);
        let state_base = slots.reserve(states::COUNT);
        log::debug!(
            "{}: set up with state base {state_base}, series nodes {series:?}",
            self.name
        );

        self.wiring = Some(Wiring {
            inst,
            series,
            nodes: wired,
            state_base,
            diagnostics,
        });
        self.derived = None;
        self.op = None;
        Ok(())
    }

    fn temperature(&mut self, temp: f64) -> Result<()> {
        let w = self.wired()?;
        let mt = self.model.at_temperature(temp)?;
        let mut derived = InstanceDerived::new(&self.name, &mt, &w.inst, w.series)?;
        let mut diagnostics = w.diagnostics.clone();
        diagnostics.absorb(&derived.diagnostics);
        derived.diagnostics = diagnostics;
        self.derived = Some(derived);
        Ok(())
    }

    fn load(&mut self, op: OperatingPoint) -> Result<()> {
        self.op = Some(op);
        Ok(())
    }

    fn ac_load(
        &self,
        omega: f64,
        history: &dyn StateHistory,
        matrix: &mut dyn AcMatrix,
    ) -> Result<()> {
        let w = self.wired()?;
        let d = self.ready()?;
        let op = self.loaded()?;

        let base = w.state_base;
        let vgs = history.current(base + states::VGS);
        let gate_drop = match d.inst.rgatemod.as_i32() {
            2 => history.current(base + states::VGES) - vgs,
            3 => history.current(base + states::VGMS) - vgs,
            _ => 0.0,
        };
        ac::load(d, op, &w.nodes, omega, gate_drop, matrix);
        Ok(())
    }

    fn noise(&self, freq: f64, history: &dyn StateHistory) -> Result<Bsim4Noise> {
        let w = self.wired()?;
        let d = self.ready()?;
        let op = self.loaded()?;
        let vds = history.current(w.state_base + states::VDS);
        Ok(Bsim4Noise::evaluate(d, op, &w.nodes, vds, freq))
    }

    fn truncate(&self, truncator: &dyn Truncator, timestep: &mut f64) -> Result<()> {
        let w = self.wired()?;
        truncate::truncate(&w.inst, w.state_base, truncator, timestep);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Mode;
    use crate::testing::operating_point;
    use spicier_core::{Circuit, DenseAcMatrix, StateVector};

    fn model(configure: impl FnOnce(&mut Bsim4Model)) -> Arc<Bsim4Model> {
        let mut m = Bsim4Model::nmos("nch");
        configure(&mut m);
        m.setup().unwrap();
        Arc::new(m)
    }

    fn device(model: Arc<Bsim4Model>, configure: impl FnOnce(&mut InstanceParams)) -> Bsim4Mosfet {
        let mut params = InstanceParams::with_geometry(1e-6, 1e-7);
        configure(&mut params);
        Bsim4Mosfet::new("M1", ["d", "g", "s", "b"], model, params)
    }

    #[test]
    fn test_plain_device_needs_no_internal_nodes() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        m.setup(&mut circuit, &mut history).unwrap();

        assert_eq!(circuit.node_count(), 4);
        assert_eq!(history.len(), states::COUNT);
        let n = m.nodes().unwrap();
        assert_eq!(n.drain_prime, n.drain);
        assert_eq!(n.gate_prime, n.gate);
        assert_eq!(n.bulk_prime, n.bulk);
        assert_eq!(n.charge, None);
        assert_eq!(Some(n.drain), circuit.find("d"));
    }

    #[test]
    fn test_full_network_allocates_every_node() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|m| m.set("rdsmod", 1.0).unwrap()), |i| {
            i.set("rgatemod", 3.0).unwrap();
            i.set("rbodymod", 1.0).unwrap();
            i.set("trnqsmod", 1.0).unwrap();
        });
        m.setup(&mut circuit, &mut history).unwrap();

        assert_eq!(circuit.node_count(), 12);
        let internal: Vec<_> = circuit.internal_nodes().map(|n| n.name()).collect();
        assert_eq!(
            internal,
            [
                "M1#drain", "M1#source", "M1#gate", "M1#midgate", "M1#dbody", "M1#body",
                "M1#sbody", "M1#charge"
            ]
        );
        let n = m.nodes().unwrap();
        assert_ne!(n.gate_mid, n.gate_prime);
        assert!(n.charge.is_some());
    }

    #[test]
    fn test_second_device_gets_next_state_block() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let shared = model(|_| {});
        let mut a = device(Arc::clone(&shared), |_| {});
        let mut b = Bsim4Mosfet::new("M2", ["d", "g2", "s", "b"], shared, InstanceParams::default());
        a.setup(&mut circuit, &mut history).unwrap();
        b.setup(&mut circuit, &mut history).unwrap();
        assert_eq!(a.state_base(), Some(0));
        assert_eq!(b.state_base(), Some(states::COUNT));
        // shared pins resolve to the same node
        assert_eq!(a.nodes().unwrap().drain, b.nodes().unwrap().drain);
    }

    #[test]
    fn test_lifecycle_order_is_enforced() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        let mut matrix = DenseAcMatrix::new(4);

        assert!(matches!(m.temperature(300.15), Err(Error::DeviceNotSetUp(_))));
        m.setup(&mut circuit, &mut history).unwrap();
        assert!(matches!(
            m.ac_load(1e9, &history, &mut matrix),
            Err(Error::NotDerived(_))
        ));
        m.temperature(300.15).unwrap();
        assert!(matches!(m.noise(1e3, &history), Err(Error::NoOperatingPoint(_))));
        m.load(operating_point(Mode::Forward)).unwrap();
        m.ac_load(1e9, &history, &mut matrix).unwrap();
        assert_eq!(m.noise(1e3, &history).unwrap().sources().len(), 14);
    }

    #[test]
    fn test_model_must_be_set_up() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let raw = Arc::new(Bsim4Model::nmos("raw"));
        let mut m = Bsim4Mosfet::new("M1", ["d", "g", "s", "b"], raw, InstanceParams::default());
        assert!(matches!(
            m.setup(&mut circuit, &mut history),
            Err(Error::NotSetUp(name)) if name == "raw"
        ));
    }

    #[test]
    fn test_ac_load_stamps_transconductance() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        m.setup(&mut circuit, &mut history).unwrap();
        m.temperature(300.15).unwrap();
        let op = operating_point(Mode::Forward);
        m.load(op.clone()).unwrap();

        let mut matrix = DenseAcMatrix::new(circuit.node_count());
        m.ac_load(0.0, &history, &mut matrix).unwrap();
        let n = m.nodes().unwrap();
        // collapsed nodes: the intrinsic drain row holds gm plus the
        // substrate current's gate derivative
        let expected = op.gm + op.gbgs + op.gidl.ggidlg;
        assert!((matrix.get(n.drain, n.gate).re - expected).abs() < 1e-15);
    }

    #[test]
    fn test_ask_reads_history_and_operating_point() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        m.setup(&mut circuit, &mut history).unwrap();
        let base = m.state_base().unwrap();
        history.set(0, base + states::VDS, 0.8);
        history.set(0, base + states::VGS, 0.6);

        assert_eq!(m.ask("vds", &history).unwrap(), Some(0.8));
        assert_eq!(m.ask("VGS", &history).unwrap(), Some(0.6));
        assert!(matches!(m.ask("gm", &history), Err(Error::NoOperatingPoint(_))));

        m.load(operating_point(Mode::Forward)).unwrap();
        assert_eq!(m.ask("gm", &history).unwrap(), Some(2e-3));
        assert_eq!(m.ask("bogus", &history).unwrap(), None);
    }

    #[test]
    fn test_set_discards_derived_parameters() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        m.setup(&mut circuit, &mut history).unwrap();
        m.temperature(300.15).unwrap();
        let before = m.derived().unwrap().size.leff;

        m.set("l", 2e-7).unwrap();
        assert!(m.derived().is_none());
        m.temperature(300.15).unwrap();
        assert!(m.derived().unwrap().size.leff > before);
    }

    #[test]
    fn test_topology_change_requires_new_setup() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        m.setup(&mut circuit, &mut history).unwrap();
        m.temperature(300.15).unwrap();
        let nodes = *m.nodes().unwrap();
        assert_eq!(nodes.gate_prime, nodes.gate);

        m.set("rgatemod", 1.0).unwrap();
        assert!(m.nodes().is_none());
        assert!(matches!(m.temperature(300.15), Err(Error::DeviceNotSetUp(_))));

        m.setup(&mut circuit, &mut history).unwrap();
        m.temperature(300.15).unwrap();
        let nodes = *m.nodes().unwrap();
        assert_ne!(nodes.gate_prime, nodes.gate);
        assert!(m.derived().unwrap().grgeltd > 0.0);

        // the electrode conductance now lands between the gate pins
        m.load(operating_point(Mode::Forward)).unwrap();
        let mut y = DenseAcMatrix::new(circuit.node_count());
        m.ac_load(1e6, &history, &mut y).unwrap();
        let g = m.derived().unwrap().grgeltd;
        assert!((y.get(nodes.gate, nodes.gate_prime).re + g).abs() < 1e-12);
    }

    #[test]
    fn test_same_topology_keeps_wiring() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |i| i.set("rgatemod", 1.0).unwrap());
        m.setup(&mut circuit, &mut history).unwrap();
        let nodes = *m.nodes().unwrap();

        m.set("w", 2e-6).unwrap();
        assert_eq!(m.nodes(), Some(&nodes));
        m.temperature(300.15).unwrap();
        assert_eq!(m.derived().unwrap().inst.w.value, 2e-6);
    }

    #[test]
    fn test_setup_warnings_survive_temperature_stage() {
        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |i| i.set("rgatemod", 7.0).unwrap());
        m.setup(&mut circuit, &mut history).unwrap();
        m.temperature(300.15).unwrap();
        assert!(
            m.diagnostics()
                .unwrap()
                .contains("rgateMod has been set to its global value")
        );
    }

    #[test]
    fn test_truncate_uses_state_block() {
        struct Cap(f64);
        impl Truncator for Cap {
            fn truncate(&self, _slot: usize, timestep: &mut f64) {
                *timestep = timestep.min(self.0);
            }
        }

        let mut circuit = Circuit::new();
        let mut history = StateVector::new(3);
        let mut m = device(model(|_| {}), |_| {});
        let mut step = 1e-6;
        assert!(m.truncate(&Cap(1e-9), &mut step).is_err());
        m.setup(&mut circuit, &mut history).unwrap();
        m.truncate(&Cap(1e-9), &mut step).unwrap();
        assert_eq!(step, 1e-9);
    }
}
