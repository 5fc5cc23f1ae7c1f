//! Fixtures shared by the AC, noise and device tests.

use std::sync::Arc;

use spicier_core::NodeId;

use crate::derive::{InstanceDerived, SeriesNodes};
use crate::diagnostics::Diagnostics;
use crate::instance::InstanceParams;
use crate::model::{Bsim4Model, ModelTemp};
use crate::mosfet::Bsim4Nodes;
use crate::op::{ChargeDerivatives, Mode, NoiseInputs, OperatingPoint};

/// Number of distinct nodes in [`nodes`].
pub const SIZE: usize = 12;

pub fn model_with(configure: impl FnOnce(&mut Bsim4Model)) -> Arc<ModelTemp> {
    let mut m = Bsim4Model::nmos("nch");
    configure(&mut m);
    m.setup().unwrap();
    m.at_temperature(300.15).unwrap()
}

/// A 1u/100n device.
pub fn derive(mt: &Arc<ModelTemp>, configure: impl FnOnce(&mut InstanceParams)) -> InstanceDerived {
    let mut inst = InstanceParams::with_geometry(1e-6, 1e-7);
    configure(&mut inst);
    let mut diag = Diagnostics::new("M1");
    let inst = inst.resolve(&mt.params, &mut diag);
    let series = SeriesNodes::for_instance(&mt.params, &inst, &mut diag);
    InstanceDerived::new("M1", mt, &inst, series).unwrap()
}

/// Every internal node distinct from the external ones.
pub fn nodes() -> Bsim4Nodes {
    let n = NodeId::new;
    Bsim4Nodes {
        drain: n(1),
        gate: n(2),
        source: n(3),
        bulk: n(4),
        drain_prime: n(5),
        gate_prime: n(6),
        gate_mid: n(7),
        source_prime: n(8),
        bulk_prime: n(9),
        drain_body: n(10),
        source_body: n(11),
        charge: Some(n(12)),
    }
}

/// A saturated device around 0.2 mA.
pub fn operating_point(mode: Mode) -> OperatingPoint {
    OperatingPoint {
        mode,
        cd: 2e-4,
        gm: 2e-3,
        gds: 1e-4,
        gmbs: 3e-4,
        gbd: 1e-9,
        gbs: 2e-9,
        gbds: 1e-6,
        gbgs: 2e-6,
        gbbs: 3e-7,
        caps: ChargeDerivatives {
            cggb: 2.0e-15,
            cgdb: -0.5e-15,
            cgsb: -1.2e-15,
            cdgb: -0.8e-15,
            cddb: 0.6e-15,
            cdsb: -0.1e-15,
            cbgb: -0.3e-15,
            cbdb: -0.05e-15,
            cbsb: -0.2e-15,
            ..Default::default()
        },
        capbd: 1.0e-16,
        capbs: 1.5e-16,
        taunet: 1e-11,
        noise: NoiseInputs {
            vgsteff: 0.3,
            vdseff: 0.25,
            abulk: 1.1,
            ueff: 0.02,
            esat_l: 1.2,
            abov_vgst2_vtm: 1.5,
            idov_vds: 2e-4,
            coxeff: 0.012,
            qinv: -3e-15,
            noi_gd0: 2.5e-3,
            nstar: 1.2e15,
            grdsw: 0.0,
        },
        ..Default::default()
    }
}
