//! AC small-signal assembly.
//!
//! Turns the operating point into a complex admittance network between the
//! device nodes. The intrinsic transistor is stamped between the prime
//! nodes; the gate resistance (rgateMod 1-3), body resistance network
//! (rbodyMod 1-2) and bias-dependent series resistance (rdsMod 1) add their
//! own branches on top. With AC NQS every intrinsic quantity is delayed by
//! the first-order lag `1/(1 + jωτ)`.

use num_complex::Complex;
use spicier_core::{AcMatrix, NodeId};

use crate::derive::InstanceDerived;
use crate::mosfet::Bsim4Nodes;
use crate::op::{Mode, OperatingPoint};

/// Intrinsic conductances and charge derivatives after the NQS lag.
///
/// The `*r` members are the in-phase parts. The `*i` members of the
/// charge terms are already multiplied by ω and act as conductances; the
/// `*i` members of the transconductances are the quadrature parts.
#[derive(Debug, Clone, Copy, Default)]
struct Intrinsic {
    gmr: f64,
    gmbsr: f64,
    gdsr: f64,
    gmi: f64,
    gmbsi: f64,
    gdsi: f64,

    cddr: f64,
    cdgr: f64,
    cdsr: f64,
    cdbr: f64,
    cddi: f64,
    cdgi: f64,
    cdsi: f64,
    cdbi: f64,

    csdr: f64,
    csgr: f64,
    cssr: f64,
    csdi: f64,
    csgi: f64,
    cssi: f64,
    csbi: f64,

    cgdr: f64,
    cggr: f64,
    cgsr: f64,
    cgdi: f64,
    cggi: f64,
    cgsi: f64,
    cgbi: f64,
}

impl Intrinsic {
    fn new(op: &OperatingPoint, nqs: bool, omega: f64) -> Self {
        let c = &op.caps;
        let csd = -(c.cddb + c.cgdb + c.cbdb);
        let csg = -(c.cdgb + c.cggb + c.cbgb);
        let css = -(c.cdsb + c.cgsb + c.cbsb);

        if !nqs {
            let mut q = Intrinsic {
                gmr: op.gm,
                gmbsr: op.gmbs,
                gdsr: op.gds,
                cddr: c.cddb,
                cdgr: c.cdgb,
                cdsr: c.cdsb,
                csdr: csd,
                csgr: csg,
                cssr: css,
                cgdr: c.cgdb,
                cggr: c.cggb,
                cgsr: c.cgsb,
                ..Default::default()
            };
            q.cdbr = -(q.cddr + q.cdgr + q.cdsr);
            return q;
        }

        let t0 = omega * op.taunet;
        let t2 = 1.0 / (1.0 + t0 * t0);
        let t3 = t0 * t2;
        let mut q = Intrinsic {
            gmr: op.gm * t2,
            gmbsr: op.gmbs * t2,
            gdsr: op.gds * t2,
            gmi: -op.gm * t3,
            gmbsi: -op.gmbs * t3,
            gdsi: -op.gds * t3,

            cddr: c.cddb * t2,
            cdgr: c.cdgb * t2,
            cdsr: c.cdsb * t2,
            cddi: c.cddb * t3 * omega,
            cdgi: c.cdgb * t3 * omega,
            cdsi: c.cdsb * t3 * omega,

            csdr: csd * t2,
            csgr: csg * t2,
            cssr: css * t2,
            csdi: csd * t3 * omega,
            csgi: csg * t3 * omega,
            cssi: css * t3 * omega,
            ..Default::default()
        };
        q.cdbr = -(q.cddr + q.cdgr + q.cdsr);
        q.cdbi = -(q.cddi + q.cdgi + q.cdsi);
        q.csbi = -(q.csdi + q.csgi + q.cssi);

        q.cgdr = -(q.cddr + q.csdr + c.cbdb);
        q.cggr = -(q.cdgr + q.csgr + c.cbgb);
        q.cgsr = -(q.cdsr + q.cssr + c.cbsb);
        q.cgdi = -(q.cddi + q.csdi);
        q.cggi = -(q.cdgi + q.csgi);
        q.cgsi = -(q.cdsi + q.cssi);
        q.cgbi = -(q.cgdi + q.cggi + q.cgsi);
        q
    }
}

/// Total gate tunnelling derivatives seen at one terminal, per controlling
/// voltage (gate, drain, source, body).
#[derive(Debug, Clone, Copy, Default)]
struct TerminalTotals {
    g: f64,
    d: f64,
    s: f64,
    b: f64,
}

impl TerminalTotals {
    fn sum(a: Self, b: Self, c: Self) -> Self {
        Self {
            g: a.g + b.g + c.g,
            d: a.d + b.d + c.d,
            s: a.s + b.s + c.s,
            b: a.b + b.b + c.b,
        }
    }
}

/// Stamp the small-signal admittance of one device at angular frequency
/// `omega`.
///
/// `gate_drop` is the voltage across the gate electrode (external or mid
/// gate minus intrinsic gate) from the state history; it scales the
/// bias-dependent gate resistance terms of rgateMod 2 and 3.
pub fn load(
    d: &InstanceDerived,
    op: &OperatingPoint,
    nodes: &Bsim4Nodes,
    omega: f64,
    gate_drop: f64,
    matrix: &mut dyn AcMatrix,
) {
    let m = &d.model.params;
    let rgatemod = d.inst.rgatemod.as_i32();
    let rbodymod = d.inst.rbodymod.as_i32();
    let q = Intrinsic::new(op, d.inst.acnqsmod.as_i32() != 0, omega);

    let capbd = op.capbd;
    let capbs = op.capbs;
    let cgso = d.cgso;
    let cgdo = d.cgdo;
    let cgbo = d.size.cgbo;
    let cbgb = op.caps.cbgb;
    let cbdb = op.caps.cbdb;
    let cbsb = op.caps.cbsb;

    let forward = op.mode.is_forward();
    let (gmr, gmbsr, fwd_sumr, rev_sumr, gmi, gmbsi, fwd_sumi, rev_sumi) = if forward {
        (
            q.gmr,
            q.gmbsr,
            q.gmr + q.gmbsr,
            0.0,
            q.gmi,
            q.gmbsi,
            q.gmi + q.gmbsi,
            0.0,
        )
    } else {
        (
            -q.gmr,
            -q.gmbsr,
            0.0,
            q.gmr + q.gmbsr,
            -q.gmi,
            -q.gmbsi,
            0.0,
            q.gmi + q.gmbsi,
        )
    };

    // substrate current derivatives, attached to whichever diffusion drains
    let gbd_side = TerminalTotals {
        g: op.gbgs,
        d: op.gbds,
        b: op.gbbs,
        s: -(op.gbgs + op.gbds + op.gbbs),
    };
    let (gbdp, gbsp) = match op.mode {
        Mode::Forward => (gbd_side, TerminalTotals::default()),
        Mode::Reverse => (
            TerminalTotals::default(),
            TerminalTotals {
                g: op.gbgs,
                s: op.gbds,
                b: op.gbbs,
                d: -(op.gbgs + op.gbds + op.gbbs),
            },
        ),
    };
    let (gbbdp, gbbsp) = match op.mode {
        Mode::Forward => (-op.gbds, op.gbds + op.gbgs + op.gbbs),
        Mode::Reverse => (op.gbds + op.gbgs + op.gbbs, -op.gbds),
    };

    let gt = &op.gate_tunneling;
    let (gis, gid) = if m.igcmod.as_i32() != 0 {
        match op.mode {
            Mode::Forward => (
                TerminalTotals {
                    g: gt.igsg + gt.igcsg,
                    d: gt.igcsd,
                    s: gt.igss + gt.igcss,
                    b: gt.igcsb,
                },
                TerminalTotals {
                    g: gt.igdg + gt.igcdg,
                    d: gt.igdd + gt.igcdd,
                    s: gt.igcds,
                    b: gt.igcdb,
                },
            ),
            Mode::Reverse => (
                TerminalTotals {
                    g: gt.igsg + gt.igcdg,
                    d: gt.igcds,
                    s: gt.igss + gt.igcdd,
                    b: gt.igcdb,
                },
                TerminalTotals {
                    g: gt.igdg + gt.igcsg,
                    d: gt.igdd + gt.igcss,
                    s: gt.igcsd,
                    b: gt.igcsb,
                },
            ),
        }
    } else {
        (TerminalTotals::default(), TerminalTotals::default())
    };
    let gib = if m.igbmod.as_i32() != 0 {
        TerminalTotals {
            g: gt.igbg,
            d: op.mode.select(gt.igbd, gt.igbs),
            s: op.mode.select(gt.igbs, gt.igbd),
            b: gt.igbb,
        }
    } else {
        TerminalTotals::default()
    };
    let gig = if m.igcmod.as_i32() != 0 || m.igbmod.as_i32() != 0 {
        TerminalTotals::sum(gis, gid, gib)
    } else {
        TerminalTotals::default()
    };

    // bias-dependent gate resistance
    let gr = &op.gate_resistance;
    let (gcrg, gcrgd, gcrgg, gcrgs, gcrgb) = if rgatemod > 1 {
        let (rd, rs) = op.mode.select((gr.gcrgd, gr.gcrgs), (gr.gcrgs, gr.gcrgd));
        (
            gr.gcrg,
            rd * gate_drop,
            gr.gcrgg * gate_drop - gr.gcrg,
            rs * gate_drop,
            gr.gcrgb * gate_drop,
        )
    } else {
        (0.0, 0.0, 0.0, 0.0, 0.0)
    };

    // reactive parts; in reverse mode the drain and source rows and columns
    // of the intrinsic charges trade places
    let (cdgr, csgr, cgdr, cgsr, cddr, cssr, cdsr, csdr) = if forward {
        (q.cdgr, q.csgr, q.cgdr, q.cgsr, q.cddr, q.cssr, q.cdsr, q.csdr)
    } else {
        (q.csgr, q.cdgr, q.cgsr, q.cgdr, q.cssr, q.cddr, q.csdr, q.cdsr)
    };
    let (cbdb_m, cbsb_m) = op.mode.select((cbdb, cbsb), (cbsb, cbdb));

    // mid-gate overlap capacitances exist only with rgateMod 3
    let (xcgmgmb, xcgmdb, xcgmsb, xcgmbb) = if rgatemod == 3 {
        (
            (cgdo + cgso + cgbo) * omega,
            -cgdo * omega,
            -cgso * omega,
            -cgbo * omega,
        )
    } else {
        (0.0, 0.0, 0.0, 0.0)
    };
    let (xcdgmb, xcsgmb, xcbgmb) = (xcgmdb, xcgmsb, xcgmbb);

    let (xcggbr, xcgdbr, xcgsbr, xcdgbr, xcsgbr, xcbgb) = if rgatemod == 3 {
        (
            q.cggr * omega,
            cgdr * omega,
            cgsr * omega,
            cdgr * omega,
            csgr * omega,
            cbgb * omega,
        )
    } else {
        (
            (q.cggr + cgdo + cgso + cgbo) * omega,
            (cgdr - cgdo) * omega,
            (cgsr - cgso) * omega,
            (cdgr - cgdo) * omega,
            (csgr - cgso) * omega,
            (cbgb - cgbo) * omega,
        )
    };
    let xcgbbr = -(xcggbr + xcgdbr + xcgsbr);

    let xcddbr = (cddr + capbd + cgdo) * omega;
    let xcdsbr = cdsr * omega;
    let xcsdbr = csdr * omega;
    let xcssbr = (capbs + cgso + cssr) * omega;

    let xcdb_sum = -(xcdgbr + xcddbr + xcdsbr + xcdgmb);
    let xcsb_sum = -(xcsgbr + xcsdbr + xcssbr + xcsgmb);
    let (xcdbbr, xcsbbr, xcbdb, xcbsb, xcdbdb, xcsbsb) = if rbodymod == 0 {
        (
            xcdb_sum,
            xcsb_sum,
            (cbdb_m - capbd) * omega,
            (cbsb_m - capbs) * omega,
            0.0,
            0.0,
        )
    } else {
        // the junction capacitances move onto the body-network nodes
        let (xcdbbr, xcsbbr) = if forward {
            (q.cdbr * omega, xcsb_sum + capbs * omega)
        } else {
            (xcdb_sum + capbd * omega, q.cdbr * omega)
        };
        (
            xcdbbr,
            xcsbbr,
            cbdb_m * omega,
            cbsb_m * omega,
            -capbd * omega,
            -capbs * omega,
        )
    };
    let xcbbb = -(xcbdb + xcbgb + xcbsb + xcbgmb);

    let (xcdgbi, xcsgbi, xcddbi, xcdsbi, xcsdbi, xcssbi, xcdbbi, xcsbbi, xcgdbi, xcgsbi) =
        if forward {
            (q.cdgi, q.csgi, q.cddi, q.cdsi, q.csdi, q.cssi, q.cdbi, q.csbi, q.cgdi, q.cgsi)
        } else {
            (q.csgi, q.cdgi, q.cssi, q.csdi, q.cdsi, q.cddi, q.csbi, q.cdbi, q.cgsi, q.cgdi)
        };
    let xcggbi = q.cggi;
    let xcgbbi = q.cgbi;

    let series = &op.series;
    let rdsmod = m.rdsmod.as_i32();
    let (gstot, gstotd, gstotg, gstots, gstotb, gdtot, gdtotd, gdtotg, gdtots, gdtotb) =
        if rdsmod == 1 {
            (
                series.gstot,
                series.gstotd,
                series.gstotg,
                series.gstots - series.gstot,
                series.gstotb,
                series.gdtot,
                series.gdtotd - series.gdtot,
                series.gdtotg,
                series.gdtots,
                series.gdtotb,
            )
        } else {
            Default::default()
        };
    let (gdpr, gspr) = if rdsmod == 0 {
        (d.drain_conductance, d.source_conductance)
    } else {
        (0.0, 0.0)
    };
    let (gjbd, gjbs) = if rbodymod == 0 {
        (op.gbd, op.gbs)
    } else {
        (0.0, 0.0)
    };
    let geltd = d.grgeltd;

    let n = nodes;
    let mut add = |row: NodeId, col: NodeId, re: f64, im: f64| {
        matrix.add(row, col, Complex::new(re, im));
    };

    // ====================================================================
    // Gate
    // ====================================================================

    match rgatemod {
        1 => {
            add(n.gate, n.gate, geltd, 0.0);
            add(n.gate_prime, n.gate, -geltd, 0.0);
            add(n.gate, n.gate_prime, -geltd, 0.0);
            add(n.gate_prime, n.gate_prime, geltd + xcggbi + gig.g, xcggbr);
            add(n.gate_prime, n.drain_prime, xcgdbi + gig.d, xcgdbr);
            add(n.gate_prime, n.source_prime, xcgsbi + gig.s, xcgsbr);
            add(n.gate_prime, n.bulk_prime, xcgbbi + gig.b, xcgbbr);
        }
        2 => {
            add(n.gate, n.gate, gcrg, 0.0);
            add(n.gate, n.gate_prime, gcrgg, 0.0);
            add(n.gate, n.drain_prime, gcrgd, 0.0);
            add(n.gate, n.source_prime, gcrgs, 0.0);
            add(n.gate, n.bulk_prime, gcrgb, 0.0);
            add(n.gate_prime, n.gate, -gcrg, 0.0);
            add(n.gate_prime, n.gate_prime, -(gcrgg - xcggbi - gig.g), xcggbr);
            add(n.gate_prime, n.drain_prime, -(gcrgd - xcgdbi - gig.d), xcgdbr);
            add(n.gate_prime, n.source_prime, -(gcrgs - xcgsbi - gig.s), xcgsbr);
            add(n.gate_prime, n.bulk_prime, -(gcrgb - xcgbbi - gig.b), xcgbbr);
        }
        3 => {
            add(n.gate, n.gate, geltd, 0.0);
            add(n.gate, n.gate_mid, -geltd, 0.0);
            add(n.gate_mid, n.gate, -geltd, 0.0);
            add(n.gate_mid, n.gate_mid, geltd + gcrg, xcgmgmb);
            add(n.gate_mid, n.drain_prime, gcrgd, xcgmdb);
            add(n.gate_mid, n.gate_prime, gcrgg, 0.0);
            add(n.gate_mid, n.source_prime, gcrgs, xcgmsb);
            add(n.gate_mid, n.bulk_prime, gcrgb, xcgmbb);

            add(n.drain_prime, n.gate_mid, 0.0, xcdgmb);
            add(n.gate_prime, n.gate_mid, -gcrg, 0.0);
            add(n.source_prime, n.gate_mid, 0.0, xcsgmb);
            add(n.bulk_prime, n.gate_mid, 0.0, xcbgmb);

            add(n.gate_prime, n.gate_prime, -(gcrgg - xcggbi - gig.g), xcggbr);
            add(n.gate_prime, n.drain_prime, -(gcrgd - xcgdbi - gig.d), xcgdbr);
            add(n.gate_prime, n.source_prime, -(gcrgs - xcgsbi - gig.s), xcgsbr);
            add(n.gate_prime, n.bulk_prime, -(gcrgb - xcgbbi - gig.b), xcgbbr);
        }
        _ => {
            add(n.gate_prime, n.gate_prime, xcggbi + gig.g, xcggbr);
            add(n.gate_prime, n.drain_prime, xcgdbi + gig.d, xcgdbr);
            add(n.gate_prime, n.source_prime, xcgsbi + gig.s, xcgsbr);
            add(n.gate_prime, n.bulk_prime, xcgbbi + gig.b, xcgbbr);
        }
    }

    if rdsmod != 0 {
        add(n.drain, n.gate_prime, gdtotg, 0.0);
        add(n.drain, n.source_prime, gdtots, 0.0);
        add(n.drain, n.bulk_prime, gdtotb, 0.0);
        add(n.source, n.drain_prime, gstotd, 0.0);
        add(n.source, n.gate_prime, gstotg, 0.0);
        add(n.source, n.bulk_prime, gstotb, 0.0);
    }

    // ====================================================================
    // Drain, source and body
    // ====================================================================

    add(
        n.drain_prime,
        n.drain_prime,
        gdpr + xcddbi + q.gdsr + op.gbd - gdtotd + rev_sumr + gbdp.d - gid.d,
        xcddbr + q.gdsi + rev_sumi,
    );
    add(n.drain_prime, n.drain, -(gdpr + gdtot), 0.0);
    add(
        n.drain_prime,
        n.gate_prime,
        gmr + xcdgbi - gdtotg + gbdp.g - gid.g,
        xcdgbr + gmi,
    );
    add(
        n.drain_prime,
        n.source_prime,
        -(q.gdsr - xcdsbi + fwd_sumr + gdtots - gbdp.s + gid.s),
        xcdsbr - q.gdsi - fwd_sumi,
    );
    add(
        n.drain_prime,
        n.bulk_prime,
        -(gjbd + gdtotb - xcdbbi - gmbsr - gbdp.b + gid.b),
        xcdbbr + gmbsi,
    );
    add(n.drain, n.drain_prime, -(gdpr - gdtotd), 0.0);
    add(n.drain, n.drain, gdpr + gdtot, 0.0);

    add(
        n.source_prime,
        n.drain_prime,
        -(q.gdsr - xcsdbi + gstotd + rev_sumr - gbsp.d + gis.d),
        xcsdbr - q.gdsi - rev_sumi,
    );
    add(
        n.source_prime,
        n.gate_prime,
        -(gmr - xcsgbi + gstotg - gbsp.g + gis.g),
        xcsgbr - gmi,
    );
    add(
        n.source_prime,
        n.source_prime,
        gspr + xcssbi + q.gdsr + op.gbs - gstots + fwd_sumr + gbsp.s - gis.s,
        xcssbr + q.gdsi + fwd_sumi,
    );
    add(n.source_prime, n.source, -(gspr + gstot), 0.0);
    add(
        n.source_prime,
        n.bulk_prime,
        -(gjbs + gstotb - xcsbbi + gmbsr - gbsp.b + gis.b),
        xcsbbr - gmbsi,
    );
    add(n.source, n.source_prime, -(gspr - gstots), 0.0);
    add(n.source, n.source, gspr + gstot, 0.0);

    add(n.bulk_prime, n.drain_prime, -(gjbd - gbbdp + gib.d), xcbdb);
    add(n.bulk_prime, n.gate_prime, -(op.gbgs + gib.g), xcbgb);
    add(n.bulk_prime, n.source_prime, -(gjbs - gbbsp + gib.s), xcbsb);
    add(
        n.bulk_prime,
        n.bulk_prime,
        gjbd + gjbs - op.gbbs - gib.b,
        xcbbb,
    );

    // GIDL and GISL
    let g = &op.gidl;
    add(n.drain_prime, n.drain_prime, g.ggidld, 0.0);
    add(n.drain_prime, n.gate_prime, g.ggidlg, 0.0);
    add(n.drain_prime, n.source_prime, -(g.ggidlg + g.ggidld + g.ggidlb), 0.0);
    add(n.drain_prime, n.bulk_prime, g.ggidlb, 0.0);
    add(n.bulk_prime, n.drain_prime, -g.ggidld, 0.0);
    add(n.bulk_prime, n.gate_prime, -g.ggidlg, 0.0);
    add(n.bulk_prime, n.source_prime, g.ggidlg + g.ggidld + g.ggidlb, 0.0);
    add(n.bulk_prime, n.bulk_prime, -g.ggidlb, 0.0);

    add(n.source_prime, n.drain_prime, -(g.ggisls + g.ggislg + g.ggislb), 0.0);
    add(n.source_prime, n.gate_prime, g.ggislg, 0.0);
    add(n.source_prime, n.source_prime, g.ggisls, 0.0);
    add(n.source_prime, n.bulk_prime, g.ggislb, 0.0);
    add(n.bulk_prime, n.drain_prime, g.ggislg + g.ggisls + g.ggislb, 0.0);
    add(n.bulk_prime, n.gate_prime, -g.ggislg, 0.0);
    add(n.bulk_prime, n.source_prime, -g.ggisls, 0.0);
    add(n.bulk_prime, n.bulk_prime, -g.ggislb, 0.0);

    if rbodymod != 0 {
        let b = &d.body;
        add(n.drain_prime, n.drain_body, -op.gbd, xcdbdb);
        add(n.source_prime, n.source_body, -op.gbs, xcsbsb);

        add(n.drain_body, n.drain_prime, -op.gbd, xcdbdb);
        add(n.drain_body, n.drain_body, op.gbd + b.grbpd + b.grbdb, -xcdbdb);
        add(n.drain_body, n.bulk_prime, -b.grbpd, 0.0);
        add(n.drain_body, n.bulk, -b.grbdb, 0.0);

        add(n.bulk_prime, n.drain_body, -b.grbpd, 0.0);
        add(n.bulk_prime, n.bulk, -b.grbpb, 0.0);
        add(n.bulk_prime, n.source_body, -b.grbps, 0.0);
        add(n.bulk_prime, n.bulk_prime, b.grbpd + b.grbps + b.grbpb, 0.0);

        add(n.source_body, n.source_prime, -op.gbs, xcsbsb);
        add(n.source_body, n.bulk_prime, -b.grbps, 0.0);
        add(n.source_body, n.bulk, -b.grbsb, 0.0);
        add(n.source_body, n.source_body, op.gbs + b.grbps + b.grbsb, -xcsbsb);

        add(n.bulk, n.drain_body, -b.grbdb, 0.0);
        add(n.bulk, n.bulk_prime, -b.grbpb, 0.0);
        add(n.bulk, n.source_body, -b.grbsb, 0.0);
        add(n.bulk, n.bulk, b.grbsb + b.grbdb + b.grbpb, 0.0);
    }

    // The transient NQS charge node is isolated in AC; a unit diagonal keeps
    // the matrix regular.
    if let Some(charge) = n.charge.filter(|_| d.inst.trnqsmod.as_i32() != 0) {
        add(charge, charge, 1.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{GateResistance, GidlConductances, SeriesResistance};
    use crate::testing::{SIZE, derive, model_with, nodes, operating_point};
    use spicier_core::DenseAcMatrix;

    fn assemble(d: &InstanceDerived, op: &OperatingPoint, omega: f64) -> DenseAcMatrix {
        let mut m = DenseAcMatrix::new(SIZE);
        load(d, op, &nodes(), omega, 0.1, &mut m);
        m
    }

    /// Shifting every node voltage by the same amount changes no current.
    fn assert_rows_balanced(m: &DenseAcMatrix) {
        for row in 1..=SIZE as u32 {
            let row = NodeId::new(row);
            let mut sum = Complex::new(0.0, 0.0);
            let mut scale: f64 = 0.0;
            for col in 1..=SIZE as u32 {
                let y = m.get(row, NodeId::new(col));
                sum += y;
                scale = scale.max(y.norm());
            }
            assert!(
                sum.norm() <= 1e-9 * scale.max(1e-30),
                "row {row} sums to {sum} (scale {scale})"
            );
        }
    }

    #[test]
    fn test_quasi_static_rows_balanced() {
        let mt = model_with(|_| {});
        let d = derive(&mt, |_| {});
        let omega = 2.0 * std::f64::consts::PI * 1e9;
        assert_rows_balanced(&assemble(&d, &operating_point(Mode::Forward), omega));
        assert_rows_balanced(&assemble(&d, &operating_point(Mode::Reverse), omega));
    }

    #[test]
    fn test_parasitic_networks_rows_balanced() {
        let mt = model_with(|m| m.set("rdsmod", 1.0).unwrap());
        let d = derive(&mt, |i| {
            i.set("rgatemod", 3.0).unwrap();
            i.set("rbodymod", 1.0).unwrap();
            i.set("acnqsmod", 1.0).unwrap();
        });

        for mode in [Mode::Forward, Mode::Reverse] {
            let mut op = operating_point(mode);
            op.gate_resistance = GateResistance {
                gcrg: 1e-3,
                gcrgd: 1e-5,
                gcrgg: 2e-5,
                gcrgs: -2.5e-5,
                gcrgb: -0.5e-5,
            };
            op.series = SeriesResistance {
                gstot: 1e-2,
                gstotd: 1e-4,
                gstotg: 2e-4,
                gstots: -2.5e-4,
                gstotb: -0.5e-4,
                gdtot: 2e-2,
                gdtotd: 1.5e-4,
                gdtotg: 1e-4,
                gdtots: -3e-4,
                gdtotb: 0.5e-4,
            };
            op.gidl = GidlConductances {
                ggidld: 1e-8,
                ggidlg: 2e-8,
                ggidlb: 3e-9,
                ggislg: 4e-9,
                ggisls: 5e-9,
                ggislb: 6e-10,
            };
            assert_rows_balanced(&assemble(&d, &op, 1e11));
        }
    }

    #[test]
    fn test_reverse_mode_mirrors_drain_and_source() {
        let mt = model_with(|_| {});
        let d = derive(&mt, |_| {});
        let op = OperatingPoint {
            gm: 2e-3,
            gds: 1e-4,
            gmbs: 3e-4,
            ..Default::default()
        };
        let reverse = OperatingPoint {
            mode: Mode::Reverse,
            ..op.clone()
        };

        let mut forward = DenseAcMatrix::new(SIZE);
        load(&d, &op, &nodes(), 0.0, 0.0, &mut forward);

        let mut mirrored = nodes();
        std::mem::swap(&mut mirrored.drain, &mut mirrored.source);
        std::mem::swap(&mut mirrored.drain_prime, &mut mirrored.source_prime);
        let mut swapped = DenseAcMatrix::new(SIZE);
        load(&d, &reverse, &mirrored, 0.0, 0.0, &mut swapped);

        for row in 1..=SIZE as u32 {
            for col in 1..=SIZE as u32 {
                let (r, c) = (NodeId::new(row), NodeId::new(col));
                let delta = forward.get(r, c) - swapped.get(r, c);
                assert!(delta.norm() < 1e-18, "entry ({r}, {c}) differs by {delta}");
            }
        }
    }

    #[test]
    fn test_nqs_at_dc_matches_quasi_static() {
        let mt = model_with(|_| {});
        let qs = derive(&mt, |_| {});
        let nqs = derive(&mt, |i| i.set("acnqsmod", 1.0).unwrap());
        let op = operating_point(Mode::Forward);

        let a = assemble(&qs, &op, 0.0);
        let b = assemble(&nqs, &op, 0.0);
        for row in 1..=SIZE as u32 {
            for col in 1..=SIZE as u32 {
                let (r, c) = (NodeId::new(row), NodeId::new(col));
                assert!((a.get(r, c) - b.get(r, c)).norm() < 1e-18);
            }
        }
    }

    #[test]
    fn test_nqs_lag_at_corner_frequency() {
        let mt = model_with(|_| {});
        let qs = derive(&mt, |_| {});
        let nqs = derive(&mt, |i| i.set("acnqsmod", 1.0).unwrap());
        let op = OperatingPoint {
            gm: 2e-3,
            taunet: 1e-11,
            ..Default::default()
        };
        // ωτ = 1: gm is halved in phase and lags by the same amount
        let omega = 1.0 / op.taunet;
        let n = nodes();
        let delta = assemble(&nqs, &op, omega).get(n.drain_prime, n.gate_prime)
            - assemble(&qs, &op, omega).get(n.drain_prime, n.gate_prime);
        assert!((delta.re + 1e-3).abs() < 1e-15);
        assert!((delta.im + 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_charge_node_identity() {
        let mt = model_with(|_| {});
        let op = operating_point(Mode::Forward);
        let n = nodes();
        let Some(q) = n.charge else { unreachable!() };

        let plain = derive(&mt, |_| {});
        assert_eq!(assemble(&plain, &op, 1e9).get(q, q), Complex::new(0.0, 0.0));

        let trnqs = derive(&mt, |i| i.set("trnqsmod", 1.0).unwrap());
        assert_eq!(assemble(&trnqs, &op, 1e9).get(q, q), Complex::new(1.0, 0.0));
    }

    #[test]
    fn test_gate_electrode_resistance() {
        let mt = model_with(|m| m.set("rshg", 10.0).unwrap());
        let d = derive(&mt, |i| i.set("rgatemod", 1.0).unwrap());
        let m = assemble(&d, &operating_point(Mode::Forward), 1e9);
        let n = nodes();
        assert_eq!(m.get(n.gate, n.gate), Complex::new(d.grgeltd, 0.0));
        assert_eq!(m.get(n.gate, n.gate_prime), Complex::new(-d.grgeltd, 0.0));
        assert_eq!(m.get(n.gate_prime, n.gate), Complex::new(-d.grgeltd, 0.0));
        assert_eq!(m.get(n.gate, n.gate_mid), Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_body_network_conductances() {
        let mt = model_with(|_| {});
        let d = derive(&mt, |i| i.set("rbodymod", 1.0).unwrap());
        let m = assemble(&d, &operating_point(Mode::Forward), 0.0);
        let n = nodes();
        let b = &d.body;
        assert_eq!(m.get(n.bulk, n.bulk).re, b.grbsb + b.grbdb + b.grbpb);
        assert_eq!(m.get(n.drain_body, n.bulk).re, -b.grbdb);
        assert_eq!(m.get(n.source_body, n.bulk_prime).re, -b.grbps);
        // junction conductances hang off the body nodes, not the body
        assert_eq!(m.get(n.drain_prime, n.drain_body).re, -1e-9);
    }
}
