//! Layout geometry rules: finger splits, diffusion perimeters and areas,
//! and geometry-based source/drain resistance.
//!
//! Layout codes follow the BSIM4 `geomod` / `rgeomod` conventions. Codes 9
//! and 10 assume an even finger count with all-wide contacts.

use crate::diagnostics::Diagnostics;

/// Which diffusion a resistance is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Drain,
    Source,
}

/// End and internal diffusion segment counts of a multi-finger device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FingerSplit {
    pub int_d: f64,
    pub end_d: f64,
    pub int_s: f64,
    pub end_s: f64,
}

impl FingerSplit {
    fn end(&self, terminal: Terminal) -> f64 {
        match terminal {
            Terminal::Drain => self.end_d,
            Terminal::Source => self.end_s,
        }
    }

    fn internal(&self, terminal: Terminal) -> f64 {
        match terminal {
            Terminal::Drain => self.int_d,
            Terminal::Source => self.int_s,
        }
    }
}

/// Split `nf` fingers into end and internal diffusions.
///
/// Odd counts give one end diffusion on each side. Even counts put both
/// ends on the drain when `min_sd` asks to minimise source diffusions,
/// otherwise on the source.
pub fn num_finger_diff(nf: f64, min_sd: bool) -> FingerSplit {
    let fingers = nf as i64;
    if fingers % 2 != 0 {
        let int = 2.0 * ((nf - 1.0) / 2.0).max(0.0);
        FingerSplit {
            int_d: int,
            end_d: 1.0,
            int_s: int,
            end_s: 1.0,
        }
    } else if min_sd {
        FingerSplit {
            int_d: 2.0 * (nf / 2.0 - 1.0).max(0.0),
            end_d: 2.0,
            int_s: nf,
            end_s: 0.0,
        }
    } else {
        FingerSplit {
            int_d: nf,
            end_d: 0.0,
            int_s: 2.0 * (nf / 2.0 - 1.0).max(0.0),
            end_s: 2.0,
        }
    }
}

/// Source and drain diffusion perimeters (m) and areas (m²).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerimeterArea {
    pub ps: f64,
    pub pd: f64,
    pub as_: f64,
    pub ad: f64,
}

/// Contact spacings entering the geometry rules (m).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactSpacing {
    /// Gate edge to contact centre
    pub dmcg: f64,
    /// Contact centre to isolation edge, in the width direction
    pub dmci: f64,
    /// Gate edge to isolation edge for merged diffusion
    pub dmdg: f64,
}

/// Apportion diffusion perimeter and area according to layout code `geo`.
///
/// Returns `None` for an unknown code after recording a warning.
pub fn pa_eff_geo(
    nf: f64,
    geo: i32,
    min_sd: bool,
    weffcj: f64,
    spacing: ContactSpacing,
    diag: &mut Diagnostics,
) -> Option<PerimeterArea> {
    let ContactSpacing { dmcg, dmci, dmdg } = spacing;
    let n = if geo < 9 {
        num_finger_diff(nf, min_sd)
    } else {
        FingerSplit::default()
    };

    let t0 = dmcg + dmci;
    let p_iso = t0 + t0 + weffcj;
    let p_sha = dmcg + dmcg;
    let p_mer = dmdg + dmdg;
    let a_iso = t0 * weffcj;
    let a_sha = dmcg * weffcj;
    let a_mer = dmdg * weffcj;

    // (end perimeter, end area) per side: isolated, shared or merged
    let iso = (p_iso, a_iso);
    let sha = (p_sha, a_sha);
    let mer = (p_mer, a_mer);

    let (s_end, d_end) = match geo {
        0 => (iso, iso),
        1 => (iso, sha),
        2 => (sha, iso),
        3 => (sha, sha),
        4 => (iso, mer),
        5 => (sha, mer),
        6 => (mer, iso),
        7 => (mer, sha),
        8 => (mer, mer),
        9 => {
            return Some(PerimeterArea {
                ps: p_iso + (nf - 1.0) * p_sha,
                pd: nf * p_sha,
                as_: a_iso + (nf - 1.0) * a_sha,
                ad: nf * a_sha,
            });
        }
        10 => {
            return Some(PerimeterArea {
                ps: nf * p_sha,
                pd: p_iso + (nf - 1.0) * p_sha,
                as_: nf * a_sha,
                ad: a_iso + (nf - 1.0) * a_sha,
            });
        }
        _ => {
            diag.warn(format!("Warning: Specified GEO = {geo} not matched"));
            return None;
        }
    };

    Some(PerimeterArea {
        ps: n.end_s * s_end.0 + n.int_s * p_sha,
        pd: n.end_d * d_end.0 + n.int_d * p_sha,
        as_: n.end_s * s_end.1 + n.int_s * a_sha,
        ad: n.end_d * d_end.1 + n.int_d * a_sha,
    })
}

/// Sheet-resistance inputs of the resistance rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionSheet {
    /// Effective junction width (m)
    pub weffcj: f64,
    /// Diffusion sheet resistance (Ω/sq)
    pub rsh: f64,
    pub spacing: ContactSpacing,
}

/// End resistance of an isolated diffusion.
pub fn rds_end_iso(
    sheet: &DiffusionSheet,
    nu_end: f64,
    rgeo: i32,
    terminal: Terminal,
    diag: &mut Diagnostics,
) -> Option<f64> {
    let DiffusionSheet {
        weffcj,
        rsh,
        spacing,
    } = *sheet;
    let dmcg = spacing.dmcg;
    let dmci = spacing.dmci;
    let (wide, narrow) = match terminal {
        Terminal::Source => (matches!(rgeo, 1 | 2 | 5), matches!(rgeo, 3 | 4 | 6)),
        Terminal::Drain => (matches!(rgeo, 1 | 3 | 7), matches!(rgeo, 2 | 4 | 8)),
    };
    if wide {
        Some(if nu_end == 0.0 {
            0.0
        } else {
            rsh * dmcg / (weffcj * nu_end)
        })
    } else if narrow {
        if dmcg + dmci == 0.0 {
            diag.warn("(DMCG + DMCI) can not be equal to zero");
        }
        Some(if nu_end == 0.0 || dmcg + dmci == 0.0 {
            0.0
        } else {
            rsh * weffcj / (3.0 * nu_end * (dmcg + dmci))
        })
    } else {
        diag.warn(format!("Warning: Specified RGEO = {rgeo} not matched"));
        None
    }
}

/// End resistance of a shared diffusion.
pub fn rds_end_sha(
    sheet: &DiffusionSheet,
    nu_end: f64,
    rgeo: i32,
    terminal: Terminal,
    diag: &mut Diagnostics,
) -> Option<f64> {
    let DiffusionSheet { weffcj, rsh, .. } = *sheet;
    let dmcg = sheet.spacing.dmcg;
    let (wide, narrow) = match terminal {
        Terminal::Source => (matches!(rgeo, 1 | 2 | 5), matches!(rgeo, 3 | 4 | 6)),
        Terminal::Drain => (matches!(rgeo, 1 | 3 | 7), matches!(rgeo, 2 | 4 | 8)),
    };
    if wide {
        Some(if nu_end == 0.0 {
            0.0
        } else {
            rsh * dmcg / (weffcj * nu_end)
        })
    } else if narrow {
        if dmcg == 0.0 {
            diag.warn("DMCG can not be equal to zero");
        }
        Some(if nu_end == 0.0 || dmcg == 0.0 {
            0.0
        } else {
            rsh * weffcj / (6.0 * nu_end * dmcg)
        })
    } else {
        diag.warn(format!("Warning: Specified RGEO = {rgeo} not matched"));
        None
    }
}

/// Total geometry-based series resistance of one terminal (Ω).
///
/// The end and internal contributions combine in parallel; when one of
/// them is zero the other is returned alone. Unknown layout codes
/// contribute nothing.
pub fn rdseff_geo(
    nf: f64,
    geo: i32,
    rgeo: i32,
    min_sd: bool,
    sheet: &DiffusionSheet,
    terminal: Terminal,
    diag: &mut Diagnostics,
) -> f64 {
    let DiffusionSheet { weffcj, rsh, .. } = *sheet;
    let dmcg = sheet.spacing.dmcg;
    let dmdg = sheet.spacing.dmdg;
    let mut rint = 0.0;
    let mut split = FingerSplit::default();
    if geo < 9 {
        split = num_finger_diff(nf, min_sd);
        let nu_int = split.internal(terminal);
        rint = if nu_int == 0.0 {
            0.0
        } else {
            rsh * dmcg / (weffcj * nu_int)
        };
    }
    let nu_end = split.end(terminal);
    let is_source = terminal == Terminal::Source;

    // half-width end contact with the remaining fingers in parallel
    let wide_pair = |rint: &mut f64| {
        *rint = if nf == 2.0 {
            0.0
        } else {
            rsh * dmcg / (weffcj * (nf - 2.0))
        };
        0.5 * rsh * dmcg / weffcj
    };

    let rend = match (geo, terminal) {
        (0, _) => rds_end_iso(sheet, nu_end, rgeo, terminal, diag),
        (1, Terminal::Source) | (2, Terminal::Drain) => {
            rds_end_iso(sheet, nu_end, rgeo, terminal, diag)
        }
        (1, Terminal::Drain) | (2, Terminal::Source) | (3, _) => {
            rds_end_sha(sheet, nu_end, rgeo, terminal, diag)
        }
        (4, Terminal::Source) => rds_end_iso(sheet, nu_end, rgeo, terminal, diag),
        (4, Terminal::Drain) | (6, Terminal::Source) | (8, _) => Some(rsh * dmdg / weffcj),
        (5, Terminal::Source) => rds_end_sha(sheet, nu_end, rgeo, terminal, diag),
        (5, Terminal::Drain) | (7, Terminal::Source) => Some(if nu_end == 0.0 {
            0.0
        } else {
            rsh * dmdg / (weffcj * nu_end)
        }),
        (6, Terminal::Drain) => rds_end_iso(sheet, nu_end, rgeo, terminal, diag),
        (7, Terminal::Drain) => rds_end_sha(sheet, nu_end, rgeo, terminal, diag),
        (9, _) | (10, _) => {
            let near = (geo == 9) == is_source;
            if near {
                Some(wide_pair(&mut rint))
            } else {
                rint = rsh * dmcg / (weffcj * nf);
                Some(0.0)
            }
        }
        _ => {
            diag.warn(format!("Warning: Specified GEO = {geo} not matched"));
            None
        }
    };
    let rend = rend.unwrap_or(0.0);

    let rtot = if rint <= 0.0 {
        rend
    } else if rend <= 0.0 {
        rint
    } else {
        rint * rend / (rint + rend)
    };
    if rtot == 0.0 {
        diag.warn("Warning: Zero resistance returned from RdseffGeo");
    }
    rtot
}
