//! Offsets of the device's slots in the host state vector.
//!
//! A device reserves [`COUNT`] consecutive slots at setup; every offset
//! below is added to the returned base. Each integrated charge `q*` is
//! followed by its companion current `cq*`.

pub const VBD: usize = 0;
pub const VBS: usize = 1;
pub const VGS: usize = 2;
pub const VDS: usize = 3;
pub const VDBS: usize = 4;
pub const VDBD: usize = 5;
pub const VSBS: usize = 6;
pub const VGES: usize = 7;
pub const VGMS: usize = 8;
pub const VSES: usize = 9;
pub const VDES: usize = 10;

pub const QB: usize = 11;
pub const CQB: usize = 12;
pub const QG: usize = 13;
pub const CQG: usize = 14;
pub const QD: usize = 15;
pub const CQD: usize = 16;
pub const QGMID: usize = 17;
pub const CQGMID: usize = 18;
pub const QBS: usize = 19;
pub const CQBS: usize = 20;
pub const QBD: usize = 21;
pub const CQBD: usize = 22;
pub const QCHEQ: usize = 23;
pub const CQCHEQ: usize = 24;
pub const QCDUMP: usize = 25;
pub const CQCDUMP: usize = 26;
pub const QDEF: usize = 27;
pub const QS: usize = 28;

/// Number of slots one device reserves.
pub const COUNT: usize = 29;
