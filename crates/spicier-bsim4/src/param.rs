//! Parameter value types and the declarative model parameter table.
//!
//! A [`Param`] remembers whether it was given explicitly, since many BSIM4
//! derivations branch on that rather than on the value itself. A
//! [`Binned`] parameter carries a base value plus length, width and
//! cross-term coefficients.

/// Channel type of a MOSFET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MosfetType {
    /// N-channel MOSFET
    #[default]
    Nmos,
    /// P-channel MOSFET
    Pmos,
}

impl MosfetType {
    /// Sign convention: +1 for NMOS, -1 for PMOS.
    pub fn sign(self) -> f64 {
        match self {
            MosfetType::Nmos => 1.0,
            MosfetType::Pmos => -1.0,
        }
    }

    pub fn is_nmos(self) -> bool {
        self == MosfetType::Nmos
    }
}

/// A scalar parameter with presence tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub value: f64,
    pub given: bool,
}

impl Param {
    /// A parameter holding its default value.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            given: false,
        }
    }

    /// Set the value as if given by the user.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.given = true;
    }

    /// Replace the value without marking it as given.
    ///
    /// Used for defaults resolved during setup and for corrections.
    pub fn assign(&mut self, value: f64) {
        self.value = value;
    }

    /// Value truncated to an integer, for model selectors.
    pub fn as_i32(&self) -> i32 {
        self.value as i32
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A size-binned parameter: `base + l/L + w/W + p/(L·W)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Binned {
    pub base: Param,
    pub l: Param,
    pub w: Param,
    pub p: Param,
}

impl Binned {
    pub const fn new(base: f64) -> Self {
        Self {
            base: Param::new(base),
            l: Param::new(0.0),
            w: Param::new(0.0),
            p: Param::new(0.0),
        }
    }

    /// Evaluate the binning equation at the given inverse geometry.
    #[inline]
    pub fn at(&self, inv_l: f64, inv_w: f64, inv_lw: f64) -> f64 {
        self.base.value + self.l.value * inv_l + self.w.value * inv_w + self.p.value * inv_lw
    }

    /// Whether the base value or any of its coefficients was given.
    pub fn any_given(&self) -> bool {
        self.base.given || self.l.given || self.w.given || self.p.given
    }
}

/// Declares the model parameter struct from a table of scalars and
/// binned parameters.
///
/// Each entry reads `field: "spice-name" = default => "description"`.
/// Binned entries additionally accept the `l`, `w` and `p` prefixed names.
macro_rules! model_parameters {
    (
        scalars {
            $($s:ident : $sn:literal = $sd:expr => $sdoc:literal),* $(,)?
        }
        binned {
            $($b:ident : $bn:literal = $bd:expr => $bdoc:literal),* $(,)?
        }
    ) => {
        /// Technology-level BSIM4 parameters.
        #[derive(Debug, Clone)]
        pub struct ModelParams {
            /// Channel type (`nmos` / `pmos` flags).
            pub mos_type: $crate::param::MosfetType,
            $(
                #[doc = $sdoc]
                pub $s: $crate::param::Param,
            )*
            $(
                #[doc = $bdoc]
                pub $b: $crate::param::Binned,
            )*
        }

        impl Default for ModelParams {
            fn default() -> Self {
                Self {
                    mos_type: $crate::param::MosfetType::Nmos,
                    $($s: $crate::param::Param::new($sd),)*
                    $($b: $crate::param::Binned::new($bd),)*
                }
            }
        }

        /// Binned parameters evaluated at one effective geometry.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct BinnedValues {
            $(
                #[doc = $bdoc]
                pub $b: f64,
            )*
        }

        impl ModelParams {
            /// SPICE names of every scalar parameter.
            pub const SCALAR_NAMES: &'static [&'static str] = &[$($sn),*];

            /// SPICE names of every binned parameter (base name only).
            pub const BINNED_NAMES: &'static [&'static str] = &[$($bn),*];

            /// Look up a scalar parameter by SPICE name.
            pub fn scalar_mut(&mut self, name: &str) -> Option<&mut $crate::param::Param> {
                match name {
                    $($sn => Some(&mut self.$s),)*
                    _ => None,
                }
            }

            /// Look up a binned parameter or one of its `l`/`w`/`p` terms.
            pub fn binned_mut(&mut self, name: &str) -> Option<&mut $crate::param::Param> {
                match name {
                    $($bn => return Some(&mut self.$b.base),)*
                    _ => {}
                }
                let prefix = name.get(..1)?;
                let rest = name.get(1..)?;
                let binned = match rest {
                    $($bn => &mut self.$b,)*
                    _ => return None,
                };
                match prefix {
                    "l" => Some(&mut binned.l),
                    "w" => Some(&mut binned.w),
                    "p" => Some(&mut binned.p),
                    _ => None,
                }
            }

            /// Evaluate every binned parameter at one geometry.
            pub fn bin(&self, inv_l: f64, inv_w: f64, inv_lw: f64) -> BinnedValues {
                BinnedValues {
                    $($b: self.$b.at(inv_l, inv_w, inv_lw),)*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_given_tracking() {
        let mut p = Param::new(0.5);
        assert!(!p.given);
        p.assign(0.7);
        assert!(!p.given);
        p.set(0.9);
        assert!(p.given);
        assert_eq!(p.value, 0.9);
    }

    #[test]
    fn test_binned_equation() {
        let mut b = Binned::new(1.0);
        b.l.set(2.0);
        b.w.set(3.0);
        b.p.set(4.0);
        let v = b.at(0.5, 0.25, 0.125);
        assert!((v - (1.0 + 1.0 + 0.75 + 0.5)).abs() < 1e-15);
        assert!(b.any_given());
        assert!(!Binned::new(1.0).any_given());
    }

    #[test]
    fn test_mos_type_sign() {
        assert_eq!(MosfetType::Nmos.sign(), 1.0);
        assert_eq!(MosfetType::Pmos.sign(), -1.0);
        assert!(MosfetType::default().is_nmos());
    }
}
