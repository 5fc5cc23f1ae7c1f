//! Complex small-signal matrices and transfer functions.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;
use spicier_core::{AcMatrix, NodeId};

use crate::error::{Error, Result};
use crate::linear::solve_complex;

/// Dense complex nodal admittance matrix.
///
/// Row/column `k` holds node `k + 1`; ground has no row.
#[derive(Debug, Clone)]
pub struct ComplexMna {
    matrix: DMatrix<Complex<f64>>,
}

impl ComplexMna {
    /// Create a zero matrix for `num_nodes` non-ground nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            matrix: DMatrix::from_element(num_nodes, num_nodes, Complex::new(0.0, 0.0)),
        }
    }

    /// Number of non-ground nodes.
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Get a reference to the matrix.
    pub fn matrix(&self) -> &DMatrix<Complex<f64>> {
        &self.matrix
    }

    /// Entry at (`row`, `col`); anything touching ground reads as zero.
    pub fn entry(&self, row: NodeId, col: NodeId) -> Complex<f64> {
        match (self.index(row), self.index(col)) {
            (Some(r), Some(c)) => self.matrix[(r, c)],
            _ => Complex::new(0.0, 0.0),
        }
    }

    /// Reset every entry to zero, e.g. before the next frequency point.
    pub fn clear(&mut self) {
        self.matrix.fill(Complex::new(0.0, 0.0));
    }

    fn index(&self, node: NodeId) -> Option<usize> {
        node.matrix_index().filter(|&i| i < self.size())
    }

    /// Solve for node voltages given injected currents.
    pub fn solve(&self, rhs: &DVector<Complex<f64>>) -> Result<DVector<Complex<f64>>> {
        solve_complex(&self.matrix, rhs)
    }

    /// Transfer functions from every node to `output`.
    ///
    /// Solves the adjoint system once, after which the output voltage caused
    /// by a unit current injected between any pair of nodes is a difference
    /// of two entries.
    pub fn transfer_to(&self, output: NodeId) -> Result<Transfer> {
        let out = self.index(output).ok_or(Error::InvalidNode(output))?;
        let mut e = DVector::from_element(self.size(), Complex::new(0.0, 0.0));
        e[out] = Complex::new(1.0, 0.0);
        let adjoint = solve_complex(&self.matrix.transpose(), &e)?;
        Ok(Transfer { adjoint })
    }
}

impl AcMatrix for ComplexMna {
    fn add(&mut self, row: NodeId, col: NodeId, value: Complex<f64>) {
        if let (Some(r), Some(c)) = (self.index(row), self.index(col)) {
            self.matrix[(r, c)] += value;
        }
    }
}

/// Output sensitivities to current injections, from [`ComplexMna::transfer_to`].
#[derive(Debug, Clone)]
pub struct Transfer {
    adjoint: DVector<Complex<f64>>,
}

impl Transfer {
    fn at(&self, node: NodeId) -> Complex<f64> {
        node.matrix_index()
            .and_then(|i| self.adjoint.get(i).copied())
            .unwrap_or(Complex::new(0.0, 0.0))
    }

    /// Output voltage per unit current flowing into `pos` and out of `neg`.
    pub fn between(&self, pos: NodeId, neg: NodeId) -> Complex<f64> {
        self.at(pos) - self.at(neg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_complex_mna_admittance_stamp() {
        let mut mna = ComplexMna::new(2);
        let n1 = NodeId::new(1);
        let n2 = NodeId::new(2);
        let y = Complex::new(0.001, 0.002);
        mna.add_admittance(n1, n2, y);

        assert_eq!(mna.entry(n1, n1), y);
        assert_eq!(mna.entry(n2, n2), y);
        assert_eq!(mna.entry(n1, n2), -y);
        assert_eq!(mna.entry(n2, n1), -y);
        assert_eq!(mna.entry(NodeId::GROUND, n1), Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_rc_transfer_3db_point() {
        // Current into node 1; R from 1 to 2, C from 2 to ground.
        // Z(2<-1) = 1 / (jωC) at node 2 per unit injected current.
        let r = 1000.0;
        let cap = 1e-6;
        let f3db = 1.0 / (2.0 * PI * r * cap);
        let omega = 2.0 * PI * f3db;

        let n1 = NodeId::new(1);
        let n2 = NodeId::new(2);
        let mut mna = ComplexMna::new(2);
        mna.add_admittance(n1, n2, Complex::new(1.0 / r, 0.0));
        mna.add_admittance(n2, NodeId::GROUND, Complex::new(0.0, omega * cap));
        // A shunt conductance at node 1 keeps the system non-singular.
        mna.add_admittance(n1, NodeId::GROUND, Complex::new(1.0 / r, 0.0));

        let mut rhs = DVector::from_element(2, Complex::new(0.0, 0.0));
        rhs[0] = Complex::new(1.0, 0.0);
        let v = mna.solve(&rhs).unwrap();

        let transfer = mna.transfer_to(n2).unwrap();
        let h = transfer.between(n1, NodeId::GROUND);
        assert!((h - v[1]).norm() < 1e-12, "adjoint {h} vs direct {}", v[1]);

        // Divider from node 1 to node 2 is 1/(1+jωRC), |.| = 1/sqrt(2) at f3db.
        let ratio = (v[1] / v[0]).norm();
        assert!((ratio - 1.0 / 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_transfer_to_ground_rejected() {
        let mna = ComplexMna::new(1);
        assert!(matches!(
            mna.transfer_to(NodeId::GROUND),
            Err(Error::InvalidNode(_))
        ));
    }
}
