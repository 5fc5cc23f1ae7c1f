//! Matrix stamping protocol.

use num_complex::Complex;

use crate::node::NodeId;

/// A complex nodal matrix that devices add their small-signal contributions to.
///
/// Entries touching the ground node are discarded by implementations, so
/// devices can stamp every branch without special-casing grounded pins.
pub trait AcMatrix {
    /// Add `value` to the entry at (`row`, `col`).
    fn add(&mut self, row: NodeId, col: NodeId, value: Complex<f64>);

    /// Stamp a two-terminal admittance between `a` and `b`.
    fn add_admittance(&mut self, a: NodeId, b: NodeId, y: Complex<f64>) {
        self.add(a, a, y);
        self.add(b, b, y);
        self.add(a, b, -y);
        self.add(b, a, -y);
    }
}

/// A dense matrix that records every contribution, mainly for inspection.
#[derive(Debug, Clone, Default)]
pub struct DenseAcMatrix {
    size: usize,
    data: Vec<Complex<f64>>,
}

impl DenseAcMatrix {
    /// Create a zero matrix for `size` non-ground nodes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![Complex::new(0.0, 0.0); size * size],
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry at (`row`, `col`); ground rows and columns read as zero.
    pub fn get(&self, row: NodeId, col: NodeId) -> Complex<f64> {
        match (row.matrix_index(), col.matrix_index()) {
            (Some(r), Some(c)) if r < self.size && c < self.size => self.data[r * self.size + c],
            _ => Complex::new(0.0, 0.0),
        }
    }

    /// Reset every entry to zero.
    pub fn clear(&mut self) {
        self.data.fill(Complex::new(0.0, 0.0));
    }
}

impl AcMatrix for DenseAcMatrix {
    fn add(&mut self, row: NodeId, col: NodeId, value: Complex<f64>) {
        if let (Some(r), Some(c)) = (row.matrix_index(), col.matrix_index()) {
            if r < self.size && c < self.size {
                self.data[r * self.size + c] += value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_entries_dropped() {
        let mut m = DenseAcMatrix::new(2);
        let n1 = NodeId::new(1);
        m.add(NodeId::GROUND, n1, Complex::new(1.0, 0.0));
        m.add(n1, NodeId::GROUND, Complex::new(1.0, 0.0));
        assert_eq!(m.get(n1, n1), Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_admittance_stamp() {
        let mut m = DenseAcMatrix::new(2);
        let n1 = NodeId::new(1);
        let n2 = NodeId::new(2);
        m.add_admittance(n1, n2, Complex::new(1e-3, 2e-3));

        assert_eq!(m.get(n1, n1), Complex::new(1e-3, 2e-3));
        assert_eq!(m.get(n2, n2), Complex::new(1e-3, 2e-3));
        assert_eq!(m.get(n1, n2), Complex::new(-1e-3, -2e-3));
        assert_eq!(m.get(n2, n1), Complex::new(-1e-3, -2e-3));
    }

    #[test]
    fn test_admittance_to_ground() {
        let mut m = DenseAcMatrix::new(1);
        let n1 = NodeId::new(1);
        m.add_admittance(n1, NodeId::GROUND, Complex::new(0.5, 0.0));
        assert_eq!(m.get(n1, n1), Complex::new(0.5, 0.0));
    }
}
