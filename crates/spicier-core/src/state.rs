//! Per-device state storage and history.
//!
//! Devices reserve a contiguous block of slots at setup and address them by
//! offset from the returned base. The host keeps a few past copies of the
//! whole vector so that integration and truncation can look back in time.

/// Hands out contiguous state-vector slots to devices during setup.
pub trait StateAllocator {
    /// Reserve `count` consecutive slots, returning the index of the first.
    fn reserve(&mut self, count: usize) -> usize;
}

/// Read access to the state history.
///
/// Age 0 is the current time point, age 1 the previous accepted point, and so on.
pub trait StateHistory {
    /// Value of `slot` at the given age.
    fn state(&self, age: usize, slot: usize) -> f64;

    /// Value of `slot` at the current time point.
    fn current(&self, slot: usize) -> f64 {
        self.state(0, slot)
    }
}

/// Local truncation error estimator.
///
/// A device hands the estimator the charge slots it integrates; the estimator
/// inspects the history of those slots (and of the companion current slot that
/// follows each one) and shrinks `timestep` when the error estimate demands it.
pub trait Truncator {
    fn truncate(&self, slot: usize, timestep: &mut f64);
}

/// A ring of state vectors, newest first.
#[derive(Debug, Clone)]
pub struct StateVector {
    /// `history[age][slot]`
    history: Vec<Vec<f64>>,
    len: usize,
}

impl Default for StateVector {
    fn default() -> Self {
        Self::new(8)
    }
}

impl StateVector {
    /// Create an empty state vector that keeps `depth` time points.
    pub fn new(depth: usize) -> Self {
        Self {
            history: vec![Vec::new(); depth.max(1)],
            len: 0,
        }
    }

    /// Number of reserved slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no slot has been reserved yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of time points kept.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Write `value` into `slot` at the given age.
    ///
    /// Out-of-range writes are ignored.
    pub fn set(&mut self, age: usize, slot: usize, value: f64) {
        if let Some(v) = self.history.get_mut(age).and_then(|h| h.get_mut(slot)) {
            *v = value;
        }
    }

    /// Accept the current time point: every age moves back by one and the
    /// new current vector starts as a copy of the one just accepted.
    pub fn rotate(&mut self) {
        self.history.rotate_right(1);
        let accepted = self.history[1].clone();
        self.history[0] = accepted;
    }

    /// Copy the current vector into every older age.
    pub fn fill_history(&mut self) {
        let current = self.history[0].clone();
        for past in self.history.iter_mut().skip(1) {
            past.clone_from(&current);
        }
    }
}

impl StateAllocator for StateVector {
    fn reserve(&mut self, count: usize) -> usize {
        let base = self.len;
        self.len += count;
        for h in &mut self.history {
            h.resize(self.len, 0.0);
        }
        base
    }
}

impl StateHistory for StateVector {
    fn state(&self, age: usize, slot: usize) -> f64 {
        self.history
            .get(age)
            .and_then(|h| h.get(slot))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_is_contiguous() {
        let mut states = StateVector::new(3);
        assert_eq!(states.reserve(29), 0);
        assert_eq!(states.reserve(4), 29);
        assert_eq!(states.len(), 33);
    }

    #[test]
    fn test_rotate_keeps_history() {
        let mut states = StateVector::new(3);
        let base = states.reserve(2);
        states.set(0, base, 1.0);
        states.rotate();
        states.set(0, base, 2.0);
        states.rotate();
        states.set(0, base, 3.0);

        assert_eq!(states.current(base), 3.0);
        assert_eq!(states.state(1, base), 2.0);
        assert_eq!(states.state(2, base), 1.0);
    }

    #[test]
    fn test_out_of_range_reads_zero() {
        let states = StateVector::new(2);
        assert_eq!(states.state(5, 100), 0.0);
    }

    #[test]
    fn test_fill_history() {
        let mut states = StateVector::new(4);
        let base = states.reserve(1);
        states.set(0, base, 7.5);
        states.fill_history();
        for age in 0..4 {
            assert_eq!(states.state(age, base), 7.5);
        }
    }
}
