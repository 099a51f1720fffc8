//! Column indexing for arc-selection variables.

/// Maps `(arc, commodity)` pairs to dense column indices, commodity-major.
///
/// Column `k * num_arcs + a` is the indicator for arc `a`, commodity `k`.
///
/// # Examples
///
/// ```
/// use emergency_routing::formulation::VariableIndex;
///
/// let idx = VariableIndex::new(4, 3);
/// assert_eq!(idx.len(), 12);
/// assert_eq!(idx.column(1, 2), 9);
/// assert_eq!(idx.decompose(9), (1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableIndex {
    num_arcs: usize,
    num_commodities: usize,
}

impl VariableIndex {
    /// Creates an index for the full arcs × commodities product.
    pub fn new(num_arcs: usize, num_commodities: usize) -> Self {
        Self {
            num_arcs,
            num_commodities,
        }
    }

    /// Total number of columns.
    pub fn len(&self) -> usize {
        self.num_arcs * self.num_commodities
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.num_arcs
    }

    /// Number of commodities.
    pub fn num_commodities(&self) -> usize {
        self.num_commodities
    }

    /// Column of arc `arc` for commodity `commodity`.
    pub fn column(&self, arc: usize, commodity: usize) -> usize {
        debug_assert!(arc < self.num_arcs && commodity < self.num_commodities);
        commodity * self.num_arcs + arc
    }

    /// Inverse of [`column`](Self::column): `(arc, commodity)`.
    pub fn decompose(&self, column: usize) -> (usize, usize) {
        (column % self.num_arcs, column / self.num_arcs)
    }

    /// Column range belonging to one commodity.
    pub fn commodity_columns(&self, commodity: usize) -> std::ops::Range<usize> {
        let start = commodity * self.num_arcs;
        start..start + self.num_arcs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_roundtrip_all() {
        let idx = VariableIndex::new(5, 3);
        let mut seen = vec![false; idx.len()];
        for k in 0..3 {
            for a in 0..5 {
                let c = idx.column(a, k);
                assert!(!seen[c]);
                seen[c] = true;
                assert_eq!(idx.decompose(c), (a, k));
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_commodity_columns() {
        let idx = VariableIndex::new(4, 2);
        assert_eq!(idx.commodity_columns(1), 4..8);
    }

    #[test]
    fn test_empty() {
        assert!(VariableIndex::new(0, 3).is_empty());
    }
}
