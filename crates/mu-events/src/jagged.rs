//! Jagged (variable-length per entry) `f64` columns in CSR layout.

use mu_core::{Error, Result};

/// Jagged column: a flat value buffer plus entry boundaries.
///
/// Entry `i` occupies `flat[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JaggedCol {
    /// Flat array of all values across all entries.
    flat: Vec<f64>,
    /// Entry boundaries: `offsets.len() == n_entries + 1`, `offsets[0] == 0`.
    offsets: Vec<usize>,
}

impl Default for JaggedCol {
    fn default() -> Self {
        Self::new()
    }
}

impl JaggedCol {
    /// Empty column with zero entries.
    pub fn new() -> Self {
        Self { flat: Vec::new(), offsets: vec![0] }
    }

    /// Empty column with room for `n_entries` entries and `n_values` values.
    pub fn with_capacity(n_entries: usize, n_values: usize) -> Self {
        let mut offsets = Vec::with_capacity(n_entries + 1);
        offsets.push(0);
        Self { flat: Vec::with_capacity(n_values), offsets }
    }

    /// Build from a flat buffer and explicit offsets.
    pub fn from_parts(flat: Vec<f64>, offsets: Vec<usize>) -> Result<Self> {
        if offsets.first() != Some(&0) {
            return Err(Error::Validation("jagged offsets must start at 0".to_string()));
        }
        if offsets.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::Validation("jagged offsets must be non-decreasing".to_string()));
        }
        let last = offsets[offsets.len() - 1];
        if last != flat.len() {
            return Err(Error::Validation(format!(
                "jagged offsets end at {} but flat buffer has {} values",
                last,
                flat.len()
            )));
        }
        Ok(Self { flat, offsets })
    }

    /// Build from one slice per entry.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let n_values = rows.iter().map(|r| r.as_ref().len()).sum();
        let mut col = Self::with_capacity(rows.len(), n_values);
        for r in rows {
            col.push_row(r.as_ref());
        }
        col
    }

    /// Append one entry.
    pub fn push_row(&mut self, values: &[f64]) {
        self.flat.extend_from_slice(values);
        self.offsets.push(self.flat.len());
    }

    /// Append one entry from an iterator.
    pub fn push_row_iter<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        self.flat.extend(values);
        self.offsets.push(self.flat.len());
    }

    /// Number of entries.
    pub fn n_entries(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// `true` when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.n_entries() == 0
    }

    /// Total number of values across all entries.
    pub fn n_values(&self) -> usize {
        self.flat.len()
    }

    /// Values of entry `row`. Panics if `row >= n_entries()`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.flat[self.offsets[row]..self.offsets[row + 1]]
    }

    /// Length of entry `row`. Panics if `row >= n_entries()`.
    pub fn row_len(&self, row: usize) -> usize {
        self.offsets[row + 1] - self.offsets[row]
    }

    /// Per-entry lengths.
    pub fn counts(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Iterate entries in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.offsets.windows(2).map(move |w| &self.flat[w[0]..w[1]])
    }

    /// All values, entry after entry.
    pub fn flat(&self) -> &[f64] {
        &self.flat
    }

    /// Entry boundaries.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Fail with [`Error::ShapeMismatch`] unless both columns have identical entry lengths.
    ///
    /// `names` label the two columns in the error message.
    pub fn check_same_shape(&self, other: &JaggedCol, names: (&str, &str)) -> Result<()> {
        if self.n_entries() != other.n_entries() {
            return Err(Error::ShapeMismatch(format!(
                "{} has {} events, {} has {}",
                names.0,
                self.n_entries(),
                names.1,
                other.n_entries()
            )));
        }
        if self.offsets == other.offsets {
            return Ok(());
        }
        for row in 0..self.n_entries() {
            let (a, b) = (self.row_len(row), other.row_len(row));
            if a != b {
                return Err(Error::ShapeMismatch(format!(
                    "event {row}: {} has {a} entries, {} has {b}",
                    names.0, names.1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_layout() {
        let col = JaggedCol::from_rows(&[vec![1.0, 2.0], vec![], vec![3.0]]);
        assert_eq!(col.n_entries(), 3);
        assert_eq!(col.offsets(), &[0, 2, 2, 3]);
        assert_eq!(col.flat(), &[1.0, 2.0, 3.0]);
        assert_eq!(col.counts(), vec![2, 0, 1]);
        assert_eq!(col.row(1), &[] as &[f64]);
        assert_eq!(col.row_len(0), 2);
    }

    #[test]
    fn test_rows_iterates_in_order() {
        let col = JaggedCol::from_rows(&[&[1.0][..], &[2.0, 3.0][..]]);
        let rows: Vec<&[f64]> = col.rows().collect();
        assert_eq!(rows, vec![&[1.0][..], &[2.0, 3.0][..]]);
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(JaggedCol::from_parts(vec![1.0], vec![0, 1]).is_ok());
        assert!(JaggedCol::from_parts(vec![1.0], vec![]).is_err());
        assert!(JaggedCol::from_parts(vec![1.0], vec![1, 1]).is_err());
        assert!(JaggedCol::from_parts(vec![1.0, 2.0], vec![0, 2, 1]).is_err());
        assert!(JaggedCol::from_parts(vec![1.0, 2.0], vec![0, 1]).is_err());
    }

    #[test]
    fn test_empty_column() {
        let col = JaggedCol::default();
        assert!(col.is_empty());
        assert_eq!(col.rows().len(), 0);
    }

    #[test]
    fn test_shape_check_names_first_bad_event() {
        let a = JaggedCol::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        let b = JaggedCol::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let err = a.check_same_shape(&b, ("pt", "eta")).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
        assert!(err.to_string().contains("event 1"));

        let c = JaggedCol::from_rows(&[vec![1.0, 2.0]]);
        assert!(matches!(a.check_same_shape(&c, ("pt", "phi")), Err(Error::ShapeMismatch(_))));
        assert!(a.check_same_shape(&a.clone(), ("pt", "pt")).is_ok());
    }
}
