//! Nearest-neighbour walk over two ascending sequences.
//!
//! Both inputs must be sorted increasingly. The walk keeps a single cursor
//! into `table` that only ever moves forward, so the whole lookup is
//! `O(len(x) + len(table))`.

/// Nearest table element accepted for one query value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Nearest {
    /// Index into the table.
    pub index: usize,
    /// Absolute difference between the query value and `table[index]`.
    pub diff: f64,
}

/// Find, for every element of `x`, the closest element of `table` whose
/// absolute difference is within `tolerance[i]` (inclusive).
///
/// When a query value is equidistant to two neighbours, the lower table
/// index wins. `tolerance.len()` must equal `x.len()`; the caller checks it.
pub(crate) fn nearest_within(x: &[f64], table: &[f64], tolerance: &[f64]) -> Vec<Option<Nearest>> {
    if table.is_empty() {
        return vec![None; x.len()];
    }

    let last = table.len() - 1;
    let mut cursor = 0usize;

    x.iter()
        .zip(tolerance)
        .map(|(&value, &tol)| {
            // Move to the last table value not greater than `value`.
            while cursor < last && table[cursor + 1] <= value {
                cursor += 1;
            }

            let mut best = Nearest {
                index: cursor,
                diff: (value - table[cursor]).abs(),
            };
            if cursor < last {
                let upper = (value - table[cursor + 1]).abs();
                if upper < best.diff {
                    best = Nearest {
                        index: cursor + 1,
                        diff: upper,
                    };
                }
            }

            (best.diff <= tol).then_some(best)
        })
        .collect()
}
