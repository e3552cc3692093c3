use std::collections::HashMap;

/// A run of rows: `(start, None)` for a single row, `(start, Some(end))`
/// for the inclusive span `start..=end`.
pub(crate) type RowRange = (usize, Option<usize>);

/// Iterate the row positions covered by a range.
pub(crate) fn range_rows(range: RowRange) -> impl Iterator<Item = usize> {
    let (start, end) = range;
    start..=end.unwrap_or(start)
}

/// Precomputed map from constant key-column tuples to the row runs sharing
/// that key. Key columns are the `in` columns whose every cell compiled to a
/// constant; keys are the canonical text of those constants.
#[derive(Debug, Clone)]
pub(crate) struct Index {
    pub(crate) key_columns: Vec<usize>,
    pub(crate) hash: HashMap<Vec<String>, Vec<RowRange>>,
}

impl Index {
    /// Build from per-row key tuples, in row order. Contiguous rows with
    /// identical keys collapse into one range.
    pub(crate) fn build(key_columns: Vec<usize>, row_keys: Vec<Vec<String>>) -> Self {
        let mut hash: HashMap<Vec<String>, Vec<RowRange>> = HashMap::new();
        let mut run: Option<(Vec<String>, usize, usize)> = None;

        for (row, key) in row_keys.into_iter().enumerate() {
            match &mut run {
                Some((current, _, last)) if *current == key => *last = row,
                _ => {
                    if let Some(done) = run.take() {
                        Self::close_run(&mut hash, done);
                    }
                    run = Some((key, row, row));
                }
            }
        }
        if let Some(done) = run.take() {
            Self::close_run(&mut hash, done);
        }

        Self { key_columns, hash }
    }

    fn close_run(
        hash: &mut HashMap<Vec<String>, Vec<RowRange>>,
        (key, start, last): (Vec<String>, usize, usize),
    ) {
        let range = if start == last {
            (start, None)
        } else {
            (start, Some(last))
        };
        hash.entry(key).or_default().push(range);
    }

    /// The row ranges for a key tuple, in row order; `None` when the key is
    /// absent from the table.
    pub(crate) fn ranges(&self, key: &[String]) -> Option<&[RowRange]> {
        self.hash.get(key).map(Vec::as_slice)
    }
}
