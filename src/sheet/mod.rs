// src/sheet/mod.rs
//
// First-sheet decoding into row records.
// - xlsx.rs turns the container into a sparse grid of cell text.
// - this module turns the grid into records keyed by the header row.

pub mod xlsx;

use std::collections::HashMap;

use crate::error::DecodeError;

/// One decoded data row: column name → cell text, in header order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowRecord {
    cells: Vec<(String, String)>,
}

impl RowRecord {
    pub fn new() -> Self { Self { cells: Vec::new() } }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self { cells: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Value under `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v.as_str())
    }

    /// First non-empty value among `aliases`, else "".
    pub fn lookup<S: AsRef<str>>(&self, aliases: &[S]) -> &str {
        aliases
            .iter()
            .filter_map(|a| self.get(a.as_ref()))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

/// Anything that can turn container bytes into the first sheet's rows.
/// `is_ready` lets a loader wait for decoders that come up lazily.
pub trait SheetDecoder: Send + Sync {
    fn is_ready(&self) -> bool { true }
    fn decode_first_sheet(&self, bytes: &[u8]) -> Result<Vec<RowRecord>, DecodeError>;
}

/// The built-in OOXML (.xlsx) decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct XlsxDecoder;

impl SheetDecoder for XlsxDecoder {
    fn decode_first_sheet(&self, bytes: &[u8]) -> Result<Vec<RowRecord>, DecodeError> {
        let grid = xlsx::read_first_sheet(bytes)?;
        Ok(records_from_grid(&grid))
    }
}

/// Sparse grid: (row, cells) in ascending row order, each row's cells as
/// (col, text) in ascending column order. Indices are 0-based.
pub type Grid = Vec<(u32, Vec<(u32, String)>)>;

/// Header row = first row with any non-blank cell.
/// Blank header cells become `__EMPTY`, `__EMPTY_1`, …; repeated names get
/// `_1`, `_2`, … Rows with only blank cells are dropped. Every record
/// carries every column, absent cells as "".
pub fn records_from_grid(grid: &Grid) -> Vec<RowRecord> {
    let Some(header_pos) = grid
        .iter()
        .position(|(_, cells)| cells.iter().any(|(_, v)| !v.trim().is_empty()))
    else {
        return Vec::new();
    };

    let width = grid
        .iter()
        .skip(header_pos)
        .flat_map(|(_, cells)| cells.iter().map(|(c, _)| *c + 1))
        .max()
        .unwrap_or(0) as usize;

    let header_cells = &grid[header_pos].1;
    let headers = header_names(header_cells, width);

    let mut out = Vec::new();
    for (_, cells) in grid.iter().skip(header_pos + 1) {
        let mut dense = vec![s!(); width];
        for (c, v) in cells {
            if let Some(slot) = dense.get_mut(*c as usize) {
                *slot = v.clone();
            }
        }
        let rec = RowRecord::from_pairs(headers.iter().cloned().zip(dense));
        if !rec.is_blank() {
            out.push(rec);
        }
    }
    out
}

fn header_names(cells: &[(u32, String)], width: usize) -> Vec<String> {
    let mut raw = vec![s!(); width];
    for (c, v) in cells {
        if let Some(slot) = raw.get_mut(*c as usize) {
            *slot = s!(v.trim());
        }
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .map(|name| {
            let base = if name.is_empty() { s!("__EMPTY") } else { name };
            let n = seen.entry(base.clone()).or_insert(0);
            let out = if *n == 0 { base.clone() } else { format!("{}_{}", base, n) };
            *n += 1;
            out
        })
        .collect()
}
