//! Contingency Table
//!
//! The 2x2 table the exact test runs on, laid out row-major as
//!
//! ```text
//! a b
//! c d
//! ```
use crate::errors::FisherError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated 2x2 contingency table.
///
/// Counts are stored unsigned. Every constructor, deserialization included,
/// rejects negative cells, empty tables and totals that do not fit in a `u64`,
/// so marginals and the grand total never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTable")]
pub struct ContingencyTable {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

/// Serialized form of a table before validation.
#[derive(Deserialize)]
struct UncheckedTable {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl TryFrom<UncheckedTable> for ContingencyTable {
    type Error = FisherError;

    fn try_from(t: UncheckedTable) -> Result<Self, Self::Error> {
        Self::from_counts(t.a, t.b, t.c, t.d)
    }
}

impl ContingencyTable {
    /// Build a table from four signed counts.
    ///
    /// * `a`, `b` - First row.
    /// * `c`, `d` - Second row.
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> Result<Self, FisherError> {
        let cell = |name: &str, v: i64| -> Result<u64, FisherError> {
            u64::try_from(v)
                .map_err(|_| FisherError::InvalidInput(format!("cell {} has negative count {}", name, v)))
        };
        Self::from_counts(cell("a", a)?, cell("b", b)?, cell("c", c)?, cell("d", d)?)
    }

    /// Build a table from four unsigned counts.
    pub fn from_counts(a: u64, b: u64, c: u64, d: u64) -> Result<Self, FisherError> {
        let total = a
            .checked_add(b)
            .and_then(|s| s.checked_add(c))
            .and_then(|s| s.checked_add(d))
            .ok_or_else(|| {
                FisherError::InvalidInput(format!("grand total of [{}, {}, {}, {}] overflows", a, b, c, d))
            })?;
        if total == 0 {
            return Err(FisherError::InvalidInput(String::from(
                "all cells are zero, an empty table carries no information",
            )));
        }
        Ok(ContingencyTable { a, b, c, d })
    }

    /// Build a table from cells in row-major order `[a, b, c, d]`.
    pub fn from_cells(cells: [i64; 4]) -> Result<Self, FisherError> {
        let [a, b, c, d] = cells;
        Self::new(a, b, c, d)
    }

    pub fn a(&self) -> u64 {
        self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn c(&self) -> u64 {
        self.c
    }

    pub fn d(&self) -> u64 {
        self.d
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> [u64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn row_sums(&self) -> (u64, u64) {
        (self.a + self.b, self.c + self.d)
    }

    pub fn col_sums(&self) -> (u64, u64) {
        (self.a + self.c, self.b + self.d)
    }

    pub fn total(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }

    /// Range of values cell `a` can take with all margins held fixed.
    pub fn support(&self) -> (u64, u64) {
        let (r1, _) = self.row_sums();
        let (c1, c2) = self.col_sums();
        (r1.saturating_sub(c2), r1.min(c1))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        ContingencyTable {
            a: self.a,
            b: self.c,
            c: self.b,
            d: self.d,
        }
    }

    /// Swap the two rows.
    pub fn swap_rows(&self) -> Self {
        ContingencyTable {
            a: self.c,
            b: self.d,
            c: self.a,
            d: self.b,
        }
    }

    /// Swap the two columns.
    pub fn swap_columns(&self) -> Self {
        ContingencyTable {
            a: self.b,
            b: self.a,
            c: self.d,
            d: self.c,
        }
    }
}

impl TryFrom<[i64; 4]> for ContingencyTable {
    type Error = FisherError;

    fn try_from(cells: [i64; 4]) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}, {}], [{}, {}]]", self.a, self.b, self.c, self.d)
    }
}
