mod coord;

pub use self::coord::Coord;

use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, Index, IndexMut};

use super::CellId;

/// A value that can be converted to a flat cell index given the number of columns
pub trait AsCellId: Copy {
    fn as_cell_id(self, cols: usize) -> CellId;
}

impl AsCellId for CellId {
    fn as_cell_id(self, _cols: usize) -> CellId {
        self
    }
}

impl AsCellId for Coord {
    fn as_cell_id(self, cols: usize) -> CellId {
        self.row() * cols + self.col()
    }
}

/// A container of elements represented in a rectangular grid
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a new `Grid` of the specified dimensions and fill with a specified value
    pub fn with_value(rows: usize, cols: usize, val: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            elements: vec![val; rows * cols],
        }
    }

    /// Creates a grid from its rows. Fails if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, RaggedRows> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut elements = Vec::with_capacity(row_count * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            elements.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            elements,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns an iterator over the rows of the grid
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.cols.max(1))
    }
}

impl<T> Deref for Grid<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T, I: AsCellId> Index<I> for Grid<T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.elements[index.as_cell_id(self.cols)]
    }
}

impl<T, I: AsCellId> IndexMut<I> for Grid<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.elements[index.as_cell_id(self.cols)]
    }
}

impl<T> Display for Grid<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = self
            .elements
            .iter()
            .map(|e| e.to_string().len())
            .max()
            .unwrap_or(0);
        for row in self.iter_rows() {
            for (i, element) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>1$}", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter_rows()).finish()
    }
}

#[derive(Debug, PartialEq)]
pub struct RaggedRows {
    row: usize,
    expected: usize,
    found: usize,
}

impl Display for RaggedRows {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has {} elements, expected {}",
            self.row, self.found, self.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::grid::{Coord, Grid, RaggedRows};

    #[test]
    fn from_rows() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(2, grid.rows());
        assert_eq!(3, grid.cols());
        assert_eq!(6, grid[Coord::new(1, 2)]);
        assert_eq!(4, grid[3]);
    }

    #[test]
    fn from_ragged_rows() {
        assert_eq!(
            Err(RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            }),
            Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5]])
        );
    }

    #[test]
    fn display() {
        let grid = Grid::from_rows(vec![vec![0, 10], vec![2, 3]]).unwrap();
        assert_eq!(" 0 10\n 2  3\n", grid.to_string());
    }
}
