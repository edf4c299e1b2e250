//! Tetromino shape families and their rotation variants

use std::fmt;

use once_cell::sync::Lazy;

/// A (row, column) offset of one cell of a shape
pub type Offset = (i32, i32);

/// The four tetromino families of a LITS puzzle. Mirror images belong to the same family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeFamily {
    L,
    I,
    T,
    S,
}

impl ShapeFamily {
    /// Every family, in the order placements are enumerated
    pub const ALL: [ShapeFamily; 4] = [ShapeFamily::I, ShapeFamily::L, ShapeFamily::T, ShapeFamily::S];

    /// A dense index for per-family tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> char {
        match self {
            ShapeFamily::L => 'L',
            ShapeFamily::I => 'I',
            ShapeFamily::T => 'T',
            ShapeFamily::S => 'S',
        }
    }

    pub fn from_label(label: char) -> Option<Self> {
        match label {
            'L' => Some(ShapeFamily::L),
            'I' => Some(ShapeFamily::I),
            'T' => Some(ShapeFamily::T),
            'S' => Some(ShapeFamily::S),
            _ => None,
        }
    }

    /// All distinct rotations of the family's shapes, mirror images included
    pub fn variants(self) -> &'static [Shape] {
        &FAMILY_VARIANTS[self.index()]
    }
}

impl fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A set of four cell offsets, normalized so the minimum row and column are 0
/// and sorted so that equal sets compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape([Offset; 4]);

impl Shape {
    pub fn new(cells: [Offset; 4]) -> Self {
        let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
        let mut cells = cells;
        for cell in &mut cells {
            *cell = (cell.0 - min_r, cell.1 - min_c);
        }
        cells.sort_unstable();
        Self(cells)
    }

    pub fn cells(&self) -> &[Offset; 4] {
        &self.0
    }

    /// Rotates the shape a quarter turn
    pub fn rotated(&self) -> Self {
        let mut cells = self.0;
        for cell in &mut cells {
            *cell = (cell.1, -cell.0);
        }
        Self::new(cells)
    }
}

/// Every distinct rotation of a shape, starting with the shape itself
pub fn all_rotations(shape: Shape) -> Vec<Shape> {
    let mut rotations = Vec::with_capacity(4);
    let mut current = shape;
    for _ in 0..4 {
        if !rotations.contains(&current) {
            rotations.push(current);
        }
        current = current.rotated();
    }
    rotations
}

/// Canonical shapes. J and Z are the mirror images of L and S and share their family.
const BASE_SHAPES: [(ShapeFamily, [Offset; 4]); 6] = [
    (ShapeFamily::I, [(0, 0), (0, 1), (0, 2), (0, 3)]),
    (ShapeFamily::L, [(0, 0), (1, 0), (2, 0), (2, 1)]),
    (ShapeFamily::L, [(0, 1), (1, 1), (2, 0), (2, 1)]),
    (ShapeFamily::T, [(0, 0), (0, 1), (0, 2), (1, 1)]),
    (ShapeFamily::S, [(0, 1), (0, 2), (1, 0), (1, 1)]),
    (ShapeFamily::S, [(0, 0), (0, 1), (1, 1), (1, 2)]),
];

static FAMILY_VARIANTS: Lazy<[Vec<Shape>; 4]> = Lazy::new(|| {
    let mut variants: [Vec<Shape>; 4] = Default::default();
    for &(family, cells) in &BASE_SHAPES {
        let family_variants = &mut variants[family.index()];
        for rotation in all_rotations(Shape::new(cells)) {
            if !family_variants.contains(&rotation) {
                family_variants.push(rotation);
            }
        }
    }
    variants
});
