use std::ops::Index;

use crate::collections::CellMask;
use crate::error::{Error, Result};
use crate::puzzle::board::Board;
use crate::puzzle::placement::Placement;
use crate::puzzle::shape::Shape;
use crate::puzzle::{RegionId, RegionMap};

/// One chosen placement per region, indexed by region id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    placements: Vec<Placement>,
}

impl Assignment {
    pub fn new(mut placements: Vec<Placement>) -> Self {
        placements.sort_by_key(Placement::region);
        Self { placements }
    }

    pub fn placement(&self, region: RegionId) -> &Placement {
        &self.placements[region]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Every cell covered by some placement
    pub fn occupancy(&self) -> CellMask {
        self.placements
            .iter()
            .fold(CellMask::EMPTY, |mask, p| mask | p.mask())
    }

    /// Checks every rule of a solved puzzle from scratch, without trusting the
    /// masks cached by the solver
    pub fn verify(&self, regions: &RegionMap) -> Result<()> {
        if self.placements.len() != regions.region_count() {
            return Err(Error::invariant(format!(
                "{} placements for {} regions",
                self.placements.len(),
                regions.region_count()
            )));
        }
        let board = Board::new(regions.rows(), regions.cols());
        let mut occupancy = CellMask::EMPTY;
        for (region, p) in self.placements.iter().enumerate() {
            if p.region() != region {
                return Err(Error::invariant(format!(
                    "region {} has no placement",
                    region
                )));
            }
            if !regions.region_mask(region).is_superset(&p.mask()) {
                return Err(Error::invariant(format!(
                    "placement for region {} leaves its region",
                    region
                )));
            }
            if !is_family_shape(&board, p) {
                return Err(Error::invariant(format!(
                    "placement for region {} is not a {} tetromino",
                    region,
                    p.family()
                )));
            }
            if occupancy.intersects(&p.mask()) {
                return Err(Error::invariant(format!(
                    "placement for region {} overlaps another placement",
                    region
                )));
            }
            occupancy |= p.mask();
        }
        for block in 0..board.block_count() {
            if occupancy.is_superset(&board.block_mask(block)) {
                return Err(Error::invariant(format!(
                    "2x2 block at {:?} is filled",
                    board.coord(board.block_mask(block).iter().next().unwrap_or(0))
                )));
            }
        }
        for (i, a) in self.placements.iter().enumerate() {
            for b in &self.placements[i + 1..] {
                if a.family() == b.family() && touches(&board, a.mask(), b.mask()) {
                    return Err(Error::invariant(format!(
                        "regions {} and {} hold touching {} tetrominoes",
                        a.region(),
                        b.region(),
                        a.family()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Index<RegionId> for Assignment {
    type Output = Placement;

    fn index(&self, region: RegionId) -> &Placement {
        self.placement(region)
    }
}

fn is_family_shape(board: &Board, placement: &Placement) -> bool {
    if placement.mask().len() != 4 {
        return false;
    }
    let mut offsets = [(0, 0); 4];
    for (offset, cell) in offsets.iter_mut().zip(placement.mask().iter()) {
        let coord = board.coord(cell);
        *offset = (coord.row() as i32, coord.col() as i32);
    }
    placement.family().variants().contains(&Shape::new(offsets))
}

fn touches(board: &Board, a: CellMask, b: CellMask) -> bool {
    a.iter().any(|cell| board.neighbors(cell).intersects(&b))
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::puzzle::placement::{Placement, Placements};
    use crate::puzzle::shape::ShapeFamily;
    use crate::puzzle::solve::Assignment;
    use crate::puzzle::RegionMap;

    fn find<'a>(placements: &'a Placements, region: usize, cells: [usize; 4]) -> &'a Placement {
        placements[region]
            .iter()
            .find(|p| p.cells() == &cells)
            .unwrap()
    }

    fn assert_invalid(assignment: &Assignment, map: &RegionMap) {
        assert!(matches!(
            assignment.verify(map),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn valid() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&map).unwrap();
        let assignment = Assignment::new(vec![
            find(&placements, 1, [5, 6, 7, 8]).clone(),
            find(&placements, 0, [0, 1, 2, 3]).clone(),
        ]);
        assignment.verify(&map).unwrap();
        assert_eq!(0, assignment[0].region());
        assert_eq!(8, assignment.occupancy().len());
        assert_eq!(ShapeFamily::I, assignment[1].family());
        assert!(!assignment.occupancy().contains(4));
    }

    #[test]
    fn same_family_touching() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&map).unwrap();
        let assignment = Assignment::new(vec![
            placements[0][0].clone(),
            placements[1][0].clone(),
        ]);
        assert_invalid(&assignment, &map);
    }

    #[test]
    fn filled_block() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 1], vec![1, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&map).unwrap();
        let assignment = Assignment::new(vec![
            find(&placements, 0, [0, 1, 2, 3]).clone(),
            find(&placements, 1, [4, 7, 8, 9]).clone(),
        ]);
        assert_eq!(ShapeFamily::L, assignment[1].family());
        assert_invalid(&assignment, &map);
    }

    #[test]
    fn missing_region() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&map).unwrap();
        let assignment = Assignment::new(vec![placements[0][0].clone()]);
        assert_invalid(&assignment, &map);
    }

    #[test]
    fn placement_from_another_map() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 1, 1, 1, 1, 1]]).unwrap();
        let other = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&other).unwrap();
        // covers cells 1..=4, crossing into region 1 of `map`
        let assignment = Assignment::new(vec![
            find(&placements, 0, [1, 2, 3, 4]).clone(),
            find(&placements, 1, [5, 6, 7, 8]).clone(),
        ]);
        assert_invalid(&assignment, &map);
    }
}
