//! Parse region maps from text
//!
//! The format is a header line `rows cols` followed by `rows` lines of
//! whitespace-separated region ids. Anything after the last row (such as a
//! printed solution) is ignored.

use crate::collections::cell_mask::MAX_CELLS;
use crate::collections::Grid;
use crate::error::{ParseError, ParseErrorKind};
use crate::puzzle::{RegionId, RegionMap};

const UNEXPECTED_END: ParseError = ParseError::from_kind(ParseErrorKind::UnexpectedEnd);

pub(crate) fn parse_region_map(s: &str) -> Result<RegionMap, ParseError> {
    let mut lines = s
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .skip_while(|(_, line)| line.is_empty());

    let (header_line, header) = lines.next().ok_or(UNEXPECTED_END)?;
    let (rows, cols) = parse_dimensions(header, header_line)?;

    let mut elements: Vec<RegionId> = Vec::with_capacity(rows * cols);
    for _ in 0..rows {
        let (line_number, line) = lines.next().ok_or(UNEXPECTED_END)?;
        let start = elements.len();
        for token in line.split_whitespace() {
            let id = token
                .parse::<RegionId>()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRegionId, token, line_number))?;
            elements.push(id);
        }
        if elements.len() - start != cols {
            return Err(ParseError::at_line(ParseErrorKind::RowLength, line_number));
        }
    }

    let grid_rows = elements.chunks(cols).map(<[RegionId]>::to_vec).collect();
    let grid = Grid::from_rows(grid_rows)
        .map_err(|e| ParseError::new(ParseErrorKind::InvalidRegionMap, e, header_line))?;
    RegionMap::new(grid).map_err(|e| ParseError::new(ParseErrorKind::InvalidRegionMap, e, header_line))
}

fn parse_dimensions(header: &str, line: usize) -> Result<(usize, usize), ParseError> {
    let mut tokens = header.split_whitespace();
    let mut dimension = || -> Result<usize, ParseError> {
        let token = tokens
            .next()
            .ok_or_else(|| ParseError::at_line(ParseErrorKind::InvalidDimensions, line))?;
        match token.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ParseError::new(ParseErrorKind::InvalidDimensions, token, line)),
        }
    };
    let rows = dimension()?;
    let cols = dimension()?;
    if let Some(token) = tokens.next() {
        return Err(ParseError::new(ParseErrorKind::UnexpectedToken, token, line));
    }
    if rows.checked_mul(cols).map_or(true, |cells| cells > MAX_CELLS) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidDimensions,
            format!("{}x{}", rows, cols),
            line,
        ));
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use crate::error::{ParseError, ParseErrorKind};
    use crate::puzzle::parse::parse_region_map;

    #[test]
    fn parse() {
        let map = parse_region_map("\n2 3\n0 0 1\n 2 2 1 \n\nL L . \n").unwrap();
        assert_eq!(2, map.rows());
        assert_eq!(3, map.cols());
        assert_eq!(3, map.region_count());
        assert_eq!(2, map.region_of(3));
    }

    #[test]
    fn unexpected_end() {
        let err = parse_region_map("2 3\n0 0 1\n").unwrap_err();
        assert_eq!(ParseErrorKind::UnexpectedEnd, err.kind());
    }

    #[test]
    fn invalid_region_id() {
        let err = parse_region_map("1 3\n0 x 0\n").unwrap_err();
        assert_eq!(ParseError::new(ParseErrorKind::InvalidRegionId, "x", 2), err);
    }

    #[test]
    fn row_length() {
        let err = parse_region_map("2 2\n0 0 0\n0 0\n").unwrap_err();
        assert_eq!(ParseError::at_line(ParseErrorKind::RowLength, 2), err);
    }

    #[test]
    fn invalid_dimensions() {
        let err = parse_region_map("0 3\n").unwrap_err();
        assert_eq!(ParseErrorKind::InvalidDimensions, err.kind());
        let err = parse_region_map("20 20\n").unwrap_err();
        assert_eq!(ParseErrorKind::InvalidDimensions, err.kind());
        let err = parse_region_map("4294967296 4294967296\n").unwrap_err();
        assert_eq!(ParseErrorKind::InvalidDimensions, err.kind());
        let err = parse_region_map("2 3 4\n").unwrap_err();
        assert_eq!(ParseErrorKind::UnexpectedToken, err.kind());
    }

    #[test]
    fn disconnected_region() {
        let err = parse_region_map("1 3\n0 1 0\n").unwrap_err();
        assert_eq!(ParseErrorKind::InvalidRegionMap, err.kind());
    }

    #[test]
    fn huge_region_id() {
        let err = parse_region_map("1 4\n0 0 0 18446744073709551615\n").unwrap_err();
        assert_eq!(ParseErrorKind::InvalidRegionMap, err.kind());
    }
}
