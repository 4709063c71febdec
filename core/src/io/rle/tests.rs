use proptest::*;

use super::*;
use crate::grid::Grid;
use crate::io::LoadError;
use crate::sim::rule::{Rule, LIFE};

const GLIDER_CELLS: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

#[test]
fn test_rle_item() {
    for &(s, item) in &[
        ("b", RleItem::Dead),
        ("o", RleItem::Alive),
        ("$", RleItem::NextRow),
        ("!", RleItem::End),
    ] {
        assert_eq!(s, item.to_string());
        assert_eq!(Ok(item), s.parse());
    }
    assert_eq!(Err(RleError::UnknownSymbol('x')), "x".parse::<RleItem>());
    assert_eq!(Err(RleError::ExpectedItem), "".parse::<RleItem>());
}

#[test]
fn test_rle_run() {
    let run = |count, item| RleRun { count, item };
    assert_eq!(Ok(run(1, RleItem::Alive)), "o".parse());
    assert_eq!(Ok(run(12, RleItem::Dead)), "12b".parse());
    assert_eq!(Ok(run(3, RleItem::NextRow)), "3$".parse());
    assert_eq!(
        Err(RleError::InvalidCount("0o".to_owned())),
        "0o".parse::<RleRun>(),
    );
    assert!(matches!(
        "99999999999999999999999o".parse::<RleRun>(),
        Err(RleError::InvalidCount(_)),
    ));

    assert_eq!("o", run(1, RleItem::Alive).to_string());
    assert_eq!("12b", run(12, RleItem::Dead).to_string());
    assert_eq!(3, run(12, RleItem::Dead).str_len());
}

#[test]
fn test_rle_header() {
    let header: RleHeader = "x = 5, y = 7, rule = B36/S23".parse().unwrap();
    assert_eq!((5, 7), (header.width, header.height));
    assert_eq!(Some("B36/S23"), header.rule.as_deref());
    assert_eq!("x = 5, y = 7, rule = B36/S23", header.to_string());

    // Unknown parameters are ignored.
    let header: RleHeader = "x=2,y=3,foo=bar".parse().unwrap();
    assert_eq!((2, 3, None), (header.width, header.height, header.rule));

    assert!(matches!(
        "x = 5".parse::<RleHeader>(),
        Err(RleError::InvalidSize(_)),
    ));
    assert!(matches!(
        "x = -1, y = 2".parse::<RleHeader>(),
        Err(RleError::InvalidSize(_)),
    ));
}

// Load and save a glider.
#[test]
fn test_rle_glider() {
    let pattern: Pattern = "
        # Comment
        #N Glider
        x = 3, y = 3, rule = Life
        # more
        bo$2b
        o$3o!

        #Another Comment
    "
    .parse()
    .expect("Failed to import RLE");
    assert_eq!(LIFE, pattern.rule);
    assert_eq!((3, 3), (pattern.width, pattern.height));

    let grid = pattern.to_grid(10, 8, (4, 2)).unwrap();
    println!("imported\n{}", grid);
    assert_eq!(5, grid.population());
    for &(x, y) in &GLIDER_CELLS {
        assert!(grid.get(x + 4, y + 2));
    }

    // Encoding a grid that holds only the glider gives the canonical RLE.
    let glider = Grid::with_live_cells(3, 3, GLIDER_CELLS.iter().copied());
    let exported = glider.to_rle_string(&LIFE);
    assert_eq!(
        "\
x = 3, y = 3, rule = B3/S23
bo$2bo$3o!
",
        exported,
    );
    let reimported: Pattern = exported.parse().expect("Failed to reimport RLE output");
    assert_eq!(grid, reimported.to_grid(10, 8, (4, 2)).unwrap());
}

#[test]
fn test_rle_comments() {
    let rle: Rle = "#N Block\n#C A still life.\nx = 2, y = 2\n2o$2o!"
        .parse()
        .unwrap();
    assert_eq!("#N Block\n#C A still life.\n", rle.comments);
    assert_eq!(
        "#N Block\n#C A still life.\nx = 2, y = 2\n2o$2o!\n",
        rle.to_string(),
    );
}

#[test]
fn test_rle_missing_header() {
    assert_eq!(Err(RleError::MissingHeader), "bo$2bo$3o!".parse::<Rle>());
    assert!(matches!(
        "#C nothing here".parse::<Pattern>(),
        Err(LoadError::MalformedHeader(RleError::MissingHeader)),
    ));
}

#[test]
fn test_rle_rule_fallback() {
    let pattern: Pattern = "x = 1, y = 1\no!".parse().unwrap();
    assert_eq!(LIFE, pattern.rule);
    let pattern: Pattern = "x = 1, y = 1, rule = B3/S23/Gen4\no!".parse().unwrap();
    assert_eq!(LIFE, pattern.rule);
    let pattern: Pattern = "x = 1, y = 1, rule = b36s23\no!".parse().unwrap();
    assert_eq!(Rule::new(&[3, 6], &[2, 3]), pattern.rule);
}

#[test]
fn test_rle_multiple_rows() {
    // `3$` skips two entirely empty rows.
    let pattern: Pattern = "x = 2, y = 4\no3$bo!".parse().unwrap();
    let grid = pattern.to_grid(2, 4, (0, 0)).unwrap();
    assert_eq!(
        vec![(0, 0), (1, 3)],
        grid.live_cells().collect::<Vec<_>>(),
    );
}

#[test]
fn test_rle_trailing_text() {
    // Anything after `!` is ignored.
    let pattern: Pattern = "x = 2, y = 1\n2o!xyz 3o".parse().unwrap();
    assert_eq!(2, pattern.to_grid(2, 1, (0, 0)).unwrap().population());

    // So is anything after the first thing that isn't a run.
    let pattern: Pattern = "x = 3, y = 1\n2o?o!".parse().unwrap();
    assert_eq!(2, pattern.to_grid(3, 1, (0, 0)).unwrap().population());
}

#[test]
fn test_rle_zero_count() {
    assert!(matches!(
        "x = 2, y = 1\n0o!".parse::<Pattern>(),
        Err(LoadError::MalformedBody(RleError::InvalidCount(_))),
    ));
}

#[test]
fn test_rle_cell_outside_pattern() {
    let pattern: Pattern = "x = 2, y = 2\n3o!".parse().unwrap();
    assert!(matches!(
        pattern.to_grid(10, 10, (0, 0)),
        Err(LoadError::MalformedBody(RleError::CellOutsidePattern {
            x: 2,
            y: 0,
            width: 2,
            height: 2,
        })),
    ));

    let pattern: Pattern = "x = 2, y = 2\no2$o!".parse().unwrap();
    assert!(matches!(
        pattern.to_grid(10, 10, (0, 0)),
        Err(LoadError::MalformedBody(RleError::CellOutsidePattern { y: 2, .. })),
    ));
}

#[test]
fn test_rle_size_mismatch() {
    let pattern: Pattern = "x = 3, y = 3\nbo$2bo$3o!".parse().unwrap();
    assert!(matches!(
        pattern.to_grid(4, 4, (2, 0)),
        Err(LoadError::SizeMismatch {
            pattern: (3, 3),
            grid: (4, 4),
            offset: (2, 0),
        }),
    ));
    assert!(pattern.to_grid(4, 4, (1, 1)).is_ok());
    assert!(pattern.centered_offset(2, 10).is_err());
    assert_eq!((3, 1), pattern.centered_offset(10, 6).unwrap());
}

#[test]
fn test_rle_omits_trailing_dead_cells() {
    let grid = Grid::with_live_cells(5, 5, vec![(1, 1)]);
    let rle = Rle::from_grid(&grid, &LIFE);
    assert_eq!((5, 5), (rle.header.width, rle.header.height));
    assert_eq!("x = 5, y = 5, rule = B3/S23\n$bo!\n", rle.to_string());

    let empty = Grid::new(4, 2);
    assert_eq!("x = 4, y = 2, rule = B3/S23\n!\n", empty.to_rle_string(&LIFE));
}

#[test]
fn test_rle_line_length() {
    // Alternating cells can't be compressed, so the body must wrap.
    let grid = Grid::with_live_cells(200, 1, (0..200).step_by(2).map(|x| (x, 0)));
    let exported = grid.to_rle_string(&LIFE);
    let body_lines: Vec<&str> = exported.lines().skip(1).collect();
    assert!(body_lines.len() > 1);
    assert!(body_lines.iter().all(|line| line.len() <= MAX_LINE_LEN));

    let reimported: Pattern = exported.parse().unwrap();
    assert_eq!(grid, reimported.to_grid(200, 1, (0, 0)).unwrap());
}

#[test]
fn test_empty_rle() {
    let pattern: Pattern = "x = 0, y = 0\n!".parse().expect("Failed to import RLE");
    assert!(pattern.to_grid(4, 4, (2, 2)).unwrap().is_empty());
    assert_eq!((0, 0), pattern.centered_offset(0, 0).unwrap());
}

proptest! {
    /// Tests that the RLE parser fails correctly and does not panic for short
    /// strings.
    #[test]
    fn test_rle_fail(s in ".{0,6}") {
        // This should not panic.
        if let Ok(item) = s.parse::<RleItem>() {
            // If it successfully parsed, we should be able to get back the
            // original string.
            assert_eq!(s, item.to_string());
        }
        let _ = s.parse::<Rle>();
    }

    /// Tests that loading a pattern with an arbitrary body never panics, and
    /// that every cell it sets lies inside the declared box.
    #[test]
    fn test_rle_body_never_panics(
        width in 0_usize..6,
        height in 0_usize..6,
        body in "[0-9bo$! x]{0,24}",
    ) {
        let text = format!("x = {}, y = {}\n{}", width, height, body);
        if let Ok(pattern) = text.parse::<Pattern>() {
            if let Ok(grid) = pattern.to_grid(8, 8, (1, 1)) {
                for (x, y) in grid.live_cells() {
                    prop_assert!((1..1 + width).contains(&x));
                    prop_assert!((1..1 + height).contains(&y));
                }
            }
        }
    }
}
