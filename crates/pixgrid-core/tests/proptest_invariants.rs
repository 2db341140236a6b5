//! Property-based invariant tests for pixgrid-core.
//!
//! These tests verify invariants that must hold for **any** input:
//!
//! 1. Hex/HSL conversion round-trips within one unit per channel.
//! 2. Repainting a cell with its current color records nothing.
//! 3. Undo and redo are symmetric over arbitrary paint sequences.
//! 4. A fresh paint after undo empties the redo stack.
//! 5. A fill is undone as a single step.
//! 6. Shading keeps lightness inside `[0, 100]`.
//! 7. Rebuilding the grid clears all history.

use pixgrid_core::{
    BoardConfig, CellId, Command, Grid, NullRenderer, Rgb, Shade, StepOutcome, hex_to_hsl,
    hsl_to_hex, shade_color,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

/// Small palette so that repeated colors (and therefore no-op paints) are
/// common.
fn palette_color() -> impl Strategy<Value = Rgb> {
    prop_oneof![
        Just(Rgb::WHITE),
        Just(Rgb::BLACK),
        Just(Rgb::new(255, 0, 0)),
        Just(Rgb::new(0, 255, 0)),
        rgb(),
    ]
}

/// Grid side plus a sequence of (cell index, color) paints inside it.
fn side_and_paints() -> impl Strategy<Value = (usize, Vec<(usize, Rgb)>)> {
    (1usize..=6).prop_flat_map(|side| {
        let len = side * side;
        (
            Just(side),
            proptest::collection::vec((0..len, palette_color()), 0..40),
        )
    })
}

fn grid(side: usize) -> Grid {
    Grid::build(BoardConfig::default(), side)
}

fn paint_all(grid: &mut Grid, paints: &[(usize, Rgb)]) {
    for &(index, color) in paints {
        grid.apply_color(CellId::new(index), color, &mut NullRenderer)
            .expect("index drawn inside the grid");
    }
}

fn invert(color: Rgb) -> Rgb {
    Rgb::new(!color.r, !color.g, !color.b)
}

fn channel_delta(a: Rgb, b: Rgb) -> u8 {
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

// ── Color codec ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn hex_hsl_round_trip(color in rgb()) {
        let hsl = hex_to_hsl(&color.to_hex()).unwrap();
        let back: Rgb = hsl_to_hex(hsl.h, hsl.s, hsl.l).parse().unwrap();
        prop_assert!(channel_delta(color, back) <= 1, "{} -> {:?} -> {}", color, hsl, back);
    }

    #[test]
    fn hsl_components_in_range(color in rgb()) {
        let hsl = color.to_hsl();
        prop_assert!((0.0..360.0).contains(&hsl.h), "hue {}", hsl.h);
        prop_assert!((0.0..=100.0).contains(&hsl.s), "saturation {}", hsl.s);
        prop_assert!((0.0..=100.0).contains(&hsl.l), "lightness {}", hsl.l);
        prop_assert!(hsl.hue_degrees() < 360);
    }

    #[test]
    fn hex_forms_parse_case_insensitively(color in rgb()) {
        let upper = color.to_hex().to_ascii_uppercase();
        prop_assert_eq!(upper.parse::<Rgb>().unwrap(), color);

        let short = format!("#{:x}{:x}{:x}", color.r >> 4, color.g >> 4, color.b >> 4);
        let expanded: Rgb = short.parse().unwrap();
        prop_assert_eq!(expanded.r, (color.r >> 4) * 17);
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,12}") {
        let _ = text.parse::<Rgb>();
        let _ = Command::parse(&text);
    }
}

// ── History ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn repainting_same_color_is_suppressed(index in 0usize..16, color in rgb()) {
        let mut g = grid(4);
        let id = CellId::new(index);
        g.apply_color(id, color, &mut NullRenderer).unwrap();
        let first = g.ledger().undo_len();
        g.apply_color(id, color, &mut NullRenderer).unwrap();
        prop_assert_eq!(g.ledger().undo_len(), first);
        prop_assert!(first <= 1);
    }

    #[test]
    fn undo_redo_symmetry((side, paints) in side_and_paints()) {
        let mut g = grid(side);
        let before = g.colors();
        paint_all(&mut g, &paints);
        let after = g.colors();
        let recorded = g.ledger().undo_len();
        prop_assert!(recorded <= paints.len());

        for _ in 0..recorded {
            prop_assert_eq!(g.undo(&mut NullRenderer).unwrap().cells(), 1);
        }
        prop_assert_eq!(g.colors(), before);
        prop_assert_eq!(g.ledger().redo_len(), recorded);
        prop_assert_eq!(g.undo(&mut NullRenderer).unwrap(), StepOutcome::Empty);

        for _ in 0..recorded {
            prop_assert_eq!(g.redo(&mut NullRenderer).unwrap().cells(), 1);
        }
        prop_assert_eq!(g.colors(), after);
        prop_assert_eq!(g.ledger().redo_len(), 0);
        prop_assert_eq!(g.redo(&mut NullRenderer).unwrap(), StepOutcome::Empty);
    }

    #[test]
    fn fresh_paint_invalidates_redo(
        (side, paints) in side_and_paints(),
        undos in 1usize..10,
        target in 0usize..36,
    ) {
        let mut g = grid(side);
        paint_all(&mut g, &paints);
        for _ in 0..undos {
            let _ = g.undo(&mut NullRenderer).unwrap();
        }
        let id = CellId::new(target % g.len());
        let current = g.cell(id).unwrap().color();
        g.apply_color(id, invert(current), &mut NullRenderer).unwrap();
        prop_assert_eq!(g.ledger().redo_len(), 0);
        prop_assert!(g.ledger().can_undo());
    }

    #[test]
    fn fill_undoes_atomically(
        (side, paints) in side_and_paints(),
        fill in rgb(),
        refill in proptest::option::of(rgb()),
    ) {
        let mut g = grid(side);
        paint_all(&mut g, &paints);
        let before_fill = g.colors();
        let depth = g.ledger().undo_len();

        g.fill_all(fill, &mut NullRenderer);
        let after_fill = g.colors();
        if let Some(second) = refill {
            g.fill_all(second, &mut NullRenderer);
            let outcome = g.undo(&mut NullRenderer).unwrap();
            prop_assert_eq!(outcome.cells(), g.len());
            prop_assert_eq!(g.colors(), after_fill.clone());
        }

        let outcome = g.undo(&mut NullRenderer).unwrap();
        prop_assert_eq!(outcome, StepOutcome::Applied { cells: g.len(), grouped: true });
        prop_assert_eq!(g.colors(), before_fill);
        prop_assert_eq!(g.ledger().undo_len(), depth);

        let outcome = g.redo(&mut NullRenderer).unwrap();
        prop_assert_eq!(outcome.cells(), g.len());
        prop_assert_eq!(g.colors(), after_fill);
    }

    #[test]
    fn rebuild_clears_history(
        (side, paints) in side_and_paints(),
        undos in 0usize..5,
        new_side in 0usize..300,
    ) {
        let mut g = grid(side);
        paint_all(&mut g, &paints);
        for _ in 0..undos {
            let _ = g.undo(&mut NullRenderer).unwrap();
        }
        let built = g.rebuild(new_side);
        prop_assert!((1..=100).contains(&built));
        prop_assert_eq!(g.len(), usize::from(built) * usize::from(built));
        prop_assert_eq!(g.ledger().undo_len(), 0);
        prop_assert_eq!(g.ledger().redo_len(), 0);
        prop_assert_eq!(g.undo(&mut NullRenderer).unwrap(), StepOutcome::Empty);
        prop_assert!(g.cells().iter().all(|c| c.is_blank()));
    }
}

// ── Shading ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn lighten_stays_bounded_and_reaches_white(start in rgb()) {
        let start_l = start.lightness();
        let mut color = start;
        for _ in 0..60 {
            color = shade_color(color, Shade::Lighten);
            let l = color.lightness();
            prop_assert!((0.0..=100.0).contains(&l), "lightness {}", l);
        }
        if start_l >= 10.0 {
            prop_assert_eq!(color, Rgb::WHITE);
        }
    }

    #[test]
    fn darken_stays_bounded_and_decreases(start in rgb()) {
        let start_l = start.lightness();
        let mut color = start;
        for _ in 0..60 {
            color = shade_color(color, Shade::Darken);
            let l = color.lightness();
            prop_assert!((0.0..=100.0).contains(&l), "lightness {}", l);
        }
        if start_l >= 10.0 {
            prop_assert!(color.lightness() < start_l);
        }
    }
}
