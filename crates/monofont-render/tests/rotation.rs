//! Property tests for the rotation adapter.
//!
//! ```bash
//! cargo test -p monofont-render --test rotation
//! ```

use proptest::prelude::*;

use monofont_render::{MonoBuffer, Rotated, Rotation, Surface};

#[derive(Debug, Clone, Copy)]
enum Op {
    Pixel(i32, i32),
    HLine(i32, i32, u32),
    VLine(i32, i32, u32),
}

fn apply<S: Surface>(surface: &mut S, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Pixel(x, y) => surface.pixel(x, y, true),
            Op::HLine(x, y, len) => surface.hline(x, y, len, true),
            Op::VLine(x, y, len) => surface.vline(x, y, len, true),
        }
    }
}

fn rotation() -> impl Strategy<Value = Rotation> {
    prop_oneof![
        Just(Rotation::Deg0),
        Just(Rotation::Deg90),
        Just(Rotation::Deg180),
        Just(Rotation::Deg270),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (-3..15i32, -3..15i32).prop_map(|(x, y)| Op::Pixel(x, y)),
        (-3..15i32, -3..15i32, 0..12u32).prop_map(|(x, y, l)| Op::HLine(x, y, l)),
        (-3..15i32, -3..15i32, 0..12u32).prop_map(|(x, y, l)| Op::VLine(x, y, l)),
    ];
    prop::collection::vec(op, 0..12)
}

proptest! {
    /// Drawing through the adapter equals drawing upright and remapping
    /// every lit pixel.
    #[test]
    fn rotated_drawing_matches_remapped_pixels(
        w in 1..12u32,
        h in 1..12u32,
        rotation in rotation(),
        ops in ops(),
    ) {
        let mut physical = MonoBuffer::new(w, h);
        let (lw, lh) = if rotation.swaps_axes() { (h, w) } else { (w, h) };
        let mut logical = MonoBuffer::new(lw, lh);
        apply(&mut logical, &ops);

        let mut rotated = Rotated::new(&mut physical, rotation);
        apply(&mut rotated, &ops);

        let mut expected = MonoBuffer::new(w, h);
        let mapper = Rotated::new(MonoBuffer::new(w, h), rotation);
        for (x, y) in logical.lit_pixels() {
            let (px, py) = mapper.map(x as i32, y as i32);
            expected.pixel(px, py, true);
        }
        prop_assert_eq!(physical, expected);
    }

    /// Two quarter turns equal a half turn.
    #[test]
    fn quarter_turns_compose(w in 1..10u32, h in 1..10u32, ops in ops()) {
        let mut twice = MonoBuffer::new(w, h);
        let mut half = MonoBuffer::new(w, h);
        {
            let inner = Rotated::new(&mut twice, Rotation::Deg90);
            let mut outer = Rotated::new(inner, Rotation::Deg90);
            apply(&mut outer, &ops);
        }
        apply(&mut Rotated::new(&mut half, Rotation::Deg180), &ops);
        prop_assert_eq!(twice, half);
    }
}
