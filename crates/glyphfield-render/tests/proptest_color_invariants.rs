//! Property-based invariant tests for color interpolation and the glyph buffer.
//!
//! 1. `lerp` stays between its endpoints on every channel.
//! 2. `lerp` is monotone in `t` (no backward interpolation).
//! 3. Hex parsing accepts exactly what `to_hex` produces, in any case.
//! 4. Drawing at any pixel rectangle never touches more than one slot.

use glyphfield_core::geometry::PixelRect;
use glyphfield_render::buffer::GlyphBuffer;
use glyphfield_render::color::Rgb;
use glyphfield_render::surface::Surface;
use proptest::prelude::*;

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn between(v: u8, a: u8, b: u8) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

proptest! {
    #[test]
    fn lerp_stays_between_endpoints(from in rgb(), to in rgb(), t in -0.5f32..1.5) {
        let c = from.lerp(to, t);
        prop_assert!(between(c.r, from.r, to.r));
        prop_assert!(between(c.g, from.g, to.g));
        prop_assert!(between(c.b, from.b, to.b));
    }

    #[test]
    fn lerp_is_monotone(from in rgb(), to in rgb(), a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let near = from.lerp(to, lo);
        let far = from.lerp(to, hi);
        let dist = |c: Rgb| {
            u32::from(c.r.abs_diff(to.r)) + u32::from(c.g.abs_diff(to.g)) + u32::from(c.b.abs_diff(to.b))
        };
        prop_assert!(dist(far) <= dist(near));
    }

    #[test]
    fn hex_parsing_is_case_insensitive(c in rgb()) {
        let hex = c.to_hex();
        prop_assert_eq!(Rgb::from_hex(&hex), Ok(c));
        prop_assert_eq!(Rgb::from_hex(&hex.to_uppercase()), Ok(c));
    }

    #[test]
    fn fill_touches_at_most_one_slot(x in 0u32..400, y in 0u32..400, unit in 1u32..30) {
        let mut buffer = GlyphBuffer::new(8, 8, unit);
        buffer.fill_glyph(PixelRect::new(x, y, unit, unit), 'Q', Rgb::WHITE);
        let filled: usize = (0..8u16)
            .map(|row| buffer.row(row).iter().filter(|s| s.glyph == 'Q').count())
            .sum();
        prop_assert!(filled <= 1);
    }
}
