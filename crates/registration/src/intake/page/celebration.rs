use rand::Rng;

pub const CELEBRATION_GLYPHS: [&str; 8] = ["🎉", "✨", "🎊", "🥳", "💫", "🌟", "🟣", "💜"];

/// One falling decoration. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationPiece {
    pub left_pct: u8,
    pub size_px: u8,
    pub delay_ms: u16,
    pub duration_ms: u16,
    pub glyph: &'static str,
}

impl CelebrationPiece {
    pub fn style(&self) -> String {
        format!(
            "left:{}%; font-size:{}px; animation-duration:{}ms; animation-delay:{}ms;",
            self.left_pct, self.size_px, self.duration_ms, self.delay_ms
        )
    }
}

pub fn scatter<R>(count: usize, rng: &mut R) -> Vec<CelebrationPiece>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|_| CelebrationPiece {
            left_pct: rng.gen_range(2..=98),
            size_px: rng.gen_range(16..=28),
            delay_ms: rng.gen_range(0..=2000),
            duration_ms: rng.gen_range(3500..=6500),
            glyph: CELEBRATION_GLYPHS[rng.gen_range(0..CELEBRATION_GLYPHS.len())],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pieces_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let pieces = scatter(200, &mut rng);
        assert_eq!(pieces.len(), 200);
        for piece in pieces {
            assert!((2..=98).contains(&piece.left_pct));
            assert!((16..=28).contains(&piece.size_px));
            assert!(piece.delay_ms <= 2000);
            assert!((3500..=6500).contains(&piece.duration_ms));
            assert!(CELEBRATION_GLYPHS.contains(&piece.glyph));
        }
    }

    #[test]
    fn same_seed_scatters_identically() {
        let first = scatter(18, &mut StdRng::seed_from_u64(42));
        let second = scatter(18, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
