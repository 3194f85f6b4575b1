//! Scripted scratch strokes

use rand::Rng;
use scratch_core::ClientRect;

/// One press-drag-release gesture in client coordinates
pub(crate) type Stroke = Vec<(f64, f64)>;

/// Serpentine rows across `rect`, one stroke per row
///
/// Rows are at most `1.5 * radius` apart and sampled every `radius / 2`,
/// so neighbouring erase circles overlap. Only the top `coverage` share of
/// the container is swept. Each point is nudged vertically by up to
/// `radius / 10` so runs with different seeds differ.
pub(crate) fn serpentine<R: Rng>(
    rect: ClientRect,
    radius: f64,
    coverage: f64,
    rng: &mut R,
) -> Vec<Stroke> {
    let coverage = coverage.clamp(0.0, 1.0);
    let swept = rect.height * coverage;
    if rect.is_empty() || radius <= 0.0 || swept <= 0.0 {
        return Vec::new();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rows = ((swept / (radius * 1.5)).ceil() as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let gap = swept / rows as f64;
    let step = radius / 2.0;
    let jitter = radius / 10.0;

    (0..rows)
        .map(|row| {
            #[allow(clippy::cast_precision_loss)]
            let y = rect.top + gap * (row as f64 + 0.5);
            let mut xs = Vec::new();
            let mut x = rect.left;
            while x < rect.left + rect.width {
                xs.push(x);
                x += step;
            }
            xs.push(rect.left + rect.width);
            if row % 2 == 1 {
                xs.reverse();
            }
            xs.into_iter()
                .map(|x| (x, y + rng.random_range(-jitter..=jitter)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use scratch_core::{MemoryStore, OverlayImage, ScratchConfig, SessionBuilder, Viewport};

    fn rect() -> ClientRect {
        ClientRect::new(10.0, 20.0, 180.0, 96.0)
    }

    #[test]
    fn test_same_seed_same_strokes() {
        let a = serpentine(rect(), 24.0, 1.0, &mut StdRng::seed_from_u64(7));
        let b = serpentine(rect(), 24.0, 1.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rows_alternate_direction() {
        let strokes = serpentine(rect(), 24.0, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].first().unwrap().0, 10.0);
        assert_eq!(strokes[0].last().unwrap().0, 190.0);
        assert_eq!(strokes[1].first().unwrap().0, 190.0);
        assert_eq!(strokes[1].last().unwrap().0, 10.0);
    }

    #[test]
    fn test_coverage_limits_rows() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(serpentine(rect(), 24.0, 0.0, &mut rng).is_empty());

        let half = serpentine(rect(), 24.0, 0.5, &mut rng);
        let max_y = half
            .iter()
            .flatten()
            .map(|&(_, y)| y)
            .fold(f64::MIN, f64::max);
        assert!(max_y < 20.0 + 48.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(serpentine(ClientRect::default(), 24.0, 1.0, &mut rng).is_empty());
        assert!(serpentine(rect(), 0.0, 1.0, &mut rng).is_empty());
        let unbounded = ClientRect::new(0.0, 0.0, f64::INFINITY, 100.0);
        assert!(serpentine(unbounded, 24.0, 1.0, &mut rng).is_empty());
    }

    #[test]
    fn test_full_sweep_completes_card() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut surface = SessionBuilder::new(ScratchConfig::new())
            .with_store(MemoryStore::new())
            .build(&mut rng)
            .unwrap();
        surface.artwork_loaded();
        surface.overlay_decoded(OverlayImage::gold());
        surface.resize(Viewport::new(rect(), 2.0));

        for stroke in serpentine(rect(), 24.0, 1.0, &mut rng) {
            let (x, y) = stroke[0];
            surface.pointer_down(1, x, y);
            for &(x, y) in &stroke[1..] {
                surface.pointer_move(1, x, y);
            }
            surface.pointer_up(1);
        }

        assert!(surface.is_complete());
        assert!(surface.reveal_panel().is_some());
    }
}
