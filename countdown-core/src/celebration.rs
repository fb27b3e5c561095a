//! Celebration planning: which particles to show, where, and when.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How often the celebration fires once the target has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CelebrationPolicy {
    /// Fire on the first completed tick only.
    #[default]
    Once,
    /// Fire a fresh, self-cleaning burst on every completed tick.
    EveryTick,
}

/// A single transient particle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    pub index: u32,
    pub color: String,
    pub left_px: u32,
    pub top_px: u32,
}

/// A particle together with its spawn offset within the burst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledParticle {
    pub spawn_delay_ms: u32,
    pub particle: Particle,
}

/// One bounded burst of particles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationPlan {
    pub particles: Vec<ScheduledParticle>,
    pub lifetime_ms: u32,
}

impl CelebrationPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Time from launch until the last particle has been removed.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.particles
            .iter()
            .map(|p| p.spawn_delay_ms.saturating_add(self.lifetime_ms))
            .max()
            .unwrap_or(0)
    }
}

/// Shape of a burst, taken from [`crate::config::CountdownConfig`].
#[derive(Debug, Clone, Copy)]
pub struct BurstShape<'a> {
    pub count: u32,
    pub stagger_ms: u32,
    pub lifetime_ms: u32,
    pub area_px: u32,
    pub palette: &'a [String],
}

/// Lay out a burst: particle `i` spawns `i * stagger` after launch with a
/// palette colour and a position inside the square area.
#[must_use]
pub fn plan_celebration<R: Rng + ?Sized>(shape: BurstShape<'_>, rng: &mut R) -> CelebrationPlan {
    let particles = if shape.palette.is_empty() || shape.area_px == 0 {
        Vec::new()
    } else {
        (0..shape.count)
            .map(|index| ScheduledParticle {
                spawn_delay_ms: index.saturating_mul(shape.stagger_ms),
                particle: Particle {
                    index,
                    color: shape.palette[rng.gen_range(0..shape.palette.len())].clone(),
                    left_px: rng.gen_range(0..shape.area_px),
                    top_px: rng.gen_range(0..shape.area_px),
                },
            })
            .collect()
    };
    CelebrationPlan {
        particles,
        lifetime_ms: shape.lifetime_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PARTICLE_PALETTE, PARTICLE_AREA_PX};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn palette() -> Vec<String> {
        PARTICLE_PALETTE.iter().map(ToString::to_string).collect()
    }

    fn shape(palette: &[String]) -> BurstShape<'_> {
        BurstShape {
            count: 20,
            stagger_ms: 100,
            lifetime_ms: 1_000,
            area_px: PARTICLE_AREA_PX,
            palette,
        }
    }

    #[test]
    fn burst_is_staggered_and_bounded() {
        let palette = palette();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let plan = plan_celebration(shape(&palette), &mut rng);
        assert_eq!(plan.len(), 20);
        for (i, scheduled) in plan.particles.iter().enumerate() {
            assert_eq!(scheduled.spawn_delay_ms, u32::try_from(i).unwrap() * 100);
            assert!(scheduled.particle.left_px < PARTICLE_AREA_PX);
            assert!(scheduled.particle.top_px < PARTICLE_AREA_PX);
            assert!(palette.contains(&scheduled.particle.color));
        }
        assert_eq!(plan.duration_ms(), 1_900 + 1_000);
    }

    #[test]
    fn same_seed_same_burst() {
        let palette = palette();
        let a = plan_celebration(shape(&palette), &mut ChaCha8Rng::seed_from_u64(42));
        let b = plan_celebration(shape(&palette), &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_palette_plans_nothing() {
        let plan = plan_celebration(shape(&[]), &mut ChaCha8Rng::seed_from_u64(1));
        assert!(plan.is_empty());
        assert_eq!(plan.duration_ms(), 0);
    }
}
