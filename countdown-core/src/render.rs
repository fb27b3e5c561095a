//! Unit rendering with change detection.
//!
//! The cache of last-rendered strings is threaded through [`RenderCache::render`]
//! rather than held as ambient state, so the same cache value always yields
//! the same effects.

use smallvec::SmallVec;

use crate::sink::Surface;
use crate::units::{TimeUnits, format_unit};

/// Write a single unit surface needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitUpdate {
    pub surface: Surface,
    pub text: String,
    /// Value differs from the previously rendered one.
    pub emphasize: bool,
}

/// All unit writes produced by one render.
pub type RenderEffects = SmallVec<[UnitUpdate; 4]>;

/// Last rendered string per unit surface; `None` before the first render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCache {
    days: Option<String>,
    hours: Option<String>,
    minutes: Option<String>,
    seconds: Option<String>,
}

impl RenderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn previous(&self, surface: Surface) -> Option<&str> {
        self.slot(surface).and_then(|slot| slot.as_deref())
    }

    /// Format `units`, flag the surfaces whose text changed and return the
    /// updated cache.
    #[must_use]
    pub fn render(mut self, units: &TimeUnits) -> (Self, RenderEffects) {
        let mut effects = RenderEffects::new();
        for (surface, value) in units.by_surface() {
            let text = format_unit(value);
            let Some(slot) = self.slot_mut(surface) else {
                continue;
            };
            let emphasize = slot.as_deref().is_some_and(|prev| prev != text);
            *slot = Some(text.clone());
            effects.push(UnitUpdate {
                surface,
                text,
                emphasize,
            });
        }
        (self, effects)
    }

    #[cfg(test)]
    fn slot(&self, surface: Surface) -> Option<&Option<String>> {
        match surface {
            Surface::Days => Some(&self.days),
            Surface::Hours => Some(&self.hours),
            Surface::Minutes => Some(&self.minutes),
            Surface::Seconds => Some(&self.seconds),
            Surface::Progress | Surface::Message | Surface::Particles => None,
        }
    }

    fn slot_mut(&mut self, surface: Surface) -> Option<&mut Option<String>> {
        match surface {
            Surface::Days => Some(&mut self.days),
            Surface::Hours => Some(&mut self.hours),
            Surface::Minutes => Some(&mut self.minutes),
            Surface::Seconds => Some(&mut self.seconds),
            Surface::Progress | Surface::Message | Surface::Particles => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn units(days: u64, hours: u8, minutes: u8, seconds: u8) -> TimeUnits {
        TimeUnits {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    fn emphasized(effects: &RenderEffects) -> Vec<Surface> {
        effects
            .iter()
            .filter(|u| u.emphasize)
            .map(|u| u.surface)
            .collect()
    }

    #[test]
    fn first_render_fills_cache_without_emphasis() {
        let (cache, effects) = RenderCache::new().render(&units(3, 4, 5, 6));
        assert!(emphasized(&effects).is_empty());
        assert_eq!(effects.len(), 4);
        assert_eq!(cache.previous(Surface::Days), Some("03"));
        assert_eq!(cache.previous(Surface::Seconds), Some("06"));
        assert_eq!(cache.previous(Surface::Message), None);
    }

    #[test]
    fn same_values_do_not_re_emphasize() {
        let (cache, _) = RenderCache::new().render(&units(1, 2, 3, 4));
        let (_, effects) = cache.render(&units(1, 2, 3, 4));
        assert!(emphasized(&effects).is_empty());
    }

    #[test]
    fn changed_values_emphasize_once() {
        let (cache, _) = RenderCache::new().render(&units(1, 2, 3, 4));
        let (cache, effects) = cache.render(&units(1, 2, 2, 59));
        assert_eq!(emphasized(&effects), [Surface::Minutes, Surface::Seconds]);
        let (_, effects) = cache.render(&units(1, 2, 2, 59));
        assert!(emphasized(&effects).is_empty());
    }

    #[test]
    fn render_is_a_function_of_cache_and_units() {
        let (cache, _) = RenderCache::new().render(&units(9, 9, 9, 9));
        let first = cache.clone().render(&units(9, 9, 9, 8));
        let second = cache.render(&units(9, 9, 9, 8));
        assert_eq!(first, second);
    }
}
