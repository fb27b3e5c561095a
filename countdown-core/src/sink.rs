//! Display surfaces and the capability the engine writes them through.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::celebration::Particle;

/// Named display target owned by the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Days,
    Hours,
    Minutes,
    Seconds,
    Progress,
    Message,
    Particles,
}

impl Surface {
    pub const UNITS: [Self; 4] = [Self::Days, Self::Hours, Self::Minutes, Self::Seconds];

    /// Element id the browser host looks this surface up by.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Progress => "progressFill",
            Self::Message => "message",
            Self::Particles => "fireworks",
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Handle to a particle a sink has spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

/// Failures a sink may report for a single write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("surface `{0}` is not present")]
    MissingSurface(Surface),
    #[error("particle {0:?} is not present")]
    MissingParticle(ParticleId),
    #[error("host rejected write: {0}")]
    Host(String),
}

/// Where the countdown renders to.
///
/// Every method touches one surface. The driver treats each failure as
/// isolated: it logs and moves on to the next surface.
pub trait DisplaySink {
    /// Replace the text of a unit or message surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface does not exist.
    fn set_text(&mut self, surface: Surface, text: &str) -> Result<(), SinkError>;

    /// Set the fill width of the progress surface, e.g. `"42.5%"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the progress surface does not exist.
    fn set_progress(&mut self, width: &str) -> Result<(), SinkError>;

    /// Toggle the transient emphasis state of a unit surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface does not exist.
    fn set_emphasis(&mut self, surface: Surface, on: bool) -> Result<(), SinkError>;

    /// Attach a particle to the particle container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container does not exist or the host refuses the element.
    fn spawn_particle(&mut self, particle: &Particle) -> Result<ParticleId, SinkError>;

    /// Detach a previously spawned particle.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle is already gone.
    fn remove_particle(&mut self, id: ParticleId) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_match_page_shell() {
        let ids: Vec<_> = Surface::UNITS.iter().map(|s| s.element_id()).collect();
        assert_eq!(ids, ["days", "hours", "minutes", "seconds"]);
        assert_eq!(Surface::Progress.to_string(), "progressFill");
    }

    #[test]
    fn sink_errors_render_surface_name() {
        let err = SinkError::MissingSurface(Surface::Hours);
        assert_eq!(err.to_string(), "surface `hours` is not present");
    }
}
