//! Countdown Engine
//!
//! Platform-agnostic countdown logic: duration decomposition, change-aware
//! rendering, progress, status messages and the completion celebration.
//! Hosts plug in through [`DisplaySink`], [`Clock`] and [`Scheduler`]; this
//! crate never touches a UI toolkit.

pub mod celebration;
pub mod config;
pub mod constants;
pub mod driver;
pub mod engine;
pub mod headless;
pub mod message;
pub mod numbers;
pub mod progress;
pub mod render;
pub mod schedule;
pub mod sink;
pub mod units;

// Re-export commonly used types
pub use celebration::{CelebrationPlan, CelebrationPolicy, Particle, ScheduledParticle};
pub use config::{ConfigError, CountdownConfig};
pub use constants::CalendarDate;
pub use driver::Countdown;
pub use engine::{CountdownEngine, Frame};
pub use headless::{MemorySink, SurfaceSnapshot, VirtualTime};
pub use message::{StatusMessage, select_message};
pub use progress::{format_width, progress_percent};
pub use render::{RenderCache, RenderEffects, UnitUpdate};
pub use schedule::{Clock, Scheduler};
pub use sink::{DisplaySink, ParticleId, SinkError, Surface};
pub use units::{Decomposition, TimeUnits, decompose, format_unit};
