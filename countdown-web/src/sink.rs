//! DOM-backed display sink.

use std::collections::HashMap;

use countdown_core::{DisplaySink, Particle, ParticleId, SinkError, Surface};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;

const EMPHASIS_SCALE: &str = "scale(1.1)";
const EMPHASIS_COLOR: &str = "#feca57";
const RESTING_SCALE: &str = "scale(1)";
const RESTING_COLOR: &str = "white";
const PARTICLE_CLASS: &str = "firework";

/// Writes surfaces to elements looked up by id on every call, so elements
/// added or removed by the page are picked up on the next tick.
#[derive(Debug, Default)]
pub struct DomSink {
    particles: HashMap<ParticleId, HtmlElement>,
    next_particle: u64,
}

impl DomSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn element(surface: Surface) -> Result<HtmlElement, SinkError> {
        dom::html_element_by_id(surface.element_id()).ok_or(SinkError::MissingSurface(surface))
    }

    fn style(element: &HtmlElement, property: &str, value: &str) -> Result<(), SinkError> {
        element
            .style()
            .set_property(property, value)
            .map_err(|err| SinkError::Host(dom::js_error_message(&err)))
    }
}

impl DisplaySink for DomSink {
    fn set_text(&mut self, surface: Surface, text: &str) -> Result<(), SinkError> {
        Self::element(surface)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_progress(&mut self, width: &str) -> Result<(), SinkError> {
        Self::style(&Self::element(Surface::Progress)?, "width", width)
    }

    fn set_emphasis(&mut self, surface: Surface, on: bool) -> Result<(), SinkError> {
        let element = Self::element(surface)?;
        let (scale, color) = if on {
            (EMPHASIS_SCALE, EMPHASIS_COLOR)
        } else {
            (RESTING_SCALE, RESTING_COLOR)
        };
        Self::style(&element, "transform", scale)?;
        Self::style(&element, "color", color)
    }

    fn spawn_particle(&mut self, particle: &Particle) -> Result<ParticleId, SinkError> {
        let container = Self::element(Surface::Particles)?;
        let document = dom::document().ok_or(SinkError::MissingSurface(Surface::Particles))?;
        let element = document
            .create_element("div")
            .map_err(|err| SinkError::Host(dom::js_error_message(&err)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SinkError::Host("particle is not an HtmlElement".to_string()))?;
        element.set_class_name(PARTICLE_CLASS);
        Self::style(&element, "background", &particle.color)?;
        Self::style(&element, "left", &format!("{}px", particle.left_px))?;
        Self::style(&element, "top", &format!("{}px", particle.top_px))?;
        container
            .append_child(&element)
            .map_err(|err| SinkError::Host(dom::js_error_message(&err)))?;

        let id = ParticleId(self.next_particle);
        self.next_particle += 1;
        self.particles.insert(id, element);
        Ok(id)
    }

    fn remove_particle(&mut self, id: ParticleId) -> Result<(), SinkError> {
        let element = self
            .particles
            .remove(&id)
            .ok_or(SinkError::MissingParticle(id))?;
        element.remove();
        Ok(())
    }
}
