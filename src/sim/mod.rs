pub mod body;
pub mod clock;
mod presets;
pub mod registry;
pub mod stepper;

macro_rules! declare_registry {
    {
        bodies: [ $($body:ident),* $(,)? ],
        relationships: $facts:expr $(,)?
    } => {
        registry::Registry::new(vec![$(presets::$body()),*], $facts)
    };
}

/// Builds the compiled-in solar system: the Sun and eight planets.
pub fn solar_system() -> registry::Registry {
    let res = declare_registry! {
        bodies: [
            sun,
            mercury,
            venus,
            earth,
            mars,
            jupiter,
            saturn,
            uranus,
            neptune,
        ],
        relationships: presets::RELATIONSHIPS,
    };

    match res {
        Ok(registry) => registry,
        Err(e) => panic!("compiled-in solar system is invalid: {e}"),
    }
}
