//! Barnes-Hut N-body simulation of a galactic disk.
//!
//! Four pieces, leaves first: [`sampler`] draws from arbitrary 1-D
//! densities, [`models`] builds initial conditions on top of it,
//! [`octree`] approximates gravity with the θ-criterion, and
//! [`integrator`] drives bodies through time by rebuilding the tree
//! every step. [`config`] is the shared configuration record; [`io`]
//! (behind the `encode` feature) frames the on-disk artifacts described
//! by the external interface.

#![allow(non_ascii_idents)]
#![allow(mixed_script_confusables)]

pub mod body;
pub mod config;
pub mod constants;
pub mod error;
#[cfg(feature = "encode")]
pub mod io;
pub mod integrator;
pub mod models;
pub mod octree;
pub mod sampler;
pub mod special;

pub use body::Body;
pub use config::{Config, ModelTag};
pub use error::{Error, Result};
pub use integrator::{Integrator, StepSink};
pub use octree::{RootCube, Tree};

/// Generates the initial body array for `config`. `G` is rescaled exactly
/// once here — callers running `init` and `evolve` as separate processes
/// must persist the *physical* `ini_radius` in the config they hand to
/// `evolve`, not a pre-rescaled `G`, so the rescaling only ever happens
/// inside this function and inside [`Integrator`] construction via
/// [`Config::g_rescaled`].
pub fn generate_initial_state(config: &Config) -> Result<Vec<Body>> {
    config.validate()?;
    let g = config.g_rescaled();
    match config.model {
        ModelTag::Kepler => models::kepler::generate(config.n, config.inclination, config.ascending_node, g),
        ModelTag::Bessel => models::bessel::generate(config.n, config.inclination, config.ascending_node, g),
        ModelTag::Spiral => models::spiral::generate(config.n, config.inclination, config.ascending_node, g),
    }
}

/// Builds an `Integrator` configured for `config`, with `G` rescaled
/// exactly once.
pub fn build_integrator(config: &Config) -> Result<Integrator> {
    config.validate()?;
    Ok(Integrator::new(config.theta, config.dt, config.g_rescaled()))
}
