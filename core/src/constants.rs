//! Physical constants and numerical guards shared across the engine.
//!
//! All values are in the simulation's internal unit system: kiloparsecs
//! (kpc), gigayears (Gyr), and solar masses (M☉).

/// Gravitational constant, kpc³·M☉⁻¹·Gyr⁻², before the once-per-run
/// rescaling described in `Config::g_rescaled`.
pub const G: f64 = 4.4985022e-6;

/// Central black hole mass used by the Kepler and Spiral generators, M☉.
pub const M_BH: f64 = 4e6;

/// Stellar mass range sampled by the Kepler and Bessel generators, M☉.
pub const STAR_MASS_MIN: f64 = 1.0;
pub const STAR_MASS_MAX: f64 = 50.0;

/// Radius of the sphere (in internal unit-cube coordinates) that all
/// generators place bodies within, before the `(0.4 / ini_radius)^3`
/// rescaling of `G` brings physical radii back to `ini_radius` kpc.
pub const KEPLER_SPIRAL_INIT_R: f64 = 0.4;
pub const BESSEL_INIT_R: f64 = 0.5;

/// Scale length of the Bessel generator's exponential disk, internal units.
pub const BESSEL_RD: f64 = 0.1;

/// Spiral generator bulge/disk density parameters.
pub const SPIRAL_BULGE_CONST: f64 = 2.5;
pub const SPIRAL_DISC_CONST: f64 = 0.2;
pub const SPIRAL_BULGE_RADIUS: f64 = 0.2;
pub const SPIRAL_BULGE_SEMI_MINOR: f64 = 0.072;
pub const SPIRAL_DISC_HALF_WIDTH: f64 = 0.02;

/// Below this separation, pairwise gravitational force is defined to be
/// zero rather than diverging. Not a physical softening length.
pub const FORCE_CUTOFF: f64 = 1e-4;

/// Below this cube side length, an octree node refuses further
/// subdivision and silently discards the colliding insertion.
pub const EPS_MIN: f64 = 1e-4;

/// PRNG seed shared by every initial-condition generator, fixed for
/// reproducibility.
pub const SAMPLER_SEED: u64 = 10;

/// Side length of the nominal (unexpanded) root cube.
pub const ROOT_SIZE_NOMINAL: f64 = 1.0;

/// Center of the unit-cube simulation domain.
pub fn domain_center() -> glam::DVec3 {
    glam::DVec3::splat(0.5)
}
