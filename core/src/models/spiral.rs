//! Spiral generator: a Sérsic-like bulge plus exponential disk,
//! with `N-1` unit-mass stars and a central black hole.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::body::Body;
use crate::constants::{
    domain_center, KEPLER_SPIRAL_INIT_R, M_BH, SAMPLER_SEED, SPIRAL_BULGE_CONST, SPIRAL_BULGE_RADIUS,
    SPIRAL_BULGE_SEMI_MINOR, SPIRAL_DISC_CONST, SPIRAL_DISC_HALF_WIDTH,
};
use crate::error::Result;
use crate::sampler;

use super::disk_unit_vectors;

fn bulge_profile(x: f64) -> f64 {
    (-x.powf(0.25) / SPIRAL_BULGE_CONST).exp()
}

/// Piecewise density: Sérsic-like bulge for `x < bulge_radius`, matched
/// exponential disk beyond it.
fn density(x: f64) -> f64 {
    if x < SPIRAL_BULGE_RADIUS {
        x * bulge_profile(x)
    } else {
        let bulge_edge = bulge_profile(SPIRAL_BULGE_RADIUS);
        x * bulge_edge * (-(x - SPIRAL_BULGE_RADIUS) / SPIRAL_DISC_CONST).exp()
    }
}

/// Generates `n` bodies: `n - 1` unit-mass stars plus a central black
/// hole. `g` must already be the rescaled gravitational constant.
pub fn generate(n: usize, alpha: f64, beta: f64, g: f64) -> Result<Vec<Body>> {
    debug_assert!(n >= 2, "Spiral generator needs at least a star and a black hole");
    let n_stars = n - 1;
    let center = domain_center();

    let mut rng = ChaCha8Rng::seed_from_u64(SAMPLER_SEED);
    let gammas: Vec<f64> = (0..n_stars).map(|_| rng.gen_range(0.0..TAU)).collect();
    let mut vertical: Vec<f64> = (0..n_stars)
        .map(|_| rng.gen_range(-SPIRAL_DISC_HALF_WIDTH..SPIRAL_DISC_HALF_WIDTH))
        .collect();

    let planar_radii: Vec<f64> = sampler::sample(density, n_stars, SAMPLER_SEED)?
        .into_iter()
        .map(|u| u * KEPLER_SPIRAL_INIT_R)
        .collect();

    let bulge_edge_radius = SPIRAL_BULGE_RADIUS * KEPLER_SPIRAL_INIT_R;
    for i in 0..n_stars {
        if planar_radii[i] < bulge_edge_radius {
            let ratio = planar_radii[i] / bulge_edge_radius;
            let contour = SPIRAL_BULGE_SEMI_MINOR * (1.0 - ratio * ratio).max(0.0).sqrt();
            vertical[i] = rng.gen_range(-contour..contour);
        }
    }

    let mut bodies = Vec::with_capacity(n);
    for i in 0..n_stars {
        // Per-body tilt from the vertical offset, computed against the
        // *planar* radius before it is folded into the effective radius
        // below. Local to this iteration only — it must not leak into
        // the next body's orientation.
        let beta_i = beta + (vertical[i] / planar_radii[i]).atan();
        let r_eff = (planar_radii[i] * planar_radii[i] + vertical[i] * vertical[i]).sqrt();

        let (e_r, e_t) = disk_unit_vectors(gammas[i], alpha, beta_i);
        let r_pos = center + r_eff * e_r;
        let v = (g * M_BH / r_eff).sqrt();
        let p = 1.0 * v * e_t;
        bodies.push(Body::new(1.0, r_pos, p));
    }
    bodies.push(Body::new(M_BH, center, DVec3::ZERO));
    Ok(bodies)
}
