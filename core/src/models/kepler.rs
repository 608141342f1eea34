//! Kepler generator: a central black hole with `N-1` stars on
//! areal-uniform circular orbits.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::body::Body;
use crate::constants::{domain_center, KEPLER_SPIRAL_INIT_R, M_BH, SAMPLER_SEED, STAR_MASS_MAX, STAR_MASS_MIN};
use crate::error::Result;
use crate::sampler;

use super::disk_unit_vectors;

/// Generates `n` bodies: `n - 1` stars plus a central black hole at
/// `(0.5, 0.5, 0.5)`. `g` must be the already-rescaled gravitational
/// constant.
pub fn generate(n: usize, alpha: f64, beta: f64, g: f64) -> Result<Vec<Body>> {
    debug_assert!(n >= 2, "Kepler generator needs at least a star and a black hole");
    let n_stars = n - 1;
    let center = domain_center();

    let mut rng = ChaCha8Rng::seed_from_u64(SAMPLER_SEED);
    let masses: Vec<f64> = (0..n_stars).map(|_| rng.gen_range(STAR_MASS_MIN..STAR_MASS_MAX)).collect();
    let gammas: Vec<f64> = (0..n_stars).map(|_| rng.gen_range(0.0..TAU)).collect();

    // Areal-uniform radial density f(x) = x, scaled to the disk radius.
    let radii: Vec<f64> = sampler::sample(|x| x, n_stars, SAMPLER_SEED)?
        .into_iter()
        .map(|u| u * KEPLER_SPIRAL_INIT_R)
        .collect();

    let mut bodies = Vec::with_capacity(n);
    for i in 0..n_stars {
        let (e_r, e_t) = disk_unit_vectors(gammas[i], alpha, beta);
        let r = center + radii[i] * e_r;
        let v = (g * M_BH / radii[i]).sqrt();
        let p = masses[i] * v * e_t;
        bodies.push(Body::new(masses[i], r, p));
    }
    bodies.push(Body::new(M_BH, center, DVec3::ZERO));
    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::G;

    #[test]
    fn shape_matches_spec_scenario() {
        let n = 1001;
        let bodies = generate(n, 0.0, 0.0, G).unwrap();
        assert_eq!(bodies.len(), n);

        let center = domain_center();
        let mut max_z = 0.0_f64;
        let mut max_planar = 0.0_f64;
        let mut bh_count = 0;
        for b in &bodies {
            max_z = max_z.max((b.r.z - 0.5).abs());
            let dx = b.r.x - center.x;
            let dy = b.r.y - center.y;
            max_planar = max_planar.max((dx * dx + dy * dy).sqrt());
            if b.m == M_BH {
                bh_count += 1;
            }
        }
        assert!(max_z < 1e-12, "disk should be planar for alpha=beta=0, got {max_z}");
        assert!(max_planar <= KEPLER_SPIRAL_INIT_R + 1e-12);
        assert_eq!(bh_count, 1);
    }

    #[test]
    fn black_hole_has_zero_momentum() {
        let bodies = generate(10, 0.1, 0.2, G).unwrap();
        let bh = bodies.last().unwrap();
        assert_eq!(bh.m, M_BH);
        assert_eq!(bh.p, DVec3::ZERO);
    }

    #[test]
    fn deterministic() {
        let a = generate(200, 0.0, 0.0, G).unwrap();
        let b = generate(200, 0.0, 0.0, G).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }
}
