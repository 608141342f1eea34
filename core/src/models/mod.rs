//! Initial-condition generators: Kepler, Bessel, and Spiral disks.
//! Each is a pure function of `(n, alpha, beta, g)` that returns a flat
//! `Vec<Body>` in internal unit-cube coordinates — `G` must already be
//! the once-rescaled value, so callers pass it in rather than the
//! generator rescaling it itself.

pub mod bessel;
pub mod kepler;
pub mod spiral;

use glam::DVec3;

/// In-plane radial (`e_r`) and tangential (`e_t`) unit vectors for a disk
/// tilted by inclination `alpha` and ascending node `beta`, at azimuth
/// `gamma`.
pub(crate) fn disk_unit_vectors(gamma: f64, alpha: f64, beta: f64) -> (DVec3, DVec3) {
    let (sg, cg) = gamma.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();

    let e_r = DVec3::new(cg * ca + sg * cb * sa, sg * cb * ca - cg * sa, sg * sb);
    let e_t = DVec3::new(-sg * ca + cg * cb * sa, cg * cb * ca + sg * sa, cg * sb);
    (e_r, e_t)
}
