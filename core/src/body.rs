use glam::DVec3;

/// A massive point: mass in solar masses, position in kpc (internal
/// unit-cube coordinates during a run), and momentum `m * v` in
/// mass·kpc/Gyr — see the crate-level note on momentum vs. velocity.
///
/// Invariant: `m > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub m: f64,
    pub r: DVec3,
    pub p: DVec3,
}

impl Body {
    pub fn new(m: f64, r: DVec3, p: DVec3) -> Self {
        debug_assert!(m > 0.0, "body mass must be positive");
        Self { m, r, p }
    }

    /// `p / m`: the instantaneous velocity implied by this body's momentum.
    pub fn velocity(&self) -> DVec3 {
        self.p / self.m
    }

    /// `(m, x, y, z, px, py, pz)`, the row layout used by every on-disk
    /// artifact.
    pub fn to_row(self) -> [f64; 7] {
        [self.m, self.r.x, self.r.y, self.r.z, self.p.x, self.p.y, self.p.z]
    }

    pub fn from_row(row: [f64; 7]) -> Self {
        Self {
            m: row[0],
            r: DVec3::new(row[1], row[2], row[3]),
            p: DVec3::new(row[4], row[5], row[6]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_roundtrip() {
        let b = Body::new(12.5, DVec3::new(0.1, 0.2, 0.3), DVec3::new(1.0, -2.0, 0.5));
        let row = b.to_row();
        let b2 = Body::from_row(row);
        assert_eq!(b, b2);
    }

    #[test]
    fn velocity_is_momentum_over_mass() {
        let b = Body::new(2.0, DVec3::ZERO, DVec3::new(4.0, 2.0, -2.0));
        assert_eq!(b.velocity(), DVec3::new(2.0, 1.0, -1.0));
    }
}
