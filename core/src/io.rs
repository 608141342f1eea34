//! On-disk artifact framing, gated behind the `encode` feature —
//! the teacher crate already carries `bincode` as an optional dependency
//! for exactly this purpose.

use std::io::{Read, Write};

use crate::body::Body;
use crate::error::{Error, Result};
use crate::integrator::StepSink;

/// Writes one `N x 7` row-major frame: `(m, x, y, z, px, py, pz)` per
/// body, in the layout every artifact shares.
pub fn write_frame(w: &mut impl Write, bodies: &[Body]) -> Result<()> {
    let rows: Vec<[f64; 7]> = bodies.iter().map(|b| b.to_row()).collect();
    bincode::encode_into_std_write(&rows, w, bincode::config::standard())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
    Ok(())
}

pub fn read_frame(r: &mut impl Read, n: usize) -> Result<Vec<Body>> {
    let rows: Vec<[f64; 7]> = bincode::decode_from_std_read(r, bincode::config::standard())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
    if rows.len() != n {
        return Err(Error::Config(format!(
            "expected {n} bodies in artifact, found {}",
            rows.len()
        )));
    }
    Ok(rows.into_iter().map(Body::from_row).collect())
}

/// Writes the Initial-State artifact: a single `N x 7` frame.
pub fn write_initial_state(w: &mut impl Write, bodies: &[Body]) -> Result<()> {
    write_frame(w, bodies)
}

pub fn read_initial_state(r: &mut impl Read, n: usize) -> Result<Vec<Body>> {
    read_frame(r, n)
}

/// A `StepSink` that appends each snapshot as one bincode frame to the
/// Evolution artifact. Owns the writer for the sink's lifetime;
/// bodies passed to `on_snapshot` are only borrowed for the call.
pub struct ArtifactSink<W: Write> {
    writer: W,
    error: Option<Error>,
}

impl<W: Write> ArtifactSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    /// Surfaces the first write error encountered across all snapshots,
    /// if any. The `StepSink` trait itself is infallible, so failures are
    /// latched here and the Integrator keeps running (cancellation only
    /// happens between steps) — callers must check this after the run.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> StepSink for ArtifactSink<W> {
    fn on_snapshot(&mut self, _step: usize, bodies: &[Body]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write_frame(&mut self.writer, bodies) {
            self.error = Some(e);
        }
    }
}

/// Reads `n_saved` consecutive Evolution-artifact frames.
pub fn read_evolution(r: &mut impl Read, n: usize, n_saved: usize) -> Result<Vec<Vec<Body>>> {
    (0..n_saved).map(|_| read_frame(r, n)).collect()
}

/// Tangent-velocity artifact: per snapshot, a `(r_i, |v_t,i|)` pair
/// per body, in physical kpc / kpc·Gyr⁻¹.
pub fn tangent_velocity(
    bodies: &[Body],
    inclination: f64,
    ascending_node: f64,
    ini_radius: f64,
) -> Vec<[f64; 2]> {
    let center = crate::constants::domain_center();
    let ta = inclination.tan();
    let (sb, cb) = ascending_node.sin_cos();
    let normal = glam::DVec3::new((1.0 - ta * ta).max(0.0).sqrt() * sb, ta * sb, cb);
    let factor = ini_radius / 0.4;

    bodies
        .iter()
        .map(|b| {
            let offset = b.r - center;
            let r = offset.length();
            let vt = if r > 0.0 {
                (b.velocity().dot(offset.cross(normal)) / r).abs()
            } else {
                0.0
            };
            [r * factor, vt * factor]
        })
        .collect()
}

pub fn write_tangent_velocity(w: &mut impl Write, rows: &[[f64; 2]]) -> Result<()> {
    let rows = rows.to_vec();
    bincode::encode_into_std_write(&rows, w, bincode::config::standard())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
    Ok(())
}
