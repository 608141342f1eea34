//! Velocity-Verlet time evolution driven by the octree.

use crate::body::Body;
use crate::error::{Error, Result};
use crate::octree::{RootCube, Tree};

/// Receives the body array at each save point. Ownership of the slice's
/// contents passes to the sink once `on_snapshot` returns; implementations
/// that need to retain the data should copy it.
pub trait StepSink {
    fn on_snapshot(&mut self, step: usize, bodies: &[Body]);
}

impl<F: FnMut(usize, &[Body])> StepSink for F {
    fn on_snapshot(&mut self, step: usize, bodies: &[Body]) {
        self(step, bodies)
    }
}

impl<T: StepSink + ?Sized> StepSink for &mut T {
    fn on_snapshot(&mut self, step: usize, bodies: &[Body]) {
        (**self).on_snapshot(step, bodies)
    }
}

/// Drives `bodies` through `n_steps` of Velocity-Verlet, rebuilding the
/// octree every step and calling `sink` every `save_every` steps
/// (including step 0, the initial state).
///
/// The tree built at the top of a step is reused for both half-kicks: the
/// second half-kick recomputes each body's force at its post-drift
/// position, but walks the same (now slightly stale) tree rather than
/// rebuilding it after the drift, since that's cheaper and the tree isn't
/// rebuilt again until the next step anyway.
pub struct Integrator {
    pub theta: f64,
    pub dt: f64,
    pub g: f64,
}

impl Integrator {
    pub fn new(theta: f64, dt: f64, g: f64) -> Self {
        Self { theta, dt, g }
    }

    /// Runs `n_steps` steps over `bodies` in place, stopping at the first
    /// step that produces a non-finite force.
    pub fn run(&self, bodies: &mut [Body], n_steps: usize, save_every: usize, mut sink: impl StepSink) -> Result<()> {
        sink.on_snapshot(0, bodies);

        for step in 1..=n_steps {
            self.step(bodies)?;
            if step % save_every == 0 {
                sink.on_snapshot(step, bodies);
            }
        }
        Ok(())
    }

    /// One kick-drift-kick step. Builds the tree once, applies the first
    /// half-kick and drift from forces evaluated at the pre-drift
    /// positions, then recomputes each body's force at its new,
    /// post-drift position (still against that same tree) for the second
    /// half-kick. A non-finite force anywhere aborts the step — there's no
    /// way to recover a sane trajectory from a NaN state, so the caller
    /// gets an error instead of silently corrupted bodies.
    pub fn step(&self, bodies: &mut [Body]) -> Result<()> {
        let (root, expanded) = RootCube::fit(bodies);
        if expanded {
            log::warn!(
                "domain warning: root cube expanded to size {:.6} to contain all bodies",
                root.size
            );
        }
        let tree = Tree::build(bodies, root);

        let forces: Vec<glam::DVec3> = (0..bodies.len())
            .map(|i| tree.force_on(i, self.theta, self.g))
            .collect();
        for f in &forces {
            if !f.is_finite() {
                return Err(Error::Numeric("gravitational force evaluated to a non-finite value".into()));
            }
        }

        for (b, f1) in bodies.iter_mut().zip(forces.iter()) {
            b.p += 0.5 * *f1 * self.dt;
            b.r += (b.p / b.m) * self.dt;
        }

        for b in bodies.iter_mut() {
            let f2 = tree.force_on_point(b.r, b.m, self.theta, self.g);
            if !f2.is_finite() {
                return Err(Error::Numeric("gravitational force evaluated to a non-finite value".into()));
            }
            b.p += 0.5 * f2 * self.dt;
        }

        Ok(())
    }
}
