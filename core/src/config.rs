//! The structured configuration record. Reading the legacy whitespace-token
//! `Parameters` file is left to the `cli` crate, which treats the
//! parameter-file format as an outer-surface concern; this module only
//! owns the value type and its validation rules.

use crate::error::{Error, Result};

/// Which initial-condition generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTag {
    Kepler,
    Bessel,
    Spiral,
}

impl ModelTag {
    pub fn parse(tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "kepler" | "kepler_galaxy" => Ok(Self::Kepler),
            "bessel" | "bessel_galaxy" => Ok(Self::Bessel),
            "spiral" | "spiral_galaxy" => Ok(Self::Spiral),
            other => Err(Error::Config(format!("unknown model tag {other:?}"))),
        }
    }
}

/// The simulation's configuration record.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Body count, including any central black hole.
    pub n: usize,
    /// Physical disk radius, kpc.
    pub ini_radius: f64,
    /// Tilt angle α of the disk plane, radians.
    pub inclination: f64,
    /// Orientation angle β of the disk plane, radians.
    pub ascending_node: f64,
    pub model: ModelTag,
    /// Integrator step, Gyr.
    pub dt: f64,
    /// Barnes-Hut opening angle θ ∈ (0, 1].
    pub theta: f64,
    pub n_steps: usize,
    pub save_every: usize,
}

impl Config {
    pub const DEFAULT_DT: f64 = 0.01;
    pub const DEFAULT_THETA: f64 = 0.3;

    /// Validates the configuration, rejecting `N < 2`, `theta <= 0`
    /// (or `> 1`), `dt <= 0`, and `save_every < 1`.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(Error::Config(format!("N must be >= 2, got {}", self.n)));
        }
        if !(self.ini_radius > 0.0) {
            return Err(Error::Config(format!(
                "ini_radius must be positive, got {}",
                self.ini_radius
            )));
        }
        if !(self.dt > 0.0) {
            return Err(Error::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.theta > 0.0 && self.theta <= 1.0) {
            return Err(Error::Config(format!(
                "theta must be in (0, 1], got {}",
                self.theta
            )));
        }
        if self.save_every < 1 {
            return Err(Error::Config(format!(
                "save_every must be >= 1, got {}",
                self.save_every
            )));
        }
        Ok(())
    }

    /// The one-time rescaling factor `(0.4 / ini_radius)^3` applied to
    /// `G` at the start of a run. Callers must apply this
    /// exactly once per simulation; applying it twice (e.g. once during
    /// init and again during evolve without sharing state) silently
    /// corrupts the dynamics.
    pub fn g_rescale_factor(&self) -> f64 {
        (0.4 / self.ini_radius).powi(3)
    }

    pub fn g_rescaled(&self) -> f64 {
        crate::constants::G * self.g_rescale_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            n: 1000,
            ini_radius: 15.0,
            inclination: 0.0,
            ascending_node: 0.0,
            model: ModelTag::Kepler,
            dt: Config::DEFAULT_DT,
            theta: Config::DEFAULT_THETA,
            n_steps: 100,
            save_every: 10,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_small_n() {
        let mut c = base();
        c.n = 1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_theta() {
        let mut c = base();
        c.theta = 0.0;
        assert!(c.validate().is_err());
        c.theta = 1.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_dt() {
        let mut c = base();
        c.dt = 0.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn model_tag_parse_rejects_unknown() {
        assert!(ModelTag::parse("unicorn").is_err());
        assert_eq!(ModelTag::parse("Kepler").unwrap(), ModelTag::Kepler);
    }
}
