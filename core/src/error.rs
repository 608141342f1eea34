//! Error kinds. `DomainWarning` is deliberately not a variant here:
//! it is non-fatal, so the Integrator reports it via `log::warn!` and
//! keeps running rather than surfacing a `Result::Err`.

/// Fatal errors. Any of these aborts the run and is surfaced to the CLI
/// as a non-zero exit code.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing/invalid configuration field, unknown model tag, or a
    /// value outside its valid range (`N < 2`, `theta <= 0`, `dt <= 0`, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// An on-disk artifact could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Adaptive quadrature failed to converge, returned a non-finite
    /// value, the inverse-CDF root solve didn't converge, or a force
    /// evaluation produced NaN/infinite output.
    #[error("numeric error: {0}")]
    Numeric(String),
}

pub type Result<T> = std::result::Result<T, Error>;
