//! Reads the legacy whitespace-token `Parameters` file: one
//! `key value` pair per line, blank lines and `#`-prefixed lines
//! ignored, keys matched case-insensitively.

use std::collections::HashMap;
use std::path::Path;

use galaxy_bh::{Config, Error, ModelTag, Result};

/// Parses a `Parameters`-style file into a `Config`. Any field the file
/// omits falls back to the engine defaults (`dt`, `theta`) or is
/// required (`N`, `ini_radius`, `model`, ...).
pub fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)?;
    let mut fields: HashMap<String, String> = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let key = tokens.next().ok_or_else(|| {
            Error::Config(format!("malformed parameter line: {line:?}"))
        })?;
        let value = tokens.collect::<Vec<_>>().join(" ");
        if value.is_empty() {
            return Err(Error::Config(format!("parameter {key:?} has no value")));
        }
        fields.insert(key.to_ascii_lowercase(), value);
    }

    let get = |key: &str| -> Result<&String> {
        fields
            .get(key)
            .ok_or_else(|| Error::Config(format!("missing required parameter {key:?}")))
    };
    let parse_f64 = |key: &str| -> Result<f64> {
        get(key)?
            .parse::<f64>()
            .map_err(|e| Error::Config(format!("parameter {key:?} is not a number: {e}")))
    };
    let parse_usize = |key: &str| -> Result<usize> {
        get(key)?
            .parse::<usize>()
            .map_err(|e| Error::Config(format!("parameter {key:?} is not an integer: {e}")))
    };

    let config = Config {
        n: parse_usize("n")?,
        ini_radius: parse_f64("ini_radius")?,
        inclination: parse_f64("inclination")?,
        ascending_node: parse_f64("ascending_node")?,
        model: ModelTag::parse(get("model")?)?,
        dt: fields
            .get("dt")
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|e| Error::Config(format!("parameter \"dt\" is not a number: {e}")))?
            .unwrap_or(Config::DEFAULT_DT),
        theta: fields
            .get("theta")
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|e| Error::Config(format!("parameter \"theta\" is not a number: {e}")))?
            .unwrap_or(Config::DEFAULT_THETA),
        n_steps: parse_usize("n_steps")?,
        save_every: parse_usize("save_every")?,
    };
    config.validate()?;
    Ok(config)
}
