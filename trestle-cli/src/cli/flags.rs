//! Boolean arguments written as words.

use thiserror::Error;

const TRUTHY: [&str; 5] = ["yes", "true", "t", "y", "1"];
const FALSY: [&str; 5] = ["no", "false", "f", "n", "0"];

/// A boolean argument that matched neither spelling list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{provided}` is not a boolean; use yes/no, true/false, t/f, y/n or 1/0")]
pub struct InvalidFlag {
    /// Raw value supplied by the user.
    pub provided: String,
}

/// Parses a boolean argument case-insensitively.
///
/// # Errors
/// Returns [`InvalidFlag`] for unrecognised spellings.
///
/// # Examples
/// ```
/// use trestle_cli::cli::parse_flag;
///
/// assert_eq!(parse_flag("Yes"), Ok(true));
/// assert_eq!(parse_flag("F"), Ok(false));
/// assert!(parse_flag("maybe").is_err());
/// ```
pub fn parse_flag(raw: &str) -> Result<bool, InvalidFlag> {
    let lowered = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(InvalidFlag {
            provided: raw.to_owned(),
        })
    }
}
