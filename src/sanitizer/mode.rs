//! Sanitization modes
//!
//! A mode selects how aggressively values are redacted. The active rule
//! sets nest: everything redacted in [`Mode::Minimal`] is also redacted in
//! [`Mode::Moderate`], and everything redacted in `Moderate` is also
//! redacted in [`Mode::Aggressive`].
//!
//! # Examples
//!
//! ```
//! use dossier_sanitizer::sanitizer::Mode;
//!
//! let mode: Mode = "moderate".parse()?;
//! assert_eq!(mode, Mode::Moderate);
//! assert_eq!(mode.to_string(), "moderate");
//!
//! // Literals are case-sensitive
//! assert!("Moderate".parse::<Mode>().is_err());
//! # Ok::<(), dossier_sanitizer::domain::SanitizerError>(())
//! ```

use crate::domain::SanitizerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Redaction aggressiveness level
///
/// # Serialization
///
/// Uses lowercase literals for TOML/JSON:
/// - `Aggressive` → `"aggressive"`
/// - `Moderate` → `"moderate"`
/// - `Minimal` → `"minimal"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every rule: credentials, crypto, identity and the full network set
    /// (private addresses, subnets, public keys).
    #[default]
    Aggressive,

    /// Credentials, crypto, identity, and network data with public
    /// exposure only (public IPs, MAC addresses, emails).
    Moderate,

    /// Credentials and crypto material plus a few always-sensitive
    /// system identifiers. Network and identity data stay untouched.
    Minimal,
}

impl Mode {
    /// All valid modes, most aggressive first
    pub fn all() -> [Mode; 3] {
        [Mode::Aggressive, Mode::Moderate, Mode::Minimal]
    }

    /// Check whether a literal names a valid mode (case-sensitive)
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Mode>().is_ok()
    }

    /// Literal used on the command line and in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Moderate => "moderate",
            Self::Minimal => "minimal",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Aggressive => {
                "Redact all sensitive data including private IPs, subnets, hostnames and public keys"
            }
            Self::Moderate => {
                "Redact credentials, identities and publicly exposed network data; keep internal topology"
            }
            Self::Minimal => "Redact only credentials, private keys and system identifiers",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SanitizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aggressive" => Ok(Self::Aggressive),
            "moderate" => Ok(Self::Moderate),
            "minimal" => Ok(Self::Minimal),
            other => Err(SanitizerError::InvalidMode(other.to_string())),
        }
    }
}
