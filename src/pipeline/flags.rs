//! Default-flag merging.
//!
//! Ghostscript is always run with four switches unless the caller already
//! supplied an equivalent one:
//!
//! | Default            | Suppressed by         |
//! |--------------------|-----------------------|
//! | `dSAFER`           | any flag `dSAFER…`    |
//! | `dBATCH`           | exactly `dBATCH`      |
//! | `dNOPAUSE`         | any flag `dNOPAUSE…`  |
//! | `sDEVICE=pdfwrite` | any flag `sDEVICE…`   |
//!
//! `dBATCH` is the only exact match.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A default switch and the pattern that, if matched by any user flag,
/// suppresses it.
struct DefaultFlag {
    flag: &'static str,
    pattern: &'static Lazy<Regex>,
}

static RE_SAFER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^dSAFER").unwrap());
static RE_BATCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^dBATCH$").unwrap());
static RE_NOPAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^dNOPAUSE").unwrap());
static RE_DEVICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^sDEVICE").unwrap());

static DEFAULTS: [DefaultFlag; 4] = [
    DefaultFlag {
        flag: "dSAFER",
        pattern: &RE_SAFER,
    },
    DefaultFlag {
        flag: "dBATCH",
        pattern: &RE_BATCH,
    },
    DefaultFlag {
        flag: "dNOPAUSE",
        pattern: &RE_NOPAUSE,
    },
    DefaultFlag {
        flag: "sDEVICE=pdfwrite",
        pattern: &RE_DEVICE,
    },
];

/// The four defaults in the order they are emitted.
pub fn default_flags() -> impl Iterator<Item = &'static str> {
    DEFAULTS.iter().map(|d| d.flag)
}

/// The final, ordered switch list handed to Ghostscript (no leading dashes).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedFlags(Vec<String>);

impl ResolvedFlags {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ResolvedFlags {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Prepend every default not already covered by `user_flags`.
///
/// Pure and idempotent: merging the result again yields the same list.
pub fn merge_defaults<S: AsRef<str>>(user_flags: &[S]) -> ResolvedFlags {
    let mut merged: Vec<String> = DEFAULTS
        .iter()
        .filter(|d| !user_flags.iter().any(|f| d.pattern.is_match(f.as_ref())))
        .map(|d| d.flag.to_string())
        .collect();
    merged.extend(user_flags.iter().map(|f| f.as_ref().to_string()));
    ResolvedFlags(merged)
}
