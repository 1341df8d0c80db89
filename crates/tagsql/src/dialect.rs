//! SQL dialects and bind-parameter placeholders.
//!
//! - [`Dialect::Postgres`] numbers placeholders: `$1, $2, ...`. Every bound
//!   value gets the next index, even when the same slot is bound twice.
//! - [`Dialect::Mysql`] repeats `?` for every bound value. Binding relies on
//!   argument order alone.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OrmError, OrmResult};

/// SQL variant selecting placeholder syntax and upsert grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `$n` placeholders, `ON CONFLICT (...) DO UPDATE SET ...`
    #[default]
    Postgres,
    /// `?` placeholders, `ON DUPLICATE KEY UPDATE ...`
    Mysql,
}

impl Dialect {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
        }
    }

    /// Placeholder for the 1-based bind position `index`.
    pub fn placeholder(self, index: usize) -> String {
        let mut out = String::with_capacity(4);
        self.write_placeholder(&mut out, index);
        out
    }

    /// Comma-joined placeholders for positions `start..end`.
    ///
    /// An empty range yields an empty string.
    pub fn placeholders(self, start: usize, end: usize) -> String {
        let mut out = String::with_capacity(end.saturating_sub(start) * 3);
        for index in start..end {
            if index > start {
                out.push(',');
            }
            self.write_placeholder(&mut out, index);
        }
        out
    }

    pub(crate) fn write_placeholder(self, out: &mut String, index: usize) {
        match self {
            Dialect::Postgres => {
                // Writing into a String cannot fail.
                let _ = write!(out, "${index}");
            }
            Dialect::Mysql => out.push('?'),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = OrmError;

    fn from_str(s: &str) -> OrmResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::Mysql),
            _ => Err(OrmError::UnknownDialect(s.to_string())),
        }
    }
}

/// Accepts the same names as [`FromStr`], so config files and CLI-style
/// strings agree.
impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
