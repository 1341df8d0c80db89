//! Built statements: SQL text plus its ordered argument list.

use std::fmt;

use tokio_postgres::types::ToSql;

use crate::slot::SlotRef;

/// Generated SQL and the arguments to bind with it.
///
/// Arguments are ordered by bind position. For [`Dialect::Mysql`] that order
/// is the only thing tying values to `?` placeholders.
///
/// [`Dialect::Mysql`]: crate::Dialect::Mysql
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    sql: String,
    args: Vec<SlotRef<'a>>,
}

impl<'a> Statement<'a> {
    pub(crate) fn new(sql: String, args: Vec<SlotRef<'a>>) -> Self {
        Self { sql, args }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[SlotRef<'a>] {
        &self.args
    }

    /// Arguments as references ready for `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|a| a.as_param()).collect()
    }

    pub fn into_parts(self) -> (String, Vec<SlotRef<'a>>) {
        (self.sql, self.args)
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
