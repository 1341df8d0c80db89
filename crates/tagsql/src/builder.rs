//! Statement builder: entity in, SQL text and arguments out.
//!
//! [`Builder`] is the whole configuration (dialect and tag name). It holds no
//! other state, so one value can be shared freely between threads.
//!
//! # Example
//!
//! ```ignore
//! use tagsql::{Builder, Dialect};
//!
//! let b = Builder::new(Dialect::Postgres);
//! let stmt = b.update_one(&user)?;
//! // UPDATE users SET email = $1,name = $2 WHERE id = $3
//! client.execute(stmt.sql(), &stmt.params_ref()).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::composite::Composite;
use crate::dialect::Dialect;
use crate::entity::Entity;
use crate::error::{OrmError, OrmResult};
use crate::named::{self, NamedFields, NamedSlot};
use crate::slot::SlotRef;
use crate::statement::Statement;
use crate::tag;

/// Tag read by default for column names: `#[tag(sql = "...")]`.
pub const DEFAULT_TAG: &str = "sql";

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

/// Statement builder configuration: dialect plus the tag holding column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    #[serde(default)]
    dialect: Dialect,
    #[serde(default = "default_tag")]
    tag: String,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Builder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tag: default_tag(),
        }
    }

    /// Read column names from `tag` instead of [`DEFAULT_TAG`].
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Resolve every column of `entity`, in `columns()` order.
    pub fn named_fields<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<NamedFields<'e>> {
        self.traced(entity, named::resolve(entity, &self.tag))
    }

    /// Column name declared for the field `slot` points at.
    pub fn column_name<E: Entity>(&self, entity: &E, slot: &SlotRef<'_>) -> OrmResult<&'static str> {
        self.traced(entity, tag::column_name(entity, slot, &self.tag))
    }

    /// `SELECT <cols> FROM <table>`
    pub fn select<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        if fields.is_empty() {
            return Err(OrmError::empty_statement("select", table));
        }

        let sql = format!("SELECT {} FROM {}", join_names(&fields), table);
        Ok(self.finish("select", table, sql, Vec::new()))
    }

    /// `SELECT <cols> FROM <table> WHERE <id> = $1`
    pub fn select_one<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        let id = identifier(&fields, "select_one", table)?;

        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            join_names(&fields),
            table,
            id.name,
            self.dialect.placeholder(1)
        );
        Ok(self.finish("select_one", table, sql, vec![id.slot.clone()]))
    }

    /// `INSERT INTO <table> (<cols>) VALUES (<placeholders>)`
    ///
    /// The identifier column is left to the database unless the entity opts
    /// out through [`Entity::auto_id`].
    pub fn insert<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        let cols = insert_columns(&fields, entity.auto_id());
        if cols.is_empty() {
            return Err(OrmError::empty_statement("insert", table));
        }

        let sql = self.insert_sql(table, cols);
        Ok(self.finish("insert", table, sql, slots(cols)))
    }

    /// `UPDATE <table> SET <col> = <ph>,...` over every non-identifier column.
    pub fn update<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        let data = data_columns(&fields, "update", table)?;

        let sql = format!("UPDATE {} SET {}", table, self.assignments(data, 1));
        Ok(self.finish("update", table, sql, slots(data)))
    }

    /// [`update`](Self::update) restricted to one row by identifier.
    ///
    /// The identifier is bound last, after the SET values.
    pub fn update_one<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        let data = data_columns(&fields, "update_one", table)?;
        let id = identifier(&fields, "update_one", table)?;

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            table,
            self.assignments(data, 1),
            id.name,
            self.dialect.placeholder(data.len() + 1)
        );

        let mut args = slots(data);
        args.push(id.slot.clone());
        Ok(self.finish("update_one", table, sql, args))
    }

    /// Insert, or update every non-identifier column when the row exists.
    ///
    /// - Postgres: `... ON CONFLICT (<id>) DO UPDATE SET ...`
    /// - MySQL: `... ON DUPLICATE KEY UPDATE ...`
    ///
    /// Non-identifier values are bound twice: once for the insert, once for
    /// the update. Update placeholders continue numbering after the insert's.
    pub fn upsert_one<'e, E: Entity>(&self, entity: &'e E) -> OrmResult<Statement<'e>> {
        let fields = self.named_fields(entity)?;
        let table = entity.table_name();
        let data = data_columns(&fields, "upsert_one", table)?;
        let id = identifier(&fields, "upsert_one", table)?;
        let cols = insert_columns(&fields, entity.auto_id());

        let insert = self.insert_sql(table, cols);
        let set = self.assignments(data, cols.len() + 1);
        let sql = match self.dialect {
            Dialect::Postgres => {
                format!("{insert} ON CONFLICT ({}) DO UPDATE SET {set}", id.name)
            }
            Dialect::Mysql => format!("{insert} ON DUPLICATE KEY UPDATE {set}"),
        };

        let mut args = slots(cols);
        args.extend(slots(data));
        Ok(self.finish("upsert_one", table, sql, args))
    }

    fn insert_sql(&self, table: &str, cols: &[NamedSlot<'_>]) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            join_names(cols),
            self.dialect.placeholders(1, cols.len() + 1)
        )
    }

    /// `a = <ph(start)>,b = <ph(start + 1)>,...`
    fn assignments(&self, cols: &[NamedSlot<'_>], start: usize) -> String {
        let mut out = String::new();
        for (i, col) in cols.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(col.name);
            out.push_str(" = ");
            self.dialect.write_placeholder(&mut out, start + i);
        }
        out
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn traced<T>(&self, entity: &dyn Composite, result: OrmResult<T>) -> OrmResult<T> {
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::debug!(
                target: "tagsql.resolve",
                entity = entity.composite_name(),
                tag = %self.tag,
                error = %err,
                "column resolution failed"
            );
        }
        result
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn finish<'e>(
        &self,
        statement: &'static str,
        table: &str,
        sql: String,
        args: Vec<SlotRef<'e>>,
    ) -> Statement<'e> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "tagsql.sql",
            statement,
            table,
            dialect = %self.dialect,
            sql = %sql,
            args = args.len(),
            "built statement"
        );
        Statement::new(sql, args)
    }
}

fn join_names(cols: &[NamedSlot<'_>]) -> String {
    let mut out = String::new();
    for (i, col) in cols.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(col.name);
    }
    out
}

fn slots<'e>(cols: &[NamedSlot<'e>]) -> Vec<SlotRef<'e>> {
    cols.iter().map(|c| c.slot.clone()).collect()
}

fn insert_columns<'f, 'e>(fields: &'f NamedFields<'e>, auto_id: bool) -> &'f [NamedSlot<'e>] {
    if auto_id { fields.data() } else { fields.as_slice() }
}

fn identifier<'f, 'e>(
    fields: &'f NamedFields<'e>,
    statement: &'static str,
    table: &str,
) -> OrmResult<&'f NamedSlot<'e>> {
    fields
        .identifier()
        .ok_or_else(|| OrmError::empty_statement(statement, table))
}

fn data_columns<'f, 'e>(
    fields: &'f NamedFields<'e>,
    statement: &'static str,
    table: &str,
) -> OrmResult<&'f [NamedSlot<'e>]> {
    let data = fields.data();
    if data.is_empty() {
        return Err(OrmError::empty_statement(statement, table));
    }
    Ok(data)
}
