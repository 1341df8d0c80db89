//! Example printing the statements built for a small entity.
//!
//! Run with:
//!   RUST_LOG=tagsql=debug cargo run --example statements -p tagsql
//!
//! No database is needed: the statements are only printed.

use serde::Serialize;
use tagsql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Composite)]
struct Audit {
    #[tag(sql = "created_by")]
    created_by: i64,
    #[tag(sql = "updated_by")]
    updated_by: i64,
}

#[derive(Debug, Default, Serialize)]
struct Meta {
    tags: Vec<String>,
}

#[derive(Debug, Default, Composite)]
struct Article {
    #[tag(sql = "id,pk")]
    id: i64,
    #[tag(sql = "title")]
    title: String,
    #[tag(sql = "meta")]
    meta: Meta,
    #[tag(embed)]
    audit: Audit,
}

impl Entity for Article {
    fn table_name(&self) -> &str {
        "articles"
    }

    fn columns(&self) -> Vec<SlotRef<'_>> {
        vec![
            SlotRef::new(&self.id),
            SlotRef::new(&self.title),
            SlotRef::json(&self.meta),
            SlotRef::new(&self.audit.created_by),
            SlotRef::new(&self.audit.updated_by),
        ]
    }
}

fn print(label: &str, stmt: &Statement<'_>) {
    println!("{label:>10}: {stmt}");
    println!("{:>10}  {} argument(s)", "", stmt.args().len());
}

fn main() -> OrmResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let article = Article {
        id: 1,
        title: "Hello".into(),
        meta: Meta {
            tags: vec!["intro".into()],
        },
        audit: Audit {
            created_by: 7,
            updated_by: 7,
        },
    };

    for dialect in [Dialect::Postgres, Dialect::Mysql] {
        println!("== {dialect}");
        let b = Builder::new(dialect);
        print("select", &b.select(&article)?);
        print("select_one", &b.select_one(&article)?);
        print("insert", &b.insert(&article)?);
        print("update", &b.update(&article)?);
        print("update_one", &b.update_one(&article)?);
        print("upsert_one", &b.upsert_one(&article)?);
    }

    let names = Builder::default().named_fields(&article)?.names().prefix("a");
    println!("aliased columns: {}", names.join());

    Ok(())
}
