//! SQLite-backed cuisine and tag collections.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, LookupStore, StoreError};
use crate::recipe::{Cuisine, DocumentId, Tag};

pub struct SqliteLookupStore {
    db: Arc<Database>,
}

/// The two reference tables share a shape; only the table name differs.
#[derive(Clone, Copy)]
enum Table {
    Cuisines,
    Tags,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Cuisines => "cuisines",
            Table::Tags => "tags",
        }
    }
}

impl SqliteLookupStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn parse_id(raw: String) -> Result<DocumentId, StoreError> {
        raw.parse().map_err(|e: crate::recipe::InvalidDocumentId| StoreError::Corrupt {
            id: raw.clone(),
            reason: e.to_string(),
        })
    }

    fn by_name(
        conn: &Connection,
        table: Table,
        name: &str,
    ) -> Result<Option<(DocumentId, String)>, StoreError> {
        let sql = format!("SELECT id, name FROM {} WHERE name = ?", table.name());
        let row = conn
            .query_row(&sql, params![name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .optional()?;

        row.map(|(id, name)| Ok((Self::parse_id(id)?, name)))
            .transpose()
    }

    fn list(&self, table: Table) -> Result<Vec<(DocumentId, String)>, StoreError> {
        let rows = self.db.with_conn(|conn| {
            let sql = format!("SELECT id, name FROM {} ORDER BY name", table.name());
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        rows.into_iter()
            .map(|(id, name)| Ok((Self::parse_id(id)?, name)))
            .collect()
    }

    fn add(&self, table: Table, name: &str) -> Result<(DocumentId, String), StoreError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "INSERT OR IGNORE INTO {} (id, name) VALUES (?, ?)",
                table.name()
            );
            conn.execute(&sql, params![DocumentId::generate().as_str(), name])?;

            Self::by_name(conn, table, name)?.ok_or_else(|| {
                StoreError::Database(format!("{} entry '{}' vanished after insert", table.name(), name))
            })
        })
    }
}

impl LookupStore for SqliteLookupStore {
    fn cuisine_by_name(&self, name: &str) -> Result<Option<Cuisine>, StoreError> {
        let found = self
            .db
            .with_conn(|conn| Self::by_name(conn, Table::Cuisines, name))?;
        Ok(found.map(|(id, name)| Cuisine { id, name }))
    }

    fn tags_by_names(&self, names: &[String]) -> Result<Vec<Tag>, StoreError> {
        let found = self.db.with_conn(|conn| {
            let mut found = Vec::new();
            for name in names {
                if let Some(row) = Self::by_name(conn, Table::Tags, name)? {
                    found.push(row);
                }
            }
            Ok(found)
        })?;
        Ok(found.into_iter().map(|(id, name)| Tag { id, name }).collect())
    }

    fn cuisines(&self) -> Result<Vec<Cuisine>, StoreError> {
        Ok(self
            .list(Table::Cuisines)?
            .into_iter()
            .map(|(id, name)| Cuisine { id, name })
            .collect())
    }

    fn tags(&self) -> Result<Vec<Tag>, StoreError> {
        Ok(self
            .list(Table::Tags)?
            .into_iter()
            .map(|(id, name)| Tag { id, name })
            .collect())
    }

    fn add_cuisine(&self, name: &str) -> Result<Cuisine, StoreError> {
        let (id, name) = self.add(Table::Cuisines, name)?;
        Ok(Cuisine { id, name })
    }

    fn add_tag(&self, name: &str) -> Result<Tag, StoreError> {
        let (id, name) = self.add(Table::Tags, name)?;
        Ok(Tag { id, name })
    }
}
