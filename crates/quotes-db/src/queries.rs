use crate::Database;
use crate::models::QuoteRow;
use anyhow::Result;
use quotes_core::{FieldPredicate, QuoteStore, StoreError};
use quotes_types::models::{AuthToken, Quote};
use rusqlite::{Connection, Row};

const QUOTE_COLUMNS: &str = "id, created_timestamp, messages";

impl Database {
    // -- Quotes --

    pub fn get_quote(&self, id: &str) -> Result<Option<QuoteRow>> {
        self.with_conn(|conn| query_quote_by_id(conn, id))
    }

    pub fn random_quotes(&self, limit: usize) -> Result<Vec<QuoteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY RANDOM() LIMIT ?1"
            ))?;
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let rows = stmt
                .query_map([limit], quote_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Quotes with at least one message satisfying `predicate`, each once.
    pub fn quotes_matching(&self, predicate: &FieldPredicate) -> Result<Vec<QuoteRow>> {
        let condition = match predicate {
            FieldPredicate::ContentContains(_) => {
                "instr(fold_case(json_extract(m.value, '$.content')), ?1) > 0"
            }
            FieldPredicate::AuthorIdEquals(_) => {
                "fold_case(json_extract(m.value, '$.author.id')) = ?1"
            }
            FieldPredicate::UsernameContains(_) => {
                "instr(fold_case(json_extract(m.value, '$.author.username')), ?1) > 0"
            }
        };

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {QUOTE_COLUMNS} FROM quotes q
                 WHERE EXISTS (SELECT 1 FROM json_each(q.messages) m WHERE {condition})"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([predicate.needle()], quote_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn insert_quote(&self, row: &QuoteRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO quotes (id, created_timestamp, messages) VALUES (?1, ?2, ?3)",
                rusqlite::params![row.id, row.created_timestamp, row.messages],
            )?;
            Ok(())
        })
    }

    pub fn delete_quote(&self, id: &str) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM quotes WHERE id = ?1", [id])?))
    }

    // -- Tokens --

    /// Adds an active token. An existing record, revoked or not, is left
    /// untouched and `false` is returned.
    pub fn insert_token(&self, token: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted =
                conn.execute("INSERT OR IGNORE INTO tokens (token, active) VALUES (?1, 1)", [token])?;
            Ok(inserted > 0)
        })
    }

    /// Returns false when no such token exists.
    pub fn set_token_active(&self, token: &str, active: bool) -> Result<bool> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE tokens SET active = ?2 WHERE token = ?1",
                rusqlite::params![token, active],
            )?;
            Ok(updated > 0)
        })
    }

    pub fn get_token(&self, token: &str) -> Result<Option<AuthToken>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT token, active FROM tokens WHERE token = ?1",
                [token],
                |row| {
                    Ok(AuthToken {
                        token: row.get(0)?,
                        active: row.get(1)?,
                    })
                },
            )
            .optional()
        })
    }
}

impl QuoteStore for Database {
    fn find_by_id(&self, id: &str) -> std::result::Result<Option<Quote>, StoreError> {
        Ok(self.get_quote(id)?.map(QuoteRow::into_quote).transpose()?)
    }

    fn find_random(&self, n: usize) -> std::result::Result<Vec<Quote>, StoreError> {
        Ok(into_quotes(self.random_quotes(n)?)?)
    }

    fn find_matching(
        &self,
        predicate: &FieldPredicate,
    ) -> std::result::Result<Vec<Quote>, StoreError> {
        Ok(into_quotes(self.quotes_matching(predicate)?)?)
    }

    fn insert(&self, quote: &Quote) -> std::result::Result<(), StoreError> {
        let row = QuoteRow::from_quote(quote)?;
        self.insert_quote(&row).map_err(|e| {
            if is_primary_key_violation(&e) {
                StoreError::DuplicateKey(quote.id.clone())
            } else {
                StoreError::Backend(e)
            }
        })
    }

    fn delete_by_id(&self, id: &str) -> std::result::Result<usize, StoreError> {
        Ok(self.delete_quote(id)?)
    }

    fn find_active_token(&self, token: &str) -> std::result::Result<bool, StoreError> {
        Ok(self.get_token(token)?.is_some_and(|t| t.active))
    }
}

fn query_quote_by_id(conn: &Connection, id: &str) -> Result<Option<QuoteRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?1"))?;
    let row = stmt.query_row([id], quote_row).optional()?;
    Ok(row)
}

fn quote_row(row: &Row<'_>) -> rusqlite::Result<QuoteRow> {
    Ok(QuoteRow {
        id: row.get(0)?,
        created_timestamp: row.get(1)?,
        messages: row.get(2)?,
    })
}

fn into_quotes(rows: Vec<QuoteRow>) -> Result<Vec<Quote>> {
    rows.into_iter().map(QuoteRow::into_quote).collect()
}

fn is_primary_key_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
