//! Drink repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the catalog CRUD surface over the `drinks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - `insert_all` is all-or-nothing: one transaction per batch.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List results are ordered by `id ASC`.

use crate::db::DbError;
use crate::model::drink::{Drink, DrinkId, DrinkValidationError, NewDrink};
use log::{debug, info};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DRINK_SELECT_SQL: &str = "SELECT
    id,
    name,
    ingredients,
    description,
    image,
    shaking_time,
    is_favourite
FROM drinks";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "ingredients",
    "description",
    "image",
    "shaking_time",
    "is_favourite",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for drink persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DrinkValidationError),
    Db(DbError),
    NotFound(DrinkId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "drink not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted drink data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection not migrated: missing table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "connection not migrated: missing column `{table}.{column}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DrinkValidationError> for RepoError {
    fn from(value: DrinkValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the drink catalog.
pub trait DrinkRepository {
    /// Inserts every recipe atomically and returns the assigned ids in input order.
    fn insert_all(&mut self, drinks: &[NewDrink]) -> RepoResult<Vec<DrinkId>>;
    /// Like `insert_all`, but only when the table is empty at write time.
    ///
    /// Returns `None` without writing when rows already exist.
    fn insert_all_if_empty(&mut self, drinks: &[NewDrink]) -> RepoResult<Option<Vec<DrinkId>>>;
    /// Replaces all mutable fields of one drink matched by id.
    fn update_drink(&self, drink: &Drink) -> RepoResult<()>;
    /// Exact name match; the lowest id wins when names repeat.
    fn get_drink_by_name(&self, name: &str) -> RepoResult<Option<Drink>>;
    fn get_drink(&self, id: DrinkId) -> RepoResult<Option<Drink>>;
    /// `name LIKE pattern ESCAPE '\'`; the caller owns wildcard placement.
    fn find_drinks_by_pattern(&self, pattern: &str) -> RepoResult<Vec<Drink>>;
    fn list_drinks(&self) -> RepoResult<Vec<Drink>>;
    fn list_favourites(&self) -> RepoResult<Vec<Drink>>;
    fn count_drinks(&self) -> RepoResult<u64>;
    /// Deletes every row and returns how many were removed.
    fn delete_all(&mut self) -> RepoResult<usize>;
    /// Swaps the whole catalog for `drinks` in one transaction.
    ///
    /// Returns `(removed, inserted ids)`; a failed batch keeps the old rows.
    fn replace_all(&mut self, drinks: &[NewDrink]) -> RepoResult<(usize, Vec<DrinkId>)>;
}

/// SQLite-backed drink repository.
pub struct SqliteDrinkRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDrinkRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the connection
    ///   was not opened through `db::open_db*`.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_drink_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DrinkRepository for SqliteDrinkRepository<'_> {
    fn insert_all(&mut self, drinks: &[NewDrink]) -> RepoResult<Vec<DrinkId>> {
        for drink in drinks {
            drink.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let ids = insert_in_tx(&tx, drinks)?;
        tx.commit()?;

        info!(
            "event=drink_insert_all module=repo status=ok count={}",
            ids.len()
        );
        Ok(ids)
    }

    fn insert_all_if_empty(&mut self, drinks: &[NewDrink]) -> RepoResult<Option<Vec<DrinkId>>> {
        for drink in drinks {
            drink.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM drinks;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(None);
        }
        let ids = insert_in_tx(&tx, drinks)?;
        tx.commit()?;

        info!(
            "event=drink_insert_all module=repo status=ok count={} mode=if_empty",
            ids.len()
        );
        Ok(Some(ids))
    }

    fn update_drink(&self, drink: &Drink) -> RepoResult<()> {
        drink.validate()?;

        let changed = self.conn.execute(
            "UPDATE drinks
             SET
                name = ?1,
                ingredients = ?2,
                description = ?3,
                image = ?4,
                shaking_time = ?5,
                is_favourite = ?6
             WHERE id = ?7;",
            params![
                drink.name.as_str(),
                drink.ingredients.as_str(),
                drink.description.as_str(),
                drink.image.as_str(),
                drink.shaking_time_secs,
                bool_to_int(drink.is_favourite),
                drink.id.0,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(drink.id));
        }

        debug!(
            "event=drink_update module=repo status=ok drink_id={}",
            drink.id
        );
        Ok(())
    }

    fn get_drink_by_name(&self, name: &str) -> RepoResult<Option<Drink>> {
        query_one(
            self.conn,
            &format!("{DRINK_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
            params![name],
        )
    }

    fn get_drink(&self, id: DrinkId) -> RepoResult<Option<Drink>> {
        query_one(
            self.conn,
            &format!("{DRINK_SELECT_SQL} WHERE id = ?1;"),
            params![id.0],
        )
    }

    fn find_drinks_by_pattern(&self, pattern: &str) -> RepoResult<Vec<Drink>> {
        query_many(
            self.conn,
            &format!("{DRINK_SELECT_SQL} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id ASC;"),
            params![pattern],
        )
    }

    fn list_drinks(&self) -> RepoResult<Vec<Drink>> {
        query_many(
            self.conn,
            &format!("{DRINK_SELECT_SQL} ORDER BY id ASC;"),
            [],
        )
    }

    fn list_favourites(&self) -> RepoResult<Vec<Drink>> {
        query_many(
            self.conn,
            &format!("{DRINK_SELECT_SQL} WHERE is_favourite = 1 ORDER BY id ASC;"),
            [],
        )
    }

    fn count_drinks(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drinks;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn delete_all(&mut self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM drinks;", [])?;
        info!(
            "event=drink_delete_all module=repo status=ok removed={}",
            removed
        );
        Ok(removed)
    }

    fn replace_all(&mut self, drinks: &[NewDrink]) -> RepoResult<(usize, Vec<DrinkId>)> {
        for drink in drinks {
            drink.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM drinks;", [])?;
        let ids = insert_in_tx(&tx, drinks)?;
        tx.commit()?;

        info!(
            "event=drink_replace_all module=repo status=ok removed={} inserted={}",
            removed,
            ids.len()
        );
        Ok((removed, ids))
    }
}

fn insert_in_tx(tx: &Transaction<'_>, drinks: &[NewDrink]) -> RepoResult<Vec<DrinkId>> {
    let mut stmt = tx.prepare(
        "INSERT INTO drinks (
            name,
            ingredients,
            description,
            image,
            shaking_time,
            is_favourite
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
    )?;
    let mut ids = Vec::with_capacity(drinks.len());
    for drink in drinks {
        stmt.execute(params![
            drink.name.as_str(),
            drink.ingredients.as_str(),
            drink.description.as_str(),
            drink.image.as_str(),
            drink.shaking_time_secs,
            bool_to_int(drink.is_favourite),
        ])?;
        ids.push(DrinkId(tx.last_insert_rowid()));
    }
    Ok(ids)
}

fn query_one(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> RepoResult<Option<Drink>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_drink_row(row)?));
    }
    Ok(None)
}

fn query_many(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Drink>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut drinks = Vec::new();
    while let Some(row) = rows.next()? {
        drinks.push(parse_drink_row(row)?);
    }
    Ok(drinks)
}

fn parse_drink_row(row: &Row<'_>) -> RepoResult<Drink> {
    let id = DrinkId(row.get("id")?);

    let shaking_raw: i64 = row.get("shaking_time")?;
    let shaking_time_secs = u32::try_from(shaking_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid shaking_time value `{shaking_raw}` in drinks.shaking_time (id={id})"
        ))
    })?;

    let is_favourite = match row.get::<_, i64>("is_favourite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_favourite value `{other}` in drinks.is_favourite (id={id})"
            )));
        }
    };

    let drink = Drink {
        id,
        name: row.get("name")?,
        ingredients: row.get("ingredients")?,
        description: row.get("description")?,
        image: row.get("image")?,
        shaking_time_secs,
        is_favourite,
    };
    drink.validate()?;
    Ok(drink)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_drink_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "drinks")? {
        return Err(RepoError::MissingRequiredTable("drinks"));
    }

    for &column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "drinks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "drinks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
