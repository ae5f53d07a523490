//! # Recipe Store
//!
//! Normalized persistence of cocktail recipes: one `recipes` row plus five
//! dependent tables (alcohol ingredients, non-alcohol ingredients, garnishes,
//! utensils, steps), each foreign-keyed back to the parent recipe.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use crate::errors::BotError;
use crate::recipe_model::{Ingredient, Recipe};

const SCHEMA: [&str; 10] = [
    "CREATE TABLE IF NOT EXISTS recipes (
        recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS alcohol_ingredients (
        ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes (recipe_id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        quantity TEXT
    )",
    "CREATE TABLE IF NOT EXISTS non_alcohol_ingredients (
        ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes (recipe_id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        quantity TEXT
    )",
    "CREATE TABLE IF NOT EXISTS garnishes (
        garnish_id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes (recipe_id) ON DELETE CASCADE,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS utensils (
        utensil_id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes (recipe_id) ON DELETE CASCADE,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS steps (
        step_id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes (recipe_id) ON DELETE CASCADE,
        step_number INTEGER NOT NULL,
        instruction TEXT NOT NULL,
        UNIQUE (recipe_id, step_number)
    )",
    "CREATE INDEX IF NOT EXISTS idx_alcohol_ingredients_recipe ON alcohol_ingredients (recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_non_alcohol_ingredients_recipe ON non_alcohol_ingredients (recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_garnishes_recipe ON garnishes (recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_utensils_recipe ON utensils (recipe_id)",
];

/// Tables holding `{name, quantity}` rows
#[derive(Debug, Clone, Copy)]
enum IngredientTable {
    Alcohol,
    NonAlcohol,
}

impl IngredientTable {
    fn name(self) -> &'static str {
        match self {
            IngredientTable::Alcohol => "alcohol_ingredients",
            IngredientTable::NonAlcohol => "non_alcohol_ingredients",
        }
    }
}

/// Tables holding plain label rows
#[derive(Debug, Clone, Copy)]
enum LabelTable {
    Garnishes,
    Utensils,
}

impl LabelTable {
    fn name(self) -> &'static str {
        match self {
            LabelTable::Garnishes => "garnishes",
            LabelTable::Utensils => "utensils",
        }
    }
}

fn persistence(context: &'static str) -> impl Fn(sqlx::Error) -> BotError {
    move |err| BotError::Persistence(format!("{context}: {err}"))
}

/// Handle to the recipe database
#[derive(Debug, Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Connect to a SQLite database URL, creating the file if needed
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, BotError> {
        info!(database_url = %database_url, "Connecting to recipe database");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(persistence("invalid database URL"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(persistence("failed to open database"))?;

        Ok(Self { pool })
    }

    /// Private in-memory database, mostly useful for tests.
    ///
    /// A single connection that never expires, since every SQLite memory
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self, BotError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(persistence("invalid database URL"))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(persistence("failed to open database"))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the recipe table and its five dependent tables if missing
    pub async fn ensure_schema(&self) -> Result<(), BotError> {
        info!("Initializing database schema...");

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| BotError::Schema(format!("failed to create schema: {e}")))?;
        }

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Insert a recipe with all of its dependent rows in one transaction.
    ///
    /// Returns the identifier assigned to the new recipe. Nothing is written
    /// if any statement fails.
    pub async fn insert(&self, recipe: &Recipe) -> Result<i64, BotError> {
        if recipe.name.trim().is_empty() {
            return Err(BotError::Persistence("recipe name is required".to_string()));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(persistence("failed to begin transaction"))?;

        let recipe_id =
            sqlx::query("INSERT INTO recipes (owner_id, name, description) VALUES (?, ?, ?)")
                .bind(recipe.owner)
                .bind(&recipe.name)
                .bind(&recipe.description)
                .execute(&mut *tx)
                .await
                .map_err(persistence("failed to insert recipe"))?
                .last_insert_rowid();

        insert_ingredients(&mut tx, recipe_id, IngredientTable::Alcohol, &recipe.alcohol_ingredients)
            .await?;
        insert_ingredients(
            &mut tx,
            recipe_id,
            IngredientTable::NonAlcohol,
            &recipe.non_alcohol_ingredients,
        )
        .await?;
        insert_labels(&mut tx, recipe_id, LabelTable::Garnishes, &recipe.garnishes).await?;
        insert_labels(&mut tx, recipe_id, LabelTable::Utensils, &recipe.utensils).await?;

        for (index, instruction) in recipe.steps.iter().enumerate() {
            sqlx::query("INSERT INTO steps (recipe_id, step_number, instruction) VALUES (?, ?, ?)")
                .bind(recipe_id)
                .bind(index as i64 + 1)
                .bind(instruction)
                .execute(&mut *tx)
                .await
                .map_err(persistence("failed to insert step"))?;
        }

        // Dropping the transaction on an early return rolls it back
        tx.commit()
            .await
            .map_err(persistence("failed to commit recipe"))?;

        info!(recipe_id, owner = recipe.owner, steps = recipe.steps.len(), "Recipe created");
        Ok(recipe_id)
    }

    /// Every recipe in creation order with all collections populated
    pub async fn list_all(&self) -> Result<Vec<Recipe>, BotError> {
        let rows = sqlx::query_as::<_, (i64, i64, String, Option<String>)>(
            "SELECT recipe_id, owner_id, name, description FROM recipes ORDER BY recipe_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence("failed to fetch recipes"))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for (id, owner, name, description) in rows {
            recipes.push(Recipe {
                id: Some(id),
                owner,
                name,
                description: description.unwrap_or_default(),
                alcohol_ingredients: self.ingredients(id, IngredientTable::Alcohol).await?,
                non_alcohol_ingredients: self.ingredients(id, IngredientTable::NonAlcohol).await?,
                garnishes: self.labels(id, LabelTable::Garnishes).await?,
                utensils: self.labels(id, LabelTable::Utensils).await?,
                steps: self.steps(id).await?,
            });
        }

        debug!(count = recipes.len(), "Fetched recipes");
        Ok(recipes)
    }

    /// Delete a recipe; dependent rows go with it through the cascade
    pub async fn delete_recipe(&self, recipe_id: i64) -> Result<bool, BotError> {
        let rows_affected = sqlx::query("DELETE FROM recipes WHERE recipe_id = ?")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(persistence("failed to delete recipe"))?
            .rows_affected();

        if rows_affected > 0 {
            info!(recipe_id, "Recipe deleted");
            Ok(true)
        } else {
            debug!(recipe_id, "No recipe found to delete");
            Ok(false)
        }
    }

    /// Release every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Recipe database closed");
    }

    async fn ingredients(
        &self,
        recipe_id: i64,
        table: IngredientTable,
    ) -> Result<Vec<Ingredient>, BotError> {
        let sql = format!(
            "SELECT name, quantity FROM {} WHERE recipe_id = ? ORDER BY ingredient_id",
            table.name()
        );
        let rows = sqlx::query_as::<_, (String, Option<String>)>(&sql)
            .bind(recipe_id)
            .fetch_all(&self.pool)
            .await
            .map_err(persistence("failed to fetch ingredients"))?;

        Ok(rows
            .into_iter()
            .map(|(name, quantity)| Ingredient::new(name, quantity.unwrap_or_default()))
            .collect())
    }

    async fn labels(&self, recipe_id: i64, table: LabelTable) -> Result<Vec<String>, BotError> {
        // INTEGER PRIMARY KEY aliases rowid
        let sql = format!(
            "SELECT name FROM {} WHERE recipe_id = ? ORDER BY rowid",
            table.name()
        );
        let rows = sqlx::query_as::<_, (String,)>(&sql)
            .bind(recipe_id)
            .fetch_all(&self.pool)
            .await
            .map_err(persistence("failed to fetch labels"))?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn steps(&self, recipe_id: i64) -> Result<Vec<String>, BotError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT instruction FROM steps WHERE recipe_id = ? ORDER BY step_number",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence("failed to fetch steps"))?;

        Ok(rows.into_iter().map(|(instruction,)| instruction).collect())
    }
}

async fn insert_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    table: IngredientTable,
    ingredients: &[Ingredient],
) -> Result<(), BotError> {
    let sql = format!(
        "INSERT INTO {} (recipe_id, name, quantity) VALUES (?, ?, ?)",
        table.name()
    );
    for ingredient in ingredients {
        sqlx::query(&sql)
            .bind(recipe_id)
            .bind(&ingredient.name)
            .bind(&ingredient.quantity)
            .execute(&mut **tx)
            .await
            .map_err(persistence("failed to insert ingredient"))?;
    }
    Ok(())
}

async fn insert_labels(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    table: LabelTable,
    labels: &[String],
) -> Result<(), BotError> {
    let sql = format!("INSERT INTO {} (recipe_id, name) VALUES (?, ?)", table.name());
    for label in labels {
        sqlx::query(&sql)
            .bind(recipe_id)
            .bind(label)
            .execute(&mut **tx)
            .await
            .map_err(persistence("failed to insert label"))?;
    }
    Ok(())
}
