//! Computers repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::computer::{
        Computer, ComputerInfo, ComputerStatus, UpdateComputer, UpsertComputerInfo,
    },
};

#[derive(Clone)]
pub struct ComputersRepository {
    pool: Pool<Postgres>,
}

impl ComputersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all computers
    pub async fn list(&self) -> AppResult<Vec<Computer>> {
        let rows = sqlx::query_as::<_, Computer>("SELECT * FROM computers ORDER BY asset_tag")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get computer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Computer> {
        sqlx::query_as::<_, Computer>("SELECT * FROM computers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Computer with id {} not found", id)))
    }

    /// Get computer by ID with a row lock, inside a transaction
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<Computer> {
        sqlx::query_as::<_, Computer>("SELECT * FROM computers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Computer with id {} not found", id)))
    }

    /// Existing asset tags under a base-tag prefix, matched exactly up to
    /// the trailing counter. Runs inside the creation transaction so two
    /// concurrent creates cannot pick the same counter.
    pub async fn tags_with_prefix(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        prefix: &str,
    ) -> AppResult<Vec<String>> {
        let escaped = prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let tags: Vec<String> = sqlx::query_scalar(
            "SELECT asset_tag FROM computers WHERE asset_tag LIKE $1 FOR UPDATE",
        )
        .bind(format!("{}-%", escaped))
        .fetch_all(&mut **tx)
        .await?;
        Ok(tags)
    }

    /// Create a computer inside a transaction. Status starts at the schema
    /// default and is derived immediately afterwards.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        asset_tag: Option<&str>,
        department_id: i32,
    ) -> AppResult<Computer> {
        let computer = sqlx::query_as::<_, Computer>(
            r#"
            INSERT INTO computers (name, asset_tag, department_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(asset_tag)
        .bind(department_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(computer)
    }

    /// Update a computer inside a transaction. The asset tag is immutable
    /// and deliberately absent here.
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        data: &UpdateComputer,
    ) -> AppResult<Computer> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.department_id, "department_id");
        add_field!(data.status, "status");
        add_field!(data.current_user_id, "current_user_id");

        if sets.is_empty() {
            return self.get_for_update(tx, id).await;
        }

        let query = format!(
            "UPDATE computers SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Computer>(&query);

        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if let Some(department_id) = data.department_id {
            builder = builder.bind(department_id);
        }
        if let Some(status) = data.status {
            builder = builder.bind(status);
        }
        if let Some(current_user_id) = data.current_user_id {
            // Inner None clears the back-reference
            builder = builder.bind(current_user_id);
        }

        builder
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Computer with id {} not found", id)))
    }

    /// Persist a computer's derived status inside a transaction
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: ComputerStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE computers SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Clear the current-user back-reference everywhere it points at the
    /// given employee. Returns the affected computer IDs for reconciliation.
    pub async fn clear_current_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: i32,
    ) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "UPDATE computers SET current_user_id = NULL WHERE current_user_id = $1 RETURNING id",
        )
        .bind(employee_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(ids)
    }

    /// Delete a computer. Info, assignments and repair history cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM computers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Computer with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Get descriptive hardware info, if recorded
    pub async fn get_info(&self, computer_id: i32) -> AppResult<Option<ComputerInfo>> {
        let info =
            sqlx::query_as::<_, ComputerInfo>("SELECT * FROM computer_info WHERE computer_id = $1")
                .bind(computer_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(info)
    }

    /// Create or replace descriptive hardware info
    pub async fn upsert_info(
        &self,
        computer_id: i32,
        data: &UpsertComputerInfo,
    ) -> AppResult<ComputerInfo> {
        let info = sqlx::query_as::<_, ComputerInfo>(
            r#"
            INSERT INTO computer_info (
                computer_id, brand, model_name, display_type, aspect_ratio,
                memory_size_gb, storage_type, storage_size_gb
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (computer_id) DO UPDATE SET
                brand = EXCLUDED.brand,
                model_name = EXCLUDED.model_name,
                display_type = EXCLUDED.display_type,
                aspect_ratio = EXCLUDED.aspect_ratio,
                memory_size_gb = EXCLUDED.memory_size_gb,
                storage_type = EXCLUDED.storage_type,
                storage_size_gb = EXCLUDED.storage_size_gb
            RETURNING *
            "#,
        )
        .bind(computer_id)
        .bind(&data.brand)
        .bind(&data.model_name)
        .bind(&data.display_type)
        .bind(&data.aspect_ratio)
        .bind(data.memory_size_gb)
        .bind(&data.storage_type)
        .bind(data.storage_size_gb)
        .fetch_one(&self.pool)
        .await?;
        Ok(info)
    }
}
