use crate::models::mechanic::{CreateMechanicRequest, Mechanic};
use crate::utils::errors::ShopResult;
use sqlx::{PgExecutor, PgPool};
use validator::Validate;

pub struct MechanicRepository {
    pool: PgPool,
}

impl MechanicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateMechanicRequest) -> ShopResult<Mechanic> {
        request.validate()?;

        let mechanic = sqlx::query_as::<_, Mechanic>(
            r#"
            INSERT INTO Mechanic (id, fname, lname, experience)
            VALUES (COALESCE($1, nextval('mechanic_id_seq')::int), $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(&request.fname)
        .bind(&request.lname)
        .bind(request.experience)
        .fetch_one(&self.pool)
        .await?;

        Ok(mechanic)
    }

    pub async fn find_by_id(&self, id: i32) -> ShopResult<Option<Mechanic>> {
        Self::find_by_id_with(&self.pool, id).await
    }

    pub async fn exists(&self, id: i32) -> ShopResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM Mechanic WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub(crate) async fn find_by_id_with<'e>(
        executor: impl PgExecutor<'e>,
        id: i32,
    ) -> ShopResult<Option<Mechanic>> {
        let mechanic = sqlx::query_as::<_, Mechanic>("SELECT * FROM Mechanic WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(mechanic)
    }
}
