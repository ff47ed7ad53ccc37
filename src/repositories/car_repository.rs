use crate::models::car::{Car, CreateCarRequest};
use crate::utils::errors::ShopResult;
use sqlx::{PgExecutor, PgPool};
use validator::Validate;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un auto; el VIN es la identidad y no se reasigna nunca
    pub async fn create(&self, request: &CreateCarRequest) -> ShopResult<Car> {
        request.validate()?;
        Self::insert_with(&self.pool, request).await
    }

    pub async fn find_by_vin(&self, vin: &str) -> ShopResult<Option<Car>> {
        Self::find_by_vin_with(&self.pool, vin).await
    }

    pub async fn exists(&self, vin: &str) -> ShopResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM Car WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub(crate) async fn insert_with<'e>(
        executor: impl PgExecutor<'e>,
        request: &CreateCarRequest,
    ) -> ShopResult<Car> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO Car (vin, make, model, year)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&request.vin)
        .bind(&request.make)
        .bind(&request.model)
        .bind(request.year)
        .fetch_one(executor)
        .await?;

        Ok(car)
    }

    pub(crate) async fn find_by_vin_with<'e>(
        executor: impl PgExecutor<'e>,
        vin: &str,
    ) -> ShopResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM Car WHERE vin = $1")
            .bind(vin)
            .fetch_optional(executor)
            .await?;

        Ok(car)
    }
}
