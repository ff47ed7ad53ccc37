use crate::models::ownership::{CreateOwnershipRequest, Ownership};
use crate::utils::errors::ShopResult;
use sqlx::{PgExecutor, PgPool};
use validator::Validate;

pub struct OwnershipRepository {
    pool: PgPool,
}

impl OwnershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un vínculo de propiedad. `ownership_id` lo asigna la secuencia
    /// del store dentro del mismo INSERT, así dos escritores concurrentes
    /// nunca obtienen el mismo identificador.
    pub async fn create(&self, request: &CreateOwnershipRequest) -> ShopResult<Ownership> {
        request.validate()?;
        Self::insert_with(&self.pool, request).await
    }

    /// Listar los vínculos de un cliente
    pub async fn find_for_customer(&self, customer_id: i32) -> ShopResult<Vec<Ownership>> {
        let ownerships = sqlx::query_as::<_, Ownership>(
            "SELECT * FROM Owns WHERE customer_id = $1 ORDER BY ownership_id",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ownerships)
    }

    pub async fn find_by_pair(&self, customer_id: i32, car_vin: &str) -> ShopResult<Option<Ownership>> {
        Self::find_by_pair_with(&self.pool, customer_id, car_vin).await
    }

    pub(crate) async fn insert_with<'e>(
        executor: impl PgExecutor<'e>,
        request: &CreateOwnershipRequest,
    ) -> ShopResult<Ownership> {
        let ownership = sqlx::query_as::<_, Ownership>(
            r#"
            INSERT INTO Owns (customer_id, car_vin)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(request.customer_id)
        .bind(&request.car_vin)
        .fetch_one(executor)
        .await?;

        Ok(ownership)
    }

    pub(crate) async fn find_by_pair_with<'e>(
        executor: impl PgExecutor<'e>,
        customer_id: i32,
        car_vin: &str,
    ) -> ShopResult<Option<Ownership>> {
        let ownership = sqlx::query_as::<_, Ownership>(
            "SELECT * FROM Owns WHERE customer_id = $1 AND car_vin = $2",
        )
        .bind(customer_id)
        .bind(car_vin)
        .fetch_optional(executor)
        .await?;

        Ok(ownership)
    }
}
