use crate::models::customer::{CreateCustomerRequest, Customer};
use crate::utils::errors::ShopResult;
use sqlx::{PgExecutor, PgPool};
use validator::Validate;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un cliente; el id sale de la secuencia si no viene en el request
    pub async fn create(&self, request: &CreateCustomerRequest) -> ShopResult<Customer> {
        request.validate()?;
        Self::insert_with(&self.pool, request).await
    }

    pub async fn find_by_id(&self, id: i32) -> ShopResult<Option<Customer>> {
        Self::find_by_id_with(&self.pool, id).await
    }

    /// Buscar clientes por apellido; puede devolver cero, uno o varios
    pub async fn find_by_last_name(&self, last_name: &str) -> ShopResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM Customer WHERE lname = $1 ORDER BY id",
        )
        .bind(last_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn exists(&self, id: i32) -> ShopResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM Customer WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub(crate) async fn insert_with<'e>(
        executor: impl PgExecutor<'e>,
        request: &CreateCustomerRequest,
    ) -> ShopResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO Customer (id, fname, lname, phone, address)
            VALUES (COALESCE($1, nextval('customer_id_seq')::int), $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(&request.fname)
        .bind(&request.lname)
        .bind(&request.phone)
        .bind(&request.address)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    pub(crate) async fn find_by_id_with<'e>(
        executor: impl PgExecutor<'e>,
        id: i32,
    ) -> ShopResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM Customer WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }
}
