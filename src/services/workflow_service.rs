//! Workflow de solicitudes de servicio
//!
//! Abrir una solicitud resuelve (o crea) cliente, auto y vínculo de
//! propiedad, y persiste la solicitud; cerrar valida solicitud y mecánico
//! y persiste el cierre con su factura. Cada operación corre dentro de
//! UNA transacción: si algo falla a mitad de camino no queda ninguna
//! escritura parcial.

use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use tracing::info;
use validator::Validate;

use crate::models::closed_request::{CloseRequestCommand, ClosedRequest};
use crate::models::customer::Customer;
use crate::models::ownership::{CreateOwnershipRequest, Ownership};
use crate::models::service_request::{CarRef, CustomerRef, OpenRequestCommand, ServiceRequest};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::mechanic_repository::MechanicRepository;
use crate::repositories::ownership_repository::OwnershipRepository;
use crate::utils::errors::{conflict_error, not_found_error, ShopResult};

pub struct WorkflowService {
    pool: PgPool,
}

impl WorkflowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar candidatos por apellido. La resolución del cliente es
    /// explícita del lado del llamador porque el apellido puede ser
    /// ambiguo o no existir.
    pub async fn find_customers_by_last_name(&self, last_name: &str) -> ShopResult<Vec<Customer>> {
        CustomerRepository::new(self.pool.clone())
            .find_by_last_name(last_name)
            .await
    }

    /// Abrir una solicitud de servicio
    ///
    /// Resuelve o crea el cliente, resuelve o crea el auto, garantiza el
    /// vínculo Owns (creándolo con id de secuencia si falta) e inserta la
    /// solicitud con la fecha actual y el rid provisto por el llamador.
    pub async fn open_request(&self, command: &OpenRequestCommand) -> ShopResult<ServiceRequest> {
        command.fields().validate()?;
        if let CustomerRef::New(req) = &command.customer {
            req.validate()?;
        }
        if let CarRef::New(req) = &command.car {
            req.validate()?;
        }

        let mut tx = self.pool.begin().await?;

        let customer = match &command.customer {
            CustomerRef::Existing(id) => CustomerRepository::find_by_id_with(&mut *tx, *id)
                .await?
                .ok_or_else(|| not_found_error("Customer", &id.to_string()))?,
            CustomerRef::New(req) => CustomerRepository::insert_with(&mut *tx, req).await?,
        };

        let car = match &command.car {
            CarRef::Existing(vin) => CarRepository::find_by_vin_with(&mut *tx, vin)
                .await?
                .ok_or_else(|| not_found_error("Car", vin))?,
            CarRef::New(req) => CarRepository::insert_with(&mut *tx, req).await?,
        };

        let ownership = self
            .ensure_ownership(&mut tx, customer.id, &car.vin)
            .await?;

        if request_exists(&mut *tx, command.rid).await? {
            return Err(conflict_error("Service_Request", "rid", &command.rid.to_string()));
        }

        let request = sqlx::query_as::<_, ServiceRequest>(
            r#"
            INSERT INTO Service_Request (rid, customer_id, car_vin, date, odometer, complaint)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(command.rid)
        .bind(customer.id)
        .bind(&car.vin)
        .bind(Utc::now().date_naive())
        .bind(command.odometer)
        .bind(&command.complaint)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            rid = request.rid,
            customer_id = customer.id,
            car_vin = %car.vin,
            ownership_id = ownership.ownership_id,
            "Solicitud de servicio abierta"
        );

        Ok(request)
    }

    /// Cerrar una solicitud de servicio
    ///
    /// La transición Open -> Closed es terminal: un segundo cierre del
    /// mismo rid es un conflicto, nunca un no-op.
    pub async fn close_request(&self, command: &CloseRequestCommand) -> ShopResult<ClosedRequest> {
        command.validate()?;

        let mut tx = self.pool.begin().await?;

        if !request_exists(&mut *tx, command.rid).await? {
            return Err(not_found_error("Service_Request", &command.rid.to_string()));
        }

        MechanicRepository::find_by_id_with(&mut *tx, command.mid)
            .await?
            .ok_or_else(|| not_found_error("Mechanic", &command.mid.to_string()))?;

        if closure_exists(&mut *tx, command.rid).await? {
            return Err(conflict_error("Closed_Request", "rid", &command.rid.to_string()));
        }

        let closed = sqlx::query_as::<_, ClosedRequest>(
            r#"
            INSERT INTO Closed_Request (wid, rid, mid, date, comment, bill)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(command.wid)
        .bind(command.rid)
        .bind(command.mid)
        .bind(Utc::now().date_naive())
        .bind(&command.comment)
        .bind(command.bill)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            rid = closed.rid,
            wid = closed.wid,
            mid = closed.mid,
            bill = closed.bill,
            "Solicitud de servicio cerrada"
        );

        Ok(closed)
    }

    /// Leer una solicitud por rid (echo para el front end)
    pub async fn find_request(&self, rid: i32) -> ShopResult<Option<ServiceRequest>> {
        let request =
            sqlx::query_as::<_, ServiceRequest>("SELECT * FROM Service_Request WHERE rid = $1")
                .bind(rid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(request)
    }

    /// Leer el cierre de una solicitud, si existe
    pub async fn find_closure(&self, rid: i32) -> ShopResult<Option<ClosedRequest>> {
        let closed =
            sqlx::query_as::<_, ClosedRequest>("SELECT * FROM Closed_Request WHERE rid = $1")
                .bind(rid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(closed)
    }

    async fn ensure_ownership(
        &self,
        tx: &mut sqlx::Transaction<'static, sqlx::Postgres>,
        customer_id: i32,
        car_vin: &str,
    ) -> ShopResult<Ownership> {
        if let Some(existing) =
            OwnershipRepository::find_by_pair_with(&mut **tx, customer_id, car_vin).await?
        {
            return Ok(existing);
        }

        let request = CreateOwnershipRequest {
            customer_id,
            car_vin: car_vin.to_string(),
        };
        OwnershipRepository::insert_with(&mut **tx, &request).await
    }
}

async fn request_exists<'e>(executor: impl PgExecutor<'e>, rid: i32) -> ShopResult<bool> {
    let result: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM Service_Request WHERE rid = $1)")
            .bind(rid)
            .fetch_one(executor)
            .await?;

    Ok(result.0)
}

async fn closure_exists<'e>(executor: impl PgExecutor<'e>, rid: i32) -> ShopResult<bool> {
    let result: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM Closed_Request WHERE rid = $1)")
            .bind(rid)
            .fetch_one(executor)
            .await?;

    Ok(result.0)
}
