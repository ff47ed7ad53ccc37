//! Reportes agregados
//!
//! Consultas de solo lectura sobre el dataset del taller. Cada operación
//! devuelve una secuencia ordenada de filas tipadas; la secuencia vacía
//! es un resultado válido, no un error.

use sqlx::{FromRow, PgPool};

use crate::utils::errors::{validation_error, ShopResult};

/// Fila de facturación: cliente + importe de un cierre
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CustomerBillRow {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub bill: i32,
}

/// Fila con solo el nombre del cliente
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CustomerNameRow {
    pub fname: String,
    pub lname: String,
}

/// Fila de auto para el reporte de antigüedad/kilometraje
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CarRow {
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// Fila de auto con su cantidad de solicitudes
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CarServiceCountRow {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub num_requests: i64,
}

/// Fila de cliente con su facturación total
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CustomerTotalRow {
    pub fname: String,
    pub lname: String,
    pub total: i64,
}

pub struct ReportingService {
    pool: PgPool,
}

impl ReportingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clientes con cierres facturados por debajo del umbral.
    ///
    /// DISTINCT evita filas repetidas cuando un cliente tiene varios
    /// cierres con el mismo importe; importes distintos del mismo cliente
    /// sí producen filas separadas.
    pub async fn billed_below(&self, threshold: i32) -> ShopResult<Vec<CustomerBillRow>> {
        let rows = sqlx::query_as::<_, CustomerBillRow>(
            r#"
            SELECT DISTINCT c.id, c.fname, c.lname, cr.bill
            FROM Customer c
            JOIN Service_Request sr ON c.id = sr.customer_id
            JOIN Closed_Request cr ON sr.rid = cr.rid
            WHERE cr.bill < $1
            ORDER BY c.id, cr.bill
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Clientes con más de `min_cars` vínculos de propiedad
    pub async fn frequent_owners(&self, min_cars: i64) -> ShopResult<Vec<CustomerNameRow>> {
        let rows = sqlx::query_as::<_, CustomerNameRow>(
            r#"
            SELECT fname, lname
            FROM Customer
            WHERE id IN (
                SELECT customer_id FROM Owns
                GROUP BY customer_id
                HAVING COUNT(*) > $1
            )
            ORDER BY lname, fname
            "#,
        )
        .bind(min_cars)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Autos anteriores a `year_cutoff` con solicitudes por debajo de
    /// `odometer_cutoff` (join distinct Car x Service_Request)
    pub async fn stale_high_mileage(
        &self,
        year_cutoff: i32,
        odometer_cutoff: i32,
    ) -> ShopResult<Vec<CarRow>> {
        let rows = sqlx::query_as::<_, CarRow>(
            r#"
            SELECT DISTINCT c.make, c.model, c.year
            FROM Car c
            JOIN Service_Request sr ON sr.car_vin = c.vin
            WHERE c.year < $1 AND sr.odometer < $2
            ORDER BY c.year, c.make, c.model
            "#,
        )
        .bind(year_cutoff)
        .bind(odometer_cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Los `k` autos con más solicitudes, descendente por cantidad.
    /// Empates se resuelven por VIN para que el orden sea estable.
    pub async fn top_serviced_cars(&self, k: i64) -> ShopResult<Vec<CarServiceCountRow>> {
        if k <= 0 {
            return Err(validation_error("k", "must be a positive integer"));
        }

        let rows = sqlx::query_as::<_, CarServiceCountRow>(
            r#"
            SELECT c.vin, c.make, c.model, a.num_requests
            FROM Car c
            JOIN (
                SELECT car_vin, COUNT(rid) AS num_requests
                FROM Service_Request
                GROUP BY car_vin
            ) a ON a.car_vin = c.vin
            ORDER BY a.num_requests DESC, c.vin
            LIMIT $1
            "#,
        )
        .bind(k)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Clientes ordenados por su facturación total, descendente
    pub async fn customers_by_total_bill(&self) -> ShopResult<Vec<CustomerTotalRow>> {
        let rows = sqlx::query_as::<_, CustomerTotalRow>(
            r#"
            SELECT c.fname, c.lname, b.total
            FROM Customer c
            JOIN (
                SELECT sr.customer_id, SUM(cr.bill)::bigint AS total
                FROM Closed_Request cr
                JOIN Service_Request sr ON cr.rid = sr.rid
                GROUP BY sr.customer_id
            ) b ON c.id = b.customer_id
            ORDER BY b.total DESC, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
