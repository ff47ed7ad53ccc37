//! Tests de integración del ciclo de vida de solicitudes
//!
//! Cada test corre contra una base propia con el schema migrado
//! (requiere DATABASE_URL apuntando a un PostgreSQL de test).

use sqlx::PgPool;

use mechanic_shop::models::car::CreateCarRequest;
use mechanic_shop::models::closed_request::CloseRequestCommand;
use mechanic_shop::models::customer::CreateCustomerRequest;
use mechanic_shop::models::mechanic::CreateMechanicRequest;
use mechanic_shop::models::service_request::{CarRef, CustomerRef, OpenRequestCommand};
use mechanic_shop::repositories::{
    CarRepository, CustomerRepository, MechanicRepository, OwnershipRepository,
};
use mechanic_shop::{ShopError, WorkflowService};

fn customer(lname: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        id: None,
        fname: "Maria".to_string(),
        lname: lname.to_string(),
        phone: "555-0100".to_string(),
        address: "900 University Ave".to_string(),
    }
}

fn car(vin: &str) -> CreateCarRequest {
    CreateCarRequest {
        vin: vin.to_string(),
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 1992,
    }
}

fn mechanic(id: i32) -> CreateMechanicRequest {
    CreateMechanicRequest {
        id: Some(id),
        fname: "Pedro".to_string(),
        lname: "Salas".to_string(),
        experience: 8,
    }
}

fn open_command(rid: i32, customer_id: i32, vin: &str) -> OpenRequestCommand {
    OpenRequestCommand {
        rid,
        customer: CustomerRef::Existing(customer_id),
        car: CarRef::Existing(vin.to_string()),
        odometer: 42_000,
        complaint: "engine stalls at idle".to_string(),
    }
}

#[sqlx::test]
async fn created_customer_is_found_identical(pool: PgPool) {
    let repo = CustomerRepository::new(pool);
    let created = repo.create(&customer("Vega")).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(created, found);
}

#[sqlx::test]
async fn sequence_assigns_id_when_caller_omits_it(pool: PgPool) {
    let repo = CustomerRepository::new(pool);
    let first = repo.create(&customer("Solis")).await.unwrap();
    let second = repo.create(&customer("Solis")).await.unwrap();
    assert!(first.id > 0);
    assert!(second.id > first.id);
}

#[sqlx::test]
async fn invalid_customer_persists_no_row(pool: PgPool) {
    let repo = CustomerRepository::new(pool.clone());
    let mut request = customer("Quiroga");
    request.lname = "x".repeat(33);

    let err = repo.create(&request).await.unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));

    let rows = repo.find_by_last_name(&request.lname).await.unwrap();
    assert!(rows.is_empty());
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Customer")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test]
async fn duplicate_customer_id_is_conflict(pool: PgPool) {
    let repo = CustomerRepository::new(pool);
    let mut request = customer("Ibarra");
    request.id = Some(77);
    repo.create(&request).await.unwrap();

    let err = repo.create(&request).await.unwrap_err();
    assert!(matches!(err, ShopError::Conflict(_)));
}

#[sqlx::test]
async fn mechanic_experience_out_of_range_is_rejected(pool: PgPool) {
    let repo = MechanicRepository::new(pool);
    let mut request = mechanic(5);
    request.experience = 100;

    let err = repo.create(&request).await.unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));
}

#[sqlx::test]
async fn car_year_before_1970_is_rejected(pool: PgPool) {
    let repo = CarRepository::new(pool.clone());
    let mut request = car("VINYEAR0000001");
    request.year = 1969;

    let err = repo.create(&request).await.unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));

    assert!(!repo.exists(&request.vin).await.unwrap());
}

#[sqlx::test]
async fn opening_request_creates_ownership_on_demand(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let ownerships = OwnershipRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let cust = customers.create(&customer("Rosales")).await.unwrap();
    let auto = cars.create(&car("VINROSALES0001")).await.unwrap();

    assert!(ownerships.find_by_pair(cust.id, &auto.vin).await.unwrap().is_none());

    let request = workflow
        .open_request(&open_command(10, cust.id, &auto.vin))
        .await
        .unwrap();

    assert_eq!(request.rid, 10);
    assert_eq!(request.customer_id, cust.id);
    assert_eq!(request.car_vin, auto.vin);

    // exactamente un vínculo nuevo
    let owned = ownerships.find_for_customer(cust.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].car_vin, auto.vin);
}

#[sqlx::test]
async fn opening_second_request_reuses_ownership(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let ownerships = OwnershipRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let cust = customers.create(&customer("Duarte")).await.unwrap();
    let auto = cars.create(&car("VINDUARTE00001")).await.unwrap();

    workflow.open_request(&open_command(20, cust.id, &auto.vin)).await.unwrap();
    workflow.open_request(&open_command(21, cust.id, &auto.vin)).await.unwrap();

    let owned = ownerships.find_for_customer(cust.id).await.unwrap();
    assert_eq!(owned.len(), 1);
}

#[sqlx::test]
async fn opening_request_with_new_customer_and_car(pool: PgPool) {
    let workflow = WorkflowService::new(pool.clone());

    let command = OpenRequestCommand {
        rid: 30,
        customer: CustomerRef::New(customer("Paredes")),
        car: CarRef::New(car("VINPAREDES0001")),
        odometer: 12_500,
        complaint: "coolant leak".to_string(),
    };

    let request = workflow.open_request(&command).await.unwrap();
    assert_eq!(request.rid, 30);

    let stored = workflow.find_request(30).await.unwrap().unwrap();
    assert_eq!(stored, request);
}

#[sqlx::test]
async fn opening_request_for_missing_customer_is_not_found(pool: PgPool) {
    let workflow = WorkflowService::new(pool);

    let err = workflow
        .open_request(&open_command(40, 9999, "VINNOEXISTE001"))
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::NotFound(_)));
}

#[sqlx::test]
async fn opening_request_for_missing_car_is_not_found(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let cust = customers.create(&customer("Luna")).await.unwrap();
    let err = workflow
        .open_request(&open_command(41, cust.id, "VINNOEXISTE002"))
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::NotFound(_)));
}

#[sqlx::test]
async fn duplicate_rid_is_conflict_and_atomic(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let ownerships = OwnershipRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let first = customers.create(&customer("Camacho")).await.unwrap();
    let second = customers.create(&customer("Camacho")).await.unwrap();
    let auto_a = cars.create(&car("VINCAMACHO0001")).await.unwrap();
    let auto_b = cars.create(&car("VINCAMACHO0002")).await.unwrap();

    workflow.open_request(&open_command(50, first.id, &auto_a.vin)).await.unwrap();

    // mismo rid contra otro par: falla y no deja el ownership nuevo a medias
    let err = workflow
        .open_request(&open_command(50, second.id, &auto_b.vin))
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::Conflict(_)));

    let owned = ownerships.find_for_customer(second.id).await.unwrap();
    assert!(owned.is_empty());
}

#[sqlx::test]
async fn close_request_happy_path(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let mechanics = MechanicRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let cust = customers.create(&customer("Godoy")).await.unwrap();
    let auto = cars.create(&car("VINGODOY000001")).await.unwrap();
    let mech = mechanics.create(&mechanic(3)).await.unwrap();

    workflow.open_request(&open_command(60, cust.id, &auto.vin)).await.unwrap();

    let command = CloseRequestCommand {
        wid: 600,
        rid: 60,
        mid: mech.id,
        comment: "replaced idle valve".to_string(),
        bill: 240,
    };
    let closed = workflow.close_request(&command).await.unwrap();

    assert_eq!(closed.rid, 60);
    assert_eq!(closed.bill, 240);
    let stored = workflow.find_closure(60).await.unwrap().unwrap();
    assert_eq!(stored, closed);
}

#[sqlx::test]
async fn closing_twice_is_conflict_with_single_row(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let mechanics = MechanicRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool.clone());

    let cust = customers.create(&customer("Ferrer")).await.unwrap();
    let auto = cars.create(&car("VINFERRER00001")).await.unwrap();
    let mech = mechanics.create(&mechanic(4)).await.unwrap();

    workflow.open_request(&open_command(70, cust.id, &auto.vin)).await.unwrap();

    let command = CloseRequestCommand {
        wid: 700,
        rid: 70,
        mid: mech.id,
        comment: String::new(),
        bill: 90,
    };
    workflow.close_request(&command).await.unwrap();

    let mut second = command.clone();
    second.wid = 701;
    let err = workflow.close_request(&second).await.unwrap_err();
    assert!(matches!(err, ShopError::Conflict(_)));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Closed_Request WHERE rid = 70")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test]
async fn unknown_mechanic_reported_before_double_close(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let mechanics = MechanicRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let cust = customers.create(&customer("Urrutia")).await.unwrap();
    let auto = cars.create(&car("VINURRUTIA0001")).await.unwrap();
    let mech = mechanics.create(&mechanic(6)).await.unwrap();

    workflow.open_request(&open_command(75, cust.id, &auto.vin)).await.unwrap();
    workflow
        .close_request(&CloseRequestCommand {
            wid: 750,
            rid: 75,
            mid: mech.id,
            comment: String::new(),
            bill: 120,
        })
        .await
        .unwrap();

    // solicitud ya cerrada Y mecánico inexistente: el mecánico se valida
    // antes que el conflicto de doble cierre
    let err = workflow
        .close_request(&CloseRequestCommand {
            wid: 751,
            rid: 75,
            mid: 999_999,
            comment: String::new(),
            bill: 120,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::NotFound(_)));
}

#[sqlx::test]
async fn closing_unknown_rid_is_not_found(pool: PgPool) {
    let mechanics = MechanicRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool);

    let mech = mechanics.create(&mechanic(9)).await.unwrap();
    let command = CloseRequestCommand {
        wid: 800,
        rid: 12345,
        mid: mech.id,
        comment: String::new(),
        bill: 10,
    };

    let err = workflow.close_request(&command).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound(_)));
}

#[sqlx::test]
async fn closing_with_unknown_mechanic_is_not_found(pool: PgPool) {
    let customers = CustomerRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());
    let workflow = WorkflowService::new(pool.clone());

    let cust = customers.create(&customer("Acosta")).await.unwrap();
    let auto = cars.create(&car("VINACOSTA00001")).await.unwrap();
    workflow.open_request(&open_command(80, cust.id, &auto.vin)).await.unwrap();

    let command = CloseRequestCommand {
        wid: 801,
        rid: 80,
        mid: 424242,
        comment: String::new(),
        bill: 10,
    };
    let err = workflow.close_request(&command).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound(_)));

    // la operación es atómica: nada quedó escrito
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Closed_Request")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test]
async fn negative_bill_is_validation_error(pool: PgPool) {
    let workflow = WorkflowService::new(pool);

    let command = CloseRequestCommand {
        wid: 900,
        rid: 1,
        mid: 1,
        comment: String::new(),
        bill: -5,
    };
    let err = workflow.close_request(&command).await.unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));
}
