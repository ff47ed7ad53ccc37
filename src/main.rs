//! Front end de menú del taller
//!
//! Wrapper delgado: presenta opciones, lee valores crudos y delega en los
//! servicios del core. El despacho es una tabla comando -> handler, sin
//! estado de consola compartido.

use anyhow::Result;
use dotenvy::dotenv;
use std::io::{self, Write};
use tracing::{error, info};

use mechanic_shop::config::database::DatabaseConfig;
use mechanic_shop::config::environment::EnvironmentConfig;
use mechanic_shop::models::car::CreateCarRequest;
use mechanic_shop::models::closed_request::CloseRequestCommand;
use mechanic_shop::models::customer::CreateCustomerRequest;
use mechanic_shop::models::mechanic::CreateMechanicRequest;
use mechanic_shop::models::service_request::{CarRef, CustomerRef, OpenRequestCommand};
use mechanic_shop::repositories::{CarRepository, CustomerRepository, MechanicRepository, OwnershipRepository};
use mechanic_shop::{DatabaseConnection, ReportingService, WorkflowService};

struct App {
    customers: CustomerRepository,
    mechanics: MechanicRepository,
    cars: CarRepository,
    ownerships: OwnershipRepository,
    workflow: WorkflowService,
    reporting: ReportingService,
}

/// Comandos del menú; la tabla MENU mapea etiqueta -> comando
#[derive(Debug, Clone, Copy)]
enum Command {
    AddCustomer,
    AddMechanic,
    AddCar,
    OpenRequest,
    CloseRequest,
    BilledBelow,
    FrequentOwners,
    StaleHighMileage,
    TopServiced,
    TotalBill,
}

const MENU: &[(&str, Command)] = &[
    ("Agregar cliente", Command::AddCustomer),
    ("Agregar mecánico", Command::AddMechanic),
    ("Agregar auto", Command::AddCar),
    ("Abrir solicitud de servicio", Command::OpenRequest),
    ("Cerrar solicitud de servicio", Command::CloseRequest),
    ("Clientes con facturas menores a un umbral", Command::BilledBelow),
    ("Clientes con más de N autos", Command::FrequentOwners),
    ("Autos viejos con poco kilometraje en servicio", Command::StaleHighMileage),
    ("Top K autos con más servicios", Command::TopServiced),
    ("Clientes por facturación total (descendente)", Command::TotalBill),
];

async fn dispatch(app: &App, command: Command) -> Result<()> {
    match command {
        Command::AddCustomer => add_customer(app).await,
        Command::AddMechanic => add_mechanic(app).await,
        Command::AddCar => add_car(app).await,
        Command::OpenRequest => open_request(app).await,
        Command::CloseRequest => close_request(app).await,
        Command::BilledBelow => report_billed_below(app).await,
        Command::FrequentOwners => report_frequent_owners(app).await,
        Command::StaleHighMileage => report_stale_high_mileage(app).await,
        Command::TopServiced => report_top_serviced(app).await,
        Command::TotalBill => report_total_bill(app).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let env = EnvironmentConfig::from_env()?;

    let log_level = if env.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🔧 Mechanic Shop - backend del taller");

    let db_config = DatabaseConfig::from_environment(&env);
    let connection = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("database error: {}", e));
        }
    };
    connection.health_check().await?;

    let pool = connection.pool().clone();
    let app = App {
        customers: CustomerRepository::new(pool.clone()),
        mechanics: MechanicRepository::new(pool.clone()),
        cars: CarRepository::new(pool.clone()),
        ownerships: OwnershipRepository::new(pool.clone()),
        workflow: WorkflowService::new(pool.clone()),
        reporting: ReportingService::new(pool),
    };

    loop {
        println!("\nMENU PRINCIPAL");
        println!("--------------");
        for (i, (label, _)) in MENU.iter().enumerate() {
            println!("{}. {}", i + 1, label);
        }
        println!("{}. Salir", MENU.len() + 1);

        let choice: usize = match prompt("Elija una opción: ")?.parse() {
            Ok(n) => n,
            Err(_) => {
                println!("Entrada inválida");
                continue;
            }
        };

        if choice == MENU.len() + 1 {
            break;
        }

        match MENU.get(choice.wrapping_sub(1)) {
            Some((_, command)) => {
                if let Err(e) = dispatch(&app, *command).await {
                    println!("Error: {}", e);
                }
            }
            None => println!("Entrada inválida"),
        }
    }

    println!("Hasta luego!");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_i32(label: &str) -> Result<i32> {
    Ok(prompt(label)?.parse()?)
}

fn prompt_optional_i32(label: &str) -> Result<Option<i32>> {
    let raw = prompt(label)?;
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

async fn add_customer(app: &App) -> Result<()> {
    let request = CreateCustomerRequest {
        id: prompt_optional_i32("Id (vacío = asignar por secuencia): ")?,
        fname: prompt("Nombre: ")?,
        lname: prompt("Apellido: ")?,
        phone: prompt("Teléfono: ")?,
        address: prompt("Dirección: ")?,
    };
    let customer = app.customers.create(&request).await?;
    println!("Cliente creado: {}", serde_json::to_string_pretty(&customer)?);
    Ok(())
}

async fn add_mechanic(app: &App) -> Result<()> {
    let request = CreateMechanicRequest {
        id: prompt_optional_i32("Id (vacío = asignar por secuencia): ")?,
        fname: prompt("Nombre: ")?,
        lname: prompt("Apellido: ")?,
        experience: prompt_i32("Años de experiencia (0-99): ")?,
    };
    let mechanic = app.mechanics.create(&request).await?;
    println!("Mecánico creado: {}", serde_json::to_string_pretty(&mechanic)?);
    Ok(())
}

async fn add_car(app: &App) -> Result<()> {
    let request = CreateCarRequest {
        vin: prompt("VIN: ")?,
        make: prompt("Marca: ")?,
        model: prompt("Modelo: ")?,
        year: prompt_i32("Año (>= 1970): ")?,
    };
    let car = app.cars.create(&request).await?;
    println!("Auto creado: {}", serde_json::to_string_pretty(&car)?);
    Ok(())
}

async fn open_request(app: &App) -> Result<()> {
    let last_name = prompt("Apellido del cliente: ")?;
    let candidates = app.workflow.find_customers_by_last_name(&last_name).await?;

    let customer = if candidates.is_empty() {
        println!("No hay clientes con ese apellido; ingrese uno nuevo.");
        CustomerRef::New(CreateCustomerRequest {
            id: prompt_optional_i32("Id (vacío = asignar por secuencia): ")?,
            fname: prompt("Nombre: ")?,
            lname: last_name.clone(),
            phone: prompt("Teléfono: ")?,
            address: prompt("Dirección: ")?,
        })
    } else {
        for c in &candidates {
            println!("  [{}] {} {} - {}", c.id, c.fname, c.lname, c.address);
        }
        CustomerRef::Existing(prompt_i32("Id del cliente: ")?)
    };

    let car = if let CustomerRef::Existing(id) = &customer {
        let owned = app.ownerships.find_for_customer(*id).await?;
        if owned.is_empty() {
            println!("El cliente no tiene autos registrados; ingrese uno nuevo.");
            CarRef::New(CreateCarRequest {
                vin: prompt("VIN: ")?,
                make: prompt("Marca: ")?,
                model: prompt("Modelo: ")?,
                year: prompt_i32("Año (>= 1970): ")?,
            })
        } else {
            for o in &owned {
                println!("  VIN: {}", o.car_vin);
            }
            CarRef::Existing(prompt("VIN del auto: ")?)
        }
    } else {
        println!("Cliente nuevo: ingrese también el auto.");
        CarRef::New(CreateCarRequest {
            vin: prompt("VIN: ")?,
            make: prompt("Marca: ")?,
            model: prompt("Modelo: ")?,
            year: prompt_i32("Año (>= 1970): ")?,
        })
    };

    let command = OpenRequestCommand {
        rid: prompt_i32("Id de la solicitud: ")?,
        customer,
        car,
        odometer: prompt_i32("Lectura del odómetro: ")?,
        complaint: prompt("¿Cuál es el problema?: ")?,
    };

    let request = app.workflow.open_request(&command).await?;
    println!("Solicitud creada: {}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

async fn close_request(app: &App) -> Result<()> {
    let command = CloseRequestCommand {
        rid: prompt_i32("Id de la solicitud: ")?,
        mid: prompt_i32("Id del mecánico: ")?,
        wid: prompt_i32("Id del cierre: ")?,
        comment: prompt("Comentarios: ")?,
        bill: prompt_i32("Importe total: ")?,
    };

    let closed = app.workflow.close_request(&command).await?;
    println!("Solicitud cerrada: {}", serde_json::to_string_pretty(&closed)?);
    Ok(())
}

async fn report_billed_below(app: &App) -> Result<()> {
    let threshold = prompt_i32("Umbral de factura: ")?;
    let rows = app.reporting.billed_below(threshold).await?;
    for row in &rows {
        println!("{} {} - ${}", row.fname, row.lname, row.bill);
    }
    println!("total row(s): {}", rows.len());
    Ok(())
}

async fn report_frequent_owners(app: &App) -> Result<()> {
    let min_cars = prompt_i32("Cantidad mínima de autos: ")?;
    let rows = app.reporting.frequent_owners(min_cars as i64).await?;
    for row in &rows {
        println!("{} {}", row.fname, row.lname);
    }
    println!("total row(s): {}", rows.len());
    Ok(())
}

async fn report_stale_high_mileage(app: &App) -> Result<()> {
    let year = prompt_i32("Año límite: ")?;
    let odometer = prompt_i32("Odómetro límite: ")?;
    let rows = app.reporting.stale_high_mileage(year, odometer).await?;
    for row in &rows {
        println!("{} {} ({})", row.make, row.model, row.year);
    }
    println!("total row(s): {}", rows.len());
    Ok(())
}

async fn report_top_serviced(app: &App) -> Result<()> {
    let k = prompt_i32("Cantidad de autos a listar: ")?;
    let rows = app.reporting.top_serviced_cars(k as i64).await?;
    for row in &rows {
        println!("{} {} - {} servicios", row.make, row.model, row.num_requests);
    }
    println!("total row(s): {}", rows.len());
    Ok(())
}

async fn report_total_bill(app: &App) -> Result<()> {
    let rows = app.reporting.customers_by_total_bill().await?;
    for row in &rows {
        println!("{} {} - ${}", row.fname, row.lname, row.total);
    }
    println!("total row(s): {}", rows.len());
    Ok(())
}
