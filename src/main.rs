// src/main.rs

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

// Importa los módulos
mod shared; // Errores, configuración y estructuras compartidas
mod ventas; // Módulo de ventas (CRUD)

use shared::api_error::ApiError;
use shared::config::AppConfig;
use ventas::ventas_repository::{crear_esquema, PgVentaRepository, VentaRepository};

/// Estado compartido por todas las rutas.
/// El repositorio se construye una vez en `main` y se inyecta en cada handler.
pub struct AppState {
    pub ventas: Arc<dyn VentaRepository>,
}

/// Respuesta para rutas inexistentes, con el mismo cuerpo de error que el resto.
async fn ruta_no_encontrada() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::RutaNoEncontrada)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Carga .env si existe (DATABASE_URL, PORT, ...)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout)
        .connect(&config.database_url)
        .await
        .context("Fallo al conectar a PostgreSQL")?;

    crear_esquema(&db_pool)
        .await
        .context("Fallo al crear la tabla ventas")?;

    let app_state = web::Data::new(AppState {
        ventas: Arc::new(PgVentaRepository::new(db_pool)),
    });

    let (host, port) = config.bind_addr();
    tracing::info!("Iniciando API de ventas en {}:{}...", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(ventas::ventas_router::configurar)
            .default_service(web::to(ruta_no_encontrada))
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
