// src/ventas/ventas_router.rs

use actix_web::{delete, error, get, post, put, web, HttpRequest, HttpResponse};

// Importa el AppState del módulo raíz (main.rs)
use crate::AppState;
use crate::shared::api_error::ApiError;

use super::ventas_structs::{ActualizarVentaRequest, NuevaVentaRequest, Venta};

/// Registra las rutas de ventas bajo `/api/v1`.
///
/// Los errores de extracción (JSON mal formado, ID no numérico) se convierten
/// en `ApiError` para que todas las respuestas de error tengan el mismo cuerpo.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        tracing::debug!("Cuerpo JSON rechazado: {}", err);
        error::Error::from(ApiError::validacion("invalid JSON body"))
    });
    let path_config = web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        tracing::debug!("Parámetro de ruta rechazado: {}", err);
        error::Error::from(ApiError::RutaNoEncontrada)
    });

    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config)
            .app_data(path_config)
            .service(listar_ventas)
            .service(crear_venta)
            .service(obtener_venta)
            .service(actualizar_venta)
            .service(eliminar_venta),
    );
}

/// Busca la venta o corta la petición con 404.
async fn buscar_existente(data: &AppState, id: i32) -> Result<Venta, ApiError> {
    data.ventas
        .buscar(id)
        .await?
        .ok_or(ApiError::VentaNoEncontrada(id))
}

/// Ruta para listar todas las ventas, ordenadas por ID.
#[get("/ventas")]
pub async fn listar_ventas(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let ventas = data.ventas.listar().await?;
    Ok(HttpResponse::Ok().json(ventas))
}

/// Ruta para registrar una nueva venta.
///
/// Valida el cuerpo antes de tocar la base de datos; la inserción se hace en
/// su propia transacción y devuelve la venta con el ID generado.
#[post("/ventas")]
pub async fn crear_venta(
    data: web::Data<AppState>,
    item: web::Json<NuevaVentaRequest>,
) -> Result<HttpResponse, ApiError> {
    let nueva = item.into_inner().validar()?;
    let venta = data.ventas.crear(nueva).await?;

    tracing::info!("Venta {} creada para {}", venta.id, venta.cliente_nombre);
    Ok(HttpResponse::Created().json(venta))
}

/// Ruta para obtener una venta por ID.
#[get("/ventas/{id}")]
pub async fn obtener_venta(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let venta = buscar_existente(&data, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(venta))
}

/// Ruta para actualizar parcialmente una venta.
///
/// Primero se comprueba que la venta exista; después se valida el cuerpo.
/// Solo se sobrescriben los campos presentes y toda la validación ocurre
/// antes de escribir, así que un cuerpo inválido no modifica nada.
#[put("/ventas/{id}")]
pub async fn actualizar_venta(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: Result<web::Json<ActualizarVentaRequest>, error::Error>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    buscar_existente(&data, id).await?;

    let item = item.map_err(|_| ApiError::validacion("invalid JSON body"))?;
    let cambios = item.into_inner().validar()?;
    let venta = data
        .ventas
        .actualizar(id, cambios)
        .await?
        .ok_or(ApiError::VentaNoEncontrada(id))?;

    tracing::info!("Venta {} actualizada", id);
    Ok(HttpResponse::Ok().json(venta))
}

/// Ruta para eliminar una venta.
#[delete("/ventas/{id}")]
pub async fn eliminar_venta(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    buscar_existente(&data, id).await?;

    // Otra petición pudo borrarla entre la búsqueda y el DELETE
    if !data.ventas.eliminar(id).await? {
        return Err(ApiError::VentaNoEncontrada(id));
    }

    tracing::info!("Venta {} eliminada", id);
    Ok(HttpResponse::NoContent().finish())
}
