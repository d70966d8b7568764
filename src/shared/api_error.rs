// src/shared/api_error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use super::shared_structs::ErrorResponse;

/// Tipos de error que puede devolver cualquier ruta de la API.
///
/// El mensaje de `Display` es exactamente el que recibe el cliente en el campo
/// `error`. Los errores de persistencia nunca exponen el detalle interno.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Datos de entrada inválidos (campo faltante, fecha o número mal formados).
    #[error("{0}")]
    Validacion(String),

    #[error("Venta with ID {0} not found")]
    VentaNoEncontrada(i32),

    /// Ruta inexistente o parámetro de ruta que no es un entero.
    #[error("resource not found")]
    RutaNoEncontrada,

    /// Cualquier fallo inesperado al hablar con la base de datos.
    #[error("internal server error")]
    Persistencia(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validacion(mensaje: impl Into<String>) -> Self {
        ApiError::Validacion(mensaje.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validacion(_) => StatusCode::BAD_REQUEST,
            ApiError::VentaNoEncontrada(_) | ApiError::RutaNoEncontrada => StatusCode::NOT_FOUND,
            ApiError::Persistencia(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // El detalle real solo va al log
        if let ApiError::Persistencia(e) = self {
            tracing::error!("Error de base de datos: {:?}", e);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
