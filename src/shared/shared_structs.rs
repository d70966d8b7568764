// src/shared/shared_structs.rs

use serde::Serialize;

/// Cuerpo estándar de las respuestas de error de la API.
/// Siempre un objeto con una única clave `error`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
