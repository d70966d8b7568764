// src/shared/mod.rs

// Estructuras compartidas entre módulos (cuerpos de respuesta)
pub mod shared_structs;
// Tipos de error de la API y su mapeo a respuestas HTTP
pub mod api_error;
// Configuración leída del entorno
pub mod config;
