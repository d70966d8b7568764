// src/ventas/mod.rs

// Estructuras de la venta, cuerpos de petición y validación
pub mod ventas_structs;
// Acceso a la tabla `ventas`
pub mod ventas_repository;
// Rutas CRUD de ventas
pub mod ventas_router;
