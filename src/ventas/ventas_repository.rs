// src/ventas/ventas_repository.rs

use async_trait::async_trait;
use sqlx::{query, query_as, PgPool};

use super::ventas_structs::{CambiosVenta, NuevaVenta, Venta};

/// Columnas de `ventas` renombradas a los campos de `Venta`.
const COLUMNAS: &str = "id, nombre_cliente AS cliente_nombre, total_venta, fecha_venta, estado";

/// Operaciones de persistencia que necesitan las rutas de ventas.
///
/// Cada operación que modifica datos es su propia transacción: se confirma
/// entera o se revierte entera.
#[async_trait]
pub trait VentaRepository: Send + Sync {
    async fn listar(&self) -> Result<Vec<Venta>, sqlx::Error>;
    async fn buscar(&self, id: i32) -> Result<Option<Venta>, sqlx::Error>;
    async fn crear(&self, nueva: NuevaVenta) -> Result<Venta, sqlx::Error>;
    /// Devuelve `None` si la venta ya no existe.
    async fn actualizar(&self, id: i32, cambios: CambiosVenta) -> Result<Option<Venta>, sqlx::Error>;
    /// Devuelve `false` si no había ninguna fila con ese ID.
    async fn eliminar(&self, id: i32) -> Result<bool, sqlx::Error>;
}

/// Crea la tabla `ventas` si todavía no existe.
pub async fn crear_esquema(pool: &PgPool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS ventas (
            id SERIAL PRIMARY KEY,
            nombre_cliente VARCHAR(100) NOT NULL,
            total_venta DOUBLE PRECISION NOT NULL,
            fecha_venta DATE NOT NULL,
            estado VARCHAR(50) NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Implementación sobre PostgreSQL con un pool de conexiones de sqlx.
pub struct PgVentaRepository {
    pool: PgPool,
}

impl PgVentaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VentaRepository for PgVentaRepository {
    async fn listar(&self) -> Result<Vec<Venta>, sqlx::Error> {
        let sql = format!("SELECT {} FROM ventas ORDER BY id", COLUMNAS);
        query_as::<_, Venta>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    async fn buscar(&self, id: i32) -> Result<Option<Venta>, sqlx::Error> {
        let sql = format!("SELECT {} FROM ventas WHERE id = $1", COLUMNAS);
        query_as::<_, Venta>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn crear(&self, nueva: NuevaVenta) -> Result<Venta, sqlx::Error> {
        let sql = format!(
            "INSERT INTO ventas (nombre_cliente, total_venta, fecha_venta, estado) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNAS
        );

        let mut transaction = self.pool.begin().await?;
        let resultado = query_as::<_, Venta>(&sql)
            .bind(&nueva.cliente_nombre)
            .bind(nueva.total_venta)
            .bind(nueva.fecha_venta)
            .bind(&nueva.estado)
            .fetch_one(&mut *transaction)
            .await;

        match resultado {
            Ok(venta) => {
                transaction.commit().await?;
                Ok(venta)
            }
            Err(e) => {
                let _ = transaction.rollback().await;
                Err(e)
            }
        }
    }

    async fn actualizar(&self, id: i32, cambios: CambiosVenta) -> Result<Option<Venta>, sqlx::Error> {
        // COALESCE conserva el valor actual de cada campo ausente
        let sql = format!(
            "UPDATE ventas SET \
                nombre_cliente = COALESCE($1, nombre_cliente), \
                total_venta = COALESCE($2, total_venta), \
                fecha_venta = COALESCE($3, fecha_venta), \
                estado = COALESCE($4, estado) \
             WHERE id = $5 RETURNING {}",
            COLUMNAS
        );

        let mut transaction = self.pool.begin().await?;
        let resultado = query_as::<_, Venta>(&sql)
            .bind(cambios.cliente_nombre)
            .bind(cambios.total_venta)
            .bind(cambios.fecha_venta)
            .bind(cambios.estado)
            .bind(id)
            .fetch_optional(&mut *transaction)
            .await;

        match resultado {
            Ok(venta) => {
                transaction.commit().await?;
                Ok(venta)
            }
            Err(e) => {
                let _ = transaction.rollback().await;
                Err(e)
            }
        }
    }

    async fn eliminar(&self, id: i32) -> Result<bool, sqlx::Error> {
        let mut transaction = self.pool.begin().await?;
        let resultado = query("DELETE FROM ventas WHERE id = $1")
            .bind(id)
            .execute(&mut *transaction)
            .await;

        match resultado {
            Ok(res) => {
                transaction.commit().await?;
                Ok(res.rows_affected() > 0)
            }
            Err(e) => {
                let _ = transaction.rollback().await;
                Err(e)
            }
        }
    }
}

/// Repositorio en memoria para las pruebas de las rutas.
#[cfg(test)]
pub mod memoria {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoriaVentaRepository {
        filas: Mutex<BTreeMap<i32, Venta>>,
        siguiente_id: Mutex<i32>,
        /// Cuando está activo, toda operación falla como si la base de datos
        /// no estuviera disponible.
        pub fallar: AtomicBool,
    }

    impl MemoriaVentaRepository {
        pub fn fallando() -> Self {
            let repo = Self::default();
            repo.fallar.store(true, Ordering::SeqCst);
            repo
        }

        pub fn total(&self) -> usize {
            self.filas.lock().unwrap().len()
        }

        fn comprobar(&self) -> Result<(), sqlx::Error> {
            if self.fallar.load(Ordering::SeqCst) {
                return Err(sqlx::Error::PoolClosed);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl VentaRepository for MemoriaVentaRepository {
        async fn listar(&self) -> Result<Vec<Venta>, sqlx::Error> {
            self.comprobar()?;
            Ok(self.filas.lock().unwrap().values().cloned().collect())
        }

        async fn buscar(&self, id: i32) -> Result<Option<Venta>, sqlx::Error> {
            self.comprobar()?;
            Ok(self.filas.lock().unwrap().get(&id).cloned())
        }

        async fn crear(&self, nueva: NuevaVenta) -> Result<Venta, sqlx::Error> {
            self.comprobar()?;
            let mut siguiente = self.siguiente_id.lock().unwrap();
            *siguiente += 1;
            let venta = Venta {
                id: *siguiente,
                cliente_nombre: nueva.cliente_nombre,
                total_venta: nueva.total_venta,
                fecha_venta: nueva.fecha_venta,
                estado: nueva.estado,
            };
            self.filas.lock().unwrap().insert(venta.id, venta.clone());
            Ok(venta)
        }

        async fn actualizar(&self, id: i32, cambios: CambiosVenta) -> Result<Option<Venta>, sqlx::Error> {
            self.comprobar()?;
            let mut filas = self.filas.lock().unwrap();
            Ok(filas.get_mut(&id).map(|venta| {
                cambios.aplicar(venta);
                venta.clone()
            }))
        }

        async fn eliminar(&self, id: i32) -> Result<bool, sqlx::Error> {
            self.comprobar()?;
            Ok(self.filas.lock().unwrap().remove(&id).is_some())
        }
    }
}
