// src/ventas/ventas_structs.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::shared::api_error::ApiError;

pub const MAX_CLIENTE_NOMBRE: usize = 100;
pub const MAX_ESTADO: usize = 50;

/// Estructura que representa una venta en la base de datos.
///
/// Deriva `FromRow` para mapear directamente las filas de la tabla `ventas`
/// (las consultas renombran las columnas a los nombres de los campos) y
/// `Serialize` con los nombres fijos del contrato JSON.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub id: i32,
    pub cliente_nombre: String,
    pub total_venta: f64,
    pub fecha_venta: NaiveDate,
    pub estado: String,
}

/// `totalVenta` puede llegar como número JSON o como texto numérico.
/// Cualquier otro tipo cae en `Otro` y se rechaza al validar.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalVenta {
    Numero(f64),
    Texto(String),
    Otro(Value),
}

impl TotalVenta {
    pub fn a_f64(&self) -> Result<f64, ApiError> {
        let valor = match self {
            TotalVenta::Numero(n) => Some(*n),
            TotalVenta::Texto(s) => s.trim().parse::<f64>().ok(),
            TotalVenta::Otro(_) => None,
        };

        valor
            .filter(|n| n.is_finite())
            .ok_or_else(|| ApiError::validacion("totalVenta must be a valid number"))
    }
}

/// Cuerpo de la petición POST. Todos los campos son opcionales a nivel de
/// deserialización para poder responder con el mensaje de campos faltantes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaVentaRequest {
    pub cliente_nombre: Option<String>,
    pub total_venta: Option<TotalVenta>,
    pub fecha_venta: Option<Value>,
    pub estado: Option<String>,
}

/// Cuerpo de la petición PUT: cada campo presente sobrescribe el actual.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarVentaRequest {
    pub cliente_nombre: Option<String>,
    pub total_venta: Option<TotalVenta>,
    pub fecha_venta: Option<Value>,
    pub estado: Option<String>,
}

/// Venta validada, lista para insertar (sin ID).
#[derive(Debug, Clone, PartialEq)]
pub struct NuevaVenta {
    pub cliente_nombre: String,
    pub total_venta: f64,
    pub fecha_venta: NaiveDate,
    pub estado: String,
}

/// Cambios validados de una actualización parcial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CambiosVenta {
    pub cliente_nombre: Option<String>,
    pub total_venta: Option<f64>,
    pub fecha_venta: Option<NaiveDate>,
    pub estado: Option<String>,
}

impl CambiosVenta {
    /// Aplica los cambios sobre una venta existente. En PostgreSQL esto lo
    /// resuelve el propio UPDATE; aquí lo usa el repositorio en memoria.
    #[cfg(test)]
    pub fn aplicar(self, venta: &mut Venta) {
        if let Some(v) = self.cliente_nombre {
            venta.cliente_nombre = v;
        }
        if let Some(v) = self.total_venta {
            venta.total_venta = v;
        }
        if let Some(v) = self.fecha_venta {
            venta.fecha_venta = v;
        }
        if let Some(v) = self.estado {
            venta.estado = v;
        }
    }
}

/// Solo se acepta `YYYY-MM-DD` exacto y una fecha real del calendario.
pub fn parsear_fecha(texto: &str) -> Result<NaiveDate, ApiError> {
    // chrono admite espacios y signo en los campos numéricos; se exige la
    // forma exacta antes de parsear
    let bytes = texto.as_bytes();
    let forma_valida = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !forma_valida {
        return Err(error_fecha());
    }
    NaiveDate::parse_from_str(texto, "%Y-%m-%d").map_err(|_| error_fecha())
}

/// `fechaVenta` debe ser un texto; cualquier otro tipo JSON es una fecha inválida.
fn fecha_desde_json(valor: &Value) -> Result<NaiveDate, ApiError> {
    match valor {
        Value::String(texto) => parsear_fecha(texto),
        _ => Err(error_fecha()),
    }
}

fn error_fecha() -> ApiError {
    ApiError::validacion("invalid date format, use YYYY-MM-DD")
}

fn validar_longitud(campo: &str, valor: &str, max: usize) -> Result<(), ApiError> {
    if valor.chars().count() > max {
        return Err(ApiError::validacion(format!(
            "{} must be at most {} characters",
            campo, max
        )));
    }
    Ok(())
}

impl NuevaVentaRequest {
    /// Valida en orden: campos faltantes, fecha, total y longitudes.
    pub fn validar(self) -> Result<NuevaVenta, ApiError> {
        let (cliente_nombre, total_venta, fecha_venta, estado) =
            match (self.cliente_nombre, self.total_venta, self.fecha_venta, self.estado) {
                (Some(c), Some(t), Some(f), Some(e)) => (c, t, f, e),
                _ => return Err(ApiError::validacion("missing required fields")),
            };

        let fecha_venta = fecha_desde_json(&fecha_venta)?;
        let total_venta = total_venta.a_f64()?;
        validar_longitud("clienteNombre", &cliente_nombre, MAX_CLIENTE_NOMBRE)?;
        validar_longitud("estado", &estado, MAX_ESTADO)?;

        Ok(NuevaVenta {
            cliente_nombre,
            total_venta,
            fecha_venta,
            estado,
        })
    }
}

impl ActualizarVentaRequest {
    pub fn validar(self) -> Result<CambiosVenta, ApiError> {
        let fecha_venta = self.fecha_venta.as_ref().map(fecha_desde_json).transpose()?;
        let total_venta = self.total_venta.as_ref().map(TotalVenta::a_f64).transpose()?;

        if let Some(c) = &self.cliente_nombre {
            validar_longitud("clienteNombre", c, MAX_CLIENTE_NOMBRE)?;
        }
        if let Some(e) = &self.estado {
            validar_longitud("estado", e, MAX_ESTADO)?;
        }

        Ok(CambiosVenta {
            cliente_nombre: self.cliente_nombre,
            total_venta,
            fecha_venta,
            estado: self.estado,
        })
    }
}
