// src/shared/config.rs

use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("la variable de entorno {0} es obligatoria")]
    VariableFaltante(&'static str),
}

/// Configuración de la aplicación, leída una sola vez al arrancar y pasada
/// explícitamente a quien la necesite.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub connection_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|clave| env::var(clave).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables. Los valores numéricos mal formados caen al valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::VariableFaltante("DATABASE_URL"))?;

        let mut config = Self {
            database_url,
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_connections: 5,
            connection_timeout: Duration::from_secs(30),
        };

        if let Some(v) = lookup("HOST") {
            config.host = v;
        }
        if let Some(v) = lookup("PORT") {
            config.port = v.parse().unwrap_or(config.port);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = v.parse().unwrap_or(config.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            config.connection_timeout = v
                .parse()
                .map(Duration::from_secs)
                .unwrap_or(config.connection_timeout);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_de(pares: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mapa: HashMap<String, String> = pares
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |clave| mapa.get(clave).cloned()
    }

    #[test]
    fn valores_por_defecto() {
        let config = AppConfig::from_lookup(lookup_de(&[("DATABASE_URL", "postgres://localhost/ventas")])).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/ventas");
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 5000));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_del_entorno() {
        let config = AppConfig::from_lookup(lookup_de(&[
            ("DATABASE_URL", "postgres://db/ventas"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("DATABASE_CONNECTION_TIMEOUT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connection_timeout, Duration::from_secs(3));
    }

    #[test]
    fn numeros_mal_formados_usan_el_defecto() {
        let config = AppConfig::from_lookup(lookup_de(&[
            ("DATABASE_URL", "postgres://db/ventas"),
            ("PORT", "cinco mil"),
            ("DATABASE_MAX_CONNECTIONS", "-1"),
        ]))
        .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn database_url_es_obligatoria() {
        let err = AppConfig::from_lookup(lookup_de(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::VariableFaltante("DATABASE_URL")));

        let err = AppConfig::from_lookup(lookup_de(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::VariableFaltante("DATABASE_URL")));
    }
}
