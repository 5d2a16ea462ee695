use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use leadroute_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresRuntimeConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRegistryConfig {
    Memory,
    Postgres(PostgresRuntimeConfig),
}

impl ClientRegistryConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub api_host: String,
    pub api_port: u16,
    pub client_registry: ClientRegistryConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    pub fn from_lookup(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let migrate_only = command == Some("migrate");

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or(&lookup, "API_PORT", 8080_u16)?;

        let client_registry = match lookup("CLIENT_REGISTRY")
            .unwrap_or_else(|| "postgres".to_owned())
            .as_str()
        {
            "memory" => ClientRegistryConfig::Memory,
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;
                let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
                if max_connections == 0 {
                    return Err(AppError::Validation(
                        "DATABASE_MAX_CONNECTIONS must be greater than zero".to_owned(),
                    ));
                }

                ClientRegistryConfig::Postgres(PostgresRuntimeConfig {
                    database_url,
                    max_connections,
                    acquire_timeout_seconds: parse_or(
                        &lookup,
                        "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
                        5_u64,
                    )?,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "CLIENT_REGISTRY must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if migrate_only && client_registry == ClientRegistryConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires CLIENT_REGISTRY=postgres".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            api_host,
            api_port,
            client_registry,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use leadroute_core::AppError;

    use super::{ApiConfig, ClientRegistryConfig};

    fn load(command: Option<&str>, vars: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(command, |name| vars.get(name).cloned())
    }

    #[test]
    fn postgres_registry_requires_database_url() {
        let result = load(None, &[]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn defaults_apply_for_postgres_registry() {
        let config = load(None, &[("DATABASE_URL", "postgres://localhost/leadroute")])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 8080);
        assert!(!config.migrate_only);
        match &config.client_registry {
            ClientRegistryConfig::Postgres(postgres) => {
                assert_eq!(postgres.max_connections, 10);
                assert_eq!(postgres.acquire_timeout_seconds, 5);
            }
            ClientRegistryConfig::Memory => panic!("expected postgres registry"),
        }
        assert!(config.socket_address().is_ok());
    }

    #[test]
    fn memory_registry_needs_no_database() {
        let config = load(
            None,
            &[("CLIENT_REGISTRY", "memory"), ("API_PORT", "9090")],
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.client_registry, ClientRegistryConfig::Memory);
        assert_eq!(config.api_port, 9090);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = load(
            None,
            &[("CLIENT_REGISTRY", "memory"), ("API_PORT", "not-a-port")],
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_registry_is_rejected() {
        let result = load(None, &[("CLIENT_REGISTRY", "sqlite")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn migrate_command_requires_postgres() {
        let result = load(Some("migrate"), &[("CLIENT_REGISTRY", "memory")]);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let config = load(
            Some("migrate"),
            &[("DATABASE_URL", "postgres://localhost/leadroute")],
        )
        .unwrap_or_else(|_| unreachable!());
        assert!(config.migrate_only);
    }

    #[test]
    fn invalid_host_is_rejected_when_binding() {
        let config = load(
            None,
            &[("CLIENT_REGISTRY", "memory"), ("API_HOST", "not a host")],
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(config.socket_address().is_err());
    }
}
