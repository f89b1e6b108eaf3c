use crate::app_config::{AppConfig, BackendConfig, DeploymentMode, Environment};
use crate::origin::{is_unsafe_backend_url, DEFAULT_PRODUCTION_BACKEND_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real process environment so it can be tested with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    // Blank values count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("RETAIL_ENV", "development"));
    let hosted = optional("VERCEL").is_some_and(|v| v != "0");
    let mode = derive_mode(hosted, &env);

    let configured_url = optional("BACKEND_URL").or_else(|| optional("PUBLIC_API_URL"));
    let production_url = or_default("PRODUCTION_BACKEND_URL", DEFAULT_PRODUCTION_BACKEND_URL);
    if is_unsafe_backend_url(&production_url) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRODUCTION_BACKEND_URL".to_string(),
            reason: format!("not a usable absolute http(s) URL: {production_url}"),
        });
    }

    let bind_addr = parse_addr("RETAIL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("RETAIL_LOG_LEVEL", "info");

    let backend_timeout_secs = parse_u64("RETAIL_BACKEND_TIMEOUT_SECS", "8")?;
    if backend_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RETAIL_BACKEND_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("RETAIL_USER_AGENT", "retail-dashboard/0.1");
    let model_server_dir = optional("RETAIL_MODEL_SERVER_DIR").map(PathBuf::from);
    let dashboard_url = or_default("RETAIL_DASHBOARD_URL", "http://127.0.0.1:3000");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend: BackendConfig {
            mode,
            configured_url,
            production_url,
        },
        backend_timeout_secs,
        user_agent,
        model_server_dir,
        dashboard_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn derive_mode(hosted: bool, env: &Environment) -> DeploymentMode {
    if hosted {
        DeploymentMode::Hosted
    } else if *env == Environment::Production {
        DeploymentMode::ProductionLike
    } else {
        DeploymentMode::Local
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.backend.mode, DeploymentMode::Local);
        assert!(cfg.backend.configured_url.is_none());
        assert_eq!(cfg.backend.production_url, DEFAULT_PRODUCTION_BACKEND_URL);
        assert_eq!(cfg.backend_timeout_secs, 8);
        assert_eq!(cfg.user_agent, "retail-dashboard/0.1");
        assert!(cfg.model_server_dir.is_none());
        assert_eq!(cfg.dashboard_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn backend_url_takes_priority_over_public_api_url() {
        let mut map = HashMap::new();
        map.insert("BACKEND_URL", "https://api.example.com");
        map.insert("PUBLIC_API_URL", "https://public.example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.backend.configured_url.as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn public_api_url_used_when_backend_url_blank() {
        let mut map = HashMap::new();
        map.insert("BACKEND_URL", "   ");
        map.insert("PUBLIC_API_URL", "https://public.example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.backend.configured_url.as_deref(),
            Some("https://public.example.com")
        );
    }

    #[test]
    fn malformed_production_url_is_rejected() {
        for bad in ["prod-api.internal", "ftp://prod.example.com", "http://localhost:8000"] {
            let mut map = HashMap::new();
            map.insert("PRODUCTION_BACKEND_URL", bad);
            let err = build_app_config(lookup_from_map(&map)).expect_err("should reject");
            assert!(
                matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PRODUCTION_BACKEND_URL"),
                "{bad}: got {err:?}"
            );
        }
    }

    #[test]
    fn production_url_override_is_accepted() {
        let mut map = HashMap::new();
        map.insert("PRODUCTION_BACKEND_URL", "https://prod.example.com/");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid override");
        assert_eq!(cfg.backend.production_url, "https://prod.example.com/");
    }

    #[test]
    fn hosted_marker_selects_hosted_mode() {
        let mut map = HashMap::new();
        map.insert("VERCEL", "1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.backend.mode, DeploymentMode::Hosted);
    }

    #[test]
    fn hosted_marker_zero_is_ignored() {
        let mut map = HashMap::new();
        map.insert("VERCEL", "0");
        map.insert("RETAIL_ENV", "production");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.backend.mode, DeploymentMode::ProductionLike);
    }

    #[test]
    fn production_env_without_marker_is_production_like() {
        let mut map = HashMap::new();
        map.insert("RETAIL_ENV", "production");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.backend.mode, DeploymentMode::ProductionLike);
    }

    #[test]
    fn production_backend_url_override() {
        let mut map = HashMap::new();
        map.insert("PRODUCTION_BACKEND_URL", "https://prod.example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.backend.production_url, "https://prod.example.com");
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("RETAIL_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RETAIL_BIND_ADDR"),
            "expected InvalidEnvVar(RETAIL_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn backend_timeout_override() {
        let mut map = HashMap::new();
        map.insert("RETAIL_BACKEND_TIMEOUT_SECS", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.backend_timeout_secs, 3);
    }

    #[test]
    fn backend_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("RETAIL_BACKEND_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RETAIL_BACKEND_TIMEOUT_SECS"),
            "expected InvalidEnvVar(RETAIL_BACKEND_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn backend_timeout_zero_is_rejected() {
        let mut map = HashMap::new();
        map.insert("RETAIL_BACKEND_TIMEOUT_SECS", "0");
        assert!(build_app_config(lookup_from_map(&map)).is_err());
    }

    #[test]
    fn model_server_dir_override() {
        let mut map = HashMap::new();
        map.insert("RETAIL_MODEL_SERVER_DIR", "/srv/model-server");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.model_server_dir,
            Some(std::path::PathBuf::from("/srv/model-server"))
        );
    }
}
