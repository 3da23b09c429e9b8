use crate::config::{
    config_model::{AuthSecret, BackendServer, DotEnvyConfig, WorkspaceStore},
    stage::Stage,
};
use anyhow::{Context, Result};

const DEFAULT_WORKSPACE_STORE_PATH: &str = "data/workspaces.json";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub(crate) fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let backend_server = BackendServer {
        port: required(&lookup, "SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required(&lookup, "SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required(&lookup, "SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let workspace_store = WorkspaceStore {
        path: lookup("WORKSPACE_STORE_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WORKSPACE_STORE_PATH.to_string())
            .into(),
    };

    let auth = AuthSecret {
        jwt_secret: required(&lookup, "JWT_SECRET")?,
    };

    let stage = lookup("STAGE")
        .map(|raw| Stage::try_from(&raw))
        .transpose()?
        .unwrap_or_default();

    Ok(DotEnvyConfig {
        backend_server,
        workspace_store,
        auth,
        stage,
    })
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{key} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, path::PathBuf};

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SERVER_PORT_BACKEND", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("JWT_SECRET", "supersecretjwtsecretforunittesting123"),
        ]
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load_from(lookup_from(&base_vars())).unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.backend_server.body_limit, 10);
        assert_eq!(config.backend_server.timeout, 30);
        assert_eq!(config.workspace_store.path, PathBuf::from("data/workspaces.json"));
        assert_eq!(config.stage, Stage::Local);
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut vars = base_vars();
        vars.push(("WORKSPACE_STORE_PATH", "/var/lib/bizdesk/workspaces.json"));
        vars.push(("STAGE", "Production"));

        let config = load_from(lookup_from(&vars)).unwrap();

        assert_eq!(
            config.workspace_store.path,
            PathBuf::from("/var/lib/bizdesk/workspaces.json")
        );
        assert_eq!(config.stage, Stage::Production);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(key, _)| *key != "JWT_SECRET")
            .collect();

        let err = load_from(lookup_from(&vars)).unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"), "got: {err}");
    }

    #[test]
    fn malformed_port_is_an_error() {
        let mut vars = base_vars();
        vars[0] = ("SERVER_PORT_BACKEND", "eighty");

        let err = load_from(lookup_from(&vars)).unwrap_err().to_string();
        assert!(err.contains("SERVER_PORT_BACKEND"), "got: {err}");
    }

    #[test]
    fn unknown_stage_is_an_error() {
        let mut vars = base_vars();
        vars.push(("STAGE", "staging-ish"));
        assert!(load_from(lookup_from(&vars)).is_err());
    }
}
