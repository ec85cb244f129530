use std::env;

use crate::{ConfigurationError, Secret};

/// The SP-API application credentials. Loaded once at startup and held for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct SpApiConfig {
    /// The long-lived LWA refresh token for the selling partner authorization.
    pub refresh_token: Secret,
    /// The LWA application (client) id.
    pub lwa_app_id: String,
    /// The LWA client secret.
    pub lwa_client_secret: Secret,
    /// AWS key pair and role for deployments that sign requests. The orders query itself
    /// authenticates with the LWA bearer token, but the credential contract requires these to be
    /// configured up front.
    pub aws_access_key: String,
    pub aws_secret_key: Secret,
    pub role_arn: String,
}

impl SpApiConfig {
    pub fn try_from_env() -> Result<Self, ConfigurationError> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Loads the credentials through the given lookup function. Every required value must be
    /// present and non-empty; the first one that isn't fails the whole load, before any network
    /// activity. Tests pass a map-backed closure here instead of mutating the process environment.
    pub fn try_from_lookup<L>(lookup: L) -> Result<Self, ConfigurationError>
    where L: Fn(&str) -> Option<String> {
        let required = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(_) => Err(ConfigurationError(format!("{key} is set but empty."))),
            None => Err(ConfigurationError(format!("{key} is not set."))),
        };
        Ok(Self {
            refresh_token: Secret::new(required("REFRESH_TOKEN")?),
            lwa_app_id: required("LWA_APP_ID")?,
            lwa_client_secret: Secret::new(required("CLIENT_SECRET")?),
            aws_access_key: required("AWS_ACCESS_KEY")?,
            aws_secret_key: Secret::new(required("AWS_SECRET_KEY")?),
            role_arn: required("ROLE_ARN")?,
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    const REQUIRED_VARS: [&str; 6] =
        ["REFRESH_TOKEN", "LWA_APP_ID", "CLIENT_SECRET", "AWS_ACCESS_KEY", "AWS_SECRET_KEY", "ROLE_ARN"];

    fn full_env() -> HashMap<String, String> {
        REQUIRED_VARS.iter().map(|k| (k.to_string(), format!("value-for-{k}"))).collect()
    }

    #[test]
    fn loads_when_all_variables_are_present() {
        let env = full_env();
        let config = SpApiConfig::try_from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.refresh_token.reveal(), "value-for-REFRESH_TOKEN");
        assert_eq!(config.lwa_app_id, "value-for-LWA_APP_ID");
        assert_eq!(config.lwa_client_secret.reveal(), "value-for-CLIENT_SECRET");
        assert_eq!(config.aws_access_key, "value-for-AWS_ACCESS_KEY");
        assert_eq!(config.aws_secret_key.reveal(), "value-for-AWS_SECRET_KEY");
        assert_eq!(config.role_arn, "value-for-ROLE_ARN");
    }

    #[test]
    fn each_missing_variable_fails_the_load_by_name() {
        for missing in REQUIRED_VARS {
            let mut env = full_env();
            env.remove(missing);
            let err = SpApiConfig::try_from_lookup(|k| env.get(k).cloned()).unwrap_err();
            assert!(err.to_string().contains(missing), "error should name {missing}: {err}");
        }
    }

    #[test]
    fn empty_values_are_rejected() {
        let mut env = full_env();
        env.insert("ROLE_ARN".to_string(), "   ".to_string());
        let err = SpApiConfig::try_from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("ROLE_ARN"));
    }

    #[test]
    fn secrets_do_not_leak_through_debug() {
        let env = full_env();
        let config = SpApiConfig::try_from_lookup(|k| env.get(k).cloned()).unwrap();
        let debugged = format!("{config:?}");
        assert!(!debugged.contains("value-for-REFRESH_TOKEN"));
        assert!(!debugged.contains("value-for-AWS_SECRET_KEY"));
        // Non-secret identifiers may appear.
        assert!(debugged.contains("value-for-ROLE_ARN"));
    }
}
