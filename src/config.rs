//! Deployment environment and dispatch settings.
//!
//! Only the exact value `production` selects [`Environment::Production`].
//! Anything else, including `prod`, `Production` or an unset variable, is a
//! non-production environment and keeps internal detail in responses.

use std::fmt;

/// Environment variable read by [`Environment::from_env`].
pub const ENV_VAR: &str = "APP_ENV";

/// Value that marks a production deployment.
pub const PRODUCTION: &str = "production";

/// Deployment environment as seen by the dispatch policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production: unclassified failures are redacted.
    Production,
    /// Any other deployment, keeping the name it was parsed from.
    NonProduction(String),
}

impl Environment {
    /// Classify an environment name.
    pub fn parse(name: &str) -> Self {
        if name == PRODUCTION {
            Self::Production
        } else {
            Self::NonProduction(name.to_owned())
        }
    }

    /// Read [`ENV_VAR`].
    #[inline]
    pub fn from_env() -> Self {
        Self::from_env_var(ENV_VAR)
    }

    /// Read an arbitrary variable; unset or non-UTF-8 values are non-production.
    pub fn from_env_var(var: &str) -> Self {
        match std::env::var(var) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::NonProduction(String::new()),
        }
    }

    /// Whether responses must hide internal detail.
    #[inline]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Environment name as configured.
    pub fn name(&self) -> &str {
        match self {
            Self::Production => PRODUCTION,
            Self::NonProduction(name) => name.as_str(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::NonProduction(String::new())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings of a [`DispatchPolicy`](crate::DispatchPolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Show the driver message of data-access faults outside production.
    ///
    /// Off by default: data-access envelopes carry the kind's text in every
    /// environment.
    pub expose_data_access_detail: bool,
}

impl DispatchConfig {
    /// Config for `environment` with defaults otherwise.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Config read from [`ENV_VAR`].
    pub fn from_env() -> Self {
        Self::new(Environment::from_env())
    }

    /// Toggle [`expose_data_access_detail`](Self::expose_data_access_detail).
    pub fn with_data_access_detail(mut self, expose: bool) -> Self {
        self.expose_data_access_detail = expose;
        self
    }

    /// Whether driver messages may reach an envelope under this config.
    #[inline]
    pub fn shows_data_access_detail(&self) -> bool {
        self.expose_data_access_detail && !self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_literal_is_production() {
        assert!(Environment::parse("production").is_production());
        for name in ["prod", "Production", "PRODUCTION", " production", "staging", ""] {
            assert!(!Environment::parse(name).is_production(), "{name:?}");
        }
    }

    #[test]
    fn reads_environment_variable() {
        temp_env::with_var(ENV_VAR, Some("production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
        temp_env::with_var(ENV_VAR, Some("dev"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::NonProduction("dev".into()));
            assert_eq!(env.name(), "dev");
        });
    }

    #[test]
    fn unset_variable_is_non_production() {
        temp_env::with_var_unset("UNIFIED_ERRORS_TEST_ENV", || {
            assert!(!Environment::from_env_var("UNIFIED_ERRORS_TEST_ENV").is_production());
        });
    }

    #[test]
    fn data_access_detail_never_shown_in_production() {
        let dev = DispatchConfig::new(Environment::parse("dev")).with_data_access_detail(true);
        assert!(dev.shows_data_access_detail());

        let prod = DispatchConfig::new(Environment::Production).with_data_access_detail(true);
        assert!(!prod.shows_data_access_detail());

        assert!(!DispatchConfig::default().shows_data_access_detail());
    }

    #[test]
    fn config_from_env() {
        temp_env::with_var(ENV_VAR, Some("production"), || {
            assert!(DispatchConfig::from_env().environment.is_production());
        });
    }
}
