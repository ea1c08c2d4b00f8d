use std::env;

use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    #[default]
    #[strum(serialize = "development", serialize = "dev")]
    Development,
    #[strum(serialize = "production", serialize = "prod")]
    Production,
}

/// Reads `ENV`; falls back to the build profile when unset or unknown.
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    env::var("ENV")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default_env)
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn parses_known_environment_names() {
        assert_eq!("production".parse(), Ok(Environment::Production));
        assert_eq!("Dev".parse(), Ok(Environment::Development));
        assert_eq!("PROD".parse(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }
}
