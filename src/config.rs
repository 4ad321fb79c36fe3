use std::env;
use std::fmt;

#[derive(Clone)]
pub struct Config {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            endpoint: env::var("ISPCONFIG_ENDPOINT")?,
            username: env::var("ISPCONFIG_USERNAME")?,
            password: env::var("ISPCONFIG_PASSWORD")?,
            log_level: env::var("ISPCONFIG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    impl Default for Config {
        fn default() -> Self {
            Config {
                endpoint: String::from("https://ispconfig.example.com:8080/remote/json.php"),
                username: String::from("remote-user"),
                password: String::from("remote-password"),
                log_level: String::from("info"),
            }
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("remote-user"));
        assert!(!debug.contains("remote-password"));
    }
}
