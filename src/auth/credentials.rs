use crate::error::Error;
use std::collections::HashMap;
use std::env;

pub const USERNAME_KEY: &str = "ispconfig_username";
pub const PASSWORD_KEY: &str = "ispconfig_password";

#[cfg_attr(test, mockall::automock)]
pub trait CredentialManager: Send + Sync {
    fn get(&self, key: &str) -> Result<String, Error>;
}

/// Credentials handed over by the embedding application.
pub struct StaticCredentialManager {
    creds: HashMap<String, String>,
}

impl StaticCredentialManager {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let creds = [
            (USERNAME_KEY.to_string(), username.into()),
            (PASSWORD_KEY.to_string(), password.into()),
        ]
        .into_iter()
        .collect();
        Self { creds }
    }
}

impl CredentialManager for StaticCredentialManager {
    fn get(&self, key: &str) -> Result<String, Error> {
        self.creds
            .get(key)
            .cloned()
            .ok_or_else(|| Error::CredentialError(format!("Unknown key: {key}")))
    }
}

/// Reads `ISPCONFIG_USERNAME` / `ISPCONFIG_PASSWORD` on every lookup.
pub struct EnvCredentialManager;

impl CredentialManager for EnvCredentialManager {
    fn get(&self, key: &str) -> Result<String, Error> {
        let var = match key {
            USERNAME_KEY => "ISPCONFIG_USERNAME",
            PASSWORD_KEY => "ISPCONFIG_PASSWORD",
            _ => return Err(Error::CredentialError(format!("Unknown key: {key}"))),
        };
        env::var(var).map_err(|e| Error::CredentialError(format!("{var}: {e}")))
    }
}
