use std::future::Future;
use std::sync::OnceLock;
use tokio::sync::Mutex;

/// Session id issued by `login`, established at most once per provider.
///
/// Reads never lock. The first caller to find the cache empty takes the login
/// lock and checks again before logging in, so concurrent first calls share a
/// single login.
#[derive(Default)]
pub(crate) struct SessionCache {
    id: OnceLock<String>,
    login: Mutex<()>,
}

impl SessionCache {
    pub(crate) fn get(&self) -> Option<&str> {
        self.id.get().map(String::as_str)
    }

    pub(crate) async fn get_or_login<F, Fut, E>(&self, login: F) -> Result<&str, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(id) = self.get() {
            return Ok(id);
        }

        let _guard = self.login.lock().await;
        if let Some(id) = self.get() {
            return Ok(id);
        }

        let id = login().await?;
        Ok(self.id.get_or_init(|| id).as_str())
    }
}
