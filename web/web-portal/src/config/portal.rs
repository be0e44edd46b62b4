use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Overrides `<origin>/api`, e.g. when the API lives on another host.
    pub api_base: Option<String>,
}

const LOCAL_STORAGE_KEY: &str = "portal-config";

impl PortalConfig {
    pub fn load_from_localstorage() -> Self {
        LocalStorage::get::<Self>(LOCAL_STORAGE_KEY).unwrap_or_default()
    }

    pub fn save_to_localstorage(&self) {
        if let Err(e) = LocalStorage::set(LOCAL_STORAGE_KEY, self) {
            log::error!("save config error: {e}");
        }
    }

    /// Configured base with surrounding whitespace and trailing slashes removed.
    pub fn api_base(&self) -> Option<&str> {
        self.api_base
            .as_deref()
            .map(|base| base.trim().trim_end_matches('/'))
            .filter(|base| !base.is_empty())
    }
}
