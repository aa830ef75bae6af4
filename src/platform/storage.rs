//! Platform record stores

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{RecordStore, StorageError};

    /// Browser LocalStorage
    #[derive(Debug, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        pub fn new() -> Self {
            Self
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl RecordStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let storage =
                Self::storage().ok_or_else(|| StorageError::unavailable("no LocalStorage"))?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::write(format!("{e:?}")))
        }
    }
}

/// Native data directory (`QUANTUM_SHOT_DATA` overrides)
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> std::path::PathBuf {
    std::env::var_os("QUANTUM_SHOT_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from(".quantum-shot"))
}
