use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::model::{Email, User};

/// Ключ, под которым лежит пользователь.
pub const USER_KEY: &str = "user";

/// Ключ, под которым лежит токен доступа к АПИ.
pub const JWT_KEY: &str = "jwt";

/// Локальное key/value хранилище клиента.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> SaveResult;

    fn remove_item(&self, key: &str) -> SaveResult;
}

/// Хранилище в памяти, ничего не переживает перезапуск.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> SaveResult {
        self.items().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SaveResult {
        self.items().remove(key);
        Ok(())
    }
}

/// Хранилище в JSON файле.
/// Файл перезаписывается целиком при каждом изменении.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Загружает хранилище из указанного файла.
    /// Если файла нет, хранилище будет пустым.
    pub fn load(path: &Path) -> LoadResult {
        let items = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_owned(),
            items: Mutex::new(items),
        })
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn save(&self, items: &HashMap<String, String>) -> SaveResult {
        let content = serde_json::to_string_pretty(items)?;

        fs::create_dir_all(self.path.parent().unwrap_or(Path::new("")))?;

        fs::write(&self.path, content)?;

        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> SaveResult {
        let mut items = self.items();
        items.insert(key.to_owned(), value.to_owned());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> SaveResult {
        let mut items = self.items();
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

pub type LoadResult = std::result::Result<FileStorage, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("read storage file")]
    ReadFile(#[from] io::Error),

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),
}

pub type SaveResult = std::result::Result<(), SaveError>;

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("write storage file")]
    WriteFile(#[from] io::Error),

    #[error("serialize")]
    Serialize(#[from] serde_json::Error),
}

/// Возвращает пользователя, под которым выполнен вход.
pub fn current_user(storage: &dyn LocalStorage) -> SessionResult<User> {
    let raw = storage.get_item(USER_KEY).ok_or(SessionError::SignedOut)?;

    let user = serde_json::from_str(&raw)?;

    Ok(user)
}

/// Возвращает почту пользователя, под которым выполнен вход.
pub fn current_email(storage: &dyn LocalStorage) -> SessionResult<Email> {
    current_user(storage)?.email.ok_or(SessionError::MissingEmail)
}

/// Запоминает пользователя и, если есть, его токен.
pub fn sign_in(storage: &dyn LocalStorage, user: &User, jwt: Option<&str>) -> SaveResult {
    storage.set_item(USER_KEY, &serde_json::to_string(user)?)?;

    match jwt {
        Some(token) => storage.set_item(JWT_KEY, token),
        None => storage.remove_item(JWT_KEY),
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("no signed-in user")]
    SignedOut,

    #[error("signed-in user has no email")]
    MissingEmail,

    #[error("malformed user")]
    Malformed(#[from] serde_json::Error),
}
