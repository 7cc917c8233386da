use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

pub const TOKEN_KEY: &str = "jwtToken";

// Directory holding the stored session token.
// Defaults to a relative "./data/session" directory.
pub fn get_session_location() -> String {
    env::var("SESSION_DIR").unwrap_or("./data/session".to_string())
}

pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), String>;
    fn clear(&self) -> Result<(), String>;
}

pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        match fs::read_to_string(self.path()) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(error = %e, path = %self.path().display(), "unable to read session token");
                }
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), String> {
        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        fs::write(self.path(), token.trim()).map_err(|e| e.to_string())
    }

    fn clear(&self) -> Result<(), String> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), String> {
        let mut guard = self.token.lock().map_err(|e| e.to_string())?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        let mut guard = self.token.lock().map_err(|e| e.to_string())?;
        *guard = None;
        Ok(())
    }
}
