//! Purpose: Flat-file credential storage behind the `CredentialStore` seam.
//! Exports: `CredentialStore`, `FileCredentialStore`.
//! Role: Username/password-hash persistence; one `username:hexhash` line per user.
//! Invariants: Passwords are stored only as lower-case hex SHA-256 digests.
//! Invariants: Registration rewrites the whole file; loads skip malformed lines.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::core::error::{Error, ErrorKind};

pub trait CredentialStore {
    /// Check a username/password pair. Any failure to match is `false`;
    /// authentication never errors.
    fn authenticate(&self, username: &str, password: &str) -> bool;

    fn register(&self, username: &str, password: &str) -> Result<(), Error>;
}

pub struct FileCredentialStore {
    users_path: PathBuf,
    credentials: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let users_path = path.into();
        if let Some(parent) = users_path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to create credential store directory")
                    .with_path(parent)
                    .with_source(err)
            })?;
        }
        let credentials = load_credentials(&users_path)?;
        Ok(Self {
            users_path,
            credentials: Mutex::new(credentials),
        })
    }

    fn persist(&self, credentials: &HashMap<String, String>) -> Result<(), Error> {
        let mut contents = String::new();
        for (username, hash) in credentials {
            contents.push_str(username);
            contents.push(':');
            contents.push_str(hash);
            contents.push('\n');
        }
        fs::write(&self.users_path, contents).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write credential store")
                .with_path(&self.users_path)
                .with_source(err)
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return false;
        }
        let credentials = self.credentials.lock().expect("credential lock poisoned");
        credentials
            .get(username)
            .is_some_and(|stored| *stored == hash_password(password))
    }

    fn register(&self, username: &str, password: &str) -> Result<(), Error> {
        let username = username.trim();
        if username.chars().count() < 3 {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("Username must contain at least 3 characters."));
        }
        if username.contains(':') {
            return Err(Error::new(ErrorKind::Usage).with_message("Username must not contain ':'."));
        }
        if password.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("Password must not be empty."));
        }

        let mut credentials = self.credentials.lock().expect("credential lock poisoned");
        if credentials.contains_key(username) {
            return Err(Error::new(ErrorKind::Usage).with_message("Username already exists."));
        }
        let mut updated = credentials.clone();
        updated.insert(username.to_string(), hash_password(password));
        self.persist(&updated)?;
        *credentials = updated;
        Ok(())
    }
}

fn load_credentials(path: &Path) -> Result<HashMap<String, String>, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(err) => {
            return Err(Error::new(ErrorKind::Io)
                .with_message("failed to read credential store")
                .with_path(path)
                .with_source(err));
        }
    };
    let mut credentials = HashMap::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some((username, hash)) = line.split_once(':') {
            credentials.insert(username.to_string(), hash.to_string());
        }
    }
    Ok(credentials)
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
