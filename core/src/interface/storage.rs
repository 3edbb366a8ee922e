use crate::prelude::DeviceError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only access to the model blob at start-up.
pub trait ModelStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, DeviceError>;
}

/// Model store backed by a directory on the local filesystem.
pub struct FsModelStore {
    root: PathBuf,
}

impl FsModelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ModelStore for FsModelStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, DeviceError> {
        let path = self.root.join(name);
        fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => DeviceError::NotFound(path.display().to_string()),
            _ => DeviceError::Failed(format!("{}: {}", path.display(), err)),
        })
    }
}
