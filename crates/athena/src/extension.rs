// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Extension registration object.
//!
//! The host loads the extension once per database and expects an init and a
//! version entry point. What the extension registers at load time lives in
//! a separate library; this module only forwards to it through
//! [`ExtensionEntryPoints`].

use std::ffi::{c_void, CStr};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use thiserror::Error;

use crate::EXTENSION_NAME;

/// Version reported when no entry points are registered.
pub const CRATE_VERSION: &CStr =
    match CStr::from_bytes_with_nul(concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes()) {
        Ok(version) => version,
        Err(_) => panic!("crate version contains an interior nul"),
    };

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("Extension '{0}' has no registered entry points")]
    NotRegistered(String),
}

/// Opaque host database context passed to the init routine.
///
/// The pointer is never dereferenced here.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DatabaseHandle(NonNull<c_void>);

impl DatabaseHandle {
    /// Wrap a raw host pointer; NULL yields `None`.
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatabaseHandle({:p})", self.0)
    }
}

/// The external library's entry points.
pub trait ExtensionEntryPoints: Send + Sync {
    /// Register the extension's functionality with the database.
    fn init(&self, db: DatabaseHandle);

    /// Version string of the host API the library was built against.
    fn version(&self) -> &CStr;
}

/// The object the host loads.
#[derive(Clone)]
pub struct AthenaExtension {
    entry_points: Option<Arc<dyn ExtensionEntryPoints>>,
}

impl AthenaExtension {
    /// Extension with no entry points; `load` fails until some are attached.
    pub fn new() -> Self {
        Self { entry_points: None }
    }

    pub fn with_entry_points(entry_points: Arc<dyn ExtensionEntryPoints>) -> Self {
        Self {
            entry_points: Some(entry_points),
        }
    }

    pub fn name(&self) -> &'static str {
        EXTENSION_NAME
    }

    pub fn is_registered(&self) -> bool {
        self.entry_points.is_some()
    }

    /// Forward the host's load call to the init routine.
    ///
    /// Whatever the routine does, including failing, is its own business.
    pub fn load(&self, db: DatabaseHandle) -> Result<(), ExtensionError> {
        let entry_points = self
            .entry_points
            .as_ref()
            .ok_or_else(|| ExtensionError::NotRegistered(EXTENSION_NAME.to_string()))?;
        log::info!("loading extension '{}' into {:?}", EXTENSION_NAME, db);
        entry_points.init(db);
        Ok(())
    }

    /// Version from the entry points, or this crate's version if none.
    pub fn version(&self) -> &CStr {
        match &self.entry_points {
            Some(entry_points) => entry_points.version(),
            None => CRATE_VERSION,
        }
    }
}

impl Default for AthenaExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AthenaExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AthenaExtension")
            .field("name", &EXTENSION_NAME)
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        loads: Mutex<Vec<usize>>,
    }

    impl ExtensionEntryPoints for Recorder {
        fn init(&self, db: DatabaseHandle) {
            self.loads.lock().unwrap().push(db.as_ptr() as usize);
        }

        fn version(&self) -> &CStr {
            c"v1.0.0"
        }
    }

    #[test]
    fn test_null_database_rejected() {
        assert!(DatabaseHandle::from_raw(std::ptr::null_mut()).is_none());
    }

    #[test]
    fn test_load_forwards_to_init() {
        let recorder = Arc::new(Recorder::default());
        let ext = AthenaExtension::with_entry_points(recorder.clone());

        let mut db_a = 1u8;
        let mut db_b = 2u8;
        let a = DatabaseHandle::from_raw((&mut db_a as *mut u8).cast()).unwrap();
        let b = DatabaseHandle::from_raw((&mut db_b as *mut u8).cast()).unwrap();

        ext.load(a).unwrap();
        ext.load(b).unwrap();

        let loads = recorder.loads.lock().unwrap();
        assert_eq!(*loads, vec![a.as_ptr() as usize, b.as_ptr() as usize]);
    }

    #[test]
    fn test_unregistered_extension() {
        let ext = AthenaExtension::new();
        let mut db = 0u8;
        let handle = DatabaseHandle::from_raw((&mut db as *mut u8).cast()).unwrap();

        assert_eq!(
            ext.load(handle),
            Err(ExtensionError::NotRegistered("athena".to_string()))
        );
        assert_eq!(ext.version(), CRATE_VERSION);
        assert_eq!(ext.name(), "athena");
    }

    #[test]
    fn test_version_from_entry_points() {
        let ext = AthenaExtension::with_entry_points(Arc::new(Recorder::default()));
        assert_eq!(ext.version().to_str().unwrap(), "v1.0.0");
    }
}
