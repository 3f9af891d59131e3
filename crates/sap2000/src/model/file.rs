//! Model file operations

use oapi::args;
use crate::component::sap_component;
use crate::error::SapResult;

sap_component! {
    /// `SapModel.File`
    File
}

impl File {
    /// Start a new blank model
    pub fn new_blank(&self) -> SapResult<()> {
        self.inner.call("NewBlank", &mut [])
    }

    pub fn open_file(&self, path: &str) -> SapResult<()> {
        self.inner.call("OpenFile", &mut args![path])
    }

    /// Save the model; an empty path saves under its current name
    pub fn save(&self, path: &str) -> SapResult<()> {
        self.inner.call("Save", &mut args![path])
    }
}
