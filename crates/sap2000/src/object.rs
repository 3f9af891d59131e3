//! The application root object

use std::sync::Arc;
use tracing::debug;
use oapi::{args, AutomationHost, Dispatcher, Handle, RemoteEnum};
use crate::component::{Component, SapComponent};
use crate::config::{ProgramVersion, SapConfig};
use crate::enums::{self, Units};
use crate::error::SapResult;
use crate::model::SapModel;

/// The root automation object (`SapObject`) of one application session
#[derive(Clone, Debug)]
pub struct SapObject {
    inner: Component,
    version: ProgramVersion,
}

impl SapObject {
    /// Bind to `host` with the enum registry built up front
    pub fn new(host: Arc<dyn AutomationHost>, config: SapConfig) -> SapResult<Self> {
        let enums = Arc::new(enums::registry()?);
        debug!(
            host = %host.describe(),
            root = config.version.prog_id(),
            families = enums.families().len(),
            "binding application"
        );
        let dispatcher = Arc::new(Dispatcher::with_config(host, enums, config.bridge));
        let handle = Handle::root_object(config.version.prog_id());
        Ok(Self {
            inner: Component::new(dispatcher, handle),
            version: config.version,
        })
    }

    /// Bind to the installed application through COM
    #[cfg(all(windows, feature = "com"))]
    pub fn com(config: SapConfig, com: oapi::ComConfig) -> SapResult<Self> {
        Self::new(Arc::new(oapi::ComHost::with_config(com)), config)
    }

    pub fn version(&self) -> ProgramVersion {
        self.version
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        self.inner.dispatcher()
    }

    /// Start the application, optionally opening `file` (empty for none)
    pub fn application_start(&self, units: Units, visible: bool, file: &str) -> SapResult<()> {
        self.inner
            .call("ApplicationStart", &mut args![units.code(), visible, file])
    }

    /// Close the application, saving the model first when `save` is set
    pub fn application_exit(&self, save: bool) -> SapResult<()> {
        self.inner.call("ApplicationExit", &mut args![save])
    }

    pub fn sap_model(&self) -> SapModel {
        SapModel::new(self.inner.child("SapModel"))
    }
}

impl SapComponent for SapObject {
    fn component(&self) -> &Component {
        &self.inner
    }
}
