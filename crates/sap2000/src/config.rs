//! Application binding configuration

use oapi::BridgeConfig;

/// Which registration of the application to drive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgramVersion {
    /// Version 14 and earlier
    V14,
    /// Version 15
    #[default]
    V15,
    /// The version-independent API object of later releases
    Api,
}

impl ProgramVersion {
    /// Registered name of the root automation object
    pub fn prog_id(self) -> &'static str {
        match self {
            ProgramVersion::V14 => "Sap2000.SapObject",
            ProgramVersion::V15 => "Sap2000v15.SapObject",
            ProgramVersion::Api => "CSI.SAP2000.API.SapObject",
        }
    }
}

/// Configuration for a [`SapObject`](crate::SapObject)
#[derive(Clone, Debug, Default)]
pub struct SapConfig {
    pub version: ProgramVersion,
    pub bridge: BridgeConfig,
}

impl SapConfig {
    pub fn version(mut self, version: ProgramVersion) -> Self {
        self.version = version;
        self
    }

    pub fn bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }
}
