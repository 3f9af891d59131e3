//! Bridge and COM binding configuration

/// When by-ref outputs are copied back into the caller's boxes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnpackPolicy {
    /// After every completed round trip, whatever the status
    ///
    /// A rejected call may leave boxes partially populated, exactly as the
    /// host wrote them.
    #[default]
    Always,
    /// Only when the status is success; a rejected call leaves every box as it was
    OnSuccess,
}

/// Configuration for the invocation dispatcher
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// By-ref write-back policy
    pub unpack: UnpackPolicy,
    /// Log packed argument values at trace level
    pub trace_arguments: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            unpack: UnpackPolicy::Always,
            trace_arguments: false,
        }
    }
}

impl BridgeConfig {
    pub fn unpack(mut self, policy: UnpackPolicy) -> Self {
        self.unpack = policy;
        self
    }

    pub fn trace_arguments(mut self, enable: bool) -> Self {
        self.trace_arguments = enable;
        self
    }
}

/// Threading model the calling thread joins before binding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApartmentKind {
    /// Multithreaded apartment
    #[default]
    Mta,
    /// Single-threaded apartment
    Sta,
}

/// How the root object is obtained from its registered name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindMode {
    /// Attach to an instance already registered as running
    Running,
    /// Always start a new instance
    Create,
    /// Attach if running, otherwise start one
    #[default]
    RunningOrCreate,
}

/// Configuration for the COM automation host
#[derive(Clone, Debug, Default)]
pub struct ComConfig {
    pub apartment: ApartmentKind,
    pub bind: BindMode,
}

impl ComConfig {
    pub fn apartment(mut self, apartment: ApartmentKind) -> Self {
        self.apartment = apartment;
        self
    }

    pub fn bind(mut self, bind: BindMode) -> Self {
        self.bind = bind;
        self
    }
}
