//! Running the analysis and refreshing the display

use oapi::args;
use crate::component::sap_component;
use crate::error::SapResult;

sap_component! {
    /// `SapModel.Analyze`
    Analyze
}

sap_component! {
    /// `SapModel.View`
    View
}

impl Analyze {
    /// Run every case flagged to run; the model must have been saved
    pub fn run_analysis(&self) -> SapResult<()> {
        self.inner.call("RunAnalysis", &mut [])
    }

    /// Flag case `name` to run, or every case when `all` is set
    pub fn set_run_case_flag(&self, name: &str, run: bool, all: bool) -> SapResult<()> {
        self.inner
            .call("SetRunCaseFlag", &mut args![name, run, all])
    }
}

impl View {
    /// Redraw the display; `window` 0 means every window
    pub fn refresh_view(&self, window: i32, zoom: bool) -> SapResult<()> {
        self.inner.call("RefreshView", &mut args![window, zoom])
    }
}
