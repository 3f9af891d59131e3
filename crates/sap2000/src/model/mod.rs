//! The model object and its sub-objects
//!
//! ```text
//! SapObject
//! └── SapModel
//!     ├── File
//!     ├── PropMaterial, PropFrame
//!     ├── PointObj, FrameObj
//!     ├── LoadPatterns
//!     ├── LoadCases
//!     │   └── StaticLinear
//!     ├── Analyze
//!     ├── View
//!     └── Results
//!         └── Setup
//! ```

mod file;
mod properties;
mod objects;
mod definitions;
mod analysis;
mod results;

use oapi::{args, RemoteEnum};
use crate::component::{expect_bool, sap_component};
use crate::enums::Units;
use crate::error::SapResult;

pub use file::File;
pub use properties::{FrameModifiers, Isotropic, PropFrame, PropMaterial};
pub use objects::{Coord, DistributedLoad, FrameObj, PointLoad, PointObj, PointOptions};
pub use definitions::{CaseLoad, LoadCases, LoadPatterns, StaticLinear};
pub use analysis::{Analyze, View};
pub use results::{JointDisplacement, Results, Setup};

sap_component! {
    /// The analysis model of the running application
    SapModel
}

impl SapModel {
    /// Clear the current model and start a new one in `units`
    pub fn initialize_new_model(&self, units: Units) -> SapResult<()> {
        self.inner
            .call("InitializeNewModel", &mut args![units.code()])
    }

    pub fn get_present_units(&self) -> SapResult<Units> {
        self.inner.call_enum("GetPresentUnits")
    }

    pub fn set_present_units(&self, units: Units) -> SapResult<()> {
        self.inner.call("SetPresentUnits", &mut args![units.code()])
    }

    /// Units all data is stored in internally
    pub fn get_database_units(&self) -> SapResult<Units> {
        self.inner.call_enum("GetDatabaseUnits")
    }

    pub fn get_model_is_locked(&self) -> SapResult<bool> {
        let value = self.inner.call_value("GetModelIsLocked", &mut [])?;
        expect_bool("GetModelIsLocked", value)
    }

    pub fn set_model_is_locked(&self, lock: bool) -> SapResult<()> {
        self.inner.call("SetModelIsLocked", &mut args![lock])
    }

    pub fn file(&self) -> File {
        File::new(self.inner.child("File"))
    }

    pub fn prop_material(&self) -> PropMaterial {
        PropMaterial::new(self.inner.child("PropMaterial"))
    }

    pub fn prop_frame(&self) -> PropFrame {
        PropFrame::new(self.inner.child("PropFrame"))
    }

    pub fn point_obj(&self) -> PointObj {
        PointObj::new(self.inner.child("PointObj"))
    }

    pub fn frame_obj(&self) -> FrameObj {
        FrameObj::new(self.inner.child("FrameObj"))
    }

    pub fn load_patterns(&self) -> LoadPatterns {
        LoadPatterns::new(self.inner.child("LoadPatterns"))
    }

    pub fn load_cases(&self) -> LoadCases {
        LoadCases::new(self.inner.child("LoadCases"))
    }

    pub fn analyze(&self) -> Analyze {
        Analyze::new(self.inner.child("Analyze"))
    }

    pub fn view(&self) -> View {
        View::new(self.inner.child("View"))
    }

    pub fn results(&self) -> Results {
        Results::new(self.inner.child("Results"))
    }
}
