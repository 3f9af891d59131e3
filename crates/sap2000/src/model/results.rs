//! Analysis results

use oapi::{args, ArrayRef, ByRef, RemoteEnum};
use crate::component::{at_least, required, sap_component};
use crate::enums::ItemTypeElm;
use crate::error::SapResult;

sap_component! {
    /// `SapModel.Results`
    Results
}

sap_component! {
    /// `SapModel.Results.Setup`, the output selection
    Setup
}

/// One row of joint displacement output
#[derive(Clone, Debug, PartialEq)]
pub struct JointDisplacement {
    pub obj: String,
    pub elm: String,
    pub load_case: String,
    pub step_type: String,
    pub step_num: f64,
    /// Translations U1, U2, U3
    pub u: [f64; 3],
    /// Rotations R1, R2, R3
    pub r: [f64; 3],
}

impl Results {
    pub fn setup(&self) -> Setup {
        Setup::new(self.inner.child("Setup"))
    }

    /// Joint displacements of the cases selected for output
    pub fn joint_displ(&self, name: &str, item: ItemTypeElm) -> SapResult<Vec<JointDisplacement>> {
        let mut count: ByRef<i32> = ByRef::empty();
        let mut obj: ArrayRef<String> = ArrayRef::empty();
        let mut elm: ArrayRef<String> = ArrayRef::empty();
        let mut case: ArrayRef<String> = ArrayRef::empty();
        let mut step_type: ArrayRef<String> = ArrayRef::empty();
        let mut step_num: ArrayRef<f64> = ArrayRef::empty();
        let mut u1: ArrayRef<f64> = ArrayRef::empty();
        let mut u2: ArrayRef<f64> = ArrayRef::empty();
        let mut u3: ArrayRef<f64> = ArrayRef::empty();
        let mut r1: ArrayRef<f64> = ArrayRef::empty();
        let mut r2: ArrayRef<f64> = ArrayRef::empty();
        let mut r3: ArrayRef<f64> = ArrayRef::empty();
        self.inner.call(
            "JointDispl",
            &mut args![
                name,
                item.code(),
                &mut count,
                &mut obj,
                &mut elm,
                &mut case,
                &mut step_type,
                &mut step_num,
                &mut u1,
                &mut u2,
                &mut u3,
                &mut r1,
                &mut r2,
                &mut r3,
            ],
        )?;

        let n = usize::try_from(required("JointDispl", "NumberResults", count)?).unwrap_or(0);
        for column in [&obj, &elm, &case, &step_type] {
            at_least("JointDispl", column.as_slice(), n)?;
        }
        for column in [&step_num, &u1, &u2, &u3, &r1, &r2, &r3] {
            at_least("JointDispl", column.as_slice(), n)?;
        }

        let rows = (0..n)
            .map(|i| JointDisplacement {
                obj: obj.as_slice()[i].clone(),
                elm: elm.as_slice()[i].clone(),
                load_case: case.as_slice()[i].clone(),
                step_type: step_type.as_slice()[i].clone(),
                step_num: step_num.as_slice()[i],
                u: [u1.as_slice()[i], u2.as_slice()[i], u3.as_slice()[i]],
                r: [r1.as_slice()[i], r2.as_slice()[i], r3.as_slice()[i]],
            })
            .collect();
        Ok(rows)
    }
}

impl Setup {
    pub fn deselect_all_cases_and_combos_for_output(&self) -> SapResult<()> {
        self.inner
            .call("DeselectAllCasesAndCombosForOutput", &mut [])
    }

    pub fn set_case_selected_for_output(&self, name: &str, selected: bool) -> SapResult<()> {
        self.inner
            .call("SetCaseSelectedForOutput", &mut args![name, selected])
    }
}
