//! Load patterns and load cases

use oapi::{args, ArrayRef, ByRef, RemoteEnum};
use crate::component::{at_least, count_of, required, sap_component};
use crate::enums::{LoadPatternType, LoadType};
use crate::error::SapResult;
use super::properties::name_list;

sap_component! {
    /// `SapModel.LoadPatterns`
    LoadPatterns
}

sap_component! {
    /// `SapModel.LoadCases`
    LoadCases
}

sap_component! {
    /// `SapModel.LoadCases.StaticLinear`
    StaticLinear
}

/// One load applied by a static linear case
#[derive(Clone, Debug, PartialEq)]
pub struct CaseLoad {
    pub kind: LoadType,
    /// Load pattern name, or a direction (`UX`, `UY`, `UZ`...) for acceleration loads
    pub name: String,
    pub scale: f64,
}

impl CaseLoad {
    pub fn pattern(name: impl Into<String>, scale: f64) -> Self {
        Self {
            kind: LoadType::Load,
            name: name.into(),
            scale,
        }
    }
}

impl LoadPatterns {
    /// Add a load pattern, optionally with a linear static case of the same name
    pub fn add(
        &self,
        name: &str,
        kind: LoadPatternType,
        self_weight: f64,
        add_load_case: bool,
    ) -> SapResult<()> {
        self.inner.call(
            "Add",
            &mut args![name, kind.code(), self_weight, add_load_case],
        )
    }

    pub fn get_load_type(&self, name: &str) -> SapResult<LoadPatternType> {
        let mut kind: ByRef<i32> = ByRef::empty();
        self.inner.call("GetLoadType", &mut args![name, &mut kind])?;
        self.inner.decode(required("GetLoadType", "LoadType", kind)?)
    }

    pub fn get_name_list(&self) -> SapResult<Vec<String>> {
        name_list(&self.inner)
    }

    pub fn count(&self) -> SapResult<i32> {
        self.inner.call_int("Count", &mut [])
    }
}

impl LoadCases {
    pub fn static_linear(&self) -> StaticLinear {
        StaticLinear::new(self.inner.child("StaticLinear"))
    }

    pub fn get_name_list(&self) -> SapResult<Vec<String>> {
        name_list(&self.inner)
    }
}

impl StaticLinear {
    /// Replace the loads applied by case `name`
    pub fn set_loads(&self, name: &str, loads: &[CaseLoad]) -> SapResult<()> {
        let count = count_of("SetLoads", loads.len())?;
        let mut kinds: ArrayRef<String> = ArrayRef::of(
            loads
                .iter()
                .map(|l| l.kind.code().as_str().map(str::to_string).unwrap_or_default())
                .collect(),
        );
        let mut names: ArrayRef<String> = ArrayRef::of(loads.iter().map(|l| l.name.clone()).collect());
        let mut scales: ArrayRef<f64> = ArrayRef::of(loads.iter().map(|l| l.scale).collect());
        self.inner.call(
            "SetLoads",
            &mut args![name, count, &mut kinds, &mut names, &mut scales],
        )
    }

    pub fn get_loads(&self, name: &str) -> SapResult<Vec<CaseLoad>> {
        let mut count: ByRef<i32> = ByRef::empty();
        let mut kinds: ArrayRef<String> = ArrayRef::empty();
        let mut names: ArrayRef<String> = ArrayRef::empty();
        let mut scales: ArrayRef<f64> = ArrayRef::empty();
        self.inner.call(
            "GetLoads",
            &mut args![name, &mut count, &mut kinds, &mut names, &mut scales],
        )?;

        let count = usize::try_from(required("GetLoads", "NumberLoads", count)?).unwrap_or(0);
        at_least("GetLoads", kinds.as_slice(), count)?;
        at_least("GetLoads", names.as_slice(), count)?;
        at_least("GetLoads", scales.as_slice(), count)?;

        kinds
            .iter()
            .zip(names.iter())
            .zip(scales.iter())
            .take(count)
            .map(|((kind, name), scale)| {
                Ok(CaseLoad {
                    kind: self.inner.decode_str(kind)?,
                    name: name.clone(),
                    scale: *scale,
                })
            })
            .collect()
    }
}
