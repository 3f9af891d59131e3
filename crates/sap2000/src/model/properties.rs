//! Material and frame section properties

use oapi::{args, ArrayRef, ByRef, RemoteEnum};
use crate::component::{at_least, fixed, required, sap_component, Component};
use crate::enums::MatType;
use crate::error::SapResult;

sap_component! {
    /// `SapModel.PropMaterial`
    PropMaterial
}

sap_component! {
    /// `SapModel.PropFrame`
    PropFrame
}

/// Isotropic mechanical properties of a material
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Isotropic {
    /// Modulus of elasticity (F/L2)
    pub e: f64,
    /// Poisson's ratio
    pub u: f64,
    /// Thermal coefficient (1/T)
    pub a: f64,
    /// Shear modulus (F/L2), derived by the application
    pub g: f64,
}

/// Section property modifiers of a frame section
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameModifiers {
    pub area: f64,
    pub shear_2: f64,
    pub shear_3: f64,
    pub torsion: f64,
    pub inertia_22: f64,
    pub inertia_33: f64,
    pub mass: f64,
    pub weight: f64,
}

impl Default for FrameModifiers {
    fn default() -> Self {
        Self::from([1.0; 8])
    }
}

impl From<[f64; 8]> for FrameModifiers {
    fn from(v: [f64; 8]) -> Self {
        Self {
            area: v[0],
            shear_2: v[1],
            shear_3: v[2],
            torsion: v[3],
            inertia_22: v[4],
            inertia_33: v[5],
            mass: v[6],
            weight: v[7],
        }
    }
}

impl From<&FrameModifiers> for [f64; 8] {
    fn from(m: &FrameModifiers) -> Self {
        [
            m.area,
            m.shear_2,
            m.shear_3,
            m.torsion,
            m.inertia_22,
            m.inertia_33,
            m.mass,
            m.weight,
        ]
    }
}

impl PropMaterial {
    /// Define (or redefine) a material with default color, notes and GUID
    pub fn set_material(&self, name: &str, kind: MatType) -> SapResult<()> {
        self.inner
            .call("SetMaterial", &mut args![name, kind.code(), -1, "", ""])
    }

    pub fn set_mp_isotropic(&self, name: &str, e: f64, u: f64, a: f64, temp: f64) -> SapResult<()> {
        self.inner
            .call("SetMPIsotropic", &mut args![name, e, u, a, temp])
    }

    pub fn get_mp_isotropic(&self, name: &str, temp: f64) -> SapResult<Isotropic> {
        let mut e: ByRef<f64> = ByRef::empty();
        let mut u: ByRef<f64> = ByRef::empty();
        let mut a: ByRef<f64> = ByRef::empty();
        let mut g: ByRef<f64> = ByRef::empty();
        self.inner.call(
            "GetMPIsotropic",
            &mut args![name, &mut e, &mut u, &mut a, &mut g, temp],
        )?;
        Ok(Isotropic {
            e: required("GetMPIsotropic", "E", e)?,
            u: required("GetMPIsotropic", "U", u)?,
            a: required("GetMPIsotropic", "A", a)?,
            g: required("GetMPIsotropic", "G", g)?,
        })
    }

    pub fn get_name_list(&self) -> SapResult<Vec<String>> {
        name_list(&self.inner)
    }
}

impl PropFrame {
    /// Define a solid rectangular section of depth `t3` and width `t2`
    pub fn set_rectangle(&self, name: &str, material: &str, t3: f64, t2: f64) -> SapResult<()> {
        self.inner
            .call("SetRectangle", &mut args![name, material, t3, t2, -1, "", ""])
    }

    pub fn set_modifiers(&self, name: &str, modifiers: &FrameModifiers) -> SapResult<()> {
        let mut value = ArrayRef::of(<[f64; 8]>::from(modifiers).to_vec());
        self.inner.call("SetModifiers", &mut args![name, &mut value])
    }

    pub fn get_modifiers(&self, name: &str) -> SapResult<FrameModifiers> {
        let mut value: ArrayRef<f64> = ArrayRef::empty();
        self.inner.call("GetModifiers", &mut args![name, &mut value])?;
        let values: [f64; 8] = fixed("GetModifiers", value.as_slice())?;
        Ok(FrameModifiers::from(values))
    }

    pub fn get_name_list(&self) -> SapResult<Vec<String>> {
        name_list(&self.inner)
    }
}

/// `GetNameList(NumberNames, MyName)`, shared by every definition table
pub(crate) fn name_list(inner: &Component) -> SapResult<Vec<String>> {
    let mut count: ByRef<i32> = ByRef::empty();
    let mut names: ArrayRef<String> = ArrayRef::empty();
    inner.call("GetNameList", &mut args![&mut count, &mut names])?;
    let count = usize::try_from(required("GetNameList", "NumberNames", count)?).unwrap_or(0);
    at_least("GetNameList", names.as_slice(), count)?;
    let mut names = names.into_vec();
    names.truncate(count);
    Ok(names)
}
