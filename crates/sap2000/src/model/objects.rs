//! Point and frame objects

use oapi::{args, ArrayRef, ByRef, RemoteEnum};
use crate::component::{fixed, required, sap_component};
use crate::enums::{Dir, DistributedLoadType, ItemType};
use crate::error::SapResult;

sap_component! {
    /// `SapModel.PointObj`
    PointObj
}

sap_component! {
    /// `SapModel.FrameObj`
    FrameObj
}

/// Cartesian coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Optional settings for adding a point
#[derive(Clone, Debug, PartialEq)]
pub struct PointOptions {
    /// Requested name; empty lets the application choose
    pub user_name: String,
    /// Coordinate system of the coordinates
    pub csys: String,
    /// Skip merging with coincident points
    pub merge_off: bool,
    pub merge_number: i32,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            csys: "Global".to_string(),
            merge_off: false,
            merge_number: 0,
        }
    }
}

impl PointOptions {
    pub fn named(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            ..Self::default()
        }
    }
}

/// Span load on a frame between two distances
#[derive(Clone, Debug, PartialEq)]
pub struct DistributedLoad {
    pub kind: DistributedLoadType,
    pub dir: Dir,
    pub dist1: f64,
    pub dist2: f64,
    pub val1: f64,
    pub val2: f64,
    pub csys: String,
    /// Distances are relative to the frame length
    pub rel_dist: bool,
    /// Replace existing loads of the same pattern
    pub replace: bool,
    pub item_type: ItemType,
}

impl DistributedLoad {
    /// Uniform force per unit length over the whole frame
    pub fn uniform(dir: Dir, value: f64, csys: &str) -> Self {
        Self {
            kind: DistributedLoadType::Force,
            dir,
            dist1: 0.0,
            dist2: 1.0,
            val1: value,
            val2: value,
            csys: csys.to_string(),
            rel_dist: true,
            replace: true,
            item_type: ItemType::Object,
        }
    }
}

/// Concentrated load on a frame
#[derive(Clone, Debug, PartialEq)]
pub struct PointLoad {
    pub kind: DistributedLoadType,
    pub dir: Dir,
    pub dist: f64,
    pub value: f64,
    pub csys: String,
    pub rel_dist: bool,
    pub replace: bool,
    pub item_type: ItemType,
}

impl PointObj {
    /// Add a point; returns the name the application assigned
    pub fn add_cartesian(&self, x: f64, y: f64, z: f64, options: &PointOptions) -> SapResult<String> {
        let mut name: ByRef<String> = ByRef::empty();
        self.inner.call(
            "AddCartesian",
            &mut args![
                x,
                y,
                z,
                &mut name,
                options.user_name.as_str(),
                options.csys.as_str(),
                options.merge_off,
                options.merge_number,
            ],
        )?;
        required("AddCartesian", "Name", name)
    }

    pub fn get_coord_cartesian(&self, name: &str, csys: &str) -> SapResult<Coord> {
        let mut x: ByRef<f64> = ByRef::empty();
        let mut y: ByRef<f64> = ByRef::empty();
        let mut z: ByRef<f64> = ByRef::empty();
        self.inner.call(
            "GetCoordCartesian",
            &mut args![name, &mut x, &mut y, &mut z, csys],
        )?;
        Ok(Coord {
            x: required("GetCoordCartesian", "X", x)?,
            y: required("GetCoordCartesian", "Y", y)?,
            z: required("GetCoordCartesian", "Z", z)?,
        })
    }

    /// Restrain the six degrees of freedom (U1, U2, U3, R1, R2, R3) of a point
    pub fn set_restraint(&self, name: &str, value: [bool; 6]) -> SapResult<()> {
        let mut value = ArrayRef::of(value.to_vec());
        self.inner.call(
            "SetRestraint",
            &mut args![name, &mut value, ItemType::Object.code()],
        )
    }

    pub fn get_restraint(&self, name: &str) -> SapResult<[bool; 6]> {
        let mut value: ArrayRef<bool> = ArrayRef::empty();
        self.inner.call("GetRestraint", &mut args![name, &mut value])?;
        fixed("GetRestraint", value.as_slice())
    }

    /// Assign joint forces (F1, F2, F3, M1, M2, M3) for a load pattern
    pub fn set_load_force(
        &self,
        name: &str,
        pattern: &str,
        value: [f64; 6],
        replace: bool,
        csys: &str,
    ) -> SapResult<()> {
        let mut value = ArrayRef::of(value.to_vec());
        self.inner.call(
            "SetLoadForce",
            &mut args![name, pattern, &mut value, replace, csys, ItemType::Object.code()],
        )
    }

    /// Number of joint force assignments on `name` in `pattern`
    pub fn count_load_force(&self, name: &str, pattern: &str) -> SapResult<i32> {
        let mut count: ByRef<i32> = ByRef::empty();
        self.inner
            .call("CountLoadForce", &mut args![&mut count, name, pattern])?;
        required("CountLoadForce", "Count", count)
    }

    /// Number of point objects in the model
    pub fn count(&self) -> SapResult<i32> {
        self.inner.call_int("Count", &mut [])
    }
}

impl FrameObj {
    /// Add a frame between two existing points; returns the assigned name
    pub fn add_by_point(
        &self,
        point1: &str,
        point2: &str,
        prop: &str,
        user_name: &str,
    ) -> SapResult<String> {
        let mut name: ByRef<String> = ByRef::empty();
        self.inner.call(
            "AddByPoint",
            &mut args![point1, point2, &mut name, prop, user_name],
        )?;
        required("AddByPoint", "Name", name)
    }

    pub fn set_load_distributed(&self, name: &str, pattern: &str, load: &DistributedLoad) -> SapResult<()> {
        self.inner.call(
            "SetLoadDistributed",
            &mut args![
                name,
                pattern,
                load.kind.code(),
                load.dir.code(),
                load.dist1,
                load.dist2,
                load.val1,
                load.val2,
                load.csys.as_str(),
                load.rel_dist,
                load.replace,
                load.item_type.code(),
            ],
        )
    }

    pub fn set_load_point(&self, name: &str, pattern: &str, load: &PointLoad) -> SapResult<()> {
        self.inner.call(
            "SetLoadPoint",
            &mut args![
                name,
                pattern,
                load.kind.code(),
                load.dir.code(),
                load.dist,
                load.value,
                load.csys.as_str(),
                load.rel_dist,
                load.replace,
                load.item_type.code(),
            ],
        )
    }
}
