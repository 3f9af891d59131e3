//! Enumeration families of the structural application
//!
//! Codes are the ones the application documents for its automation API.

use oapi::{remote_enum, EnumRegistry};

remote_enum! {
    /// Force/length/temperature unit systems
    pub enum Units: i32 {
        LbInF = 1,
        LbFtF = 2,
        KipInF = 3,
        KipFtF = 4,
        KnMmC = 5,
        KnMC = 6,
        KgfMmC = 7,
        KgfMC = 8,
        NMmC = 9,
        NMC = 10,
        TonMmC = 11,
        TonMC = 12,
        KnCmC = 13,
        KgfCmC = 14,
        NCmC = 15,
        TonCmC = 16,
    }
}

remote_enum! {
    /// Load directions
    pub enum Dir: i32 {
        Local1 = 1,
        Local2 = 2,
        Local3 = 3,
        X = 4,
        Y = 5,
        Z = 6,
        ProjectedX = 7,
        ProjectedY = 8,
        ProjectedZ = 9,
        Gravity = 10,
        ProjectedGravity = 11,
    }
}

remote_enum! {
    /// Material families
    pub enum MatType: i32 {
        Steel = 1,
        Concrete = 2,
        NoDesign = 3,
        Aluminum = 4,
        ColdFormed = 5,
        Rebar = 6,
        Tendon = 7,
    }
}

remote_enum! {
    /// Design types of a load pattern
    pub enum LoadPatternType: i32 {
        Dead = 1,
        SuperDead = 2,
        Live = 3,
        ReduceLive = 4,
        Quake = 5,
        Wind = 6,
        Snow = 7,
        Other = 8,
        Move = 9,
        Temperature = 10,
        RoofLive = 11,
        Notional = 12,
        PatternLive = 13,
        Wave = 14,
        Braking = 15,
        Centrifugal = 16,
        Friction = 17,
        Ice = 18,
        WindOnLiveLoad = 19,
        HorizontalEarthPressure = 20,
        VerticalEarthPressure = 21,
        EarthSurcharge = 22,
        DownDrag = 23,
        VehicleCollision = 24,
        VesselCollision = 25,
        TemperatureGradient = 26,
        Settlement = 27,
        Shrinkage = 28,
        Creep = 29,
        WaterLoadPressure = 30,
        LiveLoadSurcharge = 31,
        LockedInForces = 32,
        PedestrianLl = 33,
        Prestress = 34,
        Hyperstatic = 35,
        Bouyancy = 36,
        StreamFlow = 37,
        Impact = 38,
        Construction = 39,
    }
}

remote_enum! {
    /// What an assignment applies to
    pub enum ItemType: i32 {
        /// The named object
        Object = 0,
        /// Every object in the named group
        Group = 1,
        /// Every selected object; the name is ignored
        SelectedObjects = 2,
    }
}

remote_enum! {
    /// What a result request applies to
    pub enum ItemTypeElm: i32 {
        /// The element of the named object
        ObjectElm = 0,
        /// The named element
        Element = 1,
        /// Every element of the named group
        GroupElm = 2,
        /// Every selected element; the name is ignored
        SelectionElm = 3,
    }
}

remote_enum! {
    /// Kind of a frame span load
    pub enum DistributedLoadType: i32 {
        Force = 1,
        Moment = 2,
    }
}

remote_enum! {
    /// Kind of a load applied in a load case
    pub enum LoadType: &str {
        Load = "Load",
        Accel = "Accel",
    }
}

/// Registry holding every family above
pub fn registry() -> oapi::Result<EnumRegistry> {
    EnumRegistry::new()
        .with::<Units>()?
        .with::<Dir>()?
        .with::<MatType>()?
        .with::<LoadPatternType>()?
        .with::<ItemType>()?
        .with::<ItemTypeElm>()?
        .with::<DistributedLoadType>()?
        .with::<LoadType>()
}
