//! Shared fixtures for the integration tests
//!
//! [`fake_sap`] serves a small, stateful imitation of the structural
//! application on a [`LoopbackHost`]: enough of its object model to build,
//! load, analyze and read back a frame model.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use oapi::{CallFrame, LoopbackHost, Variant};
use parking_lot::Mutex;

/// Root object registered by the fake application
pub const SAP_ROOT: &str = "Sap2000v15.SapObject";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Clone, Debug, Default)]
pub struct Material {
    pub kind: i32,
    pub e: f64,
    pub u: f64,
    pub a: f64,
}

#[derive(Clone, Debug)]
pub struct Section {
    pub material: String,
    pub t3: f64,
    pub t2: f64,
    pub modifiers: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct Point {
    pub name: String,
    pub xyz: [f64; 3],
    pub restraint: Vec<bool>,
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub name: String,
    pub p1: String,
    pub p2: String,
    pub prop: String,
}

/// Everything the fake application remembers
#[derive(Debug, Default)]
pub struct SapState {
    pub started: bool,
    pub units: i32,
    pub locked: bool,
    pub analyzed: bool,
    pub saved_as: Option<String>,
    pub materials: BTreeMap<String, Material>,
    pub sections: BTreeMap<String, Section>,
    pub points: Vec<Point>,
    pub frames: Vec<Frame>,
    pub patterns: Vec<(String, i32)>,
    /// Joint forces: point, pattern, values
    pub forces: Vec<(String, String, Vec<f64>)>,
    /// Frame loads: frame, pattern, value
    pub frame_loads: Vec<(String, String, f64)>,
    /// Static linear cases: kind, pattern, scale
    pub cases: BTreeMap<String, Vec<(String, String, f64)>>,
    pub selected: Vec<String>,
}

impl SapState {
    fn point(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.name == name)
    }

    fn has_pattern(&self, name: &str) -> bool {
        self.patterns.iter().any(|(p, _)| p == name)
    }

    /// Vertical displacement of a point under one case: the scaled sum of
    /// its F3 forces over a nominal stiffness
    fn settlement(&self, point: &Point, case: &str) -> f64 {
        if point.restraint.get(2).copied().unwrap_or(false) {
            return 0.0;
        }
        let loads = self.cases.get(case).map(Vec::as_slice).unwrap_or(&[]);
        let force: f64 = loads
            .iter()
            .filter(|(kind, _, _)| kind == "Load")
            .map(|(_, pattern, scale)| {
                self.forces
                    .iter()
                    .filter(|(p, pat, _)| p == &point.name && pat == pattern)
                    .map(|(_, _, v)| v.get(2).copied().unwrap_or(0.0))
                    .sum::<f64>()
                    * scale
            })
            .sum();
        force / 1000.0
    }
}

/// Status helpers
const OK: i32 = 0;
const FAILED: i32 = 1;

fn status(ok: bool) -> i32 {
    if ok {
        OK
    } else {
        FAILED
    }
}

/// Register a handler that sees the shared state locked
macro_rules! serve {
    ($host:expr, $state:expr, $path:literal, $method:literal, |$s:ident, $f:ident| $body:expr) => {{
        let state = $state.clone();
        $host.register($path, $method, move |$f: &mut CallFrame<'_>| {
            #[allow(unused_mut)]
            let mut $s = state.lock();
            $body
        });
    }};
}

/// A fresh fake application and a view of its state
pub fn fake_sap() -> (Arc<LoopbackHost>, Arc<Mutex<SapState>>) {
    let host = LoopbackHost::new(SAP_ROOT);
    let state: Arc<Mutex<SapState>> = Arc::default();

    serve!(host, state, "", "ApplicationStart", |s, f| {
        s.started = true;
        s.units = f.int(0)?;
        Ok(OK)
    });
    serve!(host, state, "", "ApplicationExit", |s, f| {
        if f.bool(0)? && s.saved_as.is_none() {
            return Ok(FAILED);
        }
        s.started = false;
        Ok(OK)
    });

    serve!(host, state, "SapModel", "InitializeNewModel", |s, f| {
        let started = s.started;
        *s = SapState {
            started,
            units: f.int(0)?,
            ..SapState::default()
        };
        Ok(OK)
    });
    serve!(host, state, "SapModel", "GetPresentUnits", |s, _f| Ok(s.units));
    serve!(host, state, "SapModel", "GetDatabaseUnits", |s, _f| Ok(s.units));
    serve!(host, state, "SapModel", "SetPresentUnits", |s, f| {
        s.units = f.int(0)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel", "GetModelIsLocked", |s, _f| Ok(Variant::Bool(s.locked)));
    serve!(host, state, "SapModel", "SetModelIsLocked", |s, f| {
        s.locked = f.bool(0)?;
        if !s.locked {
            s.analyzed = false;
        }
        Ok(OK)
    });

    serve!(host, state, "SapModel.File", "NewBlank", |s, _f| Ok(status(s.started)));
    serve!(host, state, "SapModel.File", "Save", |s, f| {
        let path = f.str(0)?;
        match (path.is_empty(), s.saved_as.is_some()) {
            (true, false) => Ok(FAILED),
            (true, true) => Ok(OK),
            (false, _) => {
                s.saved_as = Some(path);
                Ok(OK)
            }
        }
    });

    serve!(host, state, "SapModel.PropMaterial", "SetMaterial", |s, f| {
        let name = f.str(0)?;
        let kind = f.int(1)?;
        s.materials.entry(name).or_default().kind = kind;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PropMaterial", "SetMPIsotropic", |s, f| {
        let name = f.str(0)?;
        let (e, u, a) = (f.double(1)?, f.double(2)?, f.double(3)?);
        match s.materials.get_mut(&name) {
            Some(m) => {
                m.e = e;
                m.u = u;
                m.a = a;
                Ok(OK)
            }
            None => Ok(FAILED),
        }
    });
    serve!(host, state, "SapModel.PropMaterial", "GetMPIsotropic", |s, f| {
        let Some(m) = s.materials.get(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        f.write(1, m.e)?;
        f.write(2, m.u)?;
        f.write(3, m.a)?;
        f.write(4, m.e / (2.0 * (1.0 + m.u)))?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PropMaterial", "GetNameList", |s, f| {
        let names: Vec<String> = s.materials.keys().cloned().collect();
        f.write(0, names.len() as i32)?;
        f.write(1, names)?;
        Ok(OK)
    });

    serve!(host, state, "SapModel.PropFrame", "SetRectangle", |s, f| {
        let name = f.str(0)?;
        let material = f.str(1)?;
        if !s.materials.contains_key(&material) {
            return Ok(FAILED);
        }
        let section = Section {
            material,
            t3: f.double(2)?,
            t2: f.double(3)?,
            modifiers: vec![1.0; 8],
        };
        s.sections.insert(name, section);
        Ok(OK)
    });
    serve!(host, state, "SapModel.PropFrame", "SetModifiers", |s, f| {
        let values = f.double_array(1)?;
        match s.sections.get_mut(&f.str(0)?) {
            Some(section) if values.len() == 8 => {
                section.modifiers = values;
                Ok(OK)
            }
            _ => Ok(FAILED),
        }
    });
    serve!(host, state, "SapModel.PropFrame", "GetModifiers", |s, f| {
        let Some(section) = s.sections.get(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        f.write(1, section.modifiers)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PropFrame", "GetNameList", |s, f| {
        let names: Vec<String> = s.sections.keys().cloned().collect();
        f.write(0, names.len() as i32)?;
        f.write(1, names)?;
        Ok(OK)
    });

    serve!(host, state, "SapModel.PointObj", "AddCartesian", |s, f| {
        let requested = f.str(4)?;
        let name = if requested.is_empty() {
            (s.points.len() + 1).to_string()
        } else {
            requested
        };
        if s.point(&name).is_some() {
            return Ok(FAILED);
        }
        let point = Point {
            name: name.clone(),
            xyz: [f.double(0)?, f.double(1)?, f.double(2)?],
            restraint: vec![false; 6],
        };
        s.points.push(point);
        f.write(3, name)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PointObj", "GetCoordCartesian", |s, f| {
        let Some(point) = s.point(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        f.write(1, point.xyz[0])?;
        f.write(2, point.xyz[1])?;
        f.write(3, point.xyz[2])?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PointObj", "SetRestraint", |s, f| {
        let name = f.str(0)?;
        let value = f.bool_array(1)?;
        match s.points.iter_mut().find(|p| p.name == name) {
            Some(point) if value.len() == 6 => {
                point.restraint = value;
                Ok(OK)
            }
            _ => Ok(FAILED),
        }
    });
    serve!(host, state, "SapModel.PointObj", "GetRestraint", |s, f| {
        let Some(point) = s.point(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        f.write(1, point.restraint)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PointObj", "SetLoadForce", |s, f| {
        let name = f.str(0)?;
        let pattern = f.str(1)?;
        let values = f.double_array(2)?;
        let replace = f.bool(3)?;
        if s.point(&name).is_none() || !s.has_pattern(&pattern) || values.len() != 6 {
            return Ok(FAILED);
        }
        if replace {
            s.forces.retain(|(p, pat, _)| !(p == &name && pat == &pattern));
        }
        s.forces.push((name, pattern, values));
        Ok(OK)
    });
    serve!(host, state, "SapModel.PointObj", "CountLoadForce", |s, f| {
        let name = f.str(1)?;
        let pattern = f.str(2)?;
        let count = s
            .forces
            .iter()
            .filter(|(p, pat, _)| p == &name && pat == &pattern)
            .count();
        f.write(0, count as i32)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.PointObj", "Count", |s, _f| Ok(s.points.len() as i32));

    serve!(host, state, "SapModel.FrameObj", "AddByPoint", |s, f| {
        let p1 = f.str(0)?;
        let p2 = f.str(1)?;
        let prop = f.str(3)?;
        if s.point(&p1).is_none() || s.point(&p2).is_none() || !s.sections.contains_key(&prop) {
            return Ok(FAILED);
        }
        let requested = f.str(4)?;
        let name = if requested.is_empty() {
            (s.frames.len() + 1).to_string()
        } else {
            requested
        };
        s.frames.push(Frame {
            name: name.clone(),
            p1,
            p2,
            prop,
        });
        f.write(2, name)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.FrameObj", "SetLoadDistributed", |s, f| {
        let name = f.str(0)?;
        let pattern = f.str(1)?;
        if !s.frames.iter().any(|fr| fr.name == name) || !s.has_pattern(&pattern) {
            return Ok(FAILED);
        }
        let value = f.double(6)?;
        s.frame_loads.push((name, pattern, value));
        Ok(OK)
    });
    serve!(host, state, "SapModel.FrameObj", "SetLoadPoint", |s, f| {
        let name = f.str(0)?;
        let pattern = f.str(1)?;
        if !s.frames.iter().any(|fr| fr.name == name) || !s.has_pattern(&pattern) {
            return Ok(FAILED);
        }
        let value = f.double(5)?;
        s.frame_loads.push((name, pattern, value));
        Ok(OK)
    });

    serve!(host, state, "SapModel.LoadPatterns", "Add", |s, f| {
        let name = f.str(0)?;
        if s.has_pattern(&name) {
            return Ok(FAILED);
        }
        s.patterns.push((name.clone(), f.int(1)?));
        if f.bool(3)? {
            s.cases.insert(name.clone(), vec![("Load".to_string(), name, 1.0)]);
        }
        Ok(OK)
    });
    serve!(host, state, "SapModel.LoadPatterns", "GetLoadType", |s, f| {
        let name = f.str(0)?;
        let Some(kind) = s.patterns.iter().find(|(p, _)| p == &name).map(|(_, k)| *k) else {
            return Ok(FAILED);
        };
        f.write(1, kind)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.LoadPatterns", "GetNameList", |s, f| {
        let names: Vec<String> = s.patterns.iter().map(|(p, _)| p.clone()).collect();
        f.write(0, names.len() as i32)?;
        f.write(1, names)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.LoadPatterns", "Count", |s, _f| Ok(s.patterns.len() as i32));

    serve!(host, state, "SapModel.LoadCases", "GetNameList", |s, f| {
        let names: Vec<String> = s.cases.keys().cloned().collect();
        f.write(0, names.len() as i32)?;
        f.write(1, names)?;
        Ok(OK)
    });
    serve!(host, state, "SapModel.LoadCases.StaticLinear", "SetLoads", |s, f| {
        let name = f.str(0)?;
        let count = f.int(1)? as usize;
        let kinds = f.str_array(2)?;
        let patterns = f.str_array(3)?;
        let scales = f.double_array(4)?;
        if kinds.len() < count || patterns.len() < count || scales.len() < count {
            return Ok(FAILED);
        }
        let loads = (0..count)
            .map(|i| (kinds[i].clone(), patterns[i].clone(), scales[i]))
            .collect();
        s.cases.insert(name, loads);
        Ok(OK)
    });
    serve!(host, state, "SapModel.LoadCases.StaticLinear", "GetLoads", |s, f| {
        let Some(loads) = s.cases.get(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        f.write(1, loads.len() as i32)?;
        f.write(2, loads.iter().map(|l| l.0.clone()).collect::<Vec<_>>())?;
        f.write(3, loads.iter().map(|l| l.1.clone()).collect::<Vec<_>>())?;
        f.write(4, loads.iter().map(|l| l.2).collect::<Vec<_>>())?;
        Ok(OK)
    });

    serve!(host, state, "SapModel.Analyze", "SetRunCaseFlag", |s, f| {
        let all = f.bool(2)?;
        Ok(status(all || s.cases.contains_key(&f.str(0)?)))
    });
    serve!(host, state, "SapModel.Analyze", "RunAnalysis", |s, _f| {
        if s.saved_as.is_none() {
            return Ok(FAILED);
        }
        s.analyzed = true;
        s.locked = true;
        Ok(OK)
    });
    serve!(host, state, "SapModel.View", "RefreshView", |_s, _f| Ok(OK));

    serve!(host, state, "SapModel.Results.Setup", "DeselectAllCasesAndCombosForOutput", |s, _f| {
        s.selected.clear();
        Ok(OK)
    });
    serve!(host, state, "SapModel.Results.Setup", "SetCaseSelectedForOutput", |s, f| {
        let name = f.str(0)?;
        if !s.cases.contains_key(&name) {
            return Ok(FAILED);
        }
        s.selected.retain(|c| c != &name);
        if f.bool(1)? {
            s.selected.push(name);
        }
        Ok(OK)
    });
    serve!(host, state, "SapModel.Results", "JointDispl", |s, f| {
        let Some(point) = s.point(&f.str(0)?).cloned() else {
            return Ok(FAILED);
        };
        if !s.analyzed {
            return Ok(FAILED);
        }
        let cases = s.selected.clone();
        let n = cases.len();
        let u3: Vec<f64> = cases.iter().map(|c| s.settlement(&point, c)).collect();
        f.write(2, n as i32)?;
        f.write(3, vec![point.name.clone(); n])?;
        f.write(4, vec![point.name.clone(); n])?;
        f.write(5, cases)?;
        f.write(6, vec![String::new(); n])?;
        f.write(7, vec![0.0; n])?;
        f.write(8, vec![0.0; n])?;
        f.write(9, vec![0.0; n])?;
        f.write(10, u3)?;
        f.write(11, vec![0.0; n])?;
        f.write(12, vec![0.0; n])?;
        f.write(13, vec![0.0; n])?;
        Ok(OK)
    });

    (Arc::new(host), state)
}
