//! `IDispatch` automation host
//!
//! Each call joins a COM apartment, binds the root object by ProgID, walks
//! the member path with property gets and invokes the method by name:
//!
//! ```text
//! ProgID ─CLSIDFromProgID─► CLSID ─GetActiveObject / CoCreateInstance─► IDispatch
//!   └─ for each member: GetIDsOfNames + Invoke(PROPERTYGET) ─► IDispatch
//!        └─ GetIDsOfNames(method) + Invoke(METHOD, reversed args) ─► VARIANT
//! ```
//!
//! Nothing is cached between calls. By-ref parameters travel as `VT_BYREF`
//! pointers into storage owned by the call; COM gives no "untouched" signal,
//! so every by-ref slot is read back and marked written.

use std::ffi::c_void;
use std::iter;
use std::mem::ManuallyDrop;
use std::ptr;
use tracing::{debug, trace};
use windows::core::{Interface, BSTR, GUID, PCWSTR};
use windows::Win32::Foundation::{VARIANT_BOOL, VARIANT_FALSE, VARIANT_TRUE};
use windows::Win32::System::Com::{
    CLSIDFromProgID, CoCreateInstance, CoInitializeEx, CoUninitialize, IDispatch, CLSCTX_ALL,
    COINIT_APARTMENTTHREADED, COINIT_MULTITHREADED, DISPATCH_FLAGS, DISPATCH_METHOD,
    DISPATCH_PROPERTYGET, DISPPARAMS, EXCEPINFO, SAFEARRAY,
};
use windows::Win32::System::Ole::{
    GetActiveObject, SafeArrayAccessData, SafeArrayCreateVector, SafeArrayDestroy,
    SafeArrayGetLBound, SafeArrayGetUBound, SafeArrayGetVartype, SafeArrayUnaccessData,
};
use windows::Win32::System::Variant::{
    VariantClear, VARENUM, VARIANT, VT_ARRAY, VT_BOOL, VT_BSTR, VT_BYREF, VT_DISPATCH, VT_EMPTY,
    VT_I4, VT_R8, VT_VARIANT,
};
use oapi_variant::{Param, SafeArray, ScalarType, VarType, Variant, VariantError};
use crate::config::{ApartmentKind, BindMode, ComConfig};
use crate::types::{hresult, BridgeError, Handle, Result};
use super::AutomationHost;

const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// Automation host backed by a registered COM server
///
/// After a call that reaches the server, every by-ref box reads as written
/// (`is_set()` is always true), even for outputs the method left alone.
/// Typed call sites cannot tell a missing output from a default one here.
#[derive(Clone, Debug, Default)]
pub struct ComHost {
    config: ComConfig,
}

impl ComHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComConfig {
        &self.config
    }

    fn bind_root(&self, prog_id: &str) -> Result<IDispatch> {
        let wide = to_wide(prog_id);
        let clsid = unsafe { CLSIDFromProgID(PCWSTR(wide.as_ptr())) }
            .map_err(|e| BridgeError::from_hresult(code_of(&e), prog_id))?;
        debug!("Resolved {} to CLSID {:?}", prog_id, clsid);

        if self.config.bind != BindMode::Create {
            match active_object(&clsid) {
                Ok(disp) => {
                    debug!("Attached to running {}", prog_id);
                    return Ok(disp);
                }
                Err(e) if self.config.bind == BindMode::Running => {
                    return Err(BridgeError::from_hresult(code_of(&e), prog_id));
                }
                Err(_) => {}
            }
        }

        let disp: IDispatch = unsafe { CoCreateInstance(&clsid, None, CLSCTX_ALL) }
            .map_err(|e| BridgeError::from_hresult(code_of(&e), prog_id))?;
        debug!("Created new {}", prog_id);
        Ok(disp)
    }

    fn walk(&self, handle: &Handle) -> Result<IDispatch> {
        let mut current = self.bind_root(handle.root())?;
        let mut path = handle.root().to_string();
        for member in handle.members() {
            path.push('.');
            path.push_str(member);
            trace!("Walking to {}", path);

            let dispid = dispid_of(&current, member, &path)?;
            let mut result = VARIANT::default();
            let params = DISPPARAMS::default();
            invoke(&current, dispid, DISPATCH_PROPERTYGET, &params, &mut result)
                .map_err(|e| BridgeError::from_hresult(code_of(&e), &path))?;
            current = unsafe { take_dispatch(&mut result) }.ok_or_else(|| BridgeError::UnknownMember {
                handle: handle.dotted(),
                member: member.clone(),
            })?;
        }
        Ok(current)
    }
}

impl AutomationHost for ComHost {
    fn call(&self, handle: &Handle, method: &str, params: &mut [Param]) -> Result<Variant> {
        let _apartment = ApartmentGuard::enter(self.config.apartment)?;
        let target = self.walk(handle)?;
        let context = format!("{}.{}", handle, method);
        let dispid = dispid_of(&target, method, &context)?;

        let mut marshaled = Marshaled::pack(params)?;
        let dispparams = marshaled.dispparams();
        let mut result = VARIANT::default();
        let mut excepinfo = EXCEPINFO::default();
        let mut arg_err = 0u32;

        let outcome = unsafe {
            target.Invoke(
                dispid,
                &GUID::zeroed(),
                LOCALE_USER_DEFAULT,
                DISPATCH_METHOD,
                &dispparams,
                Some(&mut result as *mut VARIANT),
                Some(&mut excepinfo as *mut EXCEPINFO),
                Some(&mut arg_err as *mut u32),
            )
        };

        if let Err(e) = outcome {
            let count = params.len();
            return Err(match code_of(&e) {
                hresult::DISP_E_TYPEMISMATCH => BridgeError::Argument {
                    index: count.saturating_sub(1 + arg_err as usize),
                    source: VariantError::TypeMismatch {
                        expected: params
                            .get(count.saturating_sub(1 + arg_err as usize))
                            .map_or(VarType::Empty, Param::declared),
                        found: VarType::Empty,
                    },
                },
                hresult::DISP_E_BADPARAMCOUNT => BridgeError::ArgumentCount {
                    method: method.to_string(),
                    got: count,
                },
                code => BridgeError::from_hresult(code, &context),
            });
        }

        marshaled.unpack(params)?;
        let returned = unsafe { from_variant(&result) };
        unsafe {
            let _ = VariantClear(&mut result);
        }
        returned.map_err(|found| BridgeError::Com {
            hresult: hresult::DISP_E_TYPEMISMATCH,
            message: format!("{} returned unsupported type 0x{:04x}", context, found),
        })
    }

    fn describe(&self) -> String {
        format!("com:{:?}/{:?}", self.config.apartment, self.config.bind)
    }
}

/// Joins a COM apartment for the lifetime of one call
struct ApartmentGuard {
    initialized: bool,
}

impl ApartmentGuard {
    fn enter(kind: ApartmentKind) -> Result<Self> {
        let flags = match kind {
            ApartmentKind::Mta => COINIT_MULTITHREADED,
            ApartmentKind::Sta => COINIT_APARTMENTTHREADED,
        };
        let hr = unsafe { CoInitializeEx(None, flags) };
        if hr.is_ok() {
            Ok(Self { initialized: true })
        } else if hr.0 as u32 == hresult::RPC_E_CHANGED_MODE {
            // Already in the other apartment model; usable as is.
            Ok(Self { initialized: false })
        } else {
            Err(BridgeError::from_hresult(hr.0 as u32, "CoInitializeEx"))
        }
    }
}

impl Drop for ApartmentGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// Call-owned storage behind the `VARIANT`s handed to `Invoke`
enum Cell {
    Value(VARIANT),
    Int(Box<i32>),
    Double(Box<f64>),
    Bool(Box<VARIANT_BOOL>),
    Str(Box<BSTR>),
    Array(Box<*mut SAFEARRAY>, ScalarType),
}

struct Marshaled {
    cells: Vec<Cell>,
    /// Arguments in reverse order, as `IDispatch::Invoke` expects them
    rgvarg: Vec<VARIANT>,
}

impl Marshaled {
    fn pack(params: &[Param]) -> Result<Self> {
        let mut cells = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let cell = if param.is_by_ref() {
                by_ref_cell(param).map_err(|source| BridgeError::Argument { index, source })?
            } else {
                Cell::Value(unsafe { to_variant(param.value()) }?)
            };
            cells.push(cell);
        }

        let rgvarg = cells.iter_mut().rev().map(|c| unsafe { c.as_arg() }).collect();
        Ok(Self { cells, rgvarg })
    }

    fn dispparams(&mut self) -> DISPPARAMS {
        DISPPARAMS {
            rgvarg: self.rgvarg.as_mut_ptr(),
            rgdispidNamedArgs: ptr::null_mut(),
            cArgs: self.rgvarg.len() as u32,
            cNamedArgs: 0,
        }
    }

    fn unpack(&self, params: &mut [Param]) -> Result<()> {
        for (index, (cell, param)) in self.cells.iter().zip(params.iter_mut()).enumerate() {
            let value = match cell {
                Cell::Value(_) => continue,
                Cell::Int(v) => Variant::Int(**v),
                Cell::Double(v) => Variant::Double(**v),
                Cell::Bool(v) => Variant::Bool(v.0 != 0),
                Cell::Str(v) => Variant::Str(v.to_string()),
                Cell::Array(p, elem) => Variant::Array(unsafe { read_array(**p, *elem, index) }?),
            };
            param
                .write(value)
                .map_err(|source| BridgeError::Argument { index, source })?;
        }
        Ok(())
    }
}

impl Drop for Marshaled {
    fn drop(&mut self) {
        for cell in &mut self.cells {
            match cell {
                Cell::Value(v) => unsafe {
                    let _ = VariantClear(v);
                },
                Cell::Array(p, _) if !p.is_null() => unsafe {
                    let _ = SafeArrayDestroy(**p);
                },
                _ => {}
            }
        }
    }
}

impl Cell {
    /// The `VARIANT` placed in `rgvarg` for this cell
    unsafe fn as_arg(&mut self) -> VARIANT {
        let mut v = VARIANT::default();
        let inner = &mut *v.Anonymous.Anonymous;
        match self {
            Cell::Value(value) => {
                // Shallow copy; ownership stays with the cell.
                return ptr::read(value);
            }
            Cell::Int(b) => {
                inner.vt = byref(VT_I4);
                inner.Anonymous.plVal = &mut **b;
            }
            Cell::Double(b) => {
                inner.vt = byref(VT_R8);
                inner.Anonymous.pdblVal = &mut **b;
            }
            Cell::Bool(b) => {
                inner.vt = byref(VT_BOOL);
                inner.Anonymous.pboolVal = &mut **b;
            }
            Cell::Str(b) => {
                inner.vt = byref(VT_BSTR);
                inner.Anonymous.pbstrVal = &mut **b;
            }
            Cell::Array(b, elem) => {
                inner.vt = VARENUM(VT_BYREF.0 | VT_ARRAY.0 | element_vt(*elem).0);
                inner.Anonymous.pparray = &mut **b;
            }
        }
        v
    }
}

fn by_ref_cell(param: &Param) -> std::result::Result<Cell, VariantError> {
    let mismatch = |found: &Variant| VariantError::TypeMismatch {
        expected: param.declared(),
        found: found.vartype(),
    };
    let value = param.value();
    Ok(match param.declared() {
        VarType::Scalar(ScalarType::Int) => Cell::Int(Box::new(match value {
            Variant::Empty => 0,
            Variant::Int(v) => *v,
            other => return Err(mismatch(other)),
        })),
        VarType::Scalar(ScalarType::Double) => Cell::Double(Box::new(match value {
            Variant::Empty => 0.0,
            Variant::Double(v) => *v,
            other => return Err(mismatch(other)),
        })),
        VarType::Scalar(ScalarType::Bool) => Cell::Bool(Box::new(match value {
            Variant::Empty => VARIANT_FALSE,
            Variant::Bool(v) => to_variant_bool(*v),
            other => return Err(mismatch(other)),
        })),
        VarType::Scalar(ScalarType::Str) => Cell::Str(Box::new(match value {
            Variant::Empty => BSTR::new(),
            Variant::Str(v) => BSTR::from(v.as_str()),
            other => return Err(mismatch(other)),
        })),
        VarType::Array(elem) => {
            let array = match value {
                Variant::Empty => SafeArray::new(elem),
                Variant::Array(a) if a.element_type() == elem => a.clone(),
                other => return Err(mismatch(other)),
            };
            Cell::Array(Box::new(unsafe { create_array(&array) }), elem)
        }
        VarType::Empty => return Err(mismatch(value)),
    })
}

fn byref(vt: VARENUM) -> VARENUM {
    VARENUM(VT_BYREF.0 | vt.0)
}

fn element_vt(elem: ScalarType) -> VARENUM {
    match elem {
        ScalarType::Int => VT_I4,
        ScalarType::Double => VT_R8,
        ScalarType::Bool => VT_BOOL,
        ScalarType::Str => VT_BSTR,
    }
}

fn to_variant_bool(v: bool) -> VARIANT_BOOL {
    if v {
        VARIANT_TRUE
    } else {
        VARIANT_FALSE
    }
}

unsafe fn to_variant(value: &Variant) -> Result<VARIANT> {
    let mut v = VARIANT::default();
    let inner = &mut *v.Anonymous.Anonymous;
    match value {
        Variant::Empty => inner.vt = VT_EMPTY,
        Variant::Int(x) => {
            inner.vt = VT_I4;
            inner.Anonymous.lVal = *x;
        }
        Variant::Double(x) => {
            inner.vt = VT_R8;
            inner.Anonymous.dblVal = *x;
        }
        Variant::Bool(x) => {
            inner.vt = VT_BOOL;
            inner.Anonymous.boolVal = to_variant_bool(*x);
        }
        Variant::Str(x) => {
            inner.vt = VT_BSTR;
            inner.Anonymous.bstrVal = ManuallyDrop::new(BSTR::from(x.as_str()));
        }
        Variant::Array(a) => {
            inner.vt = VARENUM(VT_ARRAY.0 | element_vt(a.element_type()).0);
            inner.Anonymous.parray = create_array(a);
        }
    }
    Ok(v)
}

/// Convert a returned `VARIANT`; unsupported types yield their raw `vt`
unsafe fn from_variant(v: &VARIANT) -> std::result::Result<Variant, u16> {
    let inner = &*v.Anonymous.Anonymous;
    let vt = inner.vt;
    Ok(match vt {
        VT_EMPTY => Variant::Empty,
        VT_I4 => Variant::Int(inner.Anonymous.lVal),
        VT_R8 => Variant::Double(inner.Anonymous.dblVal),
        VT_BOOL => Variant::Bool(inner.Anonymous.boolVal.0 != 0),
        VT_BSTR => Variant::Str(inner.Anonymous.bstrVal.to_string()),
        other if other.0 & VT_ARRAY.0 != 0 => {
            let elem = ScalarType::from_code(other.0 & !VT_ARRAY.0).ok_or(other.0)?;
            Variant::Array(read_array(inner.Anonymous.parray, elem, 0).map_err(|_| other.0)?)
        }
        other => return Err(other.0),
    })
}

unsafe fn take_dispatch(v: &mut VARIANT) -> Option<IDispatch> {
    let inner = &mut *v.Anonymous.Anonymous;
    let disp = if inner.vt == VT_DISPATCH {
        (*inner.Anonymous.pdispVal).clone()
    } else {
        None
    };
    let _ = VariantClear(v);
    disp
}

unsafe fn create_array(array: &SafeArray) -> *mut SAFEARRAY {
    let len = array.len() as u32;
    let psa = SafeArrayCreateVector(element_vt(array.element_type()), 0, len);
    if psa.is_null() || len == 0 {
        return psa;
    }
    let mut data: *mut c_void = ptr::null_mut();
    if SafeArrayAccessData(psa, &mut data).is_err() {
        return psa;
    }
    match array {
        SafeArray::Int(v) => ptr::copy_nonoverlapping(v.as_ptr(), data as *mut i32, v.len()),
        SafeArray::Double(v) => ptr::copy_nonoverlapping(v.as_ptr(), data as *mut f64, v.len()),
        SafeArray::Bool(v) => {
            let out = data as *mut VARIANT_BOOL;
            for (i, b) in v.iter().enumerate() {
                ptr::write(out.add(i), to_variant_bool(*b));
            }
        }
        SafeArray::Str(v) => {
            let out = data as *mut BSTR;
            for (i, s) in v.iter().enumerate() {
                ptr::write(out.add(i), BSTR::from(s.as_str()));
            }
        }
    }
    let _ = SafeArrayUnaccessData(psa);
    psa
}

/// Copy out a one-dimensional array; a mismatch is reported against parameter `index`
unsafe fn read_array(psa: *mut SAFEARRAY, declared: ScalarType, index: usize) -> Result<SafeArray> {
    if psa.is_null() {
        return Ok(SafeArray::new(declared));
    }
    let com_err = |e: windows::core::Error| BridgeError::from_hresult(code_of(&e), "SAFEARRAY");
    let lower = SafeArrayGetLBound(psa, 1).map_err(com_err)?;
    let upper = SafeArrayGetUBound(psa, 1).map_err(com_err)?;
    let len = (upper - lower + 1).max(0) as usize;
    let vt = SafeArrayGetVartype(psa).map_err(com_err)?;

    let mut data: *mut c_void = ptr::null_mut();
    SafeArrayAccessData(psa, &mut data).map_err(com_err)?;
    let read = read_elements(data, len, vt, declared);
    let _ = SafeArrayUnaccessData(psa);
    read.map_err(|found| BridgeError::Argument {
        index,
        source: VariantError::TypeMismatch {
            expected: VarType::Array(declared),
            found,
        },
    })
}

unsafe fn read_elements(
    data: *mut c_void,
    len: usize,
    vt: VARENUM,
    declared: ScalarType,
) -> std::result::Result<SafeArray, VarType> {
    Ok(match vt {
        VT_I4 => SafeArray::Int(std::slice::from_raw_parts(data as *const i32, len).to_vec()),
        VT_R8 => SafeArray::Double(std::slice::from_raw_parts(data as *const f64, len).to_vec()),
        VT_BOOL => SafeArray::Bool(
            std::slice::from_raw_parts(data as *const VARIANT_BOOL, len)
                .iter()
                .map(|b| b.0 != 0)
                .collect(),
        ),
        VT_BSTR => SafeArray::Str(
            std::slice::from_raw_parts(data as *const BSTR, len)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        VT_VARIANT => {
            let items = std::slice::from_raw_parts(data as *const VARIANT, len);
            let values: Vec<Variant> = items
                .iter()
                .map(|v| from_variant(v).unwrap_or_default())
                .collect();
            return variants_to_array(values, declared);
        }
        other => {
            return Err(VarType::from_code(other.0).unwrap_or(VarType::Empty));
        }
    })
}

fn variants_to_array(values: Vec<Variant>, declared: ScalarType) -> std::result::Result<SafeArray, VarType> {
    use oapi_variant::Scalar;
    fn collect<T: Scalar>(values: Vec<Variant>) -> std::result::Result<Vec<T>, VarType> {
        values
            .into_iter()
            .map(|v| {
                let found = v.vartype();
                T::from_variant(v).map_err(|_| found)
            })
            .collect()
    }
    Ok(match declared {
        ScalarType::Int => SafeArray::Int(collect(values)?),
        ScalarType::Double => SafeArray::Double(collect(values)?),
        ScalarType::Bool => SafeArray::Bool(collect(values)?),
        ScalarType::Str => SafeArray::Str(collect(values)?),
    })
}

fn active_object(clsid: &GUID) -> windows::core::Result<IDispatch> {
    let mut unknown = None;
    unsafe { GetActiveObject(clsid, ptr::null_mut(), &mut unknown) }?;
    match unknown {
        Some(unk) => unk.cast::<IDispatch>(),
        None => Err(windows::core::Error::from_hresult(windows::core::HRESULT(
            hresult::MK_E_UNAVAILABLE as i32,
        ))),
    }
}

fn dispid_of(disp: &IDispatch, name: &str, context: &str) -> Result<i32> {
    let wide = to_wide(name);
    let names = [PCWSTR(wide.as_ptr())];
    let mut dispid = 0i32;
    unsafe {
        disp.GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, LOCALE_USER_DEFAULT, &mut dispid)
    }
    .map_err(|e| BridgeError::from_hresult(code_of(&e), context))?;
    Ok(dispid)
}

fn invoke(
    disp: &IDispatch,
    dispid: i32,
    flags: DISPATCH_FLAGS,
    params: &DISPPARAMS,
    result: &mut VARIANT,
) -> windows::core::Result<()> {
    unsafe {
        disp.Invoke(
            dispid,
            &GUID::zeroed(),
            LOCALE_USER_DEFAULT,
            flags,
            params,
            Some(result as *mut VARIANT),
            None,
            None,
        )
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(iter::once(0)).collect()
}

fn code_of(e: &windows::core::Error) -> u32 {
    e.code().0 as u32
}
