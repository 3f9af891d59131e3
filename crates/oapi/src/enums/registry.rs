//! Reverse code tables

use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;
use crate::types::{BridgeError, Result, UnknownCodeError};
use super::{RemoteCode, RemoteEnum};

/// Reverse table of one enumeration family
///
/// Maps each remote code to the position of its variant in
/// [`RemoteEnum::variants`].
#[derive(Debug, Clone)]
pub struct EnumMapping {
    family: &'static str,
    by_int: HashMap<i32, usize>,
    by_str: HashMap<String, usize>,
}

impl EnumMapping {
    /// Build the table for `E`, rejecting codes used by two variants
    pub fn build<E: RemoteEnum>() -> Result<Self> {
        let mut mapping = Self {
            family: E::FAMILY,
            by_int: HashMap::new(),
            by_str: HashMap::new(),
        };

        for (index, variant) in E::variants().iter().enumerate() {
            let code = variant.code();
            let previous = match &code {
                RemoteCode::Int(v) => mapping.by_int.insert(*v, index),
                RemoteCode::Str(v) => mapping.by_str.insert(v.to_string(), index),
            };
            if previous.is_some() {
                return Err(BridgeError::DuplicateCode {
                    family: E::FAMILY,
                    code,
                });
            }
        }

        Ok(mapping)
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Number of mapped codes
    pub fn len(&self) -> usize {
        self.by_int.len() + self.by_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, code: &RemoteCode) -> Option<usize> {
        match code {
            RemoteCode::Int(v) => self.by_int.get(v).copied(),
            RemoteCode::Str(v) => self.by_str.get(&**v).copied(),
        }
    }
}

/// Every enumeration family the bridge can decode
///
/// Built once during initialization, then shared read-only (typically behind
/// an `Arc`). Lookups in a family that was never registered fail with
/// [`BridgeError::UnregisteredFamily`].
#[derive(Debug, Default)]
pub struct EnumRegistry {
    tables: HashMap<TypeId, EnumMapping>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and add the table for `E`
    ///
    /// Registering the same family twice replaces the earlier table.
    pub fn register<E: RemoteEnum>(&mut self) -> Result<&mut Self> {
        let mapping = EnumMapping::build::<E>()?;
        debug!("Registered enumeration {} ({} codes)", E::FAMILY, mapping.len());
        self.tables.insert(TypeId::of::<E>(), mapping);
        Ok(self)
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<E: RemoteEnum>(mut self) -> Result<Self> {
        self.register::<E>()?;
        Ok(self)
    }

    /// Whether a table for `E` is present
    pub fn contains<E: RemoteEnum>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<E>())
    }

    /// Names of all registered families, sorted
    pub fn families(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tables.values().map(EnumMapping::family).collect();
        names.sort_unstable();
        names
    }

    /// Variant → code; total, no table needed
    pub fn to_code<E: RemoteEnum>(&self, variant: E) -> RemoteCode {
        variant.code()
    }

    /// Code → variant
    pub fn from_code<E: RemoteEnum>(&self, code: &RemoteCode) -> Result<E> {
        let table = self.table::<E>()?;
        table
            .position(code)
            .and_then(|i| E::variants().get(i).copied())
            .ok_or_else(|| {
                BridgeError::UnknownCode(UnknownCodeError {
                    family: E::FAMILY,
                    code: code.clone(),
                })
            })
    }

    /// Integer code → variant
    pub fn from_int<E: RemoteEnum>(&self, code: i32) -> Result<E> {
        self.from_code(&RemoteCode::Int(code))
    }

    /// String code → variant
    pub fn from_str<E: RemoteEnum>(&self, code: &str) -> Result<E> {
        self.from_code(&RemoteCode::Str(code.to_string().into()))
    }

    /// Decode a whole array of integer codes, failing on the first unmapped one
    pub fn from_ints<E: RemoteEnum>(&self, codes: &[i32]) -> Result<Vec<E>> {
        codes.iter().map(|&c| self.from_int(c)).collect()
    }

    fn table<E: RemoteEnum>(&self) -> Result<&EnumMapping> {
        self.tables
            .get(&TypeId::of::<E>())
            .ok_or(BridgeError::UnregisteredFamily(E::FAMILY))
    }
}
