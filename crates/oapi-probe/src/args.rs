//! Command line argument syntax
//!
//! ```text
//! i:42  d:1.5  b:true  s:text        by value
//! &i  &d=2.5  &b  &s=init            by-ref scalar, optional initial value
//! &i[]  &d[]=1,2,3  &b[]  &s[]=a,b   by-ref array, optional initial elements
//! ```

use std::fmt::Debug;
use std::str::FromStr;
use thiserror::Error;
use oapi::{Arg, ArrayRef, ByRef, Scalar, Variant};

/// Errors in argument text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgSyntaxError {
    #[error("`{0}`: expected <kind>:<value> or &<kind>[[]][=<init>]")]
    Form(String),

    #[error("`{text}`: unknown kind `{kind}` (use i, d, b or s)")]
    Kind { text: String, kind: String },

    #[error("`{text}`: cannot read `{value}` as {kind}")]
    Value {
        text: String,
        value: String,
        kind: &'static str,
    },
}

/// One parsed command line argument
#[derive(Clone, Debug)]
pub enum ProbeArg {
    Value(Variant),
    Ref(Slot),
}

/// A by-ref box of any supported element type
#[derive(Clone, Debug)]
pub enum Slot {
    Int(ByRef<i32>),
    Double(ByRef<f64>),
    Bool(ByRef<bool>),
    Str(ByRef<String>),
    IntArray(ArrayRef<i32>),
    DoubleArray(ArrayRef<f64>),
    BoolArray(ArrayRef<bool>),
    StrArray(ArrayRef<String>),
}

impl ProbeArg {
    pub fn as_arg(&mut self) -> Arg<'_> {
        match self {
            ProbeArg::Value(v) => Arg::from(v.clone()),
            ProbeArg::Ref(slot) => slot.as_arg(),
        }
    }

    pub fn slot(&self) -> Option<&Slot> {
        match self {
            ProbeArg::Ref(slot) => Some(slot),
            ProbeArg::Value(_) => None,
        }
    }
}

impl Slot {
    fn as_arg(&mut self) -> Arg<'_> {
        match self {
            Slot::Int(b) => Arg::from(b),
            Slot::Double(b) => Arg::from(b),
            Slot::Bool(b) => Arg::from(b),
            Slot::Str(b) => Arg::from(b),
            Slot::IntArray(a) => Arg::from(a),
            Slot::DoubleArray(a) => Arg::from(a),
            Slot::BoolArray(a) => Arg::from(a),
            Slot::StrArray(a) => Arg::from(a),
        }
    }

    /// Contents after the call, `<unset>` if the host never wrote the box
    pub fn render(&self) -> String {
        match self {
            Slot::Int(b) => scalar(b),
            Slot::Double(b) => scalar(b),
            Slot::Bool(b) => scalar(b),
            Slot::Str(b) => scalar(b),
            Slot::IntArray(a) => array(a),
            Slot::DoubleArray(a) => array(a),
            Slot::BoolArray(a) => array(a),
            Slot::StrArray(a) => array(a),
        }
    }
}

fn scalar<T: Scalar + Debug>(b: &ByRef<T>) -> String {
    b.value().map_or_else(|| "<unset>".to_string(), |v| format!("{:?}", v))
}

fn array<T: Scalar + Debug>(a: &ArrayRef<T>) -> String {
    if a.is_set() {
        format!("{:?}", a.as_slice())
    } else {
        "<unset>".to_string()
    }
}

impl FromStr for ProbeArg {
    type Err = ArgSyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.strip_prefix('&') {
            Some(rest) => parse_ref(text, rest).map(ProbeArg::Ref),
            None => parse_value(text).map(ProbeArg::Value),
        }
    }
}

fn parse_value(text: &str) -> Result<Variant, ArgSyntaxError> {
    let (kind, value) = text
        .split_once(':')
        .ok_or_else(|| ArgSyntaxError::Form(text.to_string()))?;
    Ok(match kind {
        "i" => Variant::Int(number(text, value, "int")?),
        "d" => Variant::Double(number(text, value, "double")?),
        "b" => Variant::Bool(number(text, value, "bool")?),
        "s" => Variant::Str(value.to_string()),
        other => return Err(unknown_kind(text, other)),
    })
}

fn parse_ref(text: &str, rest: &str) -> Result<Slot, ArgSyntaxError> {
    let (spec, init) = match rest.split_once('=') {
        Some((spec, init)) => (spec, Some(init)),
        None => (rest, None),
    };
    let (kind, is_array) = match spec.strip_suffix("[]") {
        Some(kind) => (kind, true),
        None => (spec, false),
    };
    if kind.is_empty() {
        return Err(ArgSyntaxError::Form(text.to_string()));
    }

    Ok(match (kind, is_array) {
        ("i", false) => Slot::Int(scalar_box(text, init, "int")?),
        ("d", false) => Slot::Double(scalar_box(text, init, "double")?),
        ("b", false) => Slot::Bool(scalar_box(text, init, "bool")?),
        ("s", false) => Slot::Str(init.map(str::to_string).into()),
        ("i", true) => Slot::IntArray(array_box(text, init, "int")?),
        ("d", true) => Slot::DoubleArray(array_box(text, init, "double")?),
        ("b", true) => Slot::BoolArray(array_box(text, init, "bool")?),
        ("s", true) => Slot::StrArray(match init {
            Some(init) => ArrayRef::of(split(init).map(str::to_string).collect()),
            None => ArrayRef::empty(),
        }),
        (other, _) => return Err(unknown_kind(text, other)),
    })
}

fn scalar_box<T>(text: &str, init: Option<&str>, kind: &'static str) -> Result<ByRef<T>, ArgSyntaxError>
where
    T: Scalar + FromStr,
{
    Ok(match init {
        Some(value) => ByRef::of(number(text, value, kind)?),
        None => ByRef::empty(),
    })
}

fn array_box<T>(text: &str, init: Option<&str>, kind: &'static str) -> Result<ArrayRef<T>, ArgSyntaxError>
where
    T: Scalar + FromStr,
{
    match init {
        Some(values) => split(values)
            .map(|v| number(text, v, kind))
            .collect::<Result<Vec<T>, _>>()
            .map(ArrayRef::of),
        None => Ok(ArrayRef::empty()),
    }
}

/// Comma separated elements; an empty string is an empty array
fn split(values: &str) -> impl Iterator<Item = &str> {
    values.split(',').filter(|v| !v.is_empty())
}

fn number<T: FromStr>(text: &str, value: &str, kind: &'static str) -> Result<T, ArgSyntaxError> {
    value.trim().parse().map_err(|_| ArgSyntaxError::Value {
        text: text.to_string(),
        value: value.to_string(),
        kind,
    })
}

fn unknown_kind(text: &str, kind: &str) -> ArgSyntaxError {
    ArgSyntaxError::Kind {
        text: text.to_string(),
        kind: kind.to_string(),
    }
}
