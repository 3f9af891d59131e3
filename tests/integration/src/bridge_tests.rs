//! Bridge Tests - By-ref Boxes, Status Handling, Enum Codes and Paths
//!
//! These tests drive the dispatcher against scripted loopback hosts:
//! - Scalar and array by-ref round trips, including the unwritten state
//! - Non-zero statuses returned as values under both unpack policies
//! - Enumeration tables of the structural application
//! - Path resolution and session loss

mod common;

use std::sync::Arc;

use oapi::{
    args, resolve, resolve_segments, ArrayRef, BridgeConfig, BridgeError, ByRef, Dispatcher,
    EnumRegistry, LoopbackHost, RemoteCode, RemoteEnum, Status, UnpackPolicy, Variant,
};
use sap2000::enums::registry;
use sap2000::{
    Dir, DistributedLoadType, ItemType, ItemTypeElm, LoadPatternType, LoadType, MatType, Units,
};

use common::*;

fn dispatcher(host: LoopbackHost) -> (Arc<LoopbackHost>, Dispatcher) {
    init_tracing();
    let host = Arc::new(host);
    let enums = Arc::new(EnumRegistry::new());
    (host.clone(), Dispatcher::new(host, enums))
}

#[test]
fn test_add_force_leaves_unwritten_box() {
    let (host, d) = dispatcher(LoopbackHost::new("Root").with_method("Loads", "AddForce", |f| {
        assert_eq!(f.str(0)?, "P1");
        assert_eq!(f.str(1)?, "Dead");
        assert!(!f.is_set(2));
        Ok(0)
    }));

    let loads = resolve("Root", "Loads");
    let mut out: ByRef<i32> = ByRef::empty();
    let status = d
        .invoke(&loads, "AddForce", &mut args!["P1", "Dead", &mut out])
        .unwrap();

    assert_eq!(status, Status::SUCCESS);
    assert!(!out.is_set());
    assert_eq!(host.calls_to("AddForce").len(), 1);
}

#[test]
fn test_scalar_round_trip_is_exact() {
    let (_, d) = dispatcher(LoopbackHost::new("Root").with_method("Probe", "Scalars", |f| {
        f.write(0, i32::MIN)?;
        f.write(1, 0.1 + 0.2)?;
        f.write(2, true)?;
        f.write(3, "ünïcode ∑")?;
        Ok(0)
    }));

    let mut i: ByRef<i32> = ByRef::empty();
    let mut x: ByRef<f64> = ByRef::of(7.0);
    let mut b: ByRef<bool> = ByRef::empty();
    let mut s: ByRef<String> = ByRef::empty();
    d.invoke(
        &resolve("Root", "Probe"),
        "Scalars",
        &mut args![&mut i, &mut x, &mut b, &mut s],
    )
    .unwrap();

    assert_eq!(i.value(), Some(&i32::MIN));
    assert_eq!(x.get(), 0.1 + 0.2);
    assert_eq!(b.value(), Some(&true));
    assert_eq!(s.get(), "ünïcode ∑");
}

#[test]
fn test_host_type_mismatch_is_argument_error() {
    let (_, d) = dispatcher(LoopbackHost::new("Root").with_method("Probe", "Wrong", |f| {
        f.write(0, 1.5)?;
        Ok(0)
    }));

    let mut i: ByRef<i32> = ByRef::empty();
    let err = d
        .invoke(&resolve("Root", "Probe"), "Wrong", &mut args![&mut i])
        .unwrap_err();
    assert!(matches!(err, BridgeError::Argument { index: 0, .. }));
    assert!(!i.is_set());
}

#[test]
fn test_written_zero_differs_from_unwritten() {
    let (_, d) = dispatcher(LoopbackHost::new("Root").with_method("Probe", "Zeros", |f| {
        f.write(0, 0)?;
        f.write(2, String::new())?;
        Ok(0)
    }));

    let mut written: ByRef<i32> = ByRef::empty();
    let mut untouched: ByRef<i32> = ByRef::empty();
    let mut empty_str: ByRef<String> = ByRef::empty();
    d.invoke(
        &resolve("Root", "Probe"),
        "Zeros",
        &mut args![&mut written, &mut untouched, &mut empty_str],
    )
    .unwrap();

    assert_eq!(written.get(), untouched.get());
    assert!(written.is_set());
    assert!(!untouched.is_set());
    assert_eq!(empty_str.value().map(String::as_str), Some(""));
}

#[test]
fn test_array_length_follows_host() {
    let (_, d) = dispatcher(LoopbackHost::new("Root").with_method("Probe", "Fill", |f| {
        assert_eq!(f.double_array(0)?.len(), 0);
        f.write(0, vec![5.0, 4.0, 3.0, 2.0, 1.0])?;
        f.write(1, vec![true])?;
        Ok(0)
    }));

    let mut values: ArrayRef<f64> = ArrayRef::with_len(0);
    let mut flags: ArrayRef<bool> = ArrayRef::with_len(6);
    d.invoke(
        &resolve("Root", "Probe"),
        "Fill",
        &mut args![&mut values, &mut flags],
    )
    .unwrap();

    assert_eq!(values.len(), 5);
    assert_eq!(values.as_slice(), &[5.0, 4.0, 3.0, 2.0, 1.0]);
    assert_eq!(flags.into_vec(), vec![true]);
}

fn failing_host() -> LoopbackHost {
    LoopbackHost::new("Root").with_method("Probe", "Partial", |f| {
        f.write(0, 99)?;
        Ok(3)
    })
}

#[test]
fn test_non_zero_status_is_a_value() {
    let (_, d) = dispatcher(failing_host());
    let mut out: ByRef<i32> = ByRef::of(1);
    let status = d
        .invoke(&resolve("Root", "Probe"), "Partial", &mut args![&mut out])
        .unwrap();

    assert!(!status.is_success());
    assert_eq!(i32::from(status), 3);
    // default policy copies back the partial write
    assert_eq!(out.get(), 99);
}

#[test]
fn test_on_success_policy_keeps_boxes() {
    init_tracing();
    let host = Arc::new(failing_host());
    let config = BridgeConfig::default()
        .unpack(UnpackPolicy::OnSuccess)
        .trace_arguments(true);
    let d = Dispatcher::with_config(host, Arc::new(EnumRegistry::new()), config);

    let mut out: ByRef<i32> = ByRef::of(1);
    let status = d
        .invoke(&resolve("Root", "Probe"), "Partial", &mut args![&mut out])
        .unwrap();
    assert_eq!(status.code(), 3);
    assert_eq!(out.get(), 1);
}

#[test]
fn test_non_integer_status_is_fatal() {
    let (_, d) = dispatcher(LoopbackHost::new("Root").with_method("Probe", "Text", |_| Ok("done")));
    let err = d.invoke(&resolve("Root", "Probe"), "Text", &mut []).unwrap_err();
    assert!(matches!(err, BridgeError::StatusType { .. }));
}

#[test]
fn test_every_family_round_trips() {
    let enums = registry().unwrap();

    fn check<E: RemoteEnum>(enums: &EnumRegistry) {
        for &v in E::variants() {
            let code = enums.to_code(v);
            assert_eq!(enums.from_code::<E>(&code).unwrap(), v, "{}", E::FAMILY);
        }
    }
    check::<Units>(&enums);
    check::<Dir>(&enums);
    check::<MatType>(&enums);
    check::<LoadPatternType>(&enums);
    check::<ItemType>(&enums);
    check::<ItemTypeElm>(&enums);
    check::<DistributedLoadType>(&enums);
    check::<LoadType>(&enums);

    assert_eq!(enums.from_int::<Dir>(10).unwrap(), Dir::Gravity);
    assert_eq!(enums.from_str::<LoadType>("Accel").unwrap(), LoadType::Accel);
}

#[test]
fn test_unknown_codes_never_default() {
    let enums = registry().unwrap();

    let err = enums.from_int::<Units>(0).unwrap_err();
    assert!(matches!(err, BridgeError::UnknownCode(ref e) if e.family == "Units"));
    assert!(enums.from_int::<MatType>(8).is_err());
    assert!(enums.from_str::<LoadType>("load").is_err());
    assert!(enums.from_code::<Dir>(&RemoteCode::str("Gravity")).is_err());
}

#[test]
fn test_resolution_is_pure() {
    let (host, d) = dispatcher(LoopbackHost::new("Root").with_method("A.B", "Ping", |_| Ok(0)));

    let first = resolve("Root", "A.B");
    let second = resolve_segments("Root", ["A", "", "B"]);
    let unknown = resolve("Root", "No.Such.Object");
    assert_eq!(first, second);
    assert!(host.calls().is_empty());

    d.invoke(&first, "Ping", &mut []).unwrap();
    d.invoke(&second, "Ping", &mut []).unwrap();
    let calls = host.calls();
    assert_eq!(calls[0], calls[1]);

    let err = d.invoke(&unknown, "Ping", &mut []).unwrap_err();
    assert!(matches!(err, BridgeError::UnknownMember { .. }));
}

#[test]
fn test_session_loss_is_fatal() {
    let (host, d) = dispatcher(LoopbackHost::new("Root").with_method("", "Ping", |_| Ok(0)));
    let root = resolve("Root", "");
    d.invoke(&root, "Ping", &mut []).unwrap();

    host.shutdown();
    let err = d.invoke(&root, "Ping", &mut []).unwrap_err();
    assert!(err.is_session_loss());
}

#[test]
fn test_invoke_value_returns_data() {
    let (_, d) = dispatcher(
        LoopbackHost::new("Root").with_method("Model", "IsLocked", |_| Ok(Variant::Bool(true))),
    );
    let value = d
        .invoke_value(&resolve("Root", "Model"), "IsLocked", &mut [])
        .unwrap();
    assert_eq!(value, Variant::Bool(true));
}

#[test]
fn test_concurrent_calls_share_dispatcher() {
    let (host, d) = dispatcher(LoopbackHost::new(SAP_ROOT).with_method("Counter", "Echo", |f| {
        let v = f.int(0)?;
        f.write(1, v * 2)?;
        Ok(0)
    }));
    let d = Arc::new(d);

    let workers: Vec<_> = (0..8)
        .map(|n| {
            let d = d.clone();
            std::thread::spawn(move || {
                let handle = resolve(SAP_ROOT, "Counter");
                for i in 0..50 {
                    let mut out: ByRef<i32> = ByRef::empty();
                    d.invoke(&handle, "Echo", &mut args![n * 100 + i, &mut out])
                        .unwrap();
                    assert_eq!(out.get(), (n * 100 + i) * 2);
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
    assert_eq!(host.calls().len(), 400);
}
