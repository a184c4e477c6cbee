//! MessagePack export

use stepwise_dp::LcsTrace;
use stepwise_foundation::ErrorKind;
use stepwise_heap::SkewTrace;
use stepwise_runtime::load_from_file;

use crate::{args, manual_session, temp_path};

#[test]
fn exported_traces_load_back() {
    let mut session = manual_session();
    session.trigger_named("lcs", &args("a=ABCBDAB b=BDCABA")).unwrap();
    let path = temp_path("lcs.msgpack");

    let written = session.export(&path).unwrap();
    assert!(written > 0);

    let trace: LcsTrace = load_from_file(&path).unwrap();
    assert_eq!(trace.len(), session.trace_len());
    assert_eq!(trace.label(), "lcs");
    assert_eq!(trace.last().unwrap().result_so_far().length, 4);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn heap_traces_export_too() {
    let mut session = manual_session();
    session.trigger_named("skew.meld", &args("5,2,8")).unwrap();
    let path = temp_path("skew.msgpack");

    session.export(&path).unwrap();
    let trace: SkewTrace = load_from_file(&path).unwrap();
    assert_eq!(trace.label(), "skew.meld");
    assert_eq!(trace.last().unwrap().result_so_far().min, Some(2));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn export_without_a_trace_is_rejected() {
    let session = manual_session();
    let err = session.export(temp_path("none.msgpack")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
}

#[test]
fn export_to_a_missing_directory_is_an_io_error() {
    let mut session = manual_session();
    session.trigger_named("house-robber", &args("1,2")).unwrap();
    let path = temp_path("missing").join("nested").join("trace.msgpack");

    let err = session.export(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
