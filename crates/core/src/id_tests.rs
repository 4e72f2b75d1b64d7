// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

#[test]
fn job_id_hash_map_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(JobId::new("abc123"), 42);
    assert_eq!(map.get("abc123"), Some(&42));
}

#[test]
fn job_ids_sort_lexicographically() {
    let ids: BTreeSet<JobId> = ["b", "a", "c"].into_iter().map(JobId::from).collect();
    let ordered: Vec<&str> = ids.iter().map(JobId::as_str).collect();
    assert_eq!(ordered, vec!["a", "b", "c"]);
}

#[test]
fn job_id_joins_as_path_component() {
    let id = JobId::new("abc123");
    assert_eq!(Path::new("running").join(&id), Path::new("running/abc123"));
}

#[yare::parameterized(
    plain = { "abc123" },
    dashed = { "scan-2026-10-16" },
    dotted = { "job.v2" },
    hidden = { ".staging" },
)]
fn parse_accepts(name: &str) {
    assert_eq!(JobId::parse(name).unwrap(), name);
}

#[yare::parameterized(
    empty = { "", InvalidJobId::Empty },
    dot = { ".", InvalidJobId::Relative(".".to_string()) },
    dotdot = { "..", InvalidJobId::Relative("..".to_string()) },
    slash = { "a/b", InvalidJobId::Separator("a/b".to_string()) },
    nul = { "a\0b", InvalidJobId::Separator("a\0b".to_string()) },
)]
fn parse_rejects(name: &str, expected: InvalidJobId) {
    assert_eq!(JobId::parse(name).unwrap_err(), expected);
}

#[cfg(unix)]
#[test]
fn from_file_name_rejects_non_utf8() {
    use std::os::unix::ffi::OsStrExt;
    let raw = std::ffi::OsStr::from_bytes(b"job-\xff");
    assert!(matches!(JobId::from_file_name(raw), Err(InvalidJobId::NotUtf8(_))));
}

proptest::proptest! {
    #[test]
    fn parsed_ids_are_single_path_components(name in "[a-zA-Z0-9._-]{1,32}") {
        if let Ok(id) = JobId::parse(&name) {
            let joined = Path::new("running").join(&id);
            proptest::prop_assert_eq!(joined.parent(), Some(Path::new("running")));
        }
    }
}
