#![no_main]

//! Fuzz target for API payload handling
//!
//! Arbitrary bytes decoded as commit details must never panic, and every
//! file contribution must be computable.

use libfuzzer_sys::fuzz_target;

use langtally::commits::commit_contributions;
use langtally::models::{CommitDetail, CommitSummary, Repository};
use langtally::totals::CommitTotals;

fuzz_target!(|data: &[u8]| {
    if let Ok(detail) = serde_json::from_slice::<CommitDetail>(data) {
        let mut totals = CommitTotals::new();
        totals.record_commit(commit_contributions(&detail));
    }
    let _: Result<Vec<CommitSummary>, _> = serde_json::from_slice(data);
    let _: Result<Vec<Repository>, _> = serde_json::from_slice(data);
});
