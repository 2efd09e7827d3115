//! Common test utilities: session setup and a stand-in placement service.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashSet;

use labelview::sync::{Placement, PlacementRequest, PlacementResponse};
use labelview::{LabelSession, Mutation, SyncOutcome};

// Re-export fixtures for convenience
pub use super::fixtures::*;

/// A session on a `columns × rows` sheet with `n` codes loaded.
#[must_use]
pub fn session(columns: u32, rows: u32, n: usize) -> LabelSession {
    let mut session = LabelSession::new(SheetBuilder::new().grid(columns, rows).build()).unwrap();
    session.load_codes(codes(n)).unwrap();
    session
}

/// Sequential placement: codes fill slots from the start index onwards,
/// stepping over skipped slots. Enough of the real service for tests.
#[must_use]
pub fn place(request: &PlacementRequest, per_page: u32) -> PlacementResponse {
    let skips: HashSet<u32> = request.skip_indices.iter().copied().collect();
    let mut index = request.start_index;
    let mut placed = Vec::with_capacity(request.codes.len());
    for code in &request.codes {
        while skips.contains(&index) {
            index += 1;
        }
        placed.push(Placement {
            index,
            code: code.clone(),
        });
        index += 1;
    }
    let pages = placed.last().map_or(1, |p| p.index / per_page + 1);
    PlacementResponse { pages, placed }
}

/// Run a mutation's sync call through [`place`] and apply the answer.
pub fn sync(session: &mut LabelSession, mutation: Mutation) -> SyncOutcome {
    let call = mutation.sync.expect("mutation should issue a sync call");
    let response = place(&call.request, session.grid().per_page());
    session.apply_sync(call.ticket, &response)
}
