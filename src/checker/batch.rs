// src/checker/batch.rs
// =============================================================================
// Runs a UrlChecker over a whole bookmark set in fixed-size batches.
//
// How a run goes:
// 1. Every bookmark goes back to Pending (old verdicts are dropped)
// 2. The bookmarks are cut into consecutive batches (5 by default)
// 3. For each batch, in order:
//    - mark its bookmarks Checking
//    - probe all of them concurrently and wait for every probe to finish
//    - merge the results back into the set by id
// 4. When the last batch is merged, every bookmark is Valid or Invalid
//
// So at most `batch_size` requests are ever in flight, and a batch never
// starts while the previous one still has a probe outstanding.
//
// Rust concepts:
// - join_all: wait for a group of futures, like Promise.all()
// - chunks(): split a slice into consecutive sub-slices
// - FnMut callbacks: let the caller observe progress without shared state
// =============================================================================

use super::UrlChecker;
use crate::bookmark::{Bookmark, BookmarkSet, BookmarkStatus, CheckSummary};
use futures::future::join_all;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Progress notifications emitted during a run
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// The run is about to start
    Started { total: usize, batches: usize },
    /// `ids` were just marked Checking; `bookmarks` is the whole set as it
    /// stands right after that update
    BatchStarted {
        index: usize,
        batches: usize,
        ids: &'a [String],
        bookmarks: &'a [Bookmark],
    },
    /// Every probe of the batch has resolved; `results` are about to be merged
    BatchFinished {
        index: usize,
        batches: usize,
        results: &'a [Bookmark],
    },
    /// All batches are merged
    Finished { summary: CheckSummary },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub batches: usize,
    pub summary: CheckSummary,
    pub elapsed: Duration,
}

pub struct BatchOrchestrator {
    checker: Box<dyn UrlChecker>,
    batch_size: usize,
}

impl BatchOrchestrator {
    // A batch size of 0 would never make progress, so it is bumped to 1
    pub fn new(checker: Box<dyn UrlChecker>, batch_size: usize) -> Self {
        BatchOrchestrator {
            checker,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    // Checks every bookmark in `set`
    //
    // The set is borrowed mutably for the whole run, so nothing else can
    // replace it underneath us. Writes still carry the generation the run
    // started with; BookmarkSet drops them if it was reloaded anyway.
    pub async fn run_check<F>(&self, set: &mut BookmarkSet, mut on_event: F) -> RunReport
    where
        F: FnMut(RunEvent<'_>),
    {
        let started = Instant::now();
        let generation = set.generation();

        set.reset_statuses(generation);
        let snapshot: Vec<Bookmark> = set.bookmarks().to_vec();
        let batches = snapshot.len().div_ceil(self.batch_size);

        info!(
            total = snapshot.len(),
            batches,
            batch_size = self.batch_size,
            "starting check run"
        );
        on_event(RunEvent::Started {
            total: snapshot.len(),
            batches,
        });

        for (index, batch) in snapshot.chunks(self.batch_size).enumerate() {
            let ids: Vec<String> = batch.iter().map(|b| b.id.clone()).collect();

            if !set.mark_checking(generation, &ids) {
                warn!("bookmark set was replaced during the run, stopping");
                break;
            }
            on_event(RunEvent::BatchStarted {
                index,
                batches,
                ids: &ids,
                bookmarks: set.bookmarks(),
            });

            // All probes of this batch run concurrently; the await is the
            // barrier before the next batch
            let results = join_all(batch.iter().map(|bookmark| self.check_one(bookmark))).await;

            let invalid = results
                .iter()
                .filter(|b| b.status == BookmarkStatus::Invalid)
                .count();
            debug!(batch = index + 1, batches, invalid, "batch finished");

            on_event(RunEvent::BatchFinished {
                index,
                batches,
                results: &results,
            });
            set.merge(generation, results);
        }

        let summary = set.summary();
        info!(
            valid = summary.valid,
            invalid = summary.invalid,
            "check run complete"
        );
        on_event(RunEvent::Finished { summary });

        RunReport {
            batches,
            summary,
            elapsed: started.elapsed(),
        }
    }

    // Probes one bookmark and returns its checked copy
    //
    // A checker error (e.g. the remote service is down) still produces an
    // Invalid bookmark so the run can carry on with the next one.
    async fn check_one(&self, bookmark: &Bookmark) -> Bookmark {
        let mut checked = bookmark.clone();

        match self.checker.check(&bookmark.url).await {
            Ok(outcome) => outcome.apply_to(&mut checked),
            Err(e) => {
                warn!(url = %bookmark.url, error = %e, "checker failed");
                checked.status = BookmarkStatus::Invalid;
                checked.status_code = None;
                checked.error_message = Some(format!("Check failed: {}", e));
            }
        }

        checked
    }
}
