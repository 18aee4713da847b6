use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll, Waker};

use super::*;

#[derive(Clone, Default)]
struct FakeHandle(Rc<Cell<bool>>);

impl FakeHandle {
	fn aborted(&self) -> bool {
		self.0.get()
	}
}

impl Abort for FakeHandle {
	fn abort(&self) {
		self.0.set(true);
	}
}

fn item(id: &str) -> QueryKey {
	QueryKey::new(["complete_graphs", id])
}

/// Polls `future` once; the futures under test never wait on anything.
fn ready<F: Future>(future: F) -> F::Output {
	let mut cx = Context::from_waker(Waker::noop());
	match pin!(future).poll(&mut cx) {
		Poll::Ready(output) => output,
		Poll::Pending => panic!("future did not complete"),
	}
}

// =============================================================
// QueryKey
// =============================================================

#[test]
fn prefix_match_is_per_segment() {
	let root = QueryKey::new(["complete_graphs"]);
	assert!(item("a").starts_with(&root));
	assert!(item("a").starts_with(&item("a")));
	assert!(!QueryKey::new(["complete_graphs", "ab"]).starts_with(&item("a")));
	assert!(!root.starts_with(&item("a")));
}

#[test]
fn display_joins_segments() {
	assert_eq!(item("42").to_string(), "complete_graphs/42");
}

// =============================================================
// In-flight dedupe
// =============================================================

#[test]
fn second_start_for_same_key_is_refused() {
	let mut cache = QueryCache::new();
	assert!(cache.start(item("a"), FakeHandle::default()).is_some());
	assert!(cache.start(item("a"), FakeHandle::default()).is_none());
	assert!(cache.start(item("b"), FakeHandle::default()).is_some());
	assert!(cache.is_in_flight(&item("a")) && cache.is_in_flight(&item("b")));
}

#[test]
fn settle_frees_the_key() {
	let mut cache = QueryCache::new();
	let ticket = cache.start(item("a"), FakeHandle::default()).unwrap();
	assert!(cache.settle(&item("a"), ticket));
	assert!(!cache.is_in_flight(&item("a")));
	assert!(cache.start(item("a"), FakeHandle::default()).is_some());
}

#[test]
fn stale_ticket_does_not_settle_newer_request() {
	let mut cache = QueryCache::new();
	let old = cache.start(item("a"), FakeHandle::default()).unwrap();
	cache.cancel(&item("a"));
	let new = cache.start(item("a"), FakeHandle::default()).unwrap();
	assert_ne!(old, new);
	assert!(!cache.settle(&item("a"), old));
	assert!(cache.is_in_flight(&item("a")));
	assert!(cache.settle(&item("a"), new));
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn cancelling_an_item_aborts_only_that_item() {
	let mut cache = QueryCache::new();
	let (a, b) = (FakeHandle::default(), FakeHandle::default());
	cache.start(item("a"), a.clone());
	cache.start(item("b"), b.clone());

	assert_eq!(cache.cancel(&item("a")), 1);
	assert!(a.aborted());
	assert!(!b.aborted());
	assert!(!cache.is_in_flight(&item("a")));
	assert!(cache.is_in_flight(&item("b")));
}

#[test]
fn cancelling_a_root_aborts_everything_beneath() {
	let mut cache = QueryCache::new();
	let (a, b, other) = (FakeHandle::default(), FakeHandle::default(), FakeHandle::default());
	cache.start(item("a"), a.clone());
	cache.start(item("b"), b.clone());
	cache.start(QueryKey::new(["circulant_graphs", "a"]), other.clone());

	assert_eq!(cache.cancel(&QueryKey::new(["complete_graphs"])), 2);
	assert!(a.aborted() && b.aborted());
	assert!(!other.aborted());
}

#[test]
fn cancelling_with_nothing_in_flight_is_a_no_op() {
	let mut cache: QueryCache<FakeHandle> = QueryCache::new();
	assert_eq!(cache.cancel(&item("a")), 0);
}

#[test]
fn optional_handles_abort_when_present() {
	let handle = FakeHandle::default();
	Some(handle.clone()).abort();
	assert!(handle.aborted());
	None::<FakeHandle>.abort();
}

// =============================================================
// Invalidation
// =============================================================

#[test]
fn invalidating_root_changes_item_generations() {
	let mut cache: QueryCache<FakeHandle> = QueryCache::new();
	let root = QueryKey::new(["complete_graphs"]);
	let before = (cache.generation(&root), cache.generation(&item("a")));
	cache.invalidate(&root);
	assert_ne!(cache.generation(&root), before.0);
	assert_ne!(cache.generation(&item("a")), before.1);
}

#[test]
fn invalidating_one_kind_leaves_the_other() {
	let mut cache: QueryCache<FakeHandle> = QueryCache::new();
	let circulant = QueryKey::new(["circulant_graphs"]);
	let before = cache.generation(&circulant);
	cache.invalidate(&QueryKey::new(["complete_graphs"]));
	assert_eq!(cache.generation(&circulant), before);
}

// =============================================================
// QueryClient
// =============================================================

fn counted(client: QueryClient, key: QueryKey, runs: &Arc<AtomicUsize>) -> Memo<u64> {
	let runs = runs.clone();
	Memo::new(move |_| {
		runs.fetch_add(1, Ordering::SeqCst);
		client.generation(&key)
	})
}

#[test]
fn invalidation_reruns_only_watchers_under_the_key() {
	Owner::new().with(|| {
		let client = QueryClient::new();
		let [list_runs, item_runs, options_runs, other_runs]: [Arc<AtomicUsize>; 4] = Default::default();
		let list = counted(client, QueryKey::new(["complete_graphs"]), &list_runs);
		let row = counted(client, item("a"), &item_runs);
		let options = counted(client, QueryKey::new(["complete_graphs_options"]), &options_runs);
		let other = counted(client, QueryKey::new(["circulant_graphs"]), &other_runs);
		for memo in [list, row, options, other] {
			assert_eq!(memo.get_untracked(), 0);
		}

		client.invalidate(&QueryKey::new(["complete_graphs"]));

		assert_eq!(list.get_untracked(), 1);
		assert_eq!(row.get_untracked(), 1);
		assert_eq!(options.get_untracked(), 0);
		assert_eq!(other.get_untracked(), 0);
		assert_eq!(list_runs.load(Ordering::SeqCst), 2);
		assert_eq!(item_runs.load(Ordering::SeqCst), 2);
		assert_eq!(options_runs.load(Ordering::SeqCst), 1);
		assert_eq!(other_runs.load(Ordering::SeqCst), 1);
	});
}

#[test]
fn tracked_request_settles_with_its_result() {
	let client = QueryClient::new();
	let outcome = ready(client.track(item("a"), None, || async move {
		assert!(client.is_in_flight(&item("a")));
		Ok::<_, AppError>(7)
	}));
	assert_eq!(outcome, Some(Ok(7)));
	assert!(!client.is_in_flight(&item("a")));
}

#[test]
fn tracked_request_refuses_a_duplicate_while_pending() {
	let client = QueryClient::new();
	let outcome = ready(client.track(item("a"), None, || async move {
		let duplicate = client.track(item("a"), None, || async { Ok::<_, AppError>(2) }).await;
		assert_eq!(duplicate, None);
		Ok::<_, AppError>(1)
	}));
	assert_eq!(outcome, Some(Ok(1)));
}

#[test]
fn cancelling_while_pending_resolves_as_cancelled() {
	let client = QueryClient::new();
	let outcome = ready(client.track(item("a"), None, || async move {
		assert_eq!(client.cancel(&item("a")), 1);
		Ok::<_, AppError>(7)
	}));
	assert_eq!(outcome, Some(Err(AppError::Cancelled)));
	assert!(!client.is_in_flight(&item("a")));
}
