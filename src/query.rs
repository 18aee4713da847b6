//! Keyed bookkeeping for in-flight requests and cached list freshness.
//!
//! [`QueryCache`] is plain data so the dedupe/cancel/invalidate rules can be
//! tested natively. [`QueryClient`] wraps it for the reactive tree: it owns
//! the `AbortController`s and notifies resources when a key is invalidated.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use leptos::prelude::*;
use log::debug;
use web_sys::{AbortController, AbortSignal};

use crate::error::AppError;

/// Hierarchical cache key, e.g. `complete_graphs/1b9e...`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
	pub fn new<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(segments.into_iter().map(Into::into).collect())
	}

	pub fn child(&self, segment: impl Into<String>) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment.into());
		Self(segments)
	}

	/// Whole-segment prefix match; `a/bc` does not start with `a/b`.
	pub fn starts_with(&self, prefix: &QueryKey) -> bool {
		self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
	}
}

impl fmt::Display for QueryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join("/"))
	}
}

/// Something that can stop an in-flight request.
pub trait Abort {
	fn abort(&self);
}

impl Abort for AbortController {
	fn abort(&self) {
		AbortController::abort(self);
	}
}

impl<H: Abort> Abort for Option<H> {
	fn abort(&self) {
		if let Some(handle) = self {
			handle.abort();
		}
	}
}

/// Identifies one started request so only its own completion can settle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

struct InFlight<H> {
	ticket: Ticket,
	handle: H,
}

pub struct QueryCache<H> {
	in_flight: HashMap<QueryKey, InFlight<H>>,
	generations: HashMap<QueryKey, u64>,
	next_ticket: u64,
}

impl<H> Default for QueryCache<H> {
	fn default() -> Self {
		Self {
			in_flight: HashMap::new(),
			generations: HashMap::new(),
			next_ticket: 0,
		}
	}
}

impl<H: Abort> QueryCache<H> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a request for `key`. Returns `None` when one is already in
	/// flight; the caller should not send a duplicate.
	pub fn start(&mut self, key: QueryKey, handle: H) -> Option<Ticket> {
		if self.in_flight.contains_key(&key) {
			return None;
		}
		self.next_ticket += 1;
		let ticket = Ticket(self.next_ticket);
		self.in_flight.insert(key, InFlight { ticket, handle });
		Some(ticket)
	}

	pub fn is_in_flight(&self, key: &QueryKey) -> bool {
		self.in_flight.contains_key(key)
	}

	/// Mark a request finished. Stale tickets are ignored.
	pub fn settle(&mut self, key: &QueryKey, ticket: Ticket) -> bool {
		match self.in_flight.get(key) {
			Some(entry) if entry.ticket == ticket => {
				self.in_flight.remove(key);
				true
			}
			_ => false,
		}
	}

	/// Abort and forget every in-flight request under `prefix`.
	pub fn cancel(&mut self, prefix: &QueryKey) -> usize {
		let keys: Vec<QueryKey> = self
			.in_flight
			.keys()
			.filter(|key| key.starts_with(prefix))
			.cloned()
			.collect();
		for key in &keys {
			if let Some(entry) = self.in_flight.remove(key) {
				entry.handle.abort();
			}
		}
		keys.len()
	}

	/// Mark everything under `prefix` stale.
	pub fn invalidate(&mut self, prefix: &QueryKey) {
		*self.generations.entry(prefix.clone()).or_default() += 1;
	}

	/// Changes whenever `key` or any of its prefixes is invalidated.
	pub fn generation(&self, key: &QueryKey) -> u64 {
		self.generations
			.iter()
			.filter(|(prefix, _)| key.starts_with(prefix))
			.map(|(_, generation)| generation)
			.sum()
	}
}

/// Reactive handle to the shared [`QueryCache`], provided through context.
///
/// Each key that a resource reads through [`Self::generation`] gets its own
/// trigger, so invalidating one key only reruns the resources under it.
#[derive(Clone, Copy)]
pub struct QueryClient {
	cache: StoredValue<QueryCache<Option<AbortController>>, LocalStorage>,
	watchers: StoredValue<HashMap<QueryKey, ArcTrigger>, LocalStorage>,
}

impl QueryClient {
	pub fn new() -> Self {
		Self {
			cache: StoredValue::new_local(QueryCache::new()),
			watchers: StoredValue::new_local(HashMap::new()),
		}
	}

	/// Current generation of `key`, tracked so resources refetch on invalidation.
	pub fn generation(&self, key: &QueryKey) -> u64 {
		let trigger = self
			.watchers
			.try_update_value(|watchers| watchers.entry(key.clone()).or_insert_with(ArcTrigger::new).clone());
		if let Some(trigger) = trigger {
			trigger.track();
		}
		self.cache.with_value(|cache| cache.generation(key))
	}

	/// Bump `key` and notify the resources watching it or anything beneath it.
	pub fn invalidate(&self, key: &QueryKey) {
		debug!("invalidate {key}");
		self.cache.update_value(|cache| cache.invalidate(key));
		let affected: Vec<ArcTrigger> = self.watchers.with_value(|watchers| {
			watchers
				.iter()
				.filter(|(watched, _)| watched.starts_with(key))
				.map(|(_, trigger)| trigger.clone())
				.collect()
		});
		for trigger in affected {
			trigger.notify();
		}
	}

	pub fn is_in_flight(&self, key: &QueryKey) -> bool {
		self.cache.with_value(|cache| cache.is_in_flight(key))
	}

	/// Abort in-flight requests under `key`.
	pub fn cancel(&self, key: &QueryKey) -> usize {
		let cancelled = self
			.cache
			.try_update_value(|cache| cache.cancel(key))
			.unwrap_or(0);
		if cancelled > 0 {
			debug!("cancelled {cancelled} request(s) under {key}");
		}
		cancelled
	}

	/// Run `fetch` under `key` with an abort signal tied to [`Self::cancel`].
	///
	/// Returns `None` without calling `fetch` when the key is already in flight.
	pub async fn fetch<T, F, Fut>(self, key: QueryKey, fetch: F) -> Option<Result<T, AppError>>
	where
		F: FnOnce(Option<AbortSignal>) -> Fut,
		Fut: Future<Output = Result<T, AppError>>,
	{
		let controller = AbortController::new().ok();
		let signal = controller.as_ref().map(AbortController::signal);
		self.track(key, controller, move || fetch(signal)).await
	}

	/// Run the request built by `start` while `handle` sits in the cache.
	///
	/// A request cancelled while pending resolves to [`AppError::Cancelled`]
	/// whatever it returned, so callers never apply a result nobody waits for.
	pub(crate) async fn track<T, F, Fut>(
		self,
		key: QueryKey,
		handle: Option<AbortController>,
		start: F,
	) -> Option<Result<T, AppError>>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T, AppError>>,
	{
		let ticket = self
			.cache
			.try_update_value(|cache| cache.start(key.clone(), handle))
			.flatten();
		let Some(ticket) = ticket else {
			debug!("{key} already in flight");
			return None;
		};

		let result = start().await;
		let settled = self
			.cache
			.try_update_value(|cache| cache.settle(&key, ticket))
			.unwrap_or(false);
		if !settled {
			debug!("{key} was cancelled while pending");
			return Some(Err(AppError::Cancelled));
		}
		Some(result)
	}
}

impl Default for QueryClient {
	fn default() -> Self {
		Self::new()
	}
}

/// Make a fresh [`QueryClient`] available to the component tree.
pub fn provide_query_client() -> QueryClient {
	let client = QueryClient::new();
	provide_context(client);
	client
}

pub fn use_query_client() -> QueryClient {
	use_context::<QueryClient>().unwrap_or_else(provide_query_client)
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
