//! Transient success/error messages shown after a mutation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::prelude::*;

/// How long a notice stays up unless closed.
pub const AUTO_HIDE: Duration = Duration::from_secs(6);

static NEXT_NOTICE: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	Success,
	Error,
}

impl Severity {
	fn class(self) -> &'static str {
		match self {
			Self::Success => "notice notice--success",
			Self::Error => "notice notice--error",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
	/// Distinguishes notices so a stale timer cannot hide a newer one.
	pub serial: u64,
	pub severity: Severity,
	pub title: String,
	pub text: String,
}

impl Notice {
	fn new(severity: Severity, title: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			serial: NEXT_NOTICE.fetch_add(1, Ordering::Relaxed),
			severity,
			title: title.into(),
			text: text.into(),
		}
	}

	pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
		Self::new(Severity::Success, title, text)
	}

	pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
		Self::new(Severity::Error, title, text)
	}
}

/// Hide `notice` if it still shows the message with `serial`.
pub fn dismiss(notice: RwSignal<Option<Notice>>, serial: u64) {
	notice.update(|current| {
		if current.as_ref().is_some_and(|n| n.serial == serial) {
			*current = None;
		}
	});
}

/// Bottom-left toast bound to `notice`.
#[component]
pub fn Snackbar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
	Effect::new(move |_| {
		if let Some(serial) = notice.with(|n| n.as_ref().map(|n| n.serial)) {
			set_timeout(move || dismiss(notice, serial), AUTO_HIDE);
		}
	});

	move || {
		notice.get().map(|n| {
			let serial = n.serial;
			view! {
				<div class=n.severity.class() role="alert">
					<div class="notice__body">
						<strong class="notice__title">{n.title}</strong>
						<p class="notice__text">{n.text}</p>
					</div>
					<button
						class="notice__close"
						aria-label="close"
						on:click=move |_| dismiss(notice, serial)
					>
						"×"
					</button>
				</div>
			}
		})
	}
}

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;
