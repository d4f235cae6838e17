//! User-facing notices
//!
//! Fetch and mutation outcomes are reported as short toast messages. The
//! queue is shared by clones, so a table page and the toaster that renders
//! the messages can hold the same [`Notices`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
	/// An action completed
	Success,
	/// Neutral information
	Info,
	/// Degraded but usable
	Warning,
	/// An action failed
	Error,
}

impl fmt::Display for NoticeLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Success => "success",
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		})
	}
}

/// One toast message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	/// Severity
	pub level: NoticeLevel,
	/// Message text
	pub message: String,
}

/// Pending notices, oldest first
#[derive(Debug, Clone, Default)]
pub struct Notices {
	queue: Rc<RefCell<VecDeque<Notice>>>,
}

impl Notices {
	/// Create an empty queue
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue a notice
	pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
		self.queue.borrow_mut().push_back(Notice {
			level,
			message: message.into(),
		});
	}

	/// Queue a success notice
	pub fn success(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Success, message);
	}

	/// Queue an informational notice
	pub fn info(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Info, message);
	}

	/// Queue a warning notice
	pub fn warning(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Warning, message);
	}

	/// Queue an error notice
	pub fn error(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Error, message);
	}

	/// Take every pending notice
	pub fn drain(&self) -> Vec<Notice> {
		self.queue.borrow_mut().drain(..).collect()
	}

	/// Number of pending notices
	pub fn len(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Check if nothing is pending
	pub fn is_empty(&self) -> bool {
		self.queue.borrow().is_empty()
	}
}
