use std::collections::BTreeMap;
use std::fmt;

/// Handle to a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// Pending frame callbacks keyed by request order.
#[derive(Default)]
pub(super) struct FrameQueue {
	next: u64,
	pending: BTreeMap<u64, Box<dyn FnOnce()>>,
}

impl FrameQueue {
	pub(super) fn request(&mut self, callback: Box<dyn FnOnce()>) -> FrameId {
		let id = self.next;
		self.next += 1;
		self.pending.insert(id, callback);
		FrameId(id)
	}

	pub(super) fn cancel(&mut self, id: FrameId) -> bool {
		self.pending.remove(&id.0).is_some()
	}

	/// First id that belongs to the frame after the current one.
	pub(super) fn boundary(&self) -> u64 {
		self.next
	}

	pub(super) fn pop_due(&mut self, boundary: u64) -> Option<Box<dyn FnOnce()>> {
		let entry = self.pending.first_entry()?;
		if *entry.key() >= boundary {
			return None;
		}
		Some(entry.remove())
	}

	pub(super) fn len(&self) -> usize {
		self.pending.len()
	}
}

impl fmt::Debug for FrameQueue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrameQueue")
			.field("next", &self.next)
			.field("pending", &self.pending.keys().collect::<Vec<_>>())
			.finish()
	}
}
