//! Per-frame callback scheduling
use std::collections::VecDeque;

/// Opaque token for one requested frame, used only to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Schedules a one-shot callback for the next display frame.
///
/// When the frame arrives the owner calls
/// [`RenderSession::on_frame`](crate::RenderSession::on_frame) with the
/// handle returned here. `None` means no frame will arrive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler whose frames are delivered by calling [`fire`](Self::fire)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    requested: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending frame, as if the display had refreshed
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> impl Iterator<Item = &FrameHandle> {
        self.pending.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Total number of frames ever requested
    pub fn requested_count(&self) -> usize {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_fires_in_order() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame().unwrap();
        let b = scheduler.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(scheduler.fire(), Some(a));
        assert_eq!(scheduler.fire(), Some(b));
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.requested_count(), 2);
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.request_frame().unwrap();
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.cancelled(), &[handle]);
    }
}
