//! The control queue: the single hand-off point from foreign threads to the
//! control (UI) thread.
//!
//! Bridge calls, page-load callbacks and secret resolutions may arrive on
//! any thread. They post a [`ControlMessage`] here; the host drains the queue
//! on its control thread through `ChatSession::pump`, in the order the
//! messages were posted.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A host callback to run on the control thread.
pub type Task = Box<dyn FnOnce() + Send>;

/// Work that needs the attached chat surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// Evaluate a script in the page, ignoring any result.
    EvaluateScript(String),
    /// Render `data` (with base `url`) off screen and print it.
    Print { url: String, data: String },
}

pub enum ControlMessage {
    Invoke(Task),
    Surface(SurfaceCommand),
    PageFinished { url: String },
    LoadFailed { url: String, description: String },
    PrintReady { job: u64 },
}

impl fmt::Debug for ControlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke(_) => f.write_str("Invoke(..)"),
            Self::Surface(cmd) => f.debug_tuple("Surface").field(cmd).finish(),
            Self::PageFinished { url } => f.debug_struct("PageFinished").field("url", url).finish(),
            Self::LoadFailed { url, description } => f
                .debug_struct("LoadFailed")
                .field("url", url)
                .field("description", description)
                .finish(),
            Self::PrintReady { job } => f.debug_struct("PrintReady").field("job", job).finish(),
        }
    }
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// FIFO of control messages. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct ControlQueue {
    messages: Arc<Mutex<VecDeque<ControlMessage>>>,
    waker: Option<Waker>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that calls `waker` after every post, so an event loop can be
    /// woken to drain it.
    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            messages: Arc::default(),
            waker: Some(Arc::new(waker)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ControlMessage>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn post(&self, message: ControlMessage) {
        self.lock().push_back(message);
        if let Some(wake) = &self.waker {
            wake();
        }
    }

    /// Post a closure to run on the control thread.
    pub fn invoke(&self, task: impl FnOnce() + Send + 'static) {
        self.post(ControlMessage::Invoke(Box::new(task)));
    }

    /// Take every pending message, oldest first.
    pub fn drain(&self) -> Vec<ControlMessage> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ControlQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlQueue")
            .field("pending", &self.len())
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn drain_preserves_post_order() {
        let queue = ControlQueue::new();
        queue.post(ControlMessage::PageFinished { url: "a".into() });
        queue.post(ControlMessage::PrintReady { job: 1 });
        queue.post(ControlMessage::Surface(SurfaceCommand::EvaluateScript("x()".into())));

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert!(matches!(&drained[0], ControlMessage::PageFinished { url } if url == "a"));
        assert!(matches!(drained[1], ControlMessage::PrintReady { job: 1 }));
        assert!(matches!(&drained[2], ControlMessage::Surface(SurfaceCommand::EvaluateScript(s)) if s == "x()"));
        assert!(queue.is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let queue = ControlQueue::new();
        let clone = queue.clone();
        clone.invoke(|| {});
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn waker_fires_per_post() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let queue = ControlQueue::with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        queue.invoke(|| {});
        queue.post(ControlMessage::PrintReady { job: 0 });
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn posts_from_other_threads_arrive() {
        let queue = ControlQueue::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let q = queue.clone();
                std::thread::spawn(move || q.post(ControlMessage::PrintReady { job: i }))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(queue.drain().len(), 4);
    }

    #[test]
    fn poisoned_queue_still_delivers() {
        let queue = ControlQueue::new();
        let q = queue.clone();
        let _ = std::thread::spawn(move || {
            let _guard = q.messages.lock().unwrap();
            panic!("poison the queue lock");
        })
        .join();
        assert!(queue.messages.is_poisoned());

        queue.post(ControlMessage::PrintReady { job: 7 });
        assert_eq!(queue.len(), 1);
        let drained = queue.drain();
        assert!(matches!(drained.as_slice(), [ControlMessage::PrintReady { job: 7 }]));
        assert!(queue.is_empty());
    }
}
