//! Off-screen print jobs requested by the page.

use std::collections::HashMap;

use embedchat_common::SessionError;
use tracing::{debug, warn};

use crate::control::{ControlMessage, ControlQueue};

/// A loaded, invisible document ready for the platform print service.
pub trait PrintSurface {
    fn print(&self) -> Result<(), SessionError>;
}

/// Creates print surfaces. `on_ready` must be called once the document has
/// finished loading; it may be called from any thread.
pub trait PrintSurfaceFactory {
    fn create(
        &self,
        url: &str,
        data: &str,
        on_ready: Box<dyn Fn() + Send + Sync>,
    ) -> Result<Box<dyn PrintSurface>, SessionError>;
}

/// Owns in-flight print surfaces until their document is ready.
pub struct PrintSpooler {
    factory: Option<Box<dyn PrintSurfaceFactory>>,
    jobs: HashMap<u64, Box<dyn PrintSurface>>,
    next_job: u64,
    queue: ControlQueue,
}

impl PrintSpooler {
    pub fn new(factory: Option<Box<dyn PrintSurfaceFactory>>, queue: ControlQueue) -> Self {
        Self {
            factory,
            jobs: HashMap::new(),
            next_job: 0,
            queue,
        }
    }

    /// Start a job. Returns its id, or `None` if printing is unavailable.
    pub fn start(&mut self, url: &str, data: &str) -> Option<u64> {
        let Some(factory) = &self.factory else {
            warn!(url, "print requested but no print surfaces configured");
            return None;
        };

        let job = self.next_job;
        self.next_job += 1;

        let queue = self.queue.clone();
        let on_ready = Box::new(move || queue.post(ControlMessage::PrintReady { job }));

        match factory.create(url, data, on_ready) {
            Ok(surface) => {
                debug!(job, url, "print job started");
                self.jobs.insert(job, surface);
                Some(job)
            }
            Err(e) => {
                warn!(job, url, error = %e, "could not create print surface");
                None
            }
        }
    }

    /// Submit a ready job and release its surface. Unknown or already
    /// completed jobs are ignored.
    pub fn complete(&mut self, job: u64) {
        let Some(surface) = self.jobs.remove(&job) else {
            debug!(job, "print ready for unknown job");
            return;
        };
        match surface.print() {
            Ok(()) => debug!(job, "print job submitted"),
            Err(e) => warn!(job, error = %e, "print failed"),
        }
    }

    pub fn pending(&self) -> usize {
        self.jobs.len()
    }
}
