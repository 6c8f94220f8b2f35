//! Bounded worker pool around non-reentrant backends.
//!
//! Each worker thread owns its engine outright; callers never see an engine
//! handle. Work is handed out over one shared job queue and every job carries
//! its own reply channel, so `process` always returns the caller's result.

use std::io;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Sender};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("backend pool is closed")]
    Closed,

    #[error("backend worker exited before replying")]
    WorkerLost,

    #[error("backend panicked while handling the request")]
    WorkerPanicked,

    #[error("failed to spawn backend worker: {0}")]
    Spawn(#[source] io::Error),
}

struct Job<Req, Resp> {
    request: Req,
    reply: Sender<Result<Resp, PoolError>>,
}

pub struct BackendPool<Req, Resp> {
    name: String,
    jobs: Option<Sender<Job<Req, Resp>>>,
    workers: Vec<JoinHandle<()>>,
}

/// Worker count for the pools: fully serialized unless `concurrent`.
pub fn pool_size(concurrent: bool) -> NonZeroUsize {
    if concurrent {
        thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
    } else {
        NonZeroUsize::MIN
    }
}

impl<Req, Resp> BackendPool<Req, Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    /// Spawn `size` workers. `make_worker(i)` builds the work function owned
    /// by worker `i`; it is called on the current thread.
    pub fn new<F, W>(name: &str, size: NonZeroUsize, mut make_worker: F) -> Result<Self, PoolError>
    where
        F: FnMut(usize) -> W,
        W: FnMut(Req) -> Resp + Send + 'static,
    {
        let (tx, rx) = unbounded::<Job<Req, Resp>>();
        let mut workers = Vec::with_capacity(size.get());

        for index in 0..size.get() {
            let rx = rx.clone();
            let mut work = make_worker(index);
            let thread_name = format!("{name}-{index}");
            let handle = thread::Builder::new()
                .name(thread_name.clone())
                .spawn(move || {
                    while let Ok(Job { request, reply }) = rx.recv() {
                        // A panic fails this request only; the worker stays up.
                        let result = panic::catch_unwind(AssertUnwindSafe(|| work(request)))
                            .map_err(|_| {
                                warn!(worker = %thread_name, "backend panicked");
                                PoolError::WorkerPanicked
                            });
                        // The caller may have gone away; nothing to do then.
                        let _ = reply.send(result);
                    }
                })
                .map_err(PoolError::Spawn)?;
            workers.push(handle);
        }

        debug!(pool = name, size = size.get(), "backend pool started");
        Ok(Self {
            name: name.to_string(),
            jobs: Some(tx),
            workers,
        })
    }

    /// Submit one request and block until its result is ready.
    pub fn process(&self, request: Req) -> Result<Resp, PoolError> {
        let jobs = self.jobs.as_ref().ok_or(PoolError::Closed)?;
        let (reply_tx, reply_rx) = bounded(1);
        jobs.send(Job {
            request,
            reply: reply_tx,
        })
        .map_err(|_| PoolError::WorkerLost)?;
        reply_rx.recv().map_err(|_| PoolError::WorkerLost)?
    }
}

impl<Req, Resp> BackendPool<Req, Resp> {
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn is_closed(&self) -> bool {
        self.jobs.is_none()
    }

    /// Stop accepting work, let queued jobs finish and join every worker,
    /// dropping the engines they own.
    pub fn close(&mut self) {
        if self.jobs.take().is_none() {
            return;
        }
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        debug!(pool = %self.name, "backend pool closed");
    }
}

impl<Req, Resp> Drop for BackendPool<Req, Resp> {
    fn drop(&mut self) {
        self.close();
    }
}
