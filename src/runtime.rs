//! Runtime abstraction layer for async operations
//!
//! Selection and reset requests are fire-and-forget from the UI's point of
//! view. This module lets callers spawn them without caring which executor
//! runs them: Tokio when the `tokio-runtime` feature is on, otherwise a
//! dedicated thread driving the future with `futures::executor`.

use crate::prelude::{Arc, Future, Pin};
use std::sync::atomic::{AtomicBool, Ordering};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task. Executors that can't cancel just let it run out.
    fn cancel(&self);
}

/// Spawns a future on the global runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::runtime::Handle;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner.
        ///
        /// Spawns onto the ambient runtime when called from inside one,
        /// otherwise onto the handle it was built with.
        pub struct TokioSpawner {
            handle: Option<Handle>,
        }

        impl TokioSpawner {
            pub fn new() -> Self {
                Self { handle: None }
            }

            pub fn with_handle(handle: Handle) -> Self {
                Self {
                    handle: Some(handle),
                }
            }

            fn target(&self) -> Option<Handle> {
                Handle::try_current().ok().or_else(|| self.handle.clone())
            }
        }

        impl Default for TokioSpawner {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                match self.target() {
                    Some(handle) => Box::new(TokioHandle(handle.spawn(future))),
                    None => {
                        log::debug!("no tokio runtime in scope, running task on a thread");
                        super::thread_impl::ThreadSpawner.spawn_boxed(future)
                    }
                }
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }

    pub mod thread_impl {
        use super::*;

        /// Runs each future to completion on its own thread
        pub struct ThreadSpawner;

        impl AsyncSpawner for ThreadSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let finished = Arc::new(AtomicBool::new(false));
                let done = finished.clone();

                let spawned = std::thread::Builder::new()
                    .name("worldview-task".to_string())
                    .spawn(move || {
                        futures::executor::block_on(future);
                        done.store(true, Ordering::SeqCst);
                    });

                if let Err(e) = spawned {
                    log::error!("failed to start task thread: {}", e);
                    finished.store(true, Ordering::SeqCst);
                }

                Box::new(ThreadHandle { finished })
            }
        }

        struct ThreadHandle {
            finished: Arc<AtomicBool>,
        }

        impl AsyncHandle for ThreadHandle {
            fn is_finished(&self) -> bool {
                self.finished.load(Ordering::SeqCst)
            }

            fn cancel(&self) {
                // threads run to completion
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner.
///
/// Only the first call has any effect; returns whether this one did.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) -> bool {
    let installed = RUNTIME.set(spawner).is_ok();
    if !installed {
        log::debug!("runtime already initialized, keeping the existing spawner");
    }
    installed
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| {
            #[cfg(feature = "tokio-runtime")]
            {
                Box::new(spawners::tokio_impl::TokioSpawner::new())
            }

            #[cfg(not(feature = "tokio-runtime"))]
            {
                Box::new(spawners::thread_impl::ThreadSpawner)
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(Duration::from_millis(10)).await;
        });

        // Should not be finished immediately
        assert!(!handle.is_finished());

        ::tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[test]
    fn test_thread_spawner() {
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = spawners::thread_impl::ThreadSpawner.spawn_boxed(Box::pin(async move {
            let _ = tx.send(42);
        }));

        assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok(42));
        for _ in 0..100 {
            if handle.is_finished() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.is_finished());
    }
}
