//! Poll-driven executor for background persistence.
//!
//! The game loop calls [`TaskExecutor::poll`] once per iteration. Tasks never
//! block the loop; a task waiting on the file store worker simply stays
//! pending until a later poll observes the reply.

use std::{
    fmt,
    future::Future,
    pin::{Pin, pin},
    sync::Arc,
    task::{Context, Poll, Wake, Waker},
    thread::{self, Thread},
    time::Duration,
};

// Upper bound on a single park; wake-ups that race the park are picked up on
// the next round.
const PARK_TIMEOUT: Duration = Duration::from_millis(50);

/// Single-threaded executor for `!Send` futures.
#[derive(Default)]
pub struct TaskExecutor {
    tasks: Vec<Task>,
}

impl fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl TaskExecutor {
    /// Creates an executor with no tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no tasks are running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the number of running tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no tasks are running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Spawns a task. It first runs on the next [`TaskExecutor::poll`].
    pub fn spawn(&mut self, future: impl Future<Output = ()> + 'static) {
        self.tasks.push(Task {
            future: Box::pin(future),
        });
    }

    /// Polls every task once, dropping those that finished.
    pub fn poll(&mut self) {
        self.poll_with(Waker::noop());
    }

    fn poll_with(&mut self, waker: &Waker) {
        let mut cx = Context::from_waker(waker);
        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            if task.future.as_mut().poll(&mut cx).is_ready() {
                self.tasks.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Polls until every task has finished, parking the thread in between.
    ///
    /// Used on shutdown so that pending writes are not lost.
    pub fn run_until_idle(&mut self) {
        let waker = thread_waker();
        while !self.is_idle() {
            self.poll_with(&waker);
            if !self.is_idle() {
                thread::park_timeout(PARK_TIMEOUT);
            }
        }
    }
}

struct Task {
    future: Pin<Box<dyn Future<Output = ()>>>,
}

/// Runs a future to completion on the current thread.
pub fn block_on<F: Future>(future: F) -> F::Output {
    let waker = thread_waker();
    let mut cx = Context::from_waker(&waker);
    let mut future = pin!(future);
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
        thread::park_timeout(PARK_TIMEOUT);
    }
}

struct ThreadWaker(Thread);

impl Wake for ThreadWaker {
    fn wake(self: Arc<Self>) {
        self.0.unpark();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.unpark();
    }
}

fn thread_waker() -> Waker {
    Waker::from(Arc::new(ThreadWaker(thread::current())))
}
