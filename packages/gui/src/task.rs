//! Handing work off the GUI thread and results back onto it.
//!
//! Widget state is only ever touched on the GUI thread. Background work
//! therefore never gets a reference to it: instead, when the work finishes,
//! a completion closure is sent down a channel, and the GUI thread runs
//! whatever completions have arrived once per frame. Completions run in the
//! order their work finished, not the order it was started.
//!
//! Failures, including panics, are caught where the work runs and turned
//! into a `TaskFailure` before they get anywhere near the GUI thread.

use crate::util_abort_handle::{
    AbortHandle,
    AbortGuard,
};
use std::{
    any::Any,
    error::Error,
    fmt::{self, Formatter, Display},
    future::Future,
    io,
    panic::{
        catch_unwind,
        AssertUnwindSafe,
    },
    sync::{
        Arc,
        atomic::{
            AtomicBool,
            Ordering,
        },
    },
    thread,
};
use crossbeam_channel::{
    Sender,
    Receiver,
    unbounded,
};
use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    task::JoinError,
};


/// Closure to be run on the GUI thread against its state.
pub type Completion<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;


// ==== failure ====

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The work returned an error.
    Error,
    /// The work panicked.
    Panic,
    /// The work noticed it was aborted and stopped.
    Aborted,
}

/// Why a background task didn't produce a value, with a message fit to show
/// the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn new<M: Into<String>>(kind: FailureKind, message: M) -> Self {
        TaskFailure {
            kind,
            message: message.into(),
        }
    }

    pub fn aborted() -> Self {
        TaskFailure::new(FailureKind::Aborted, "cancelled")
    }

    pub fn is_aborted(&self) -> bool {
        self.kind == FailureKind::Aborted
    }

    /// Convert a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_owned()
        };
        TaskFailure::new(FailureKind::Panic, message)
    }

    fn from_join_error(e: JoinError) -> Self {
        if e.is_panic() {
            TaskFailure::from_panic(e.into_panic())
        } else {
            TaskFailure::aborted()
        }
    }
}

impl Display for TaskFailure {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.kind {
            FailureKind::Error => f.write_str(&self.message),
            FailureKind::Panic => write!(f, "internal error: {}", self.message),
            FailureKind::Aborted => f.write_str("cancelled"),
        }
    }
}

impl Error for TaskFailure {}

impl From<anyhow::Error> for TaskFailure {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<TaskFailure>() {
            Ok(failure) => failure,
            Err(e) => TaskFailure::new(FailureKind::Error, format!("{:#}", e)),
        }
    }
}

fn run_caught<T, W>(work: W) -> Result<T, TaskFailure>
where
    W: FnOnce() -> anyhow::Result<T>,
{
    match catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(t)) => Ok(t),
        Ok(Err(e)) => Err(e.into()),
        Err(panic) => Err(TaskFailure::from_panic(panic)),
    }
}


/// What a screen holds while it waits for background data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(TaskFailure),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, TaskFailure>) -> Self {
        match result {
            Ok(t) => LoadState::Loaded(t),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, &LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            &LoadState::Loaded(ref t) => Some(t),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&TaskFailure> {
        match self {
            &LoadState::Failed(ref e) => Some(e),
            _ => None,
        }
    }
}


// ==== queue ====

/// Receiving end of completions, owned by the GUI thread.
pub struct GuiTaskQueue<S> {
    send: Sender<Completion<S>>,
    recv: Receiver<Completion<S>>,
}

impl<S> Default for GuiTaskQueue<S> {
    fn default() -> Self {
        let (send, recv) = unbounded();
        GuiTaskQueue { send, recv }
    }
}

impl<S> GuiTaskQueue<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle background code can use to send completions back.
    pub fn spawner(&self) -> TaskSpawner<S> {
        TaskSpawner {
            send: self.send.clone(),
        }
    }

    /// Run the completions which had arrived when this was called. Ones
    /// enqueued while running wait for the next call. Returns how many ran.
    pub fn run_pending(&self, state: &mut S) -> usize {
        let n = self.recv.len();
        for _ in 0..n {
            match self.recv.try_recv() {
                Ok(completion) => completion(state),
                Err(_) => break,
            }
        }
        if n > 0 {
            trace!(n, "ran task completions");
        }
        n
    }

    pub fn pending(&self) -> usize {
        self.recv.len()
    }
}


/// Sending end of completions. Cheap to clone, can be sent anywhere.
pub struct TaskSpawner<S> {
    send: Sender<Completion<S>>,
}

impl<S> Clone for TaskSpawner<S> {
    fn clone(&self) -> Self {
        TaskSpawner {
            send: self.send.clone(),
        }
    }
}

impl<S: 'static> TaskSpawner<S> {
    /// Queue a closure to run on the GUI thread.
    pub fn run_on_gui_thread<F>(&self, f: F)
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        if self.send.send(Box::new(f)).is_err() {
            debug!("gui task queue dropped, discarding completion");
        }
    }

    /// Run `work` on a new named thread, then `on_done` with its result on
    /// the GUI thread. If the thread can't be started, `on_done` still runs,
    /// with a failure.
    pub fn spawn<T, W, C>(&self, name: &str, work: W, on_done: C)
    where
        T: Send + 'static,
        W: FnOnce() -> anyhow::Result<T> + Send + 'static,
        C: FnOnce(&mut S, Result<T, TaskFailure>) + Send + 'static,
    {
        self.spawn_with(name, work, on_done, |name, body| {
            thread::Builder::new()
                .name(name.to_owned())
                .spawn(body)
                .map(drop)
        });
    }

    fn spawn_with<T, W, C, L>(&self, name: &str, work: W, on_done: C, launch: L)
    where
        T: Send + 'static,
        W: FnOnce() -> anyhow::Result<T> + Send + 'static,
        C: FnOnce(&mut S, Result<T, TaskFailure>) + Send + 'static,
        L: FnOnce(&str, Box<dyn FnOnce() + Send>) -> io::Result<()>,
    {
        // whichever side gets to it first delivers the completion
        let on_done = Arc::new(Mutex::new(Some(on_done)));
        let worker_on_done = Arc::clone(&on_done);
        let spawner = self.clone();
        let task = name.to_owned();
        let body: Box<dyn FnOnce() + Send> = Box::new(move || {
            let result = run_caught(work);
            match result {
                Ok(_) => debug!(%task, "background task finished"),
                Err(ref e) => warn!(%task, %e, "background task failed"),
            }
            if let Some(on_done) = worker_on_done.lock().take() {
                spawner.run_on_gui_thread(move |state| on_done(state, result));
            }
        });
        if let Err(e) = launch(name, body) {
            error!(%e, task=%name, "unable to spawn task thread");
            if let Some(on_done) = on_done.lock().take() {
                let failure = TaskFailure::new(
                    FailureKind::Error,
                    format!("unable to start {}: {}", name, e),
                );
                self.run_on_gui_thread(move |state| on_done(state, Err(failure)));
            }
        }
    }

    /// Run a future on a tokio runtime, then `on_done` with its result on the
    /// GUI thread.
    pub fn spawn_async<T, F, C>(&self, rt: &Handle, name: &str, fut: F, on_done: C)
    where
        T: Send + 'static,
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
        C: FnOnce(&mut S, Result<T, TaskFailure>) + Send + 'static,
    {
        let spawner = self.clone();
        let task = name.to_owned();
        let join = rt.spawn(fut);
        rt.spawn(async move {
            let result = match join.await {
                Ok(Ok(t)) => Ok(t),
                Ok(Err(e)) => Err(TaskFailure::from(e)),
                Err(e) => Err(TaskFailure::from_join_error(e)),
            };
            match result {
                Ok(_) => debug!(%task, "async task finished"),
                Err(ref e) => warn!(%task, %e, "async task failed"),
            }
            spawner.run_on_gui_thread(move |state| on_done(state, result));
        });
    }

    /// Start a long-running task on its own thread. Dropping the returned
    /// handle aborts the task.
    pub fn start_long_running<L, C>(&self, mut task: L, on_done: C) -> TaskHandle
    where
        L: LongRunningTask,
        C: FnOnce(&mut S, Result<(), TaskFailure>) + Send + 'static,
    {
        let guard = AbortGuard::new();
        let status = Arc::new(TaskStatus::default());
        let title = task.title();
        let ctx = TaskContext {
            abort: guard.new_handle(),
            status: Arc::clone(&status),
        };
        info!(%title, "starting long-running task");
        self.spawn(&title, move || {
            let _finished = MarkFinished(Arc::clone(&ctx.status));
            task.run(&ctx)
        }, on_done);
        TaskHandle {
            title,
            status,
            guard,
        }
    }
}


// ==== long-running tasks ====

/// A multi-step operation, such as downloading or resetting a world, that
/// runs on its own thread while the GUI shows its progress.
///
/// Implementations should call `TaskContext::checkpoint` between steps so
/// that aborting actually stops them.
pub trait LongRunningTask: Send + 'static {
    fn title(&self) -> String;

    fn run(&mut self, ctx: &TaskContext) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
struct TaskStatus {
    message: Mutex<String>,
    finished: AtomicBool,
}

// sets the finished flag even if the task panics
struct MarkFinished(Arc<TaskStatus>);

impl Drop for MarkFinished {
    fn drop(&mut self) {
        self.0.finished.store(true, Ordering::SeqCst);
    }
}

/// Task side of a long-running task.
pub struct TaskContext {
    abort: AbortHandle,
    status: Arc<TaskStatus>,
}

impl TaskContext {
    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Error out with an abort failure if aborted.
    pub fn checkpoint(&self) -> anyhow::Result<()> {
        if self.abort.is_aborted() {
            Err(TaskFailure::aborted().into())
        } else {
            Ok(())
        }
    }

    /// Replace the status line shown to the user.
    pub fn set_status<M: Into<String>>(&self, message: M) {
        *self.status.message.lock() = message.into();
    }
}

/// GUI side of a long-running task.
#[derive(Debug)]
pub struct TaskHandle {
    title: String,
    status: Arc<TaskStatus>,
    guard: AbortGuard,
}

impl TaskHandle {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The latest status line the task reported.
    pub fn status(&self) -> String {
        self.status.message.lock().clone()
    }

    /// Whether the task's thread has stopped running it. Its completion may
    /// not have been run on the GUI thread yet.
    pub fn is_finished(&self) -> bool {
        self.status.finished.load(Ordering::SeqCst)
    }

    pub fn is_aborted(&self) -> bool {
        self.guard.is_aborted()
    }

    /// A handle which can abort the task without keeping it alive.
    pub fn abort_handle(&self) -> AbortHandle {
        self.guard.new_handle()
    }

    /// Ask the task to stop at its next checkpoint.
    pub fn abort(&self) {
        debug!(title=%self.title, "aborting task");
        self.guard.abort();
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::time::{
        Duration,
        Instant,
    };
    use anyhow::bail;

    // run completions until `n` have run in total, or fail after a while
    fn wait_for<S>(queue: &GuiTaskQueue<S>, state: &mut S, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut ran = 0;
        while ran < n {
            assert!(Instant::now() < deadline, "timed out waiting for completions");
            ran += queue.run_pending(state);
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_completions_run_in_completion_order() {
        let queue = GuiTaskQueue::<Vec<&'static str>>::new();
        let spawner = queue.spawner();
        let (send_go, recv_go) = crossbeam_channel::bounded::<()>(1);
        let mut log = Vec::new();

        spawner.spawn("slow", move || {
            let _ = recv_go.recv();
            Ok(())
        }, |log: &mut Vec<&'static str>, _| log.push("slow"));
        spawner.spawn("fast", || Ok(()), |log: &mut Vec<&'static str>, _| log.push("fast"));

        wait_for(&queue, &mut log, 1);
        send_go.send(()).unwrap();
        wait_for(&queue, &mut log, 1);
        assert_eq!(log, vec!["fast", "slow"]);
    }

    #[test]
    fn test_errors_and_panics_become_failures() {
        let queue = GuiTaskQueue::<Vec<Result<i32, TaskFailure>>>::new();
        let spawner = queue.spawner();
        let mut results = Vec::new();

        spawner.spawn("fails", || -> anyhow::Result<i32> {
            bail!("service unavailable")
        }, |r: &mut Vec<_>, result| r.push(result));
        wait_for(&queue, &mut results, 1);

        spawner.spawn("panics", || -> anyhow::Result<i32> {
            panic!("boom")
        }, |r: &mut Vec<_>, result| r.push(result));
        wait_for(&queue, &mut results, 1);

        assert_eq!(results[0], Err(TaskFailure::new(FailureKind::Error, "service unavailable")));
        assert_eq!(results[1], Err(TaskFailure::new(FailureKind::Panic, "boom")));
    }

    #[test]
    fn test_failed_launch_still_completes() {
        let queue = GuiTaskQueue::<Vec<LoadState<u32>>>::new();
        let spawner = queue.spawner();
        let mut states = Vec::new();

        spawner.spawn_with("fetch", || Ok(7), |s: &mut Vec<_>, result| {
            s.push(LoadState::from_result(result));
        }, |_, _body| Err(io::Error::new(io::ErrorKind::Other, "out of threads")));

        assert_eq!(queue.run_pending(&mut states), 1);
        let failure = states[0].failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Error);
        assert_eq!(failure.message, "unable to start fetch: out of threads");
    }

    #[test]
    fn test_launched_body_delivers_once() {
        let queue = GuiTaskQueue::<Vec<LoadState<u32>>>::new();
        let spawner = queue.spawner();
        let mut states = Vec::new();

        // run the body inline, then report failure anyway
        spawner.spawn_with("fetch", || Ok(7), |s: &mut Vec<_>, result| {
            s.push(LoadState::from_result(result));
        }, |_, body| {
            body();
            Err(io::Error::new(io::ErrorKind::Other, "late"))
        });

        assert_eq!(queue.run_pending(&mut states), 1);
        assert_eq!(states, vec![LoadState::Loaded(7)]);
    }

    #[test]
    fn test_spawn_async_delivers_result() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap();
        let queue = GuiTaskQueue::<Vec<LoadState<u32>>>::new();
        let spawner = queue.spawner();
        let mut states = Vec::new();

        spawner.spawn_async(rt.handle(), "fetch", async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Ok(7)
        }, |s: &mut Vec<_>, result| s.push(LoadState::from_result(result)));
        wait_for(&queue, &mut states, 1);
        assert_eq!(states[0].loaded(), Some(&7));

        spawner.spawn_async(rt.handle(), "fetch", async {
            Err::<u32, _>(anyhow::anyhow!("no servers"))
        }, |s: &mut Vec<_>, result| s.push(LoadState::from_result(result)));
        wait_for(&queue, &mut states, 1);
        assert_eq!(states[1].failure().map(|e| e.message.as_str()), Some("no servers"));
    }

    struct CountForever {
        started: crossbeam_channel::Sender<()>,
    }

    impl LongRunningTask for CountForever {
        fn title(&self) -> String {
            "Counting".to_owned()
        }

        fn run(&mut self, ctx: &TaskContext) -> anyhow::Result<()> {
            let _ = self.started.send(());
            for i in 0.. {
                ctx.checkpoint()?;
                ctx.set_status(format!("step {}", i));
                thread::sleep(Duration::from_millis(1));
            }
            Ok(())
        }
    }

    #[test]
    fn test_long_running_task_aborts_at_checkpoint() {
        let queue = GuiTaskQueue::<Option<Result<(), TaskFailure>>>::new();
        let spawner = queue.spawner();
        let (send_started, recv_started) = crossbeam_channel::bounded(1);
        let mut outcome = None;

        let handle = spawner.start_long_running(CountForever { started: send_started }, |o: &mut Option<_>, result| {
            *o = Some(result);
        });
        assert_eq!(handle.title(), "Counting");
        recv_started.recv_timeout(Duration::from_secs(10)).unwrap();
        handle.abort();
        wait_for(&queue, &mut outcome, 1);

        assert!(handle.is_finished());
        assert!(handle.is_aborted());
        assert_eq!(outcome, Some(Err(TaskFailure::aborted())));
    }

    #[test]
    fn test_failure_from_anyhow_keeps_kind() {
        let e: anyhow::Error = TaskFailure::aborted().into();
        assert!(TaskFailure::from(e).is_aborted());
        let e = anyhow::anyhow!("inner").context("outer");
        assert_eq!(TaskFailure::from(e).message, "outer: inner");
    }
}
