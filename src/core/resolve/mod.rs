use crate::core::{verbs, Merge, Progress, Resource, ResourceData};
use crate::error::ResourceError;
use crate::fs::AbsPath;
use error_stack::{Report, Result};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::mpsc::TryRecvError;
use termcolor::Color;
use threadpool::Builder;
use threadpool::ThreadPool;

mod config;
pub use config::*;

mod error;
pub use error::ResolveError;
mod expand;
use expand::expand_pattern;
mod normalize;
pub use normalize::*;

/// Resolve an input into an ordered list of [`Resource`]s with the default
/// [`Config`].
///
/// This is the main entry point. It accepts any of the shapes [`Input`]
/// converts from: a single path string, a list of path strings or buffers,
/// or an options-bearing input built with [`Input::with_options`].
///
/// Buffer items become content-only resources and come first in the
/// output; pattern matches follow, in pattern order then match order.
pub fn resolve<I>(input: I) -> Result<Vec<Resource>, ResolveError>
where
    I: Into<Input>,
{
    Resolver::run(input, Config::default())
}

/// Resolve an input and eagerly load every resource's content.
///
/// Same as [`Resolver::run`], followed by loading the content of every
/// filesystem-backed resource in parallel. The returned resources are in
/// the same order resolution produced them.
pub fn resolve_read<I>(input: I, config: Config) -> Result<Vec<Resource>, ResolveError>
where
    I: Into<Input>,
{
    let num_threads = config.num_threads;
    let verbosity = config.verbosity.clone();
    let resources = Resolver::run(input, config)?;
    read_all(resources, num_threads, verbosity)
}

/// The runtime state of one resolution
#[derive(Debug)]
pub struct Resolver {
    /// The Config
    config: Config,
    /// The Progress reporter
    progress: Progress,
    /// The ThreadPool
    threadpool: ThreadPool,
    /// The Sender for workers to send results back
    send: mpsc::Sender<TaskResult>,
    /// The Receiver for the main thread to receive results
    recv: mpsc::Receiver<TaskResult>,
}

impl Resolver {
    /// Run resolution with an explicit config.
    ///
    /// This is what [`resolve`] calls internally. Expansion of independent
    /// patterns fans out on the thread pool; the output order is fixed by
    /// the input, not by completion timing.
    pub fn run<I>(input: I, config: Config) -> Result<Vec<Resource>, ResolveError>
    where
        I: Into<Input>,
    {
        log::info!("creating resolver");
        log::debug!("using config: {:?}", config);

        let progress = Progress::new(config.verbosity.clone());
        let threadpool = Builder::new().num_threads(config.num_threads).build();
        let (send, recv) = mpsc::channel();

        let runtime = Self {
            config,
            progress,
            threadpool,
            send,
            recv,
        };

        runtime.run_internal(normalize(input.into()))
    }

    fn run_internal(mut self, input: NormalizedInput) -> Result<Vec<Resource>, ResolveError> {
        let _ = self.progress.print_status(
            verbs::USING,
            &format!("{} thread(s)", self.config.num_threads),
            Color::Yellow,
            true,
        );

        let mut options = self.config.options.clone();
        options.merge(Some(&input.options));

        // partition first: buffers never reach glob expansion
        let mut buffer_resources = vec![];
        let mut patterns = vec![];
        for item in input.items {
            match item {
                Item::Content(content) => {
                    let content = String::from_utf8_lossy(&content).into_owned();
                    buffer_resources.push(Resource::from_content(content));
                }
                Item::Pattern(pattern) => patterns.push(pattern),
            }
        }

        if patterns.is_empty() {
            // fast path: no filesystem access at all
            log::info!(
                "no patterns to expand, returning {} buffer resource(s)",
                buffer_resources.len()
            );
            let _ = self.progress.print_status(
                verbs::DONE,
                &format!("{} resource(s)", buffer_resources.len()),
                Color::Green,
                false,
            );
            return Ok(buffer_resources);
        }

        let working_dir = match &options.cwd {
            Some(cwd) if cwd.is_absolute() => AbsPath::create_base(cwd.clone()),
            Some(cwd) => AbsPath::create_base(self.config.base_dir.join(cwd)),
            None => AbsPath::create_base(self.config.base_dir.clone()),
        }
        .map_err(|e| {
            e.change_context(ResolveError)
                .attach_printable("cannot resolve working directory")
        })?;
        log::info!(
            "expanding {} pattern(s) in {}",
            patterns.len(),
            working_dir
        );

        let _ = self.progress.add_total(patterns.len());

        // schedule one expansion task per pattern
        for (index, pattern) in patterns.iter().enumerate() {
            let _ = self
                .progress
                .print_status(verbs::EXPANDING, pattern, Color::Yellow, true);
            let send = self.send.clone();
            let pattern = pattern.clone();
            let working_dir = working_dir.clone();
            log::info!("expanding pattern: {pattern}");
            self.threadpool.execute(move || {
                let result = expand_pattern(&pattern, &working_dir);
                send.send(TaskResult::Expand(index, result))
                    .expect("cannot send result")
            });
        }

        // collect results keyed by pattern index so completion timing
        // cannot reorder the output
        let mut slots: Vec<Option<Vec<PathBuf>>> = Vec::with_capacity(patterns.len());
        slots.resize_with(patterns.len(), || None);
        loop {
            let data = match self.recv.try_recv() {
                Ok(data) => data,
                Err(TryRecvError::Empty) => {
                    if self.progress.is_done() {
                        break;
                    }
                    // no data available, wait for a bit
                    std::thread::sleep(std::time::Duration::from_millis(10));
                    continue;
                }
                Err(TryRecvError::Disconnected) => {
                    // workers are disconnected unexpectedly
                    return Err(Report::new(ResolveError)
                        .attach_printable("workers are disconnected unexpectedly."));
                }
            };

            match data {
                TaskResult::Expand(index, result) => {
                    let files = result.map_err(|e| {
                        let _ = self
                            .progress
                            .print_status(verbs::FAILED, "", Color::Red, false);
                        self.progress.add_done_quiet(1);
                        e.change_context(ResolveError)
                            .attach_printable("cannot expand pattern")
                    })?;
                    log::info!("pattern {index} matched {} file(s)", files.len());
                    slots[index] = Some(files);
                }
            }

            let _ = self.progress.add_done(1);
        }

        // buffers first, then pattern matches in pattern order
        let mut resources = buffer_resources;
        for files in slots.into_iter().flatten() {
            for file in files {
                let _ = self.progress.print_status(
                    verbs::RESOLVING,
                    &file.display().to_string(),
                    Color::Green,
                    true,
                );
                resources.push(Resource::new(ResourceData {
                    working_dir: Some(working_dir.as_path().to_path_buf()),
                    relative_path: Some(file),
                    prefix: options.prefix.clone(),
                    content: None,
                }));
            }
        }

        let _ = self.progress.print_status(
            verbs::DONE,
            &format!("{} resource(s)", resources.len()),
            Color::Green,
            false,
        );

        Ok(resources)
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        log::info!("cleaning up resolver");
        self.threadpool.join();
        // wait for all workers to finish sending their last results, which we will ignore
        loop {
            match self.recv.try_recv() {
                Ok(_) => {
                    self.progress.add_done_quiet(1);
                }
                Err(TryRecvError::Empty) => {
                    if self.progress.is_done() {
                        break;
                    }
                    // no data available, wait for a bit
                    std::thread::sleep(std::time::Duration::from_millis(10));
                    continue;
                }
                Err(TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
        log::info!("resolver destroyed");
        // the channel will be dropped
    }
}

enum TaskResult {
    Expand(usize, Result<Vec<PathBuf>, crate::error::PathError>),
}

type ReadResult = (usize, Resource, Result<(), ResourceError>);

/// Load the content of every filesystem-backed resource in parallel,
/// preserving order. Already-loaded and buffer resources pass through.
fn read_all(
    resources: Vec<Resource>,
    num_threads: usize,
    verbosity: Verbosity,
) -> Result<Vec<Resource>, ResolveError> {
    let mut progress = Progress::new(verbosity);
    let threadpool = Builder::new().num_threads(num_threads).build();
    let (send, recv) = mpsc::channel::<ReadResult>();

    let total = resources.len();
    let mut loaded: Vec<Option<Resource>> = Vec::with_capacity(total);
    loaded.resize_with(total, || None);

    let mut pending = 0;
    for (index, mut resource) in resources.into_iter().enumerate() {
        if resource.is_loaded() || resource.origin().is_none() {
            loaded[index] = Some(resource);
            continue;
        }
        pending += 1;
        if let Some(origin) = resource.origin() {
            let _ = progress.print_status(
                verbs::READING,
                &origin.display().to_string(),
                Color::Green,
                true,
            );
        }
        let send = send.clone();
        threadpool.execute(move || {
            let result = resource.content().map(|_| ());
            // the receiver may be gone already on fail-fast
            let _ = send.send((index, resource, result));
        });
    }
    let _ = progress.add_total(pending);

    for _ in 0..pending {
        let (index, resource, result) = recv.recv().map_err(|_| {
            Report::new(ResolveError).attach_printable("workers are disconnected unexpectedly.")
        })?;
        result.map_err(|e| {
            let _ = progress.print_status(verbs::FAILED, "", Color::Red, false);
            e.change_context(ResolveError)
                .attach_printable("cannot read resource content")
        })?;
        loaded[index] = Some(resource);
        let _ = progress.add_done(1);
    }

    Ok(loaded.into_iter().flatten().collect())
}
