// src/core/context.rs

//! The explicit execution context.

use crate::{
    core::template::{Template, TemplateError},
    models::{Arg, Origin, ProcessOutput},
    state,
    system::{
        executor::{self, ExecutionError, RunRequest},
        resolver::{self, ResolvedShell},
    },
};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An explicit execution context: which shell to use, where, and how loudly.
///
/// `Shell` is cheap to clone. Builder methods return a modified copy and never
/// touch the process-wide defaults, so two contexts can be used side by side
/// from concurrent tasks.
///
/// ```no_run
/// # async fn demo() -> Result<(), shellout::ExecutionError> {
/// use shellout::{Arg, Shell, Template};
///
/// let shell = Shell::current().verbose(true);
/// let branch = shell.run(Template::parse("git rev-parse --abbrev-ref HEAD"), vec![]).await?;
/// shell.run(Template::parse("git log -1 {}"), vec![Arg::from(&branch)]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Shell {
    resolved: Arc<ResolvedShell>,
    verbose: bool,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    nothrow: bool,
}

impl Shell {
    /// The process-wide shell combined with a snapshot of the current
    /// verbosity and working directory.
    pub fn current() -> Self {
        let settings = state::snapshot();
        Self {
            resolved: resolver::global(),
            verbose: settings.verbose,
            cwd: settings.cwd,
            env: Vec::new(),
            nothrow: false,
        }
    }

    /// A quiet context bound to a specific interpreter, ignoring the globals.
    pub fn with_resolved(resolved: ResolvedShell) -> Self {
        Self {
            resolved: Arc::new(resolved),
            verbose: false,
            cwd: None,
            env: Vec::new(),
            nothrow: false,
        }
    }

    /// Echo commands and mirror their output live.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs children in `dir` instead of the inherited directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Adds a variable to the child's environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// When set, non-zero exits resolve instead of failing.
    pub fn nothrow(mut self, nothrow: bool) -> Self {
        self.nothrow = nothrow;
        self
    }

    /// The interpreter commands run under.
    pub fn resolved(&self) -> &ResolvedShell {
        &self.resolved
    }

    /// Whether this context echoes and mirrors.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The working directory children start in, if overridden.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Quotes `value` with this context's strategy.
    pub fn quote(&self, value: &str) -> String {
        self.resolved.quoting().quote(value).into_owned()
    }

    /// Builds the final command string without running it.
    pub fn build(&self, template: &Template, values: &[Arg]) -> Result<String, TemplateError> {
        template.build(values, self.resolved.quoting())
    }

    /// Builds the command and returns a future that spawns it and waits for exit.
    ///
    /// The call site is recorded here, before anything is spawned, and ends up
    /// in the [`ProcessOutput`]. The command runs when the future is awaited.
    #[track_caller]
    pub fn run(
        &self,
        template: Template,
        values: Vec<Arg>,
    ) -> impl Future<Output = Result<ProcessOutput, ExecutionError>> + Send + use<> {
        let origin = Origin::here();
        let built = self.build(&template, &values);
        let context = self.clone();
        async move {
            let command = built?;
            executor::execute(context.request(command, origin)).await
        }
    }

    /// Runs an already built command string as is.
    #[track_caller]
    pub fn run_command(
        &self,
        command: &str,
    ) -> impl Future<Output = Result<ProcessOutput, ExecutionError>> + Send + use<> {
        let request = self.clone().request(command.to_string(), Origin::here());
        executor::execute(request)
    }

    fn request(self, command: String, origin: Origin) -> RunRequest {
        RunRequest {
            command,
            shell: self.resolved,
            cwd: self.cwd,
            env: self.env,
            verbose: self.verbose,
            nothrow: self.nothrow,
            origin,
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::current()
    }
}
