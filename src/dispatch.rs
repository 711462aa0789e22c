use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use crate::component::Component;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::logging::LoggingGuard;

/// A fully resolved program to hand the process over to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub component: Component,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Target {
    /// Builds the command. Environment and stdio are inherited unchanged.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.component, self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

pub struct Dispatcher {
    config: DispatchConfig,
    extra_args: Vec<OsString>,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            extra_args: Vec::new(),
        }
    }

    /// Arguments appended after the configured ones, e.g. from the command line.
    pub fn with_extra_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        self.extra_args.extend(args);
        self
    }

    pub fn resolve(&self, component: Component) -> Target {
        let target = self.config.target(component);
        let args = target
            .args
            .iter()
            .map(OsString::from)
            .chain(self.extra_args.iter().cloned())
            .collect();

        debug!(component = %component, program = %target.program.display(), "Resolved dispatch target");

        Target {
            component,
            program: target.program.clone(),
            args,
        }
    }

    /// Replaces the current process with `target`. Returns only if that fails.
    ///
    /// The logging guard is dropped first so the file writer flushes; nothing
    /// buffered survives the exec otherwise.
    #[cfg(unix)]
    pub fn handoff(target: &Target, logging: LoggingGuard) -> DispatchError {
        use std::os::unix::process::CommandExt;

        info!(
            component = %target.component,
            program = %target.program.display(),
            args = target.args.len(),
            "Handing off"
        );
        drop(logging);

        let source = target.command().exec();
        DispatchError::Exec {
            program: target.program.clone(),
            source,
        }
    }

    /// Without exec, run the target as a child and exit with its status.
    #[cfg(not(unix))]
    pub fn handoff(target: &Target, logging: LoggingGuard) -> DispatchError {
        info!(
            component = %target.component,
            program = %target.program.display(),
            args = target.args.len(),
            "Handing off"
        );
        drop(logging);

        match target.command().status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(source) => DispatchError::Exec {
                program: target.program.clone(),
                source,
            },
        }
    }
}
