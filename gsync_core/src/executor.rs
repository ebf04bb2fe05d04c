use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::GsyncError;

/// A fully specified external command. Arguments are handed to the process
/// as-is, no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.program)?;
        for arg in self.args.iter() {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(fmt, " {:?}", arg)?;
            } else {
                write!(fmt, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external transfer commands.
///
/// Everything that spawns a process goes through this trait so the probe,
/// the adoption workflow and the bulk runner can be driven by a fake.
#[async_trait]
pub trait TransferExecutor: Send + Sync {
    /// Runs the command to completion and captures its output.
    async fn output(&self, invocation: &Invocation) -> Result<CommandOutput, GsyncError>;

    /// Runs the command to completion with the terminal attached, returning
    /// its exit code.
    async fn status(&self, invocation: &Invocation) -> Result<Option<i32>, GsyncError>;
}

/// Spawns real processes with tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::inherit());
        command
    }
}

#[async_trait]
impl TransferExecutor for ProcessExecutor {
    async fn output(&self, invocation: &Invocation) -> Result<CommandOutput, GsyncError> {
        let output = Self::command(invocation)
            .output()
            .await
            .map_err(|source| GsyncError::Spawn {
                command: invocation.to_string(),
                source,
            })?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn status(&self, invocation: &Invocation) -> Result<Option<i32>, GsyncError> {
        let status = Self::command(invocation)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| GsyncError::Spawn {
                command: invocation.to_string(),
                source,
            })?;
        Ok(status.code())
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    type Handler = Box<dyn Fn(&Invocation) -> CommandOutput + Send + Sync>;

    /// Records every invocation and answers with a scripted handler.
    pub struct RecordingExecutor {
        handler: Handler,
        calls: Mutex<Vec<Invocation>>,
    }

    impl RecordingExecutor {
        pub fn new<F>(handler: F) -> Self
        where
            F: Fn(&Invocation) -> CommandOutput + Send + Sync + 'static,
        {
            RecordingExecutor {
                handler: Box::new(handler),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Every command succeeds with empty output.
        pub fn succeeding() -> Self {
            Self::new(|_| ok(""))
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }

        /// Arguments of every call, for compact assertions.
        pub fn arg_lines(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .map(|call| call.args.join(" "))
                .collect()
        }

        fn record(&self, invocation: &Invocation) -> CommandOutput {
            self.calls.lock().unwrap().push(invocation.clone());
            (self.handler)(invocation)
        }
    }

    #[async_trait]
    impl TransferExecutor for RecordingExecutor {
        async fn output(&self, invocation: &Invocation) -> Result<CommandOutput, GsyncError> {
            Ok(self.record(invocation))
        }

        async fn status(&self, invocation: &Invocation) -> Result<Option<i32>, GsyncError> {
            Ok(self.record(invocation).code)
        }
    }

    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}
