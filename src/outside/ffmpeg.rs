use std::{ffi::OsString, fmt::Debug};

use tracing::debug;

use crate::result::{Error, Result};

use super::command::{assert_success_command, run_command, Capture, FFXXX_DEFAULT_ARGS};

/// The program doing the actual media work
pub trait MediaTool: Debug {
    /// Run the tool with the given extraction arguments.
    ///
    /// A tool that runs but does not succeed returns [`Error::ToolFailed`].
    fn extract_clip(&self, args: &[OsString]) -> Result<()>;
}

/// Interface for the [ffmpeg](https://ffmpeg.org) program
#[derive(Debug)]
pub struct Ffmpeg {
    program: String,
}

impl Ffmpeg {
    /// Verify that the `ffmpeg` binary is reachable
    pub fn new(program: &str) -> Result<Self> {
        assert_success_command(program, |cmd| cmd.arg("-version"))?;

        Ok(Self {
            program: program.to_owned(),
        })
    }
}

impl MediaTool for Ffmpeg {
    fn extract_clip(&self, args: &[OsString]) -> Result<()> {
        let res = run_command(
            &self.program,
            |cmd| cmd.args(FFXXX_DEFAULT_ARGS).args(args),
            Capture::STDERR,
        )?;

        if res.status.success() {
            Ok(())
        } else {
            // With the default args, only the errors are printed
            let stderr = String::from_utf8_lossy(&res.stderr);
            for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                debug!("{}: {line}", self.program);
            }
            Err(Error::ToolFailed(res.status.code()))
        }
    }
}
