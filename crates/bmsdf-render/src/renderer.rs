//! External SDF renderer capability

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use smol::future;
use smol::process::Command;

use crate::{RenderError, RenderInvocation, Result};

/// Environment variable naming the msdfgen binary
pub const RENDERER_ENV: &str = "BMSDF_MSDFGEN";

/// Rasterizes one glyph shape into the renderer's textual sample stream
pub trait SdfRenderer {
    fn render(&self, invocation: &RenderInvocation) -> impl Future<Output = Result<String>>;
}

/// msdfgen run as a child process per glyph
#[derive(Debug, Clone)]
pub struct MsdfgenProcess {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl MsdfgenProcess {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Kill an invocation that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl SdfRenderer for MsdfgenProcess {
    async fn render(&self, invocation: &RenderInvocation) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let run = async {
            command.output().await.map_err(|source| RenderError::Spawn {
                command: invocation.to_string(),
                source,
            })
        };

        let output = match self.timeout {
            Some(after) => {
                let expire = async {
                    smol::Timer::after(after).await;
                    Err(RenderError::Timeout {
                        command: invocation.to_string(),
                        after,
                    })
                };
                future::or(run, expire).await?
            }
            None => run.await?,
        };

        if !output.status.success() {
            return Err(RenderError::Process {
                command: invocation.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Find the msdfgen binary: explicit path, then `BMSDF_MSDFGEN`, then `PATH`.
pub fn locate_renderer(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(RenderError::RendererNotFound(format!(
                "{} does not exist",
                path.display()
            )))
        };
    }

    if let Some(path) = std::env::var_os(RENDERER_ENV) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Ok(path);
        }
        tracing::warn!("{} points to missing file {}", RENDERER_ENV, path.display());
    }

    let name = if cfg!(windows) { "msdfgen.exe" } else { "msdfgen" };
    std::env::var_os("PATH")
        .iter()
        .flat_map(std::env::split_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            RenderError::RendererNotFound(format!(
                "set {} or put {} on PATH ({} {})",
                RENDERER_ENV,
                name,
                std::env::consts::OS,
                std::env::consts::ARCH
            ))
        })
}
