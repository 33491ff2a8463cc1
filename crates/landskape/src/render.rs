//! Rendering of graph descriptions through an external program.
//!
//! A request either short-circuits with the description text itself, or goes
//! through the external renderer:
//!
//! 1. The text is written to a scratch input artifact.
//! 2. The renderer runs as `<binary> <args..> -T<format> -o<output> <input>`.
//! 3. The output artifact is read back once the renderer exits successfully.
//!
//! Artifacts are owned by a guard that deletes them when dropped. That covers
//! success, failures, timeouts, and cancellation: dropping the future returned
//! by [`Renderer::render`] kills the renderer and removes its artifacts.

mod format;
mod scratch;

pub use format::{Diagram, OutputFormat};
pub use scratch::sweep_orphans;

use std::{ffi::OsString, io, process::Stdio, time::Duration};

use log::{debug, error, info, warn};
use tokio::{fs, process::Command, time};

use crate::{
    config::RendererConfig,
    error::{LandskapeError, RenderProcessError},
};

use scratch::ScratchArtifacts;

/// Drives the external renderer for diagram requests.
///
/// The renderer holds only configuration; concurrent calls share nothing but
/// the scratch directory, where each call uses its own uniquely named files.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Turns a graph description into the requested output.
    ///
    /// For [`OutputFormat::Dot`] the text is returned as-is and no process is
    /// started.
    ///
    /// # Errors
    ///
    /// - [`LandskapeError::ArtifactIo`] if a scratch artifact cannot be
    ///   written or read back.
    /// - [`LandskapeError::RenderProcess`] if the renderer is missing, fails
    ///   to start, exits unsuccessfully, or exceeds the configured timeout.
    pub async fn render(
        &self,
        text: String,
        format: &OutputFormat,
    ) -> Result<Diagram, LandskapeError> {
        let image_format = match format {
            OutputFormat::Dot => {
                debug!("Returning description without rendering");
                return Ok(Diagram::Text(text));
            }
            OutputFormat::Image(name) => name.as_str(),
        };

        let artifacts = ScratchArtifacts::new(&self.config.scratch_dir(), format.extension());
        fs::write(artifacts.input(), text.as_bytes())
            .await
            .map_err(|err| LandskapeError::artifact_io(artifacts.input(), err))?;
        debug!(
            input = artifacts.input().display().to_string(),
            bytes = text.len();
            "Input artifact written"
        );

        self.run(image_format, &artifacts).await?;

        let data = fs::read(artifacts.output())
            .await
            .map_err(|err| LandskapeError::artifact_io(artifacts.output(), err))?;
        info!(format = image_format, bytes = data.len(); "Diagram rendered");

        Ok(Diagram::Image {
            format: image_format.to_string(),
            data,
        })
    }

    /// Runs the renderer once and waits for it within the timeout.
    async fn run(
        &self,
        image_format: &str,
        artifacts: &ScratchArtifacts,
    ) -> Result<(), RenderProcessError> {
        let binary = self.config.binary();
        let timeout = self.config.timeout();

        let mut output_arg = OsString::from("-o");
        output_arg.push(artifacts.output());

        let mut command = Command::new(binary);
        command
            .args(self.config.args())
            .arg(format!("-T{image_format}"))
            .arg(output_arg)
            .arg(artifacts.input())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        info!(binary = binary, format = image_format; "Starting renderer");
        let child = command.spawn().map_err(|source| {
            error!(binary = binary, err:% = &source; "Renderer failed to start");
            spawn_error(binary, source)
        })?;

        let output = match time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| RenderProcessError::Wait {
                binary: binary.to_string(),
                source,
            })?,
            Err(_) => {
                warn!(binary = binary, timeout:? = timeout; "Renderer timed out");
                return Err(RenderProcessError::TimedOut { after: timeout });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status:% = output.status, stderr = stderr.as_str(); "Renderer did not complete");
            return Err(RenderProcessError::Exit {
                status: output.status,
                stderr,
            });
        }

        debug!("Renderer completed");
        Ok(())
    }

    /// Periodically deletes scratch artifacts older than `max_age`.
    ///
    /// Meant to be spawned once by long-running hosts; it never returns.
    pub async fn run_sweeper(&self, every: Duration, max_age: Duration) {
        let dir = self.config.scratch_dir();
        let mut ticker = time::interval(every);
        loop {
            ticker.tick().await;
            match sweep_orphans(&dir, max_age).await {
                Ok(0) => {}
                Ok(removed) => info!(removed = removed; "Orphaned scratch artifacts removed"),
                Err(err) => warn!(err:% = err; "Scratch sweep failed"),
            }
        }
    }
}

fn spawn_error(binary: &str, source: io::Error) -> RenderProcessError {
    if source.kind() == io::ErrorKind::NotFound {
        RenderProcessError::NotFound {
            binary: binary.to_string(),
        }
    } else {
        RenderProcessError::Spawn {
            binary: binary.to_string(),
            source,
        }
    }
}
