//! Conversion of a finished table through dcm2niix.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ConversionError;
use crate::model::{SeriesNumber, SeriesTable, IGNORED, UNGROUPED};
use crate::utils::{output_name, sanitize};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Turns the files of one series into images named `output_name`.
pub trait Converter {
    fn convert(
        &self,
        files: &[PathBuf],
        output_name: &str,
        output_dir: &Path,
        overwrite: bool,
    ) -> Result<(), ConversionError>;
}

/// Runs the external `dcm2niix` tool.
#[derive(Debug, Clone)]
pub struct Dcm2niix {
    program: String,
    timeout: Option<Duration>,
}

impl Dcm2niix {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn run(&self, mut command: Command) -> Result<Output, ConversionError> {
        let spawn_error = |source| ConversionError::Spawn {
            program: self.program.clone(),
            source,
        };

        let Some(timeout) = self.timeout else {
            return command.output().map_err(spawn_error);
        };

        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + timeout;
        let status = loop {
            if let Some(status) = child.try_wait().map_err(spawn_error)? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConversionError::TimedOut {
                    program: self.program.clone(),
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok(Output {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

impl Converter for Dcm2niix {
    fn convert(
        &self,
        files: &[PathBuf],
        output_name: &str,
        output_dir: &Path,
        overwrite: bool,
    ) -> Result<(), ConversionError> {
        fs::create_dir_all(output_dir).map_err(|source| ConversionError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
        if !overwrite {
            if let Some(existing) = existing_output(output_dir, output_name)? {
                return Err(ConversionError::WouldOverwrite(existing));
            }
        }

        let staging = tempfile::Builder::new()
            .prefix("dcmwrangle-")
            .tempdir()
            .map_err(|source| ConversionError::Io {
                path: std::env::temp_dir(),
                source,
            })?;
        for file in files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            fs::copy(file, staging.path().join(file_name)).map_err(|source| ConversionError::Io {
                path: file.clone(),
                source,
            })?;
        }

        let mut command = Command::new(&self.program);
        command
            .arg("-o")
            .arg(output_dir)
            .arg("-f")
            .arg(output_name)
            .arg("-w")
            .arg(if overwrite { "1" } else { "0" })
            .arg(staging.path());
        log::debug!("Running {command:?}");

        let output = self.run(command)?;
        let captured = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !output.status.success() {
            return Err(ConversionError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                output: captured,
            });
        }
        log::debug!("{}", captured.trim_end());
        Ok(())
    }
}

const EXTENSIONS: [&str; 2] = [".nii", ".nii.gz"];

/// First image in `output_dir` that converting to `output_name` would replace.
///
/// A `%e` in the name matches any echo number dcm2niix may substitute.
fn existing_output(output_dir: &Path, output_name: &str) -> Result<Option<PathBuf>, ConversionError> {
    let Some((prefix, suffix)) = output_name.split_once("%e") else {
        return Ok(EXTENSIONS
            .iter()
            .map(|extension| output_dir.join(format!("{output_name}{extension}")))
            .find(|path| path.exists()));
    };

    let io_error = |source| ConversionError::Io {
        path: output_dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(output_dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(rest) = file_name.strip_prefix(prefix) else {
            continue;
        };
        let replaces = EXTENSIONS.iter().any(|extension| {
            rest.strip_suffix(extension)
                .and_then(|echo| echo.strip_suffix(suffix))
                .is_some_and(|echo| !echo.is_empty())
        });
        if replaces {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSeries {
    pub number: SeriesNumber,
    pub output_dir: PathBuf,
    pub output_name: String,
}

/// Converts every visible series, one converter call per series.
///
/// Ungrouped series land in `destination`, grouped ones in a subdirectory
/// named after their group. Stops at the first failure; series converted
/// before it stay on disk.
pub fn convert_table(
    table: &SeriesTable,
    converter: &impl Converter,
    destination: &Path,
    overwrite: bool,
) -> Result<Vec<ConvertedSeries>, ConversionError> {
    let mut converted = Vec::new();
    for (group, members) in table.groups().iter() {
        if group == IGNORED {
            continue;
        }
        let output_dir = if group == UNGROUPED {
            destination.to_path_buf()
        } else {
            destination.join(sanitize(group))
        };

        for &index in members {
            let series = &table.series()[index];
            if series.is_ignored() {
                continue;
            }
            let name = output_name(series);
            log::info!("Converting series {} to {}", series.number, output_dir.join(&name).display());
            converter.convert(&series.files, &name, &output_dir, overwrite)?;
            converted.push(ConvertedSeries {
                number: series.number,
                output_dir: output_dir.clone(),
                output_name: name,
            });
        }
    }
    Ok(converted)
}
