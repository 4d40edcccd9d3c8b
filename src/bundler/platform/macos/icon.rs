//! Icon conversion into the `.icns` format.
//!
//! Converters are pluggable through [`IconConverter`]. Two implementations ship
//! with the crate:
//!
//! - [`CommandConverter`]: runs an external program as `<program> <input> <output>`,
//!   ImageMagick's `magick` by default
//! - [`NativeIcnsConverter`]: decodes with `image` and encodes with `icns` in-process,
//!   used only when selected explicitly
//!
//! External programs can be bounded with a timeout and a cancellation token via
//! [`ConvertOptions`]; the child is killed when either fires.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use icns::{IconFamily, IconType, Image as IcnsImage};
use std::{
    fmt,
    future::Future,
    io::BufWriter,
    path::{Path, PathBuf},
    process::Stdio,
    str::FromStr,
    time::Duration,
};
use tokio::task;
use tokio_util::sync::CancellationToken;

/// Program used by [`CommandConverter::magick`].
pub const MAGICK_PROGRAM: &str = "magick";

/// ICNS entries written by the native encoder, smallest first.
const ICON_TYPES: [(IconType, u32, &str); 11] = [
    (IconType::RGBA32_16x16, 16, "16x16"),
    (IconType::RGBA32_16x16_2x, 32, "16x16@2x"),
    (IconType::RGBA32_32x32, 32, "32x32"),
    (IconType::RGBA32_32x32_2x, 64, "32x32@2x"),
    (IconType::RGBA32_64x64, 64, "64x64"),
    (IconType::RGBA32_128x128, 128, "128x128"),
    (IconType::RGBA32_128x128_2x, 256, "128x128@2x"),
    (IconType::RGBA32_256x256, 256, "256x256"),
    (IconType::RGBA32_256x256_2x, 512, "256x256@2x"),
    (IconType::RGBA32_512x512, 512, "512x512"),
    (IconType::RGBA32_512x512_2x, 1024, "512x512@2x"),
];

/// Limits applied to a single conversion.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Maximum run time. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Token that aborts the conversion when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl ConvertOptions {
    /// Options with only a timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }
}

/// Converts an arbitrary image into an `.icns` file.
pub trait IconConverter {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Converts `input` into `output`, returning the converter's diagnostics
    /// (combined stdout and stderr for external programs).
    fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Runs an external program as `<program> [leading args] <input> <output>`.
#[derive(Clone, Debug)]
pub struct CommandConverter {
    program: String,
    leading_args: Vec<String>,
}

impl CommandConverter {
    /// ImageMagick: `magick <input> <output>`.
    pub fn magick() -> Self {
        Self::new(MAGICK_PROGRAM)
    }

    /// Any program taking the input and output paths as its last two arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the input and output paths.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program)
            .inspect(|path| log::debug!("Found {} at: {}", self.program, path.display()))
            .map_err(|e| {
                log::debug!("{} not found in PATH: {}", self.program, e);
                Error::ToolNotFound {
                    tool: self.program.clone(),
                }
            })
    }
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::magick()
    }
}

impl IconConverter for CommandConverter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<String> {
        let program = self.locate()?;
        let command_line = std::iter::once(self.program.clone())
            .chain(self.leading_args.iter().cloned())
            .chain([input.display().to_string(), output.display().to_string()])
            .collect::<Vec<_>>()
            .join(" ");
        log::info!("Converting icon: {}", command_line);

        let child = tokio::process::Command::new(&program)
            .args(&self.leading_args)
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command_line.clone(),
                error,
            })?;

        let finished = bounded(&self.program, options, child.wait_with_output())
            .await?
            .map_err(|error| Error::CommandFailed {
                command: command_line,
                error,
            })?;

        let mut combined = String::from_utf8_lossy(&finished.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&finished.stderr));

        if !finished.status.success() {
            return Err(Error::ExternalTool {
                tool: self.program.clone(),
                status: finished.status.code(),
                output: combined,
            });
        }

        log::info!("✓ Converted {} with {}", input.display(), self.program);
        Ok(combined)
    }
}

/// In-process converter built on the `image` and `icns` crates.
///
/// Writes every standard ICNS size up to the smaller side of the source image
/// (at least 16x16), resized with Lanczos3. A timeout or cancellation stops the
/// wait, not the encoding thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeIcnsConverter;

impl IconConverter for NativeIcnsConverter {
    fn name(&self) -> &str {
        "native"
    }

    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<String> {
        let input = input.to_path_buf();
        let output = output.to_path_buf();

        // CPU-bound encoding
        let work = task::spawn_blocking(move || encode_icns(&input, &output));
        bounded(self.name(), options, work)
            .await?
            .map_err(|e| Error::GenericError(format!("ICNS encoding task failed: {}", e)))?
    }
}

fn encode_icns(input: &Path, output: &Path) -> Result<String> {
    let source = image::open(input)
        .map_err(Error::from)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    let limit = source.width().min(source.height()).max(16);

    let mut family = IconFamily::new();
    let mut added = Vec::new();

    for (icon_type, size, label) in ICON_TYPES {
        if size > limit {
            break;
        }
        log::debug!("Adding {} from {}", label, input.display());

        let rgba = source
            .resize_exact(size, size, image::imageops::FilterType::Lanczos3)
            .to_rgba8();
        let entry = IcnsImage::from_data(icns::PixelFormat::RGBA, size, size, rgba.into_raw())
            .map_err(|e| Error::GenericError(format!("creating ICNS image for {}: {}", label, e)))?;
        family
            .add_icon_with_type(&entry, icon_type)
            .map_err(|e| Error::GenericError(format!("adding {} to icon family: {}", label, e)))?;
        added.push(label);
    }

    let file = std::fs::File::create(output).fs_context("creating ICNS output file", output)?;
    family
        .write(BufWriter::new(file))
        .fs_context("writing ICNS data", output)?;

    log::info!("Created ICNS file: {}", output.display());
    Ok(format!(
        "encoded {} icon sizes ({}) into {}",
        added.len(),
        added.join(", "),
        output.display()
    ))
}

/// Awaits `work` under the timeout and cancellation limits of `options`.
async fn bounded<F>(tool: &str, options: &ConvertOptions, work: F) -> Result<F::Output>
where
    F: Future,
{
    let timed = async {
        match options.timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| Error::ToolTimedOut {
                    tool: tool.to_string(),
                    timeout: limit,
                }),
            None => Ok(work.await),
        }
    };

    match &options.cancel {
        Some(token) => tokio::select! {
            _ = token.cancelled() => Err(Error::ToolCancelled { tool: tool.to_string() }),
            result = timed => result,
        },
        None => timed.await,
    }
}

/// Converter selection, as configured on the command line or in a manifest.
///
/// `magick` is the default and is never silently replaced: when it is not on
/// `PATH` conversion fails with [`Error::ToolNotFound`]. The in-process encoder
/// runs only when asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// ImageMagick subprocess.
    #[default]
    Magick,
    /// In-process encoder, opt-in.
    Native,
}

impl ConverterKind {
    /// Picks the concrete converter.
    pub fn select(self) -> SelectedConverter {
        match self {
            ConverterKind::Magick => SelectedConverter::Command(CommandConverter::magick()),
            ConverterKind::Native => SelectedConverter::Native(NativeIcnsConverter),
        }
    }
}

impl FromStr for ConverterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "magick" => Ok(ConverterKind::Magick),
            "native" => Ok(ConverterKind::Native),
            other => Err(format!(
                "unknown converter '{}', expected magick or native",
                other
            )),
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConverterKind::Magick => "magick",
            ConverterKind::Native => "native",
        })
    }
}

/// A converter chosen at runtime by [`ConverterKind::select`].
#[derive(Clone, Debug)]
pub enum SelectedConverter {
    /// External program.
    Command(CommandConverter),
    /// In-process encoder.
    Native(NativeIcnsConverter),
}

impl IconConverter for SelectedConverter {
    fn name(&self) -> &str {
        match self {
            SelectedConverter::Command(c) => c.name(),
            SelectedConverter::Native(c) => c.name(),
        }
    }

    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<String> {
        match self {
            SelectedConverter::Command(c) => c.convert(input, output, options).await,
            SelectedConverter::Native(c) => c.convert(input, output, options).await,
        }
    }
}
