//! Create command implementation.
//!
//! Merges CLI flags over the optional manifest, builds the bundle skeleton and
//! places the executable and icon.

use crate::bundler::{Bundle, BundleConfig, ConvertOptions, IconConverter, PathResolver};
use crate::cli::{Command, RuntimeConfig};
use crate::error::{CliError, Result};
use crate::manifest::{BundleManifest, load_manifest};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Execute create command
pub(super) async fn execute_create(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Create {
        name,
        base_path,
        system_root,
        strict,
        binary,
        icon,
        converter,
        convert_timeout,
        manifest,
    } = command
    else {
        unreachable!("execute_create called with non-Create command");
    };

    let manifest = match manifest {
        Some(path) => {
            config.verbose_println(&format!("Reading manifest {}", path.display()));
            load_manifest(path)?
        }
        None => BundleManifest::default(),
    };

    let name = name
        .clone()
        .or(manifest.name)
        .ok_or_else(|| CliError::MissingArgument {
            argument: "NAME".to_string(),
        })?;
    let use_system_root = *system_root || manifest.use_system_root.unwrap_or(false);
    let base_path = base_path.clone().or(manifest.base_path);

    if use_system_root && base_path.is_some() {
        config.warning_println("--system-root takes precedence; ignoring base path");
    }

    let bundle_config = BundleConfig::builder()
        .name(name)
        .maybe_base_path(base_path)
        .use_system_root(use_system_root)
        .build()?;

    let resolver = PathResolver::from_current_dir()?;
    config.progress_println(&format!("Creating {}.app", bundle_config.name()));

    let bundle = if *strict {
        Bundle::try_create_with(&resolver, &bundle_config).await?
    } else {
        let bundle = Bundle::create_with(&resolver, &bundle_config).await;
        report_skeleton_gaps(&bundle, config).await;
        bundle
    };
    config.success_println(&format!("Bundle at {}", bundle.path().display()));

    if let Some(source) = binary.as_ref().or(manifest.binary.as_ref()) {
        let copied = bundle.place_binary(source).await?;
        config.success_println(&format!(
            "Placed executable {} ({} bytes)",
            bundle.binary_path().display(),
            copied
        ));
    }

    if let Some(source) = icon.as_ref().or(manifest.icon.as_ref()) {
        let kind = converter.or(manifest.converter).unwrap_or_default();
        let selected = kind.select();
        config.verbose_println(&format!("Icon converter: {} ({})", kind, selected.name()));

        let cancel = CancellationToken::new();
        let ctrl_c = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrl_c.cancel();
            }
        });

        let options = ConvertOptions {
            timeout: convert_timeout
                .or(manifest.convert_timeout_secs)
                .map(Duration::from_secs),
            cancel: Some(cancel),
        };
        let result = bundle.install_icon(&selected, source, &options).await;
        watcher.abort();
        result?;

        config.success_println(&format!("Placed icon {}", bundle.icon_path().display()));
    }

    Ok(())
}

/// The lenient path swallows folder failures; surface them as warnings.
async fn report_skeleton_gaps(bundle: &Bundle, config: &RuntimeConfig) {
    let status = bundle.inspect().await;
    if !status.exists {
        config.warning_println(&format!("{} could not be created", bundle.path().display()));
        return;
    }

    let mut gaps = Vec::new();
    if !status.macos_dir {
        gaps.push("Contents/MacOS directory");
    }
    if !status.resources_dir {
        gaps.push("Contents/Resources directory");
    }
    if status.descriptor.is_none() {
        gaps.push("Contents/info.plist descriptor");
    }

    if !gaps.is_empty() {
        config.warning_println("Bundle layout is incomplete:");
        for gap in gaps {
            config.indent(gap);
        }
    }
}
