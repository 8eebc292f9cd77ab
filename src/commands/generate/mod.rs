//! The `generate` command: the artifact materialization pipeline.
//!
//! Sequence: resolve profile -> load and expand properties -> resolve the
//! output directory -> render every artifact -> write every artifact.
//! Rendering happens for ALL artifacts before ANY file is written, so a
//! failure in one template aborts the run without leaving a partial
//! artifact set on disk.


use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::context::GenerationContext;
use crate::error::{ConfgenError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write_text;
use crate::paths;
use crate::profile::{self, ResolvedProfile};
use crate::props::{RawProperties, expand};
use crate::template::{self, TemplateError};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;

/// Outcome of a successful generation run.
#[derive(Debug)]
pub(crate) struct GenerationReport {
    /// The profile the run resolved to.
    pub resolved: ResolvedProfile,
    /// Destination directory for all artifacts.
    pub output_dir: PathBuf,
    /// Absolute paths of the written artifacts, in manifest order.
    pub artifacts: Vec<PathBuf>,
}

/// Entry point for `confgen generate`.
pub(crate) fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let ctx = GenerationContext::resolve(args.project_root.as_deref(), args.scratch_dir.as_deref())?;

    let config_path = match &args.config {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => ctx.project_root.join(path),
        None => ctx.config_path(),
    };
    let config = Config::load_or_default(&config_path)?;

    let report = run_generation(&ctx, &config, args.profile.as_deref(), &args.invoked_by)?;

    println!(
        "Profile: {} ({})",
        report.resolved.profile, report.resolved.source
    );
    for artifact in &report.artifacts {
        println!("Generated: {}", artifact.display());
    }

    if config.audit_log {
        let event = Event::new(EventAction::Generate, report.resolved.profile).with_details(json!({
            "output_dir": report.output_dir.display().to_string(),
            "artifacts": report
                .artifacts
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }));
        // Best-effort: the artifacts are already on disk.
        if let Err(e) = append_event(&ctx, &event) {
            eprintln!("Warning: failed to append run log: {}", e);
        }
    }

    Ok(())
}

/// Run the full pipeline against an explicit context and config.
///
/// Separated from `cmd_generate` so tests can drive it with a synthetic
/// environment. Given unchanged inputs, two calls resolve the same profile
/// and produce byte-identical artifacts.
pub(crate) fn run_generation(
    ctx: &GenerationContext,
    config: &Config,
    explicit_profile: Option<&str>,
    invoked_by: &[String],
) -> Result<GenerationReport> {
    let resolved = profile::resolve(
        explicit_profile,
        &ctx.env,
        invoked_by,
        &config.dev_invocations,
        &config.prod_invocations,
        config.default_profile,
    )?;
    let active = resolved.profile;

    // Base file is required, the overlay file is optional.
    let base_path = ctx.project_root.join(&config.base_properties);
    let overlay_path = ctx.project_root.join(config.overlay_path(active));
    let raw = RawProperties::load(&[base_path, overlay_path])?;
    let effective = expand(&raw, active);

    let raw_output = effective
        .get(&config.output_path_key)
        .map(str::to_string)
        .or_else(|| ctx.env.get(&config.output_path_env).cloned())
        .ok_or_else(|| ConfgenError::MissingOutputLocation {
            key: config.output_path_key.clone(),
            env_var: config.output_path_env.clone(),
        })?;
    let output_dir = paths::resolve_output_dir(active, &raw_output, &ctx.scratch_dir);

    // Template variables: the effective map plus one derived entry per
    // artifact linking to its destination, so a descriptor can reference
    // the exact path its sibling properties file is written to.
    let mut vars: HashMap<String, String> = effective
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    for artifact in &config.artifacts {
        vars.insert(
            format!("{}.path", artifact.output),
            output_dir.join(&artifact.output).display().to_string(),
        );
    }

    // Render everything before writing anything.
    let mut rendered: Vec<(PathBuf, String)> = Vec::with_capacity(config.artifacts.len());
    for artifact in &config.artifacts {
        let template_path = ctx.project_root.join(artifact.template_for(active));
        if !template_path.exists() {
            return Err(ConfgenError::MissingTemplate(template_path));
        }
        let text = std::fs::read_to_string(&template_path).map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to read template '{}': {}",
                template_path.display(),
                e
            ))
        })?;

        let output =
            template::render(&text, artifact.placeholder_style, &vars, &ctx.env).map_err(|e| {
                let template = template_path.display().to_string();
                match e {
                    TemplateError::UndefinedVariable { name, .. } => {
                        ConfgenError::MissingVariable { name, template }
                    }
                    other => {
                        ConfgenError::UserError(format!("template '{}': {}", template, other))
                    }
                }
            })?;

        rendered.push((output_dir.join(&artifact.output), output));
    }

    let mut written = Vec::with_capacity(rendered.len());
    for (path, content) in &rendered {
        atomic_write_text(path, content)?;
        written.push(path.clone());
    }

    Ok(GenerationReport {
        resolved,
        output_dir,
        artifacts: written,
    })
}
