//! The `profile` command: show the resolved profile and its provenance.
//!
//! Runs the exact resolution rules `generate` uses, without touching
//! property sources or templates. Useful for build wrappers that need to
//! know which profile a subsequent generate will pick.

use crate::cli::ProfileArgs;
use crate::config::Config;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::profile;

pub(crate) fn cmd_profile(args: ProfileArgs) -> Result<()> {
    let ctx = GenerationContext::resolve(args.project_root.as_deref(), None)?;

    let config_path = match &args.config {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => ctx.project_root.join(path),
        None => ctx.config_path(),
    };
    let config = Config::load_or_default(&config_path)?;

    let resolved = profile::resolve(
        args.profile.as_deref(),
        &ctx.env,
        &args.invoked_by,
        &config.dev_invocations,
        &config.prod_invocations,
        config.default_profile,
    )?;

    println!("Profile: {}", resolved.profile);
    println!("Source:  {}", resolved.source);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;
    use serial_test::serial;

    #[test]
    #[serial]
    fn resolves_explicit_profile_without_sources() {
        // No property files or templates exist; the profile command must
        // still succeed.
        let project = TestProject::new();
        let args = ProfileArgs {
            profile: Some("prod".to_string()),
            invoked_by: vec![],
            config: None,
            project_root: Some(project.root().to_path_buf()),
        };
        cmd_profile(args).unwrap();
    }

    #[test]
    #[serial]
    fn rejects_unknown_profile() {
        let project = TestProject::new();
        let args = ProfileArgs {
            profile: Some("staging".to_string()),
            invoked_by: vec![],
            config: None,
            project_root: Some(project.root().to_path_buf()),
        };
        let err = cmd_profile(args).unwrap_err();
        assert!(err.to_string().contains("staging"));
    }
}
