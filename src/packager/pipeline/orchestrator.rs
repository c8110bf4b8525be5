//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] orchestrator. A run is planned as an
//! ordered list of [`Phase`]s, each an ordered list of [`Action`]s, and then
//! executed front to back. The first failing action aborts the run; nothing
//! is retried or rolled back.

use super::checksum::calculate_sha256;
use super::runner::StepRunner;
use super::step::{Step, build_step, copy_app_step, copy_readme_step, create_dmg_step};
use super::tool_detection::ensure_tools;
use crate::cli::RuntimeConfig;
use crate::packager::{Error, Result, Settings, utils::fs};
use std::fmt;
use std::path::{Path, PathBuf};

/// One unit of work in a packaging run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Delete a directory tree if present
    RemoveDir(PathBuf),
    /// Delete a file if present
    RemoveFile(PathBuf),
    /// Create a directory and its parents
    CreateDir(PathBuf),
    /// Fail with [`Error::MissingAppBundle`] unless the path exists
    RequireAppBundle(PathBuf),
    /// Run an external command
    Run(Step),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveDir(path) => write!(f, "remove directory {}", path.display()),
            Self::RemoveFile(path) => write!(f, "remove file {}", path.display()),
            Self::CreateDir(path) => write!(f, "create directory {}", path.display()),
            Self::RequireAppBundle(path) => write!(f, "require {}", path.display()),
            Self::Run(step) => write!(f, "run {step}"),
        }
    }
}

/// A titled group of actions, reported as one section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phase {
    /// Section title
    pub title: &'static str,
    /// Actions in execution order
    pub actions: Vec<Action>,
}

/// Result of a successful run.
#[derive(Clone, Debug)]
pub struct PackagedImage {
    /// Location of the disk image
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Packaging orchestrator.
///
/// Sequences clean, build, stage, image and cleanup.
///
/// # Examples
///
/// ```no_run
/// use dmg_packager::cli::RuntimeConfig;
/// use dmg_packager::packager::{Packager, Settings};
/// use std::path::Path;
///
/// # async fn example() -> dmg_packager::packager::Result<()> {
/// let settings = Settings::load(Path::new("dmg-packager.toml"))?;
/// let runtime = RuntimeConfig::new(false);
///
/// let image = Packager::new(settings).package(&runtime).await?;
/// println!("{} ({} bytes)", image.path.display(), image.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
    keep_build_dir: bool,
}

impl Packager {
    /// Creates a packager for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            keep_build_dir: false,
        }
    }

    /// Leaves the derived data directory in place after the run.
    pub fn keep_build_dir(mut self, keep: bool) -> Self {
        self.keep_build_dir = keep;
        self
    }

    /// Returns the settings this packager runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Plans the run without touching anything.
    pub fn plan(&self) -> Vec<Phase> {
        let settings = &self.settings;

        let mut cleanup = vec![Action::RemoveDir(settings.staging_dir().to_path_buf())];
        if !self.keep_build_dir {
            cleanup.push(Action::RemoveDir(settings.build_dir().to_path_buf()));
        }

        vec![
            Phase {
                title: "Step 1: Clean previous output",
                actions: vec![
                    Action::RemoveDir(settings.staging_dir().to_path_buf()),
                    Action::RemoveFile(settings.image_path().to_path_buf()),
                ],
            },
            Phase {
                title: "Step 2: Build Xcode project",
                actions: vec![Action::Run(build_step(settings))],
            },
            Phase {
                title: "Step 3: Stage package contents",
                actions: vec![
                    Action::CreateDir(settings.staging_dir().to_path_buf()),
                    Action::RequireAppBundle(settings.app_bundle_path()),
                    Action::Run(copy_app_step(settings)),
                    Action::Run(copy_readme_step(settings)),
                ],
            },
            Phase {
                title: "Step 4: Create disk image",
                actions: vec![Action::Run(create_dmg_step(settings))],
            },
            Phase {
                title: "Step 5: Final cleanup",
                actions: cleanup,
            },
        ]
    }

    /// Executes the full run.
    ///
    /// All configured tools are resolved first; a missing tool fails the run
    /// before any file is removed.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Later phases are not executed.
    pub async fn package(&self, runtime: &RuntimeConfig) -> Result<PackagedImage> {
        log::info!(
            "Packaging {} ({}) into {}",
            self.settings.scheme(),
            self.settings.configuration(),
            self.settings.image_path().display()
        );
        ensure_tools(self.settings.tools().all())?;

        let runner = StepRunner::new(runtime);
        for phase in self.plan() {
            runtime.section(phase.title);
            for action in &phase.actions {
                self.execute(action, &runner, runtime).await?;
            }
        }

        let path = self.settings.image_path().to_path_buf();
        let size = tokio::fs::metadata(&path)
            .await
            .map_err(|source| Error::Fs {
                context: "disk image tool reported success but produced no image at".into(),
                path: path.clone(),
                source,
            })?
            .len();
        let checksum = calculate_sha256(&path).await?;

        Ok(PackagedImage {
            path,
            size,
            checksum,
        })
    }

    async fn execute(
        &self,
        action: &Action,
        runner: &StepRunner<'_>,
        runtime: &RuntimeConfig,
    ) -> Result<()> {
        match action {
            Action::RemoveDir(path) => {
                if path == self.settings.build_dir() {
                    runtime.progress(&format!("Removing build directory: {}", path.display()));
                }
                if fs::remove_dir_all(path).await? {
                    log::info!("Removed {}", path.display());
                }
            }
            Action::RemoveFile(path) => {
                if fs::remove_file(path).await? {
                    log::info!("Removed {}", path.display());
                }
            }
            Action::CreateDir(path) => fs::create_dir_all(path).await?,
            Action::RequireAppBundle(path) => require_app_bundle(path).await?,
            Action::Run(step) => runner.run(step).await?,
        }
        Ok(())
    }
}

async fn require_app_bundle(path: &Path) -> Result<()> {
    if fs::exists(path).await? {
        log::debug!("Found app bundle: {}", path.display());
        return Ok(());
    }
    Err(Error::MissingAppBundle {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    fn settings(root: &Path) -> Settings {
        SettingsBuilder::new()
            .project_dir(root.join("App"))
            .scheme("App")
            .readme("README.txt")
            .build()
            .unwrap()
    }

    #[test]
    fn plan_has_five_ordered_phases() {
        let packager = Packager::new(settings(Path::new("/work")));
        let plan = packager.plan();

        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan[0].actions,
            [
                Action::RemoveDir(PathBuf::from("/work/App_Pack")),
                Action::RemoveFile(PathBuf::from("/work/App/App.dmg")),
            ]
        );
        assert!(matches!(&plan[1].actions[..], [Action::Run(step)] if step.name() == "build"));
        assert!(matches!(
            &plan[2].actions[..],
            [
                Action::CreateDir(_),
                Action::RequireAppBundle(_),
                Action::Run(_),
                Action::Run(_)
            ]
        ));
        assert!(matches!(&plan[3].actions[..], [Action::Run(step)] if step.name() == "disk image"));
        assert_eq!(
            plan[4].actions,
            [
                Action::RemoveDir(PathBuf::from("/work/App_Pack")),
                Action::RemoveDir(PathBuf::from("/work/App/build")),
            ]
        );
    }

    #[test]
    fn keep_build_dir_skips_its_removal() {
        let plan = Packager::new(settings(Path::new("/work")))
            .keep_build_dir(true)
            .plan();
        assert_eq!(
            plan[4].actions,
            [Action::RemoveDir(PathBuf::from("/work/App_Pack"))]
        );
    }

    #[tokio::test]
    async fn clean_phase_removes_stale_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let packager = Packager::new(settings(dir.path()));
        let staging = packager.settings().staging_dir().to_path_buf();
        let image = packager.settings().image_path().to_path_buf();
        std::fs::create_dir_all(staging.join("App.app/Contents")).unwrap();
        std::fs::create_dir_all(image.parent().unwrap()).unwrap();
        std::fs::write(&image, "stale").unwrap();

        let runtime = RuntimeConfig::new(true);
        let runner = StepRunner::new(&runtime);
        for action in &packager.plan()[0].actions {
            packager.execute(action, &runner, &runtime).await.unwrap();
        }

        assert!(!staging.exists());
        assert!(!image.exists());

        // Second pass over already-absent paths
        for action in &packager.plan()[0].actions {
            packager.execute(action, &runner, &runtime).await.unwrap();
        }
    }

    #[tokio::test]
    async fn missing_app_bundle_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = require_app_bundle(&dir.path().join("App.app"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingAppBundle { .. }));
    }

    #[test]
    fn actions_render_for_dry_run() {
        let action = Action::RemoveFile(PathBuf::from("/work/App/App.dmg"));
        assert_eq!(action.to_string(), "remove file /work/App/App.dmg");
    }
}
