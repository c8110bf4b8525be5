//! External command descriptions.
//!
//! A [`Step`] is a pure description of one external invocation. It carries
//! no behavior; [`StepRunner`](super::StepRunner) executes it.

use crate::packager::settings::Settings;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Decides whether a finished tool counts as successful.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SuccessCriteria {
    /// Exit code 0
    #[default]
    ZeroExit,
    /// Any of the listed exit codes
    ExitCodes(Vec<i32>),
}

impl SuccessCriteria {
    /// Applies the criteria to an exit status.
    ///
    /// Termination by signal is never a success.
    pub fn is_success(&self, status: ExitStatus) -> bool {
        match self {
            Self::ZeroExit => status.success(),
            Self::ExitCodes(codes) => status.code().is_some_and(|code| codes.contains(&code)),
        }
    }
}

/// One external command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    name: String,
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    success: SuccessCriteria,
}

impl Step {
    /// Creates a step running `program` with no arguments.
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            success: SuccessCriteria::default(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Sets the working directory of the child process.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Replaces the success criteria.
    pub fn success(mut self, success: SuccessCriteria) -> Self {
        self.success = success;
        self
    }

    /// Human-readable step name, used in progress and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program as configured.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, in order.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, `None` for the packager's own.
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Success criteria.
    pub fn criteria(&self) -> &SuccessCriteria {
        &self.success
    }
}

/// Renders the step as a shell-like command line.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(OsStr::new(&self.program)))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+'));
    if plain {
        arg.into_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// `xcodebuild -project … -scheme … -configuration … -derivedDataPath … build`
pub fn build_step(settings: &Settings) -> Step {
    Step::new("build", &settings.tools().xcodebuild)
        .arg("-project")
        .arg(settings.xcodeproj())
        .args(["-scheme", settings.scheme()])
        .args(["-configuration", settings.configuration()])
        .arg("-derivedDataPath")
        .arg(settings.build_dir())
        .arg("build")
        .current_dir(settings.project_dir())
}

/// `cp -R <app> <staging>/`
pub fn copy_app_step(settings: &Settings) -> Step {
    Step::new("copy app bundle", &settings.tools().copy)
        .arg("-R")
        .arg(settings.app_bundle_path())
        .arg(dir_arg(settings.staging_dir()))
}

/// `cp <readme> <staging>/`
pub fn copy_readme_step(settings: &Settings) -> Step {
    Step::new("copy readme", &settings.tools().copy)
        .arg(settings.readme_path())
        .arg(dir_arg(settings.staging_dir()))
}

/// `create-dmg` with the configured window layout.
pub fn create_dmg_step(settings: &Settings) -> Step {
    let dmg = settings.dmg();
    let app = settings.app_bundle_name();
    let pair = |(x, y): (u32, u32)| [x.to_string(), y.to_string()];

    let mut step = Step::new("disk image", &settings.tools().create_dmg)
        .args(["--volname", settings.volume_name()])
        .arg("--window-pos")
        .args(pair(dmg.window_position))
        .arg("--window-size")
        .args(pair(dmg.window_size))
        .args(["--icon-size".to_string(), dmg.icon_size.to_string()])
        .args(["--icon", app.as_str()])
        .args(pair(dmg.app_icon_position));
    if dmg.hide_app_extension {
        step = step.args(["--hide-extension", app.as_str()]);
    }
    step.arg("--app-drop-link")
        .args(pair(dmg.app_drop_link))
        .args(["--icon", settings.readme_name()])
        .args(pair(dmg.readme_icon_position))
        .arg(settings.image_path())
        .arg(dir_arg(settings.staging_dir()))
}

/// Trailing separator so copy tools treat the destination as a directory.
fn dir_arg(dir: &Path) -> OsString {
    let mut arg = dir.as_os_str().to_os_string();
    arg.push("/");
    arg
}
