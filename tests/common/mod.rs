//! Shared fixtures for packaging tests.
//!
//! Builds a throwaway workspace with a fake Xcode project, a prebuilt app
//! tree and shell-script stand-ins for `xcodebuild` and `create-dmg`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const README: &str = "README_安装必读.txt";
pub const NESTED_FILE: &str = "Contents/Resources/资源/图标 é.txt";

/// How the fake `xcodebuild` behaves.
#[derive(Clone, Copy, Debug)]
pub enum BuildMode {
    /// Produces the app bundle and exits 0
    Succeed,
    /// Prints an error and exits 65
    Fail,
    /// Exits 0 without producing the app bundle
    NoApp,
}

pub struct TestWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
}

impl TestWorkspace {
    pub fn new(mode: BuildMode) -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp.path().to_path_buf();
        let workspace = Self { _temp: temp, root };

        workspace.create_app_fixture();
        std::fs::create_dir_all(workspace.project_dir().join("ImessageBot.xcodeproj"))
            .expect("Failed to create project");
        std::fs::write(workspace.project_dir().join(README), "请将应用拖入 Applications\n")
            .expect("Failed to write readme");
        workspace.write_fake_xcodebuild(mode);
        workspace.write_fake_create_dmg();
        workspace.write_settings("");

        workspace
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.join("work/ImessageBot")
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.root.join("work/ImessageBot_Pack")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.project_dir().join("build")
    }

    pub fn image_path(&self) -> PathBuf {
        self.project_dir().join("ImessageBot.dmg")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("work/dmg-packager.toml")
    }

    /// Pristine copy of what the fake build produces.
    pub fn app_fixture(&self) -> PathBuf {
        self.root.join("fixture/ImessageBot.app")
    }

    /// Copy of the staging directory taken by the fake `create-dmg`.
    pub fn captured_staging(&self) -> PathBuf {
        self.root.join("captured")
    }

    /// Exists once the fake `create-dmg` has been invoked.
    pub fn create_dmg_marker(&self) -> PathBuf {
        self.root.join("create-dmg.invoked")
    }

    fn tools_dir(&self) -> PathBuf {
        self.root.join("tools")
    }

    /// Rewrites the settings file.
    ///
    /// `extra` lands right after the `[dmg]` volume name, so bare keys are
    /// layout settings and table headers start new sections. A `[tools]`
    /// section pointing at the fake scripts is appended unless `extra` has one.
    pub fn write_settings(&self, extra: &str) {
        let mut settings = format!(
            r#"[project]
root = "ImessageBot"
scheme = "ImessageBot"
configuration = "Debug"
readme = "{README}"

[dmg]
volume_name = "ImessageBot 安装包"
{extra}
"#
        );
        if !extra.contains("[tools]") {
            settings.push_str(&format!(
                "\n[tools]\nxcodebuild = \"{}\"\ncreate_dmg = \"{}\"\n",
                self.tool_path("xcodebuild").display(),
                self.tool_path("create-dmg").display()
            ));
        }
        std::fs::write(self.settings_path(), settings).expect("Failed to write settings");
    }

    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.tools_dir().join(name)
    }

    /// Writes a tool script that prints a message and exits with `code`.
    pub fn write_failing_tool(&self, name: &str, code: i32) -> PathBuf {
        let path = self.tool_path(name);
        write_executable(
            &path,
            &format!("#!/bin/sh\necho '{name}: simulated failure' >&2\nexit {code}\n"),
        );
        path
    }

    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("dmg_packager").expect("binary built");
        cmd.arg("--config")
            .arg(self.settings_path())
            .env("NO_COLOR", "1")
            .env_remove("DMG_PACKAGER_CONFIG");
        cmd
    }

    fn create_app_fixture(&self) {
        let app = self.app_fixture();
        std::fs::create_dir_all(app.join("Contents/MacOS")).unwrap();
        std::fs::create_dir_all(app.join("Contents/Resources/资源")).unwrap();
        std::fs::write(app.join("Contents/Info.plist"), "<plist version=\"1.0\"/>").unwrap();
        std::fs::write(app.join("Contents/MacOS/ImessageBot"), [0xcf, 0xfa, 0xed, 0xfe, 0, 1])
            .unwrap();
        std::fs::write(app.join(NESTED_FILE), "图标数据").unwrap();
    }

    fn write_fake_xcodebuild(&self, mode: BuildMode) {
        let tail = match mode {
            BuildMode::Succeed => format!(
                "cp -R '{}' \"$dd/Build/Products/$cfg/$scheme.app\"\necho '** BUILD SUCCEEDED **'\n",
                self.app_fixture().display()
            ),
            BuildMode::Fail => "echo 'error: compile failed' >&2\nexit 65\n".to_string(),
            BuildMode::NoApp => "echo '** BUILD SUCCEEDED **'\n".to_string(),
        };
        let script = format!(
            r#"#!/bin/sh
set -e
scheme=""; cfg=""; dd=""
while [ $# -gt 0 ]; do
  case "$1" in
    -scheme) scheme="$2"; shift ;;
    -configuration) cfg="$2"; shift ;;
    -derivedDataPath) dd="$2"; shift ;;
  esac
  shift
done
echo "Building $scheme ($cfg)"
mkdir -p "$dd/Build/Products/$cfg"
{tail}"#
        );
        write_executable(&self.tool_path("xcodebuild"), &script);
    }

    fn write_fake_create_dmg(&self) {
        let script = format!(
            r#"#!/bin/sh
set -e
touch '{marker}'
while [ $# -gt 2 ]; do shift; done
image="$1"; src="$2"
rm -rf '{capture}'
cp -R "$src" '{capture}'
cd "$src"
{{
  find . -print | LC_ALL=C sort
  find . -type f | LC_ALL=C sort | while IFS= read -r f; do cat "$f"; done
}} > "$image"
echo "created: $image"
"#,
            marker = self.create_dmg_marker().display(),
            capture = self.captured_staging().display(),
        );
        write_executable(&self.tool_path("create-dmg"), &script);
    }
}

fn write_executable(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).expect("Failed to write script");
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}
