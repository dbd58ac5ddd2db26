//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that lays out a small solution on disk and
//! a fake `dotnet` program that replays canned restore output, so the CLI can
//! be driven end to end without a .NET SDK.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_project("src/ProjA/ProjA.csproj", manifests::PROJ_A)
//!         .with_restore(1, &[conflicts::PROJ_A_NEWTONSOFT]);
//!     fixture.command().args(["-r", "win-x64", "-n", "^Proj"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::conflicts;
    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Project file contents used across tests.
#[allow(dead_code)]
pub mod manifests {
    pub const PROJ_A: &str = r#"<Project Sdk="Microsoft.NET.Sdk">

  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>

  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json" Version="8.0.0" />
    <PackageReference Include="Serilog" Version="2.10.0" />
  </ItemGroup>

</Project>
"#;

    pub const PROJ_B: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <ProjectReference Include="..\ProjA\ProjA.csproj" />
  </ItemGroup>
  <ItemGroup>
    <PackageReference Include="Polly" Version="7.1.0" />
  </ItemGroup>
</Project>
"#;

    /// A project with no package references at all.
    pub const NO_PACKAGES: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
</Project>
"#;
}

/// Restore output lines used across tests.
#[allow(dead_code)]
pub mod conflicts {
    /// Summary line restore prints ahead of the chains; never a conflict itself.
    pub const NEWTONSOFT_DOWNGRADE: &str = r"C:\src\ProjA\ProjA.csproj : error NU1605: Detected package downgrade: Newtonsoft.Json from 9.0.0 to 8.0.0. Reference the package directly from the project to select a different version. [C:\src\All.sln]";
    pub const PROJ_A_NEWTONSOFT: &str = r"C:\src\ProjA\ProjA.csproj : error NU1605:  ProjA -> Lib.Http 1.2.0 -> Newtonsoft.Json (>= 9.0.0) [C:\src\All.sln]";
    pub const PROJ_A_NEWTONSOFT_DIRECT: &str = r"C:\src\ProjA\ProjA.csproj : error NU1605:  ProjA -> Newtonsoft.Json (>= 8.0.0) [C:\src\All.sln]";
    pub const PROJ_B_POLLY: &str = r"C:\src\ProjB\ProjB.csproj : error NU1605:  ProjB -> ProjA -> Vendor.Resilience -> Polly (>= 7.2.4) [C:\src\All.sln]";
    pub const PROJ_B_POLLY_DIRECT: &str = r"C:\src\ProjB\ProjB.csproj : error NU1605:  ProjB -> Polly (>= 7.1.0) [C:\src\All.sln]";
    /// A chain through a shared framework whose segments carry resolved versions.
    pub const PROJ_A_NETCORE: &str = r"C:\src\ProjA\ProjA.csproj : error NU1605:  ProjA -> Microsoft.AspNetCore.App 2.1.0 -> Microsoft.NETCore.App (>= 2.1.0) [C:\src\All.sln]";
    pub const UNOWNED: &str = r"C:\src\ProjA\ProjA.csproj : error NU1605:  Vendor.App -> Vendor.Lib -> Polly (>= 7.2.4) [C:\src\All.sln]";
    pub const NOISE: &[&str] = &[
        "  Determining projects to restore...",
        r"  Failed to restore C:\src\ProjA\ProjA.csproj (in 412 ms).",
    ];
}

/// A temporary solution directory with a fake `dotnet`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture containing an empty `All.sln`.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("All.sln")
            .write_str("")
            .expect("Failed to write solution file");
        Self { temp_dir }
    }

    /// Add a project file at `path` relative to the solution directory.
    pub fn with_project(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write project file");
        self
    }

    /// Make the fake `dotnet` print `lines` and exit with `exit_code`.
    ///
    /// The fake also records the arguments it was called with in
    /// `restore-args.txt`, one per line.
    #[cfg(unix)]
    pub fn with_restore(self, exit_code: i32, lines: &[&str]) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let output = self.tool_dir().join("restore-output.txt");
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&output, text).expect("Failed to write restore output");

        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\ncat '{}'\nexit {}\n",
            self.restore_args_path().display(),
            output.display(),
            exit_code
        );
        let program = self.dotnet_path();
        std::fs::write(&program, script).expect("Failed to write fake dotnet");
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake dotnet executable");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path to the solution file.
    pub fn solution(&self) -> PathBuf {
        self.path().join("All.sln")
    }

    /// Read a file relative to the solution directory.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Arguments the fake `dotnet` received, if it ran.
    pub fn restore_args(&self) -> Option<Vec<String>> {
        std::fs::read_to_string(self.restore_args_path())
            .ok()
            .map(|text| text.lines().map(|l| l.to_string()).collect())
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    fn tool_dir(&self) -> PathBuf {
        let dir = self.path().join(".tool");
        std::fs::create_dir_all(&dir).expect("Failed to create tool directory");
        dir
    }

    fn dotnet_path(&self) -> PathBuf {
        self.tool_dir().join("dotnet")
    }

    fn restore_args_path(&self) -> PathBuf {
        self.tool_dir().join("restore-args.txt")
    }

    /// Create a command pointed at this fixture's solution and fake `dotnet`.
    ///
    /// `--rid` and `--namespaces` are left to the test.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nuconsolidate");
        cmd.current_dir(self.path())
            .env("NUCONSOLIDATE_DOTNET", self.dotnet_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--sln")
            .arg(self.solution());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
