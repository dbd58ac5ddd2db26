//! # nuconsolidate
//!
//! Resolves NuGet `NU1605` package downgrade errors in a .NET solution. It
//! runs `dotnet restore`, reads the downgrade diagnostics it prints, works out
//! which project in each conflict chain should pin the package, and rewrites
//! that project's file to reference the highest version the chain asks for.
//!
//! ## Quick Example
//!
//! ```
//! use nuconsolidate::conflicts::ConflictSet;
//! use nuconsolidate::diagnostic::DiagnosticParser;
//! use nuconsolidate::manifest::ManifestEditor;
//!
//! let parser = DiagnosticParser::new(r"^Acme\.").unwrap();
//! let output = [
//!     r"C:\src\Acme.Web\Acme.Web.csproj : error NU1605:  Acme.Web -> Acme.Core -> Serilog (>= 2.12.0) [C:\src\Acme.sln]",
//!     r"C:\src\Acme.Core\Acme.Core.csproj : error NU1605:  Acme.Core -> Serilog (>= 2.10.0) [C:\src\Acme.sln]",
//! ];
//! let conflicts = ConflictSet::collect(&parser, output).unwrap();
//! let by_project = conflicts.by_project();
//!
//! let manifest = "<Project>\n  <ItemGroup>\n    <PackageReference Include=\"Serilog\" Version=\"2.10.0\" />\n  </ItemGroup>\n</Project>\n";
//! let editor = ManifestEditor::new().unwrap();
//! let (text, edits) = editor.apply_all(manifest, &by_project["Acme.Core"]).unwrap();
//!
//! assert!(text.contains(r#"Include="Serilog" Version="2.12.0""#));
//! assert_eq!(edits.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Versions (`version`)**: Four-part numeric package versions and their
//!   ordering.
//! - **Diagnostics (`diagnostic`)**: Turning one `NU1605` line into a conflict
//!   record.
//! - **Conflicts (`conflicts`)**: Deduplicating records and grouping them by
//!   project and package.
//! - **Manifests (`manifest`)**: Text-level edits that update or add a
//!   `<PackageReference>` without disturbing the rest of the file.
//! - **Projects (`project`)**: Locating the one project file for a name.
//! - **Restore (`restore`)**: Running `dotnet restore` and capturing its output.
//! - **Consolidation (`consolidate`)**: The end-to-end run tying these together.
//!
//! ## Execution Flow
//!
//! 1.  **Restore**: Run the restore once; success ends the run.
//! 2.  **Collect**: Parse every output line into a set of conflicts.
//! 3.  **Resolve**: Find each owning project's file.
//! 4.  **Edit**: Apply each package's group to the file text in order.
//! 5.  **Write**: Save each changed file once.

pub mod conflicts;
pub mod consolidate;
pub mod diagnostic;
pub mod error;
pub mod manifest;
pub mod output;
pub mod project;
pub mod restore;
pub mod version;

#[cfg(test)]
mod version_proptest;
