//! Property-based tests for version ordering, diagnostic extraction and
//! manifest edits.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::conflicts::ConflictGroup;
    use crate::diagnostic::{ConflictRecord, DiagnosticParser};
    use crate::manifest::ManifestEditor;
    use crate::version::PackageVersion;
    use proptest::prelude::*;

    fn version_strategy() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0u32..1000, 2..=4)
    }

    fn render(parts: &[u32]) -> String {
        parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    // ============================================================================
    // PackageVersion property tests
    // ============================================================================

    proptest! {
        /// Property: parsing then displaying reproduces canonical numeric text
        #[test]
        fn version_display_is_canonical(parts in version_strategy()) {
            let text = render(&parts);
            let version = PackageVersion::parse(&text).unwrap();
            prop_assert_eq!(version.to_string(), text);
        }

        /// Property: ordering agrees with zero-padded component comparison
        #[test]
        fn version_order_matches_padded_parts(a in version_strategy(), b in version_strategy()) {
            let pad = |v: &[u32]| {
                let mut p = v.to_vec();
                p.resize(4, 0);
                p
            };
            let va = PackageVersion::parse(&render(&a)).unwrap();
            let vb = PackageVersion::parse(&render(&b)).unwrap();
            if pad(&a) != pad(&b) {
                prop_assert_eq!(va.cmp(&vb), pad(&a).cmp(&pad(&b)));
            }
        }

        /// Property: ordering is consistent with equality
        #[test]
        fn version_order_consistent_with_eq(a in version_strategy(), b in version_strategy()) {
            let va = PackageVersion::parse(&render(&a)).unwrap();
            let vb = PackageVersion::parse(&render(&b)).unwrap();
            prop_assert_eq!(va == vb, va.cmp(&vb) == std::cmp::Ordering::Equal);
        }
    }

    // ============================================================================
    // DiagnosticParser property tests
    // ============================================================================

    proptest! {
        /// Property: lines without the NU1605 marker never match
        #[test]
        fn lines_without_marker_never_match(line in "[^N]*") {
            let parser = DiagnosticParser::new(".*").unwrap();
            prop_assert_eq!(parser.parse_line(&line).unwrap(), None);
        }

        /// Property: a well-formed chain yields its rightmost owned project
        #[test]
        fn well_formed_chain_extracts_record(
            owners in prop::collection::vec("Acme\\.[A-Z][a-z]{1,8}", 1..4),
            package in "[A-Z][a-zA-Z]{1,10}(\\.[A-Z][a-zA-Z]{1,8}){0,2}",
            parts in version_strategy(),
        ) {
            let parser = DiagnosticParser::new(r"^Acme\.[A-Z][a-z]+$").unwrap();
            let version = render(&parts);
            let chain = format!("{} -> Vendor.Lib -> {} (>= {})", owners.join(" -> "), package, version);
            let line = format!(r"C:\src\App\App.csproj : error NU1605:  {} [C:\src\App.sln]", chain);

            let record = parser.parse_line(&line).unwrap().unwrap();
            prop_assert_eq!(&record.project, owners.last().unwrap());
            prop_assert_eq!(&record.package, &package);
            prop_assert_eq!(record.version.to_string(), version);
        }
    }

    // ============================================================================
    // ManifestEditor property tests
    // ============================================================================

    proptest! {
        /// Property: applying a group twice equals applying it once
        #[test]
        fn manifest_edit_is_idempotent(
            pinned in version_strategy(),
            requested in version_strategy(),
            present in any::<bool>(),
        ) {
            let pinned = PackageVersion::parse(&render(&pinned)).unwrap();
            let requested = PackageVersion::parse(&render(&requested)).unwrap();
            let foo = if present { "Foo" } else { "Other" };
            let manifest = format!(
                "<Project>\n  <ItemGroup>\n    <PackageReference Include=\"{}\" Version=\"{}\" />\n  </ItemGroup>\n</Project>\n",
                foo, pinned
            );
            let group = ConflictGroup::from_records(&[
                ConflictRecord::new("App", "Foo", pinned),
                ConflictRecord::new("App", "Foo", requested),
            ])
            .unwrap();

            let editor = ManifestEditor::new().unwrap();
            let (once, _) = editor.apply(&manifest, &group).unwrap();
            let (twice, _) = editor.apply(&once, &group).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
