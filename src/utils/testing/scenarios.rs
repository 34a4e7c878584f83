// pre-defined test scenarios

use super::project_builder::{TestFragment, TestProject, TestProjectBuilder};

const EXISTING_CHANGELOG: &str = "\
Changelog
=========

.. scrivener-insert-here

0.1.0 - 2026-01-01
==================

Added
-----

- First release.
";

/// pre-defined test scenarios
pub enum TestScenario {
    /// a single fragment with one section
    SingleFragment,
    /// three fragments touching overlapping categories
    SeveralFragments,
    /// fragments plus an existing changelog with an insert marker
    ExistingChangelog,
}

impl TestScenario {
    /// build a project from a predefined scenario
    pub fn build(self) -> Result<TestProject, Box<dyn std::error::Error>> {
        match self {
            TestScenario::SingleFragment => Self::build_single(),
            TestScenario::SeveralFragments => Self::several_fragments().build(),
            TestScenario::ExistingChangelog => Self::several_fragments()
                .changelog(EXISTING_CHANGELOG)
                .build(),
        }
    }

    fn build_single() -> Result<TestProject, Box<dyn std::error::Error>> {
        TestProjectBuilder::new()
            .fragment(TestFragment::new("20261001_100000.rst").section("Added", &["A thing."]))
            .build()
    }

    /// fragments out of category order, with one repeated category
    fn several_fragments() -> TestProjectBuilder {
        TestProjectBuilder::new()
            .fragment(
                TestFragment::new("20261001_100000_parser.rst")
                    .section("Fixed", &["Parser no longer panics."])
                    .section("Added", &["Comment lines."]),
            )
            .fragment(TestFragment::new("20261002_090000_docs.rst").section("Added", &["Docs."]))
            .fragment(
                TestFragment::new("20261003_080000_cleanup.rst")
                    .section("Removed", &["Old flag."]),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_fragment_scenario() {
        let project = TestScenario::SingleFragment.build().unwrap();
        assert!(project.path().exists());
        assert_eq!(project.fragment_names().unwrap(), vec!["20261001_100000.rst"]);

        let text = project.read("changelog.d/20261001_100000.rst").unwrap();
        assert!(text.contains("Added\n-----\n\n- A thing.\n"));
    }

    #[test]
    fn test_existing_changelog_scenario() {
        let project = TestScenario::ExistingChangelog.build().unwrap();
        assert_eq!(project.fragment_names().unwrap().len(), 3);
        assert!(project.read("CHANGELOG.rst").unwrap().contains(".. scrivener-insert-here"));
    }
}
