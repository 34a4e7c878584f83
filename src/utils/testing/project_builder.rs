// builder for creating test projects with fragments

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// represents a fragment file to be created
#[derive(Debug, Clone)]
pub struct TestFragment {
    pub name: String,
    pub sections: Vec<(String, Vec<String>)>,
    pub raw: Option<String>,
}

impl TestFragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
            raw: None,
        }
    }

    /// add a section with a single bullet per item
    pub fn section(mut self, title: impl Into<String>, bullets: &[&str]) -> Self {
        let paragraphs = bullets.iter().map(|b| format!("- {}", b)).collect();
        self.sections.push((title.into(), paragraphs));
        self
    }

    /// use `content` verbatim instead of rendering sections
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.raw = Some(content.into());
        self
    }

    /// fragment text as an author would write it
    pub fn render(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut text = String::from(".. A new changelog entry.\n");
        for (title, paragraphs) in &self.sections {
            text.push('\n');
            text.push_str(title);
            text.push('\n');
            text.push_str(&"-".repeat(title.chars().count()));
            text.push('\n');
            for paragraph in paragraphs {
                text.push('\n');
                text.push_str(paragraph);
                text.push('\n');
            }
        }
        text
    }
}

/// builder for test projects
pub struct TestProjectBuilder {
    config: Option<String>,
    fragment_directory: String,
    fragments: Vec<TestFragment>,
    changelog: Option<String>,
}

impl TestProjectBuilder {
    /// create a new builder that uses a temporary directory
    pub fn new() -> Self {
        Self {
            config: None,
            fragment_directory: "changelog.d".to_string(),
            fragments: Vec::new(),
            changelog: None,
        }
    }

    /// write `scrivener.toml` with the given contents
    pub fn config(mut self, toml: impl Into<String>) -> Self {
        self.config = Some(toml.into());
        self
    }

    /// place fragments somewhere other than the default directory
    pub fn fragment_directory(mut self, dir: impl Into<String>) -> Self {
        self.fragment_directory = dir.into();
        self
    }

    pub fn fragment(mut self, fragment: TestFragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// existing contents of the changelog file
    pub fn changelog(mut self, content: impl Into<String>) -> Self {
        self.changelog = Some(content.into());
        self
    }

    /// build the project and return it
    pub fn build(self) -> Result<TestProject, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();

        if let Some(config) = &self.config {
            fs::write(root.join("scrivener.toml"), config)?;
        }

        let fragment_dir = root.join(&self.fragment_directory);
        if !self.fragments.is_empty() {
            fs::create_dir_all(&fragment_dir)?;
        }
        for fragment in &self.fragments {
            fs::write(fragment_dir.join(&fragment.name), fragment.render())?;
        }

        if let Some(changelog) = &self.changelog {
            fs::write(root.join("CHANGELOG.rst"), changelog)?;
        }

        Ok(TestProject {
            path: root,
            _temp_dir: temp_dir,
            fragment_dir,
        })
    }
}

impl Default for TestProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// represents a built test project
pub struct TestProject {
    pub path: PathBuf,
    _temp_dir: TempDir,
    pub fragment_dir: PathBuf,
}

impl TestProject {
    /// get the path to the project root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// names of the fragment files currently on disk
    pub fn fragment_names(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        if !self.fragment_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.fragment_dir)? {
            names.push(entry?.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    /// read a file relative to the project root
    pub fn read(&self, rel_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(fs::read_to_string(self.path.join(rel_path))?)
    }
}
