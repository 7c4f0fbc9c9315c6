use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_CONFIG: &str = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n";

const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create the metadata directory of a new repository
    ///
    /// Fails when the work tree already holds one.
    pub fn init(&self) -> anyhow::Result<()> {
        let twig_path = self.twig_path();
        if twig_path.exists() {
            anyhow::bail!("repository already exists at {}", twig_path.display());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        fs::create_dir_all(twig_path.join("refs").join("tags"))
            .context("Failed to create .twig/refs/tags directory")?;

        fs::write(twig_path.join("config"), DEFAULT_CONFIG)
            .context("Failed to write .twig/config")?;

        fs::write(twig_path.join("description"), DEFAULT_DESCRIPTION)
            .context("Failed to write .twig/description")?;

        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        tracing::info!(path = %twig_path.display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            twig_path.display()
        )?;

        Ok(())
    }
}
