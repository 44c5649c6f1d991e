//! Commit-and-push publishing through the `git` command line

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::Local;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{PublishOutcome, Publisher};
use crate::config::PublishConfig;
use crate::utils::url::UrlUtils;

pub struct GitPublisher {
    config: PublishConfig,
    git_command: String,
}

impl GitPublisher {
    pub fn new(config: PublishConfig) -> Self {
        Self {
            config,
            git_command: "git".to_string(),
        }
    }

    /// Use a different git executable, mainly for tests
    pub fn with_git_command<S: Into<String>>(mut self, command: S) -> Self {
        self.git_command = command.into();
        self
    }

    pub fn commit_message(&self) -> String {
        format!(
            "{} - {}",
            self.config.commit_message_prefix,
            Local::now().format("%Y-%m-%d %H:%M")
        )
    }

    async fn git(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(&self.git_command);
        cmd.args(args)
            .current_dir(&self.config.repository)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running git {}", args.join(" "));

        tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| anyhow!("git {} timed out after {:?}", args[0], self.config.timeout))?
            .with_context(|| format!("Failed to execute git {}", args[0]))
    }

    /// Run a git command that must succeed
    async fn git_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.git(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(output)
    }

    async fn is_available(&self) -> bool {
        let mut cmd = Command::new(&self.git_command);
        cmd.arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        matches!(
            tokio::time::timeout(self.config.timeout, cmd.status()).await,
            Ok(Ok(status)) if status.success()
        )
    }

    /// Path of `file` relative to the repository root
    fn relative_path(&self, file: &Path) -> Result<PathBuf> {
        let repository = self
            .config
            .repository
            .canonicalize()
            .with_context(|| format!("Repository {} not found", self.config.repository.display()))?;
        let file = file
            .canonicalize()
            .with_context(|| format!("Output file {} not found", file.display()))?;

        file.strip_prefix(&repository)
            .map(Path::to_path_buf)
            .map_err(|_| {
                anyhow!(
                    "{} is outside repository {}",
                    file.display(),
                    repository.display()
                )
            })
    }

    async fn has_changes(&self, relative: &str) -> Result<bool> {
        let tracked = self
            .git(&["ls-files", "--error-unmatch", "--", relative])
            .await?
            .status
            .success();
        if !tracked {
            debug!("{} is not tracked yet", relative);
            return Ok(true);
        }

        // Compared against HEAD so a file staged by an earlier, interrupted
        // run still counts as changed
        let diff = self.git(&["diff", "--quiet", "HEAD", "--", relative]).await?;
        Ok(diff.status.code() != Some(0))
    }

    async fn try_publish(&self, path: &Path) -> Result<PublishOutcome> {
        if !self.is_available().await {
            bail!("git not available");
        }

        if !self.config.repository.join(".git").exists() {
            bail!(
                "No git repository found at {}",
                self.config.repository.display()
            );
        }

        let relative = self.relative_path(path)?;
        let relative = relative.to_string_lossy().into_owned();

        if !self.has_changes(&relative).await? {
            info!("No changes in {} - skipping commit", relative);
            return Ok(PublishOutcome::Unchanged);
        }

        let message = self.commit_message();
        self.git_checked(&["add", "--", relative.as_str()]).await?;
        self.git_checked(&["commit", "-m", message.as_str(), "--", relative.as_str()])
            .await?;
        self.git_checked(&["push", self.config.remote.as_str(), self.config.branch.as_str()])
            .await?;

        info!(
            "Published {} to {}/{}",
            relative, self.config.remote, self.config.branch
        );
        if let Some(base) = &self.config.raw_url_base {
            info!("Available at {}", UrlUtils::append_path(base, &relative));
        }

        Ok(PublishOutcome::Published)
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self, path: &Path) -> PublishOutcome {
        if !self.config.enabled {
            return PublishOutcome::Disabled;
        }

        match self.try_publish(path).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Publishing {} failed: {:#}", path.display(), e);
                PublishOutcome::Failed(format!("{e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config(repository: &Path) -> PublishConfig {
        PublishConfig {
            enabled: true,
            repository: repository.to_path_buf(),
            ..PublishConfig::default()
        }
    }

    #[test]
    fn test_commit_message_format() {
        let publisher = GitPublisher::new(PublishConfig {
            commit_message_prefix: "Actualizar EPG".to_string(),
            ..PublishConfig::default()
        });
        let message = publisher.commit_message();

        assert!(message.starts_with("Actualizar EPG - "));
        // "YYYY-MM-DD HH:MM"
        assert_eq!(message.len(), "Actualizar EPG - ".len() + 16);
    }

    #[tokio::test]
    async fn test_disabled_config_short_circuits() {
        let publisher = GitPublisher::new(PublishConfig::default());
        let outcome = publisher.publish(Path::new("does-not-exist.xml")).await;
        assert_eq!(outcome, PublishOutcome::Disabled);
    }

    #[tokio::test]
    async fn test_missing_git_binary_fails() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = GitPublisher::new(enabled_config(dir.path()))
            .with_git_command("definitely-not-a-real-git-binary");

        let outcome = publisher.publish(&dir.path().join("epg.xml")).await;
        assert_eq!(outcome, PublishOutcome::Failed("git not available".to_string()));
    }

    #[test]
    fn test_relative_path_rejects_outside_files() {
        let repo = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let outside = other.path().join("epg.xml");
        std::fs::write(&outside, "<tv/>").unwrap();

        let publisher = GitPublisher::new(enabled_config(repo.path()));
        assert!(publisher.relative_path(&outside).is_err());

        let inside = repo.path().join("out").join("epg.xml");
        std::fs::create_dir_all(inside.parent().unwrap()).unwrap();
        std::fs::write(&inside, "<tv/>").unwrap();
        assert_eq!(
            publisher.relative_path(&inside).unwrap(),
            PathBuf::from("out").join("epg.xml")
        );
    }
}
