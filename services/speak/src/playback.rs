use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use elevenlabs_stream::AudioBuffer;
#[cfg(test)]
use mockall::automock;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Where a finished segment goes: persisted first, then played.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Playback: Send + Sync {
    /// Persists the whole segment, replacing the previous one.
    async fn write(&self, audio: &AudioBuffer) -> Result<()>;

    /// Plays the last written segment and waits for the player to exit.
    async fn play(&self) -> Result<()>;
}

/// Writes audio to a fixed file and plays it with an external program, e.g. `afplay`.
pub struct FilePlayback {
    path: PathBuf,
    player: String,
}

impl FilePlayback {
    pub fn new(path: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            player: player.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Playback for FilePlayback {
    async fn write(&self, audio: &AudioBuffer) -> Result<()> {
        tracing::info!("writing {} bytes to {}", audio.len(), self.path.display());
        tokio::fs::write(&self.path, audio.as_bytes())
            .await
            .with_context(|| format!("write error: {}", self.path.display()))
    }

    async fn play(&self) -> Result<()> {
        tracing::info!("playing via {}", self.player);
        let status = Command::new(&self.player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to launch {}", self.player))?;

        if !status.success() {
            bail!("playback error: {} exited with {}", self.player, status);
        }
        tracing::info!("playback complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn write_replaces_previous_segment() -> Result<()> {
        let dir = tempdir()?;
        let playback = FilePlayback::new(dir.path().join("output.mp3"), "true");

        playback.write(&AudioBuffer::from(b"first segment".to_vec())).await?;
        playback.write(&AudioBuffer::from(b"ID3".to_vec())).await?;

        assert_eq!(std::fs::read(playback.path())?, b"ID3");
        Ok(())
    }

    #[tokio::test]
    async fn write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let playback = FilePlayback::new(dir.path().join("missing/output.mp3"), "true");

        assert!(playback.write(&AudioBuffer::new()).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn player_exit_status_is_checked() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("output.mp3");

        FilePlayback::new(&path, "true").play().await?;
        assert!(FilePlayback::new(&path, "false").play().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn missing_player_is_an_error() {
        let playback = FilePlayback::new("output.mp3", "no-such-player-on-this-machine");
        assert!(playback.play().await.is_err());
    }
}
