// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use nimbus_dav::{ChunkedUploadClient, Href, UploadState};
use tokio::fs;

use crate::arg::CommonArgs;

const STATE_SUFFIX: &str = ".nimbus-upload.json";

#[derive(Debug, Clone)]
pub struct CmdUpload {
    pub local: PathBuf,
    pub remote: Href,
    pub state: Option<PathBuf>,
}

impl CmdUpload {
    pub const NAME: &str = "upload";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("up")
            .about("Upload a file in chunks, resuming an interrupted upload")
            .arg(
                arg!(local: <LOCAL> "Local file to upload")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(remote: <REMOTE> "Destination path, relative to the files home"))
            .arg(CommonArgs::state(false).long_help(
                "\
Path to the upload state file. Defaults to the local file path with a `.nimbus-upload.json` \
suffix. The state is kept after a failed upload and removed once the file is assembled.",
            ))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match (
            matches.get_one::<PathBuf>("local"),
            matches.get_one::<String>("remote"),
        ) {
            (Some(local), Some(remote)) => Self {
                local: local.clone(),
                remote: Href::from(remote.as_str()),
                state: CommonArgs::get_state(matches),
            },
            _ => unreachable!(),
        }
    }

    pub async fn run(self, client: &ChunkedUploadClient) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "uploading file...");
        let state_path = self
            .state
            .clone()
            .unwrap_or_else(|| default_state_path(&self.local));

        let mut state = if fs::try_exists(&state_path).await? {
            let state = UploadState::load(&state_path).await?;
            if state.local_path != self.local || state.destination != self.remote {
                return Err(format!(
                    "State file {} belongs to the upload of {} to {}",
                    state_path.display(),
                    state.local_path.display(),
                    state.destination
                )
                .into());
            }
            tracing::info!(transfer = %state.transfer_id, "resuming upload");
            state
        } else {
            let total_length = fs::metadata(&self.local).await?.len();
            UploadState::new(
                &self.local,
                self.remote.clone(),
                total_length,
                client.config().chunk_size,
            )
        };

        match client.upload_file(&mut state).await {
            Ok(outcome) => {
                if fs::try_exists(&state_path).await? {
                    fs::remove_file(&state_path).await?;
                }
                println!(
                    "{} {} ({} bytes in {} chunks)",
                    "Uploaded".green(),
                    outcome.destination,
                    outcome.uploaded_bytes,
                    outcome.uploaded_chunks
                );
                Ok(())
            }
            Err(e) => {
                if state.is_started() {
                    state.save(&state_path).await?;
                    tracing::info!(path = %state_path.display(), "upload state saved");
                }
                Err(format!(
                    "{e}; run the same command again to resume ({} chunks acknowledged)",
                    state.acknowledged.len()
                )
                .into())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdAbort {
    pub state: PathBuf,
}

impl CmdAbort {
    pub const NAME: &str = "abort";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Abort an interrupted upload and delete its chunks on the server")
            .arg(CommonArgs::state(true))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            state: CommonArgs::get_state(matches).unwrap_or_default(),
        }
    }

    pub async fn run(self, client: &ChunkedUploadClient) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "aborting upload...");
        let state = UploadState::load(&self.state).await?;
        client.abort(&state.transfer_id).await?;
        fs::remove_file(&self.state).await?;
        println!("{} upload to {}", "Aborted".yellow(), state.destination);
        Ok(())
    }
}

fn default_state_path(local: &Path) -> PathBuf {
    let mut name = local.as_os_str().to_owned();
    name.push(STATE_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use nimbus_dav::{Chunk, DavConfig};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(mock_server: &MockServer) -> ChunkedUploadClient {
        ChunkedUploadClient::new(DavConfig {
            base_url: mock_server.uri(),
            files_home: "/files/alice/".to_string(),
            uploads_home: "/uploads/alice/".to_string(),
            chunk_size: 1024,
            ..Default::default()
        })
        .unwrap()
    }

    fn upload_cmd(dir: &TempDir, len: usize) -> CmdUpload {
        let local = dir.path().join("video.mp4");
        std::fs::write(&local, vec![7; len]).unwrap();
        CmdUpload {
            local,
            remote: Href::from("Videos/video.mp4"),
            state: None,
        }
    }

    async fn mount(mock_server: &MockServer, verb: &str, path: &str, status: u16, times: u64) {
        Mock::given(method(verb))
            .and(path_regex(path))
            .respond_with(ResponseTemplate::new(status))
            .expect(times)
            .mount(mock_server)
            .await;
    }

    #[test]
    fn test_default_state_path() {
        assert_eq!(
            default_state_path(Path::new("/data/video.mp4")),
            PathBuf::from("/data/video.mp4.nimbus-upload.json")
        );
    }

    #[test]
    fn test_parse_upload_default_state() {
        let cmd = Command::new("test").subcommand(CmdUpload::command());
        let matches = cmd
            .try_get_matches_from(["test", "up", "a.bin", "Docs/a.bin"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("upload").unwrap();
        let parsed = CmdUpload::from(sub_matches);
        assert_eq!(parsed.local, PathBuf::from("a.bin"));
        assert_eq!(parsed.remote, Href::from("Docs/a.bin"));
        assert!(parsed.state.is_none());
    }

    #[test]
    fn test_abort_requires_state() {
        let cmd = Command::new("test").subcommand(CmdAbort::command());
        assert!(cmd.try_get_matches_from(["test", "abort"]).is_err());
    }

    #[tokio::test]
    async fn test_upload_saves_state_and_resumes() {
        let dir = TempDir::new().unwrap();
        let cmd = upload_cmd(&dir, 2048);
        let state_path = default_state_path(&cmd.local);

        let mock_server = MockServer::start().await;
        mount(&mock_server, "MKCOL", "^/uploads/alice/[0-9a-f]{32}$", 201, 1).await;
        mount(&mock_server, "PUT", "/0-1023$", 201, 1).await;
        mount(&mock_server, "PUT", "/1024-2047$", 507, 1).await;
        mount(&mock_server, "MOVE", "/\\.file$", 201, 0).await;

        let client = client(&mock_server);
        assert!(cmd.clone().run(&client).await.is_err());

        let saved = UploadState::load(&state_path).await.unwrap();
        assert!(saved.is_started());
        assert_eq!(saved.local_path, cmd.local);
        assert_eq!(saved.acknowledged, [Chunk::new(0, 1023).unwrap()]);
        mock_server.verify().await;

        mock_server.reset().await;
        let transfer = format!("^/uploads/alice/{}", saved.transfer_id);
        mount(&mock_server, "MKCOL", ".*", 201, 0).await;
        mount(&mock_server, "PUT", &format!("{transfer}/0-1023$"), 201, 0).await;
        mount(&mock_server, "PUT", &format!("{transfer}/1024-2047$"), 201, 1).await;
        mount(&mock_server, "PUT", &format!("{transfer}/2048-2048$"), 201, 1).await;
        mount(&mock_server, "MOVE", &format!("{transfer}/\\.file$"), 201, 1).await;

        cmd.run(&client).await.unwrap();
        assert!(!state_path.exists());
    }

    #[tokio::test]
    async fn test_upload_rejects_foreign_state() {
        let dir = TempDir::new().unwrap();
        let cmd = upload_cmd(&dir, 100);
        let other = UploadState::new(&cmd.local, Href::from("Backup/video.mp4"), 100, 1024);
        other.save(&default_state_path(&cmd.local)).await.unwrap();

        let mock_server = MockServer::start().await;
        let err = cmd.run(&client(&mock_server)).await.unwrap_err();

        assert!(err.to_string().contains("Backup/video.mp4"));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_abort_deletes_upload_and_state() {
        let dir = TempDir::new().unwrap();
        let state_path = dir.path().join("upload.json");
        let mut state = UploadState::new("video.mp4", Href::from("video.mp4"), 100, 1024);
        state.mark_started();
        state.save(&state_path).await.unwrap();

        let mock_server = MockServer::start().await;
        let transfer = format!("^/uploads/alice/{}$", state.transfer_id);
        mount(&mock_server, "DELETE", &transfer, 204, 1).await;

        let cmd = CmdAbort {
            state: state_path.clone(),
        };
        cmd.run(&client(&mock_server)).await.unwrap();

        assert!(!state_path.exists());
        mock_server.verify().await;
    }
}
