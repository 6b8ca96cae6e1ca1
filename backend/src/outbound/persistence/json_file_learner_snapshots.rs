//! Learner snapshots stored as one pretty-printed JSON array.
//!
//! Writes are atomic: the array is staged in a uniquely named file next to
//! the target and renamed over it, so readers see either the old or the new
//! snapshot. File access goes through `cap_std` on a blocking thread.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::Learner;
use crate::domain::ports::{LearnerSnapshotError, LearnerSnapshotRepository};

/// Snapshot adapter writing the learner collection to a JSON file.
///
/// # Examples
/// ```
/// use lmis_backend::outbound::persistence::JsonFileLearnerSnapshots;
///
/// let snapshots = JsonFileLearnerSnapshots::new("data/learners.json");
/// assert!(snapshots.path().ends_with("learners.json"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileLearnerSnapshots {
    path: PathBuf,
}

impl JsonFileLearnerSnapshots {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LearnerSnapshotRepository for JsonFileLearnerSnapshots {
    async fn load(&self) -> Result<Option<Vec<Learner>>, LearnerSnapshotError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_snapshot(&path))
            .await
            .map_err(|err| LearnerSnapshotError::read(format!("snapshot task failed: {err}")))?
    }

    async fn save(&self, learners: &[Learner]) -> Result<(), LearnerSnapshotError> {
        let body = encode(learners)?;
        let path = self.path.clone();
        let count = learners.len();
        tokio::task::spawn_blocking(move || write_snapshot(&path, &body))
            .await
            .map_err(|err| LearnerSnapshotError::write(format!("snapshot task failed: {err}")))??;
        debug!(path = %self.path.display(), count, "learner snapshot saved");
        Ok(())
    }
}

fn encode(learners: &[Learner]) -> Result<Vec<u8>, LearnerSnapshotError> {
    let mut body = serde_json::to_vec_pretty(learners)
        .map_err(|err| LearnerSnapshotError::write(format!("encoding failed: {err}")))?;
    body.push(b'\n');
    Ok(body)
}

fn split_path(path: &Path) -> io::Result<(&Path, &Path)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "snapshot path must name a file",
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((parent, Path::new(file_name)))
}

fn describe(path: &Path, err: &io::Error) -> String {
    format!("{}: {err}", path.display())
}

fn read_snapshot(path: &Path) -> Result<Option<Vec<Learner>>, LearnerSnapshotError> {
    let (parent, file_name) =
        split_path(path).map_err(|err| LearnerSnapshotError::read(describe(path, &err)))?;

    let directory = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(directory) => directory,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(LearnerSnapshotError::read(describe(parent, &err))),
    };
    let bytes = match directory.read(file_name) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(LearnerSnapshotError::read(describe(path, &err))),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|err| LearnerSnapshotError::decode(format!("{}: {err}", path.display())))
}

fn write_snapshot(path: &Path, body: &[u8]) -> Result<(), LearnerSnapshotError> {
    let (parent, file_name) =
        split_path(path).map_err(|err| LearnerSnapshotError::write(describe(path, &err)))?;

    Dir::create_ambient_dir_all(parent, ambient_authority())
        .map_err(|err| LearnerSnapshotError::write(describe(parent, &err)))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| LearnerSnapshotError::write(describe(parent, &err)))?;

    let staging = PathBuf::from(format!(
        ".{}.{}.tmp",
        file_name.display(),
        Uuid::new_v4().simple()
    ));
    directory
        .write(&staging, body)
        .map_err(|err| LearnerSnapshotError::write(describe(&parent.join(&staging), &err)))?;

    if let Err(err) = directory.rename(&staging, &directory, file_name) {
        let _cleanup = directory.remove_file(&staging);
        return Err(LearnerSnapshotError::write(describe(path, &err)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_learners;
    use crate::test_support::cap_fs::{list_entries, read_file_to_string, write_file};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_loads_as_none(workdir: TempDir) {
        let snapshots = JsonFileLearnerSnapshots::new(workdir.path().join("learners.json"));
        assert_eq!(snapshots.load().await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_directory_loads_as_none(workdir: TempDir) {
        let path = workdir.path().join("absent").join("learners.json");
        let snapshots = JsonFileLearnerSnapshots::new(path);
        assert_eq!(snapshots.load().await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn save_then_load_round_trips(workdir: TempDir) {
        let snapshots = JsonFileLearnerSnapshots::new(workdir.path().join("learners.json"));
        let learners = seed_learners();

        snapshots.save(&learners).await.expect("save snapshot");

        assert_eq!(snapshots.load().await, Ok(Some(learners)));
    }

    #[rstest]
    #[tokio::test]
    async fn save_creates_parent_directories(workdir: TempDir) {
        let path = workdir.path().join("data").join("nested").join("learners.json");
        let snapshots = JsonFileLearnerSnapshots::new(&path);

        snapshots.save(&seed_learners()).await.expect("save snapshot");

        let text = read_file_to_string(&path).expect("read snapshot");
        assert!(text.starts_with("[\n  {"), "snapshot is pretty-printed: {text}");
    }

    #[rstest]
    #[tokio::test]
    async fn save_leaves_no_staging_files(workdir: TempDir) {
        let snapshots = JsonFileLearnerSnapshots::new(workdir.path().join("learners.json"));

        snapshots.save(&seed_learners()).await.expect("first save");
        snapshots.save(&seed_learners()[..1]).await.expect("second save");

        assert_eq!(
            list_entries(workdir.path()).expect("list dir"),
            ["learners.json"]
        );
        let loaded = snapshots.load().await.expect("load").expect("snapshot present");
        assert_eq!(loaded.len(), 1);
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(b"{\"learners\": []}".as_slice())]
    #[tokio::test]
    async fn malformed_snapshot_is_a_decode_error(workdir: TempDir, #[case] contents: &[u8]) {
        let path = workdir.path().join("learners.json");
        write_file(&path, contents).expect("write fixture");

        let result = JsonFileLearnerSnapshots::new(path).load().await;

        assert!(matches!(result, Err(LearnerSnapshotError::Decode { .. })));
    }

    #[rstest]
    #[case("learners.json", ".", "learners.json")]
    #[case("data/learners.json", "data", "learners.json")]
    fn split_path_defaults_parent_to_current_dir(
        #[case] raw: &str,
        #[case] parent: &str,
        #[case] file: &str,
    ) {
        let (actual_parent, actual_file) = split_path(Path::new(raw)).expect("valid path");
        assert_eq!(actual_parent, Path::new(parent));
        assert_eq!(actual_file, Path::new(file));
    }
}
