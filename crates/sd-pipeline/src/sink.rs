//! Result sink: the single writer of the TSV output file

use crate::error::SinkError;
use sd_core::OutcomeRecord;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tracing::warn;

/// TSV header line preceding all data lines
const HEADER_LINE: &str = "status\turl\tmsg\n";

/// Consume outcome records and append each as one TSV line
///
/// Records arrive in whichever order workers finish; the sink preserves
/// arrival order. Individual write failures are logged and the run
/// continues (that line's data may be lost). Returns the number of data
/// lines successfully written; the file is flushed and closed when the
/// channel ends.
pub(crate) async fn write_outcomes(
    path: PathBuf,
    mut results: mpsc::Receiver<OutcomeRecord>,
) -> Result<usize, SinkError> {
    let file = File::create(&path)
        .await
        .map_err(|source| SinkError::Create {
            path: path.clone(),
            source,
        })?;
    let mut writer = BufWriter::new(file);

    if let Err(err) = writer.write_all(HEADER_LINE.as_bytes()).await {
        warn!("failed writing to {:?}: {}", path, err);
    }

    let mut lines_written = 0;
    while let Some(record) = results.recv().await {
        let line = format!("{}\n", record.to_tsv_line());
        match writer.write_all(line.as_bytes()).await {
            Ok(()) => lines_written += 1,
            Err(err) => warn!("failed writing to {:?}: {}", path, err),
        }
    }

    if let Err(err) = writer.flush().await {
        warn!("failed flushing {:?}: {}", path, err);
    }

    Ok(lines_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::{OutcomeRecord, RequestKey};

    #[tokio::test]
    async fn test_header_and_lines_in_arrival_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let (tx, rx) = mpsc::channel(4);

        tx.send(OutcomeRecord::ok(RequestKey::new("/a"))).await.unwrap();
        tx.send(OutcomeRecord::error(RequestKey::new("/b"), "Different!"))
            .await
            .unwrap();
        drop(tx);

        let written = write_outcomes(path.clone(), rx).await.unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "status\turl\tmsg\nok\t/a\t\nerror\t/b\tDifferent!\n");
    }

    #[tokio::test]
    async fn test_empty_stream_leaves_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let (tx, rx) = mpsc::channel::<OutcomeRecord>(1);
        drop(tx);

        let written = write_outcomes(path.clone(), rx).await.unwrap();
        assert_eq!(written, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "status\turl\tmsg\n");
    }

    #[tokio::test]
    async fn test_uncreatable_destination_is_an_error() {
        let (tx, rx) = mpsc::channel::<OutcomeRecord>(1);
        drop(tx);

        let result = write_outcomes(PathBuf::from("/nonexistent/dir/out.tsv"), rx).await;
        assert!(matches!(result, Err(SinkError::Create { .. })));
    }
}
