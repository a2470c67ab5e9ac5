// src/exec/stream.rs

//! Feeding the engine's standard input and draining its output streams.

use encoding_rs::Encoding;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::ChildStderr;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::errors::{AnalyzerError, Result};
use crate::exec::codec::decode_line;
use crate::types::ResultLines;

/// Write `bytes` to the engine's standard input and close it.
///
/// Closing is what tells the engine the input is complete, so `stdin` is
/// consumed.
pub async fn write_input<W>(mut stdin: W, bytes: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    stdin
        .write_all(bytes)
        .await
        .map_err(|e| AnalyzerError::stream("stdin", e))?;
    stdin
        .shutdown()
        .await
        .map_err(|e| AnalyzerError::stream("stdin", e))?;
    drop(stdin);

    debug!(bytes = bytes.len(), "engine input written and closed");
    Ok(())
}

/// Read `stdout` to end-of-data, decoding each line with `codec`.
///
/// A final line without terminator is kept; empty output yields no lines.
pub async fn drain_lines<R>(stdout: R, codec: &'static Encoding) -> Result<ResultLines>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stdout);
    let mut lines = ResultLines::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| AnalyzerError::stream("stdout", e))?;
        if n == 0 {
            break;
        }
        let line = decode_line(&buf, codec);
        trace!(line = %line, "stdout");
        lines.push(line);
    }

    debug!(lines = lines.len(), encoding = codec.name(), "engine output drained");
    Ok(lines)
}

/// Log everything the engine writes to stderr at debug level.
pub fn spawn_stderr_logger(stderr: ChildStderr, engine: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stderr);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    debug!(engine = %engine, "stderr: {}", line.trim_end());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{KOI8_R, UTF_8, WINDOWS_1251};

    #[tokio::test]
    async fn drains_lines_in_order() {
        let raw: &[u8] = b"first\nsecond\r\n\nlast";
        let lines = drain_lines(raw, UTF_8).await.unwrap();
        assert_eq!(lines.as_slice(), ["first", "second", "", "last"]);
    }

    #[tokio::test]
    async fn empty_output_yields_no_lines() {
        let raw: &[u8] = b"";
        let lines = drain_lines(raw, WINDOWS_1251).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn decodes_legacy_cyrillic() {
        let (bytes, _, _) = KOI8_R.encode("мир{мир=S,муж,неод=им,ед}\n");
        let lines = drain_lines(&bytes[..], KOI8_R).await.unwrap();
        assert_eq!(lines.as_slice(), ["мир{мир=S,муж,неод=им,ед}"]);
    }

    #[tokio::test]
    async fn written_input_reaches_the_reader() {
        let (writer, mut reader) = tokio::io::duplex(64);
        write_input(writer, b"hello\n").await.unwrap();

        let mut received = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut received)
            .await
            .unwrap();
        assert_eq!(received, b"hello\n");
    }
}
