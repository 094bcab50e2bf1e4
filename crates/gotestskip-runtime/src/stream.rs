//! The single-pass stream loop: decode a line, translate, write the result.

use anyhow::Context;
use gotestskip_core::{SkipPolicy, TestEvent, Translator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Counters for one translated stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub events_in: usize,
    pub events_out: usize,
    /// No emitted event kept the `fail` action.
    pub ok: bool,
}

/// Reads newline-delimited events from `reader` until end of stream and
/// writes the translated events to `writer`, flushing after each input line.
///
/// Stops at the first record that does not decode; whatever was already
/// written stays written.
pub async fn translate_stream<R, W, P>(
    reader: R,
    writer: &mut W,
    translator: &mut Translator<P>,
) -> anyhow::Result<StreamSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: SkipPolicy,
{
    let mut lines = reader.lines();
    let mut summary = StreamSummary::default();
    let mut record = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .context("reading go test output")?
    {
        record += 1;
        if line.trim().is_empty() {
            continue;
        }
        let event = TestEvent::decode(&line, record).context("error decoding go test output")?;
        summary.events_in += 1;
        let out = translator.translate(event);
        summary.events_out += write_events(writer, &out).await?;
    }

    let rest = translator.finish();
    summary.events_out += write_events(writer, &rest).await?;
    summary.ok = translator.is_ok();
    tracing::debug!(?summary, "event stream ended");
    Ok(summary)
}

async fn write_events<W: AsyncWrite + Unpin>(
    writer: &mut W,
    events: &[TestEvent],
) -> anyhow::Result<usize> {
    if events.is_empty() {
        return Ok(0);
    }
    let mut buf = String::new();
    for ev in events {
        buf.push_str(&ev.encode().context("encoding test event")?);
        buf.push('\n');
    }
    writer
        .write_all(buf.as_bytes())
        .await
        .context("writing translated output")?;
    writer.flush().await.context("writing translated output")?;
    Ok(events.len())
}
