//! Log output that shares the terminal with download spinners

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// Wraps a writer so each log line is written with the spinners hidden.
///
/// Events are buffered and flushed in one piece when the writer is dropped,
/// so a redraw never lands in the middle of a line.
pub struct SuspendingMakeWriter<M> {
    progress: MultiProgress,
    inner: M,
}

impl<M> SuspendingMakeWriter<M> {
    pub fn new(progress: MultiProgress, inner: M) -> Self {
        Self { progress, inner }
    }
}

impl<'a, M: MakeWriter<'a> + 'a> MakeWriter<'a> for SuspendingMakeWriter<M> {
    type Writer = SuspendedLine<'a, M>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedLine {
            progress: &self.progress,
            inner: &self.inner,
            buf: Vec::new(),
        }
    }
}

pub struct SuspendedLine<'a, M: MakeWriter<'a>> {
    progress: &'a MultiProgress,
    inner: &'a M,
    buf: Vec<u8>,
}

impl<'a, M: MakeWriter<'a>> Write for SuspendedLine<'a, M> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a, M: MakeWriter<'a>> Drop for SuspendedLine<'a, M> {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        if buf.is_empty() {
            return;
        }
        let inner = self.inner;
        self.progress.suspend(|| {
            let mut writer = inner.make_writer();
            let _ = writer.write_all(&buf);
            let _ = writer.flush();
        });
    }
}
