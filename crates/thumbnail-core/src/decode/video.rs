//! Video frame extraction through an external ffmpeg process.
//!
//! The upload is piped to ffmpeg's stdin and a single PNG frame is read back
//! from its stdout. No temporary files are involved.

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::raster::decode_png;
use super::{DecodeError, DecodedImage};

/// Default deadline for a single extraction.
pub const DEFAULT_FFMPEG_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Turns an encoded video clip into the PNG bytes of one still frame.
pub trait FrameExtractor: Send + Sync {
    fn extract_frame(&self, video: &[u8]) -> Result<Vec<u8>, DecodeError>;
}

/// [`FrameExtractor`] backed by the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl FfmpegExtractor {
    /// Arguments selecting WebM on stdin and one PNG frame on stdout.
    pub const WEBM_TO_PNG_ARGS: [&'static str; 11] = [
        "-f", "webm", "-i", "pipe:0", "-f", "image2pipe", "-c", "png", "-vframes", "1", "pipe:1",
    ];

    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Self::WEBM_TO_PNG_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout,
        }
    }

    /// Run an arbitrary command line instead of the WebM extraction arguments.
    pub fn with_command<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_FFMPEG_TIMEOUT)
    }
}

impl FrameExtractor for FfmpegExtractor {
    fn extract_frame(&self, video: &[u8]) -> Result<Vec<u8>, DecodeError> {
        tracing::debug!(program = %self.program, bytes = video.len(), "spawning frame extractor");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        let mut guard = ChildGuard::new(child);

        let stdin = guard.child.stdin.take();
        let input = video.to_vec();
        let writer = thread::spawn(move || feed_stdin(stdin, input));
        let stdout = guard.child.stdout.take().map(drain);
        let stderr = guard.child.stderr.take().map(drain);

        let Some(status) = guard.wait_deadline(self.timeout)? else {
            // The pipe threads finish on their own once the killed child's
            // pipes close; they are not joined here.
            tracing::debug!(program = %self.program, "frame extractor timed out");
            return Err(DecodeError::ProcessTimeout(self.timeout));
        };

        // ffmpeg may close stdin early once it has its frame; a broken pipe
        // there is not an error as long as the exit status is clean.
        let _ = writer.join();
        let stdout = join_drain(stdout)?;
        let stderr = join_drain(stderr)?;
        tracing::debug!(program = %self.program, %status, frame_bytes = stdout.len(), "frame extractor exited");

        check_exit(status, &stderr)?;
        Ok(stdout)
    }
}

/// Extract the first frame of a WebM clip and decode it.
pub fn decode_video_frame(
    bytes: &[u8],
    extractor: &dyn FrameExtractor,
) -> Result<DecodedImage, DecodeError> {
    let frame = extractor.extract_frame(bytes)?;
    decode_png(&frame)
}

/// Map an exit status plus captured stderr onto the error taxonomy.
fn check_exit(status: ExitStatus, stderr: &[u8]) -> Result<(), DecodeError> {
    if status.success() {
        return Ok(());
    }
    if stderr.is_empty() {
        Err(DecodeError::ProcessFailed(status.to_string()))
    } else {
        Err(DecodeError::Ffmpeg(String::from_utf8_lossy(stderr).into_owned()))
    }
}

fn feed_stdin(stdin: Option<ChildStdin>, input: Vec<u8>) {
    if let Some(mut stdin) = stdin {
        let _ = stdin.write_all(&input);
        // Dropping stdin closes the pipe and signals EOF.
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_drain(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<Vec<u8>, DecodeError> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| DecodeError::ProcessFailed("pipe reader panicked".to_string()))?
            .map_err(DecodeError::from),
        None => Ok(Vec::new()),
    }
}

/// Owns a spawned child and guarantees it is killed and reaped on drop.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// Wait for exit until `timeout` elapses. Returns `Ok(None)` after killing
    /// a child that missed the deadline.
    fn wait_deadline(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                self.kill_and_reap();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn kill_and_reap(&mut self) {
        if self.reaped {
            return;
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill_and_reap();
    }
}
