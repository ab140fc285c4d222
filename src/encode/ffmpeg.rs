use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{SyncSender, TrySendError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, MEDIA_TYPE_MP4};
use crate::foundation::error::{AnimlabError, AnimlabResult};
use crate::foundation::math::mul_div255_u16;

/// Frames buffered between `push_frame` and the stdin writer thread.
const FRAME_QUEUE_DEPTH: usize = 4;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug, PartialEq)]
pub struct FfmpegSinkOpts {
    /// `ffmpeg` executable, looked up on `PATH` when not absolute.
    pub ffmpeg_bin: PathBuf,
    /// Background color used to flatten alpha (RGBA8, straight alpha; alpha is ignored).
    pub bg_rgba: [u8; 4],
    /// x264 constant rate factor, `0..=51`.
    pub crf: u8,
    /// Wall-clock budget for the whole encode, frame writes included. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FfmpegSinkOpts {
    fn default() -> Self {
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            bg_rgba: [0, 0, 0, 255],
            crf: 18,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Sink that spawns the system `ffmpeg`, streams raw frames to stdin and reads the finished
/// H.264 MP4 back from a scoped temporary file.
///
/// Odd frame sizes are padded up to even with the background color so `yuv420p` output is valid.
/// The temporary file is removed on every path; dropping an unfinished sink kills `ffmpeg`.
/// Frames reach `ffmpeg` through a writer thread, so a stalled encoder trips the timeout instead
/// of blocking `push_frame`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    frames_tx: Option<SyncSender<Vec<u8>>>,
    writer: Option<JoinHandle<std::io::Result<()>>>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    out: Option<NamedTempFile>,
    started: Option<Instant>,

    scratch: Vec<u8>,
    padded: (u32, u32),
    cfg: Option<SinkConfig>,
    order: FrameOrder,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            frames_tx: None,
            writer: None,
            stderr_drain: None,
            out: None,
            started: None,
            scratch: Vec::new(),
            padded: (0, 0),
            cfg: None,
            order: FrameOrder::default(),
        }
    }

    fn deadline(&self) -> Option<Instant> {
        Some(self.started? + self.opts.timeout?)
    }

    fn kill_child(&mut self) {
        drop(self.frames_tx.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn join_writer(&mut self) -> std::io::Result<()> {
        match self.writer.take().map(|h| h.join()) {
            Some(Ok(res)) => res,
            Some(Err(_)) => Err(std::io::Error::other("frame writer thread panicked")),
            None => Ok(()),
        }
    }

    fn wait_child(&mut self, mut child: Child) -> AnimlabResult<ExitStatus> {
        let Some(timeout) = self.opts.timeout else {
            return child.wait().map_err(|e| {
                AnimlabError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
            });
        };
        let deadline = self.started.unwrap_or_else(Instant::now) + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AnimlabError::encoding(format!(
                        "ffmpeg did not finish within {:.1}s",
                        timeout.as_secs_f64()
                    )));
                }
                Ok(None) => std::thread::sleep(Duration::from_millis(10)),
                Err(e) => {
                    let _ = child.kill();
                    return Err(AnimlabError::encoding(format!(
                        "failed to poll ffmpeg status: {e}"
                    )));
                }
            }
        }
    }

    fn take_stderr(&mut self) -> String {
        let bytes = match self.stderr_drain.take().map(|h| h.join()) {
            Some(Ok(Ok(bytes))) => bytes,
            _ => Vec::new(),
        };
        String::from_utf8_lossy(&bytes).trim().to_string()
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> AnimlabResult<()> {
        if cfg.fps == 0 {
            return Err(AnimlabError::invalid_parameter("fps must be > 0"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AnimlabError::encoding(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if self.opts.crf > 51 {
            return Err(AnimlabError::invalid_parameter(format!(
                "crf must be in 0..=51 (got {})",
                self.opts.crf
            )));
        }
        if !is_ffmpeg_available(&self.opts.ffmpeg_bin) {
            return Err(AnimlabError::encoding(format!(
                "ffmpeg is required for MP4 encoding, but '{}' could not be run",
                self.opts.ffmpeg_bin.display()
            )));
        }

        let out = tempfile::Builder::new()
            .prefix("animlab-")
            .suffix(".mp4")
            .tempfile()
            .map_err(|e| AnimlabError::encoding(format!("failed to create temp file: {e}")))?;

        let (pw, ph) = even_dims(cfg.width, cfg.height);
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            padded_width = pw,
            padded_height = ph,
            fps = cfg.fps,
            crf = self.opts.crf,
            out = %out.path().display(),
            "spawning ffmpeg"
        );

        let mut cmd = Command::new(&self.opts.ffmpeg_bin);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        // Input: raw straight-alpha RGBA8 frames, flattened to opaque in push_frame.
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{pw}x{ph}"),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-crf",
            &self.opts.crf.to_string(),
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ]);
        cmd.arg(out.path());

        let mut child = cmd.spawn().map_err(|e| {
            AnimlabError::encoding(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let Some(mut stdin) = child.stdin.take() else {
            let _ = child.kill();
            return Err(AnimlabError::encoding("failed to open ffmpeg stdin"));
        };
        let Some(mut stderr) = child.stderr.take() else {
            let _ = child.kill();
            return Err(AnimlabError::encoding("failed to open ffmpeg stderr"));
        };
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });
        let (frames_tx, frames_rx) = std::sync::mpsc::sync_channel::<Vec<u8>>(FRAME_QUEUE_DEPTH);
        let writer = std::thread::spawn(move || {
            for frame in frames_rx {
                stdin.write_all(&frame)?;
            }
            stdin.flush()
        });

        self.scratch = opaque_background(pw, ph, self.opts.bg_rgba);
        self.padded = (pw, ph);
        self.child = Some(child);
        self.frames_tx = Some(frames_tx);
        self.writer = Some(writer);
        self.stderr_drain = Some(stderr_drain);
        self.out = Some(out);
        self.started = Some(Instant::now());
        self.order.reset();
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Canvas) -> AnimlabResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AnimlabError::encoding("ffmpeg sink not started"))?;
        self.order.accept(cfg, idx, frame)?;

        flatten_over_bg_into(&mut self.scratch, self.padded.0, frame, self.opts.bg_rgba);

        let Some(tx) = self.frames_tx.take() else {
            return Err(AnimlabError::encoding("ffmpeg sink is already finalized"));
        };
        let deadline = self.deadline();
        let mut buf = self.scratch.clone();
        loop {
            match tx.try_send(buf) {
                Ok(()) => {
                    self.frames_tx = Some(tx);
                    return Ok(());
                }
                Err(TrySendError::Full(back)) => {
                    if let Some(deadline) = deadline
                        && Instant::now() >= deadline
                    {
                        drop(tx);
                        self.kill_child();
                        return Err(AnimlabError::encoding(format!(
                            "ffmpeg stopped accepting frames (frame {idx}) before the {:.1}s timeout",
                            self.opts.timeout.unwrap_or_default().as_secs_f64()
                        )));
                    }
                    buf = back;
                    std::thread::sleep(Duration::from_millis(2));
                }
                Err(TrySendError::Disconnected(_)) => {
                    // The writer only hangs up after a failed write; ffmpeg has usually exited.
                    drop(tx);
                    let write_err = match self.join_writer() {
                        Ok(()) => "writer stopped".to_string(),
                        Err(e) => e.to_string(),
                    };
                    self.kill_child();
                    let stderr = self.take_stderr();
                    return Err(AnimlabError::encoding(format!(
                        "failed to write frame {idx} to ffmpeg stdin: {write_err}: {stderr}"
                    )));
                }
            }
        }
    }

    fn end(&mut self) -> AnimlabResult<Vec<u8>> {
        drop(self.frames_tx.take());
        let child = self
            .child
            .take()
            .ok_or_else(|| AnimlabError::encoding("ffmpeg sink not started"))?;
        self.cfg = None;

        let status = self.wait_child(child)?;
        let written = self.join_writer();
        let stderr = self.take_stderr();
        if !status.success() {
            return Err(AnimlabError::encoding(format!(
                "ffmpeg exited with status {status}: {stderr}"
            )));
        }
        if let Err(e) = written {
            return Err(AnimlabError::encoding(format!(
                "failed to stream frames to ffmpeg: {e}: {stderr}"
            )));
        }

        let out = self
            .out
            .take()
            .ok_or_else(|| AnimlabError::encoding("ffmpeg output file missing"))?;
        let bytes = std::fs::read(out.path()).map_err(|e| {
            AnimlabError::encoding(format!(
                "failed to read ffmpeg output '{}': {e}",
                out.path().display()
            ))
        })?;
        let path = out.path().to_path_buf();
        if let Err(e) = out.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove temp video file");
        }
        if bytes.is_empty() {
            return Err(AnimlabError::encoding("ffmpeg produced an empty file"));
        }
        Ok(bytes)
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE_MP4
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.kill_child();
    }
}

/// Round odd dimensions up to the next even value.
pub(crate) fn even_dims(width: u32, height: u32) -> (u32, u32) {
    (width + (width & 1), height + (height & 1))
}

fn opaque_background(width: u32, height: u32, bg_rgba: [u8; 4]) -> Vec<u8> {
    let px = [bg_rgba[0], bg_rgba[1], bg_rgba[2], 255];
    px.repeat(width as usize * height as usize)
}

/// Flatten a straight-alpha `frame` over `bg_rgba` into the top-left of a `dst_width`-wide opaque
/// RGBA8 buffer. Pixels outside the frame are left untouched.
pub(crate) fn flatten_over_bg_into(
    dst: &mut [u8],
    dst_width: u32,
    frame: &Canvas,
    bg_rgba: [u8; 4],
) {
    let stride = dst_width as usize * 4;
    let row_len = frame.width() as usize * 4;
    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (src_row, dst_row) in frame
        .as_raw()
        .chunks_exact(row_len)
        .zip(dst.chunks_exact_mut(stride))
    {
        for (d, s) in dst_row[..row_len]
            .chunks_exact_mut(4)
            .zip(src_row.chunks_exact(4))
        {
            let a = u16::from(s[3]);
            let inv = 255 - a;
            for ((dc, &sc), &bc) in d[..3].iter_mut().zip(&s[..3]).zip(&bg) {
                let v = mul_div255_u16(u16::from(sc), a) + mul_div255_u16(bc, inv);
                *dc = v.min(255) as u8;
            }
            d[3] = 255;
        }
    }
}

/// Return `true` when `bin -version` runs successfully.
pub fn is_ffmpeg_available(bin: &Path) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_ffmpeg_available(Path::new("ffmpeg"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
