// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use cadence_core::video::{ImageWriter, VideoBackend};
use std::path::{Path, PathBuf};

/// Picks the tick stamp for a screenshot file name. Stamps never repeat
/// within a run, even when two captures land on the same millisecond.
pub(crate) fn next_stamp(last: Option<u64>, now_ms: u64) -> u64 {
    match last {
        Some(last) if now_ms <= last => last + 1,
        _ => now_ms,
    }
}

/// Captures the rendered frame and writes it to `dir` as
/// `screenshot_<ticks>.png`, or `.tga` when the writer has no PNG support.
///
/// Failures are logged and reported as `None`; the captured pixels are
/// released either way.
pub(crate) fn capture(
    video: &mut dyn VideoBackend,
    writer: &dyn ImageWriter,
    dir: &Path,
    ticks: u64,
) -> Option<PathBuf> {
    let image = match video.screenshot() {
        Ok(image) => image,
        Err(e) => {
            log::error!("Could not capture a screenshot: {e:#}");
            return None;
        }
    };

    let path = screenshot_path(dir, ticks, writer.supports_png());
    let result = if writer.supports_png() {
        writer.write_png(&image, &path)
    } else {
        writer.write_tga(&image, &path)
    };
    drop(image);

    match result {
        Ok(()) => {
            log::debug!("Got a screenshot: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::error!("Screenshot write operation failed ({}): {e:#}", path.display());
            None
        }
    }
}

/// The file a screenshot stamped `ticks` is written to.
fn screenshot_path(dir: &Path, ticks: u64, png: bool) -> PathBuf {
    let extension = if png { "png" } else { "tga" };
    dir.join(format!("screenshot_{ticks}.{extension}"))
}
