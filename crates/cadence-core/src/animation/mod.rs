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

//! Tick-driven animation playback.
//!
//! An [`Animation`] is an immutable resource holding a frame script. An
//! [`AnimationPlayer`] binds to one, is advanced by explicit tick deltas
//! from the dynamic-tick phase, and reports the frames it enters as
//! [`PlayerEvent`]s.
//!
//! # Script format
//!
//! Frames are separated by `-`. Each frame is zero or more tags followed by
//! a sprite letter `A`..=`Z` and a duration in ticks. A tag is one or two
//! lowercase letters with an optional signed integer value:
//!
//! ```text
//! s1A10-x-5B20-bfC5
//! ```
//!
//! is three frames: sprite `A` for 10 ticks with tag `s=1`, sprite `B` for
//! 20 ticks with tag `x=-5`, sprite `C` for 5 ticks with the flag tag `bf`.
//! Tag names are read greedily, two letters at a time.

mod player;
mod script;

pub use self::player::{AnimationPlayer, PlayerEvent};
pub use self::script::{AnimationScript, Frame, Tag};

use thiserror::Error;

/// An immutable animation resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Resource identifier.
    pub id: u32,
    /// The frame script, see the module docs.
    pub script: String,
}

impl Animation {
    /// Creates an animation resource.
    pub fn new(id: u32, script: impl Into<String>) -> Self {
        Self {
            id,
            script: script.into(),
        }
    }
}

/// An error raised while parsing an animation script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The script has no frames.
    #[error("animation script is empty")]
    Empty,
    /// A character that cannot appear at this position.
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedChar {
        /// Byte offset in the script.
        offset: usize,
        /// The offending character.
        found: char,
    },
    /// The script ended in the middle of a frame.
    #[error("frame {frame} is incomplete")]
    Incomplete {
        /// Zero-based frame index.
        frame: usize,
    },
    /// A sprite letter without a duration.
    #[error("frame {frame} has no duration")]
    MissingDuration {
        /// Zero-based frame index.
        frame: usize,
    },
    /// A frame lasting zero ticks.
    #[error("frame {frame} has a zero duration")]
    ZeroDuration {
        /// Zero-based frame index.
        frame: usize,
    },
    /// A number that does not fit the target type.
    #[error("number at offset {offset} is out of range")]
    NumberOutOfRange {
        /// Byte offset in the script.
        offset: usize,
    },
}
