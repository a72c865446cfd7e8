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

use super::AnimationError;
use std::iter::Peekable;
use std::str::CharIndices;

/// A named frame attribute, e.g. `s3` or `bf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// One or two lowercase letters.
    pub name: String,
    /// The value, absent for flag tags.
    pub value: Option<i32>,
}

/// One frame of a parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Sprite letter, `'A'..='Z'`.
    pub sprite: char,
    /// Length in ticks, never zero.
    pub duration: u32,
    /// Tick at which the frame starts.
    pub start: u32,
    /// Tags attached to the frame, in script order.
    pub tags: Vec<Tag>,
}

impl Frame {
    /// Sprite index, `0` for `'A'`.
    pub fn sprite_index(&self) -> u8 {
        self.sprite as u8 - b'A'
    }

    /// Tick at which the next frame starts.
    pub fn end(&self) -> u32 {
        self.start + self.duration
    }

    /// Looks a tag up by name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }
}

/// A parsed animation script: the frames and their tick layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationScript {
    frames: Vec<Frame>,
    total_ticks: u32,
}

impl AnimationScript {
    /// Parses a script string.
    pub fn parse(source: &str) -> Result<Self, AnimationError> {
        if source.trim().is_empty() {
            return Err(AnimationError::Empty);
        }

        let mut chars = source.char_indices().peekable();
        let mut frames = Vec::new();
        let mut start = 0u32;

        loop {
            let index = frames.len();
            let frame = parse_frame(&mut chars, index, start)?;
            start = frame
                .start
                .checked_add(frame.duration)
                .ok_or(AnimationError::NumberOutOfRange { offset: 0 })?;
            frames.push(frame);

            match chars.next() {
                None => break,
                Some((_, '-')) => {
                    if chars.peek().is_none() {
                        return Err(AnimationError::Incomplete { frame: index + 1 });
                    }
                }
                Some((offset, found)) => {
                    return Err(AnimationError::UnexpectedChar { offset, found })
                }
            }
        }

        Ok(Self {
            frames,
            total_ticks: start,
        })
    }

    /// The frames, in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Sum of every frame's duration.
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Index of the frame playing at `tick`, `None` past the end.
    pub fn frame_at(&self, tick: u32) -> Option<usize> {
        if tick >= self.total_ticks {
            return None;
        }
        // Frames are contiguous and sorted by start.
        Some(self.frames.partition_point(|f| f.end() <= tick))
    }
}

fn parse_frame(
    chars: &mut Peekable<CharIndices<'_>>,
    index: usize,
    start: u32,
) -> Result<Frame, AnimationError> {
    let mut tags = Vec::new();

    loop {
        let Some(&(offset, c)) = chars.peek() else {
            return Err(AnimationError::Incomplete { frame: index });
        };

        if c.is_ascii_lowercase() {
            tags.push(parse_tag(chars)?);
        } else if c.is_ascii_uppercase() {
            chars.next();
            let duration = match parse_number(chars)? {
                Some(0) => return Err(AnimationError::ZeroDuration { frame: index }),
                Some(n) => {
                    u32::try_from(n).map_err(|_| AnimationError::NumberOutOfRange { offset })?
                }
                None => return Err(AnimationError::MissingDuration { frame: index }),
            };
            return Ok(Frame {
                sprite: c,
                duration,
                start,
                tags,
            });
        } else {
            return Err(AnimationError::UnexpectedChar { offset, found: c });
        }
    }
}

fn parse_tag(chars: &mut Peekable<CharIndices<'_>>) -> Result<Tag, AnimationError> {
    let mut name = String::with_capacity(2);
    while name.len() < 2 {
        match chars.peek() {
            Some(&(_, c)) if c.is_ascii_lowercase() => {
                name.push(c);
                chars.next();
            }
            _ => break,
        }
    }

    let value = parse_signed(chars)?;
    Ok(Tag { name, value })
}

fn parse_signed(chars: &mut Peekable<CharIndices<'_>>) -> Result<Option<i32>, AnimationError> {
    let Some(&(offset, c)) = chars.peek() else {
        return Ok(None);
    };

    let negative = c == '-';
    if negative {
        // A '-' is a sign only when a digit follows it.
        let mut lookahead = chars.clone();
        lookahead.next();
        if !matches!(lookahead.peek(), Some((_, d)) if d.is_ascii_digit()) {
            return Ok(None);
        }
        chars.next();
    }

    match parse_number(chars)? {
        Some(n) => {
            let signed = if negative { -(n as i64) } else { n as i64 };
            i32::try_from(signed)
                .map(Some)
                .map_err(|_| AnimationError::NumberOutOfRange { offset })
        }
        None => Ok(None),
    }
}

fn parse_number(chars: &mut Peekable<CharIndices<'_>>) -> Result<Option<u64>, AnimationError> {
    let mut value: Option<u64> = None;
    while let Some(&(offset, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        chars.next();
        value = Some(
            value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(digit)))
                .filter(|v| *v <= u64::from(u32::MAX))
                .ok_or(AnimationError::NumberOutOfRange { offset })?,
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, value: Option<i32>) -> Tag {
        Tag {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn parses_frames_and_layout() {
        let script = AnimationScript::parse("A10-B20-C5").expect("valid script");
        let frames = script.frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].sprite, 'A');
        assert_eq!(frames[1].start, 10);
        assert_eq!(frames[2].start, 30);
        assert_eq!(frames[2].sprite_index(), 2);
        assert_eq!(script.total_ticks(), 35);
    }

    #[test]
    fn parses_tags_with_signed_values_and_flags() {
        let script = AnimationScript::parse("s1A10-x-5B20-bfC5").expect("valid script");
        let frames = script.frames();
        assert_eq!(frames[0].tags, vec![tag("s", Some(1))]);
        assert_eq!(frames[1].tags, vec![tag("x", Some(-5))]);
        assert_eq!(frames[2].tags, vec![tag("bf", None)]);
        assert_eq!(frames[1].tag("x").and_then(|t| t.value), Some(-5));
    }

    #[test]
    fn multiple_tags_on_one_frame() {
        let script = AnimationScript::parse("x10y-3s2D4").expect("valid script");
        let frame = &script.frames()[0];
        assert_eq!(
            frame.tags,
            vec![tag("x", Some(10)), tag("y", Some(-3)), tag("s", Some(2))]
        );
        assert_eq!(frame.duration, 4);
    }

    #[test]
    fn frame_at_maps_ticks_to_frames() {
        let script = AnimationScript::parse("A10-B20-C5").expect("valid script");
        assert_eq!(script.frame_at(0), Some(0));
        assert_eq!(script.frame_at(9), Some(0));
        assert_eq!(script.frame_at(10), Some(1));
        assert_eq!(script.frame_at(29), Some(1));
        assert_eq!(script.frame_at(30), Some(2));
        assert_eq!(script.frame_at(35), None);
    }

    #[test]
    fn rejects_malformed_scripts() {
        assert_eq!(AnimationScript::parse(""), Err(AnimationError::Empty));
        assert_eq!(AnimationScript::parse("   "), Err(AnimationError::Empty));
        assert_eq!(
            AnimationScript::parse("A"),
            Err(AnimationError::MissingDuration { frame: 0 })
        );
        assert_eq!(
            AnimationScript::parse("A10-B0"),
            Err(AnimationError::ZeroDuration { frame: 1 })
        );
        assert_eq!(
            AnimationScript::parse("A10-"),
            Err(AnimationError::Incomplete { frame: 1 })
        );
        assert_eq!(
            AnimationScript::parse("s1"),
            Err(AnimationError::Incomplete { frame: 0 })
        );
        assert_eq!(
            AnimationScript::parse("A10#"),
            Err(AnimationError::UnexpectedChar {
                offset: 3,
                found: '#'
            })
        );
        assert!(matches!(
            AnimationScript::parse("A99999999999"),
            Err(AnimationError::NumberOutOfRange { .. })
        ));
    }
}
