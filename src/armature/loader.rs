//! Joint-hierarchy text format.
//!
//! ```text
//! 3
//! Hip -1
//! 0 0 0 1
//! LeftLeg 0
//! 3.1416 0 0.2 0.9
//! RightLeg 0
//! 3.1416 0 -0.2 0.9
//! ```
//!
//! The first token is the joint count. Each joint then contributes a name
//! and a parent index (negative or self for the root), followed by four
//! floats: pitch, yaw, roll (radians) and bone length. The angles become the
//! joint's local rotation in the default frame (roll, then pitch, then yaw)
//! and the length is stored on the local scaling's Y axis.
//!
//! Tokens are whitespace-separated; line breaks carry no meaning beyond
//! error reporting.

use std::io::Read;
use std::str::{FromStr, Lines, SplitWhitespace};

use glam::Vec3;

use super::armature::Armature;
use super::bone::Bone;
use super::frame::Frame;
use crate::errors::{ArmatureError, Result};
use crate::math;

/// Upper bound on the joint storage reserved from the header count.
const PREALLOCATED_JOINTS: usize = 1024;

struct Tokens<'a> {
    lines: Lines<'a>,
    current: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: "".split_whitespace(),
            line: 0,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        loop {
            if let Some(token) = self.current.next() {
                return Ok(token);
            }
            let Some(line) = self.lines.next() else {
                return Err(ArmatureError::Parse {
                    line: self.line,
                    message: format!("unexpected end of input, expected {what}"),
                });
            };
            self.line += 1;
            self.current = line.split_whitespace();
        }
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| ArmatureError::Parse {
            line: self.line,
            message: format!("expected {what}, found '{token}'"),
        })
    }
}

impl Armature {
    /// Reads the joint-hierarchy text format from a stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text)
    }

    /// Parses the joint-hierarchy text format.
    ///
    /// The default frame receives the parsed local rotations and lengths,
    /// and its global transforms are rebuilt before returning.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);
        let count: usize = tokens.parse("joint count")?;

        // The count is untrusted; a short stream fails on its own tokens.
        let capacity = count.min(PREALLOCATED_JOINTS);
        let mut names = Vec::with_capacity(capacity);
        let mut parents = Vec::with_capacity(capacity);
        let mut bones = Vec::with_capacity(capacity);

        for _ in 0..count {
            names.push(tokens.next_token("joint name")?.to_owned());
            parents.push(tokens.parse::<i32>("parent id")?);

            let pitch: f32 = tokens.parse("pitch")?;
            let yaw: f32 = tokens.parse("yaw")?;
            let roll: f32 = tokens.parse("roll")?;
            let length: f32 = tokens.parse("bone length")?;

            bones.push(Bone {
                local_rotation: math::quat_from_pitch_yaw_roll(pitch, yaw, roll),
                local_scaling: Vec3::new(1.0, length, 1.0),
                ..Bone::IDENTITY
            });
        }

        let mut armature = Self::build(names, &parents, Frame::from_bones(bones))?;
        armature.rebuild_default_frame()?;
        Ok(armature)
    }
}

impl FromStr for Armature {
    type Err = ArmatureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}
