use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Vec2};

/// Global (composition-level) frame index as supplied by the rendering host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Signed view used by timeline math, where trigger frames may precede frame zero.
    pub fn as_i64(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

/// Half-open frame span `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Range of `len` frames starting at `start`.
    pub fn with_len(start: u64, len: u64) -> Self {
        Self {
            start: FrameIndex(start),
            end: FrameIndex(start.saturating_add(len)),
        }
    }

    /// Whether `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Frame relative to the range start. Frames before the range map to zero.
    pub fn local(self, f: FrameIndex) -> FrameIndex {
        FrameIndex(f.0.saturating_sub(self.start.0))
    }
}

/// Frame rate as a rational `num/den`. Compositions in practice use integer rates (`den == 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, never zero. Defaults to 1 when omitted.
    #[serde(default = "one")]
    pub den: u32,
}

fn one() -> u32 {
    1
}

impl Fps {
    /// Rate `num/den`; both must be non-zero.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate.
    pub fn integer(fps: u32) -> ReelResult<Self> {
        Self::new(fps, 1)
    }

    /// Reject a zero numerator or denominator (possible after deserializing).
    pub fn validate(self) -> ReelResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Seconds per frame.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Output size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Premultiply straight-alpha channels, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ReelResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ReelError::validation(format!("color '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> ReelResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ReelError::validation(format!("color '{s}' has a non-hex digit")))
        };
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> ReelResult<u8> { Ok(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?) };

        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::from_straight_rgba(r * 17, g * 17, b * 17, 255))
            }
            6 => Ok(Self::from_straight_rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_straight_rgba(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                byte(6)?,
            )),
            _ => Err(ReelError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }
}

/// Translate/rotate/scale about an anchor point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Offset applied last.
    pub translate: Vec2,
    /// Rotation about `anchor`, in radians.
    pub rotation_rad: f64,
    /// Scale about `anchor`. Defaults to `(1, 1)`.
    pub scale: Vec2,
    /// Pivot in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Equivalent affine matrix.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
