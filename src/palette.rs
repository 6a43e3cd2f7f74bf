//! Snake colouring, kept apart from the renderer so it can be tested.
//!
//! A short snake is plain green. As it grows the segments near the head
//! shift towards orange, fading back to green along the body.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn lerp(self, to: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + t * (to.r - self.r),
            self.g + t * (to.g - self.g),
            self.b + t * (to.b - self.b),
        )
    }

    fn brighten(self, amount: f32) -> Rgb {
        Rgb::new(
            (self.r + amount).min(1.0),
            (self.g + amount).min(1.0),
            (self.b + amount).min(1.0),
        )
    }

    /// 8-bit channels, clamped.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

pub const BODY_BASE: Rgb = Rgb::new(0.2, 0.9, 0.2);
pub const HEAD_TARGET: Rgb = Rgb::new(0.9, 0.5, 0.2);
pub const FOOD: Rgb = Rgb::new(0.9, 0.2, 0.2);
pub const HEAD_HIGHLIGHT: f32 = 0.1;

/// Length at which the colour shift starts.
const SHIFT_START_LEN: usize = 3;
/// Extra segments over which the shift reaches full strength.
const SHIFT_SPAN: f32 = 30.0;

/// How far the whole snake has shifted towards orange, in [0, 1].
pub fn depth_factor(len: usize) -> f32 {
    (len.saturating_sub(SHIFT_START_LEN) as f32 / SHIFT_SPAN).clamp(0.0, 1.0)
}

/// Colour of segment `index` (0 is the head) in a snake of `len` segments.
pub fn segment_color(index: usize, len: usize) -> Rgb {
    let depth = depth_factor(len);

    if index == 0 {
        return BODY_BASE.lerp(HEAD_TARGET, depth).brighten(HEAD_HIGHLIGHT);
    }

    let toward_head = if len > 1 {
        1.0 - index as f32 / (len - 1) as f32
    } else {
        0.0
    };
    BODY_BASE.lerp(HEAD_TARGET, toward_head * depth)
}
