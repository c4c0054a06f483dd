/// Linear RGBA color with straight alpha, channels in `[0, 1]`.
///
/// The program only draws opaque colors, so straight and premultiplied alpha
/// coincide on every value that reaches the GPU.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_u8(0, 0, 0, 255);
    pub const RED: Color = Color::from_u8(255, 0, 0, 255);

    /// Creates a color from 8-bit channels (`0`–`255`), the way draw colors
    /// are usually written down.
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_opaque_full_range_channels() {
        assert_eq!(Color::RED.to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::BLACK.to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::from_u8(0, 0, 0, 0).a, 0.0);
    }

    #[test]
    fn to_wgpu_keeps_channels() {
        let c = Color::RED.to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.0, 0.0, 1.0));
    }
}
