//! RGBA colors over three- or four-component sources.

use super::{AccessorArray, AccessorArrayMut};
use crate::memory::{check_finite, StridedNumericAccessor};
use crate::util::{Error, Result, Vec4};

/// Colors read as RGBA regardless of the stored channel count.
///
/// An RGB source reports `default_alpha` for every item, and writes to it
/// leave the missing alpha channel alone.
#[derive(Clone, Debug)]
pub struct ColorArray<B> {
    accessor: StridedNumericAccessor<B>,
    default_alpha: f32,
}

impl<B: AsRef<[u8]>> ColorArray<B> {
    /// Wrap a three- or four-component accessor.
    pub fn new(accessor: StridedNumericAccessor<B>, default_alpha: f32) -> Result<Self> {
        match accessor.component_count() {
            3 | 4 => Ok(Self { accessor, default_alpha }),
            n => Err(Error::unsupported(format!("ColorArray needs 3 or 4 components per item, layout has {n}"))),
        }
    }

    /// Alpha reported for RGB sources.
    pub fn default_alpha(&self) -> f32 {
        self.default_alpha
    }

    /// True when the source stores an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.accessor.component_count() == 4
    }

    /// The underlying accessor.
    pub fn accessor(&self) -> &StridedNumericAccessor<B> {
        &self.accessor
    }

    fn stored<'a>(&self, channels: &'a [f32; 4]) -> &'a [f32] {
        &channels[..self.accessor.component_count()]
    }
}

impl<B: AsRef<[u8]>> AccessorArray for ColorArray<B> {
    type Item = Vec4;

    #[inline]
    fn len(&self) -> usize {
        self.accessor.len()
    }

    fn get(&self, index: usize) -> Vec4 {
        let mut rgba = [0.0, 0.0, 0.0, self.default_alpha];
        let n = self.accessor.component_count();
        self.accessor.read_into(index, &mut rgba[..n]);
        Vec4::from_array(rgba)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> AccessorArrayMut for ColorArray<B> {
    fn check(&self, value: &Vec4) -> Result<()> {
        check_finite(self.stored(&value.to_array()))
    }

    fn set(&mut self, index: usize, value: Vec4) -> Result<()> {
        let rgba = value.to_array();
        let n = self.accessor.component_count();
        self.accessor.write_row(index, &rgba[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ComponentEncoding;

    #[test]
    fn test_rgb_reads_default_alpha() {
        let bytes = [255u8, 0, 51];
        let acc = StridedNumericAccessor::new(&bytes[..], 0, 1, 0, 3, ComponentEncoding::Uint8, true).unwrap();
        let colors = ColorArray::new(acc, 1.0).unwrap();
        assert!(!colors.has_alpha());

        let c = colors.get(0);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 0.0);
        assert!((c.z - 0.2).abs() < 1e-6);
        assert_eq!(c.w, 1.0);
    }

    #[test]
    fn test_rgb_write_ignores_alpha() {
        // 3 floats per item with a 4th float of padding in the stride
        let mut buf = [0u8; 16];
        buf[12..].copy_from_slice(&0.25f32.to_le_bytes());
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 1, 16, 3, ComponentEncoding::Float32, false).unwrap();
        let mut colors = ColorArray::new(acc, 1.0).unwrap();

        colors.set(0, Vec4::new(0.1, 0.2, 0.3, 0.9)).unwrap();
        assert_eq!(colors.get(0), Vec4::new(0.1, 0.2, 0.3, 1.0));

        // non-finite alpha is not stored, so it is not rejected either
        colors.set(0, Vec4::new(0.5, 0.5, 0.5, f32::NAN)).unwrap();
        drop(colors);
        assert_eq!(&buf[12..], &0.25f32.to_le_bytes());
    }

    #[test]
    fn test_rgba_roundtrip() {
        let mut buf = [0u8; 8];
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 2, 0, 4, ComponentEncoding::Uint8, true).unwrap();
        let mut colors = ColorArray::new(acc, 1.0).unwrap();

        colors.set(1, Vec4::new(1.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(colors.get(1), Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(colors.get(0), Vec4::ZERO);
    }

    #[test]
    fn test_two_components_unsupported() {
        let bytes = [0u8; 8];
        let acc = StridedNumericAccessor::new(&bytes[..], 0, 1, 0, 2, ComponentEncoding::Float32, false).unwrap();
        assert!(matches!(ColorArray::new(acc, 1.0), Err(Error::Unsupported(_))));
    }
}
