//! Fixed-width views: scalars, vectors, quaternions and matrices.

use super::{AccessorArray, AccessorArrayMut};
use crate::memory::{check_finite, StridedNumericAccessor};
use crate::util::{Error, Mat2, Mat3, Mat4, Quat, Result, Vec2, Vec3, Vec4};

macro_rules! fixed_view {
    (
        $(#[$meta:meta])*
        $name:ident, $item:ty, $n:literal,
        decode: |$row:ident| $decode:expr,
        encode: |$value:ident| $encode:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name<B> {
            accessor: StridedNumericAccessor<B>,
        }

        impl<B: AsRef<[u8]>> $name<B> {
            /// Components per item.
            pub const COMPONENTS: usize = $n;

            /// Wrap an accessor whose items have exactly this many components.
            pub fn new(accessor: StridedNumericAccessor<B>) -> Result<Self> {
                if accessor.component_count() != $n {
                    return Err(Error::unsupported(format!(
                        "{} needs {} components per item, layout has {}",
                        stringify!($name),
                        $n,
                        accessor.component_count()
                    )));
                }
                Ok(Self { accessor })
            }

            /// The underlying accessor.
            pub fn accessor(&self) -> &StridedNumericAccessor<B> {
                &self.accessor
            }

            /// Unwrap the underlying accessor.
            pub fn into_inner(self) -> StridedNumericAccessor<B> {
                self.accessor
            }
        }

        impl<B: AsRef<[u8]>> AccessorArray for $name<B> {
            type Item = $item;

            #[inline]
            fn len(&self) -> usize {
                self.accessor.len()
            }

            #[inline]
            fn get(&self, index: usize) -> $item {
                let $row: [f32; $n] = self.accessor.read_row(index);
                $decode
            }
        }

        impl<B: AsRef<[u8]> + AsMut<[u8]>> AccessorArrayMut for $name<B> {
            fn check(&self, value: &$item) -> Result<()> {
                let $value = *value;
                let row: [f32; $n] = $encode;
                check_finite(&row)
            }

            fn set(&mut self, index: usize, value: $item) -> Result<()> {
                let $value = value;
                let row: [f32; $n] = $encode;
                self.accessor.write_row(index, &row)
            }
        }
    };
}

fixed_view! {
    /// One `f32` per item.
    ScalarArray, f32, 1,
    decode: |r| r[0],
    encode: |v| [v],
}

fixed_view! {
    /// Two-component vectors (texture coordinates).
    Vector2Array, Vec2, 2,
    decode: |r| Vec2::from_array(r),
    encode: |v| v.to_array(),
}

fixed_view! {
    /// Three-component vectors (positions, normals).
    Vector3Array, Vec3, 3,
    decode: |r| Vec3::from_array(r),
    encode: |v| v.to_array(),
}

fixed_view! {
    /// Four-component vectors (tangents, joint indices, weights).
    Vector4Array, Vec4, 4,
    decode: |r| Vec4::from_array(r),
    encode: |v| v.to_array(),
}

fixed_view! {
    /// Rotation keys stored as `x, y, z, w`.
    QuaternionArray, Quat, 4,
    decode: |r| Quat::from_array(r),
    encode: |v| v.to_array(),
}

fixed_view! {
    /// 2x2 matrices, four sequential components.
    Matrix2x2Array, Mat2, 4,
    decode: |r| Mat2::from_cols_array(&r),
    encode: |v| v.to_cols_array(),
}

fixed_view! {
    /// 3x3 matrices, nine sequential components.
    Matrix3x3Array, Mat3, 9,
    decode: |r| Mat3::from_cols_array(&r),
    encode: |v| v.to_cols_array(),
}

fixed_view! {
    /// 4x4 matrices (inverse bind matrices).
    ///
    /// The 16 components are stored in sequence M11..M14, M21..M24, and so
    /// on, which is glam's column order: each stored group of four is one
    /// `Mat4` column.
    Matrix4x4Array, Mat4, 16,
    decode: |r| Mat4::from_cols_array(&r),
    encode: |v| v.to_cols_array(),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ComponentEncoding;

    fn floats(n: usize) -> Vec<u8> {
        vec![0u8; n * 4]
    }

    #[test]
    fn test_vector3_roundtrip() {
        let mut buf = floats(6);
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 2, 0, 3, ComponentEncoding::Float32, false).unwrap();
        let mut view = Vector3Array::new(acc).unwrap();

        view.set(1, Vec3::new(1.0, -2.0, 3.5)).unwrap();
        assert_eq!(view.get(0), Vec3::ZERO);
        assert_eq!(view.get(1), Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(view.index_of(&Vec3::new(1.0, -2.0, 3.5)), Some(1));
        assert!(!view.contains(&Vec3::ONE));
    }

    #[test]
    fn test_component_count_mismatch() {
        let buf = floats(6);
        let acc = StridedNumericAccessor::new(&buf[..], 0, 3, 0, 2, ComponentEncoding::Float32, false).unwrap();
        assert!(matches!(Vector3Array::new(acc), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_matrix4_component_order() {
        let mut buf = floats(16);
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 1, 0, 16, ComponentEncoding::Float32, false).unwrap();
        let mut view = Matrix4x4Array::new(acc).unwrap();

        let m = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        view.set(0, m).unwrap();
        assert_eq!(view.get(0), m);

        // translation lands in components 12..15
        let acc = view.into_inner();
        assert_eq!(acc.get(0, 12), 10.0);
        assert_eq!(acc.get(0, 13), 20.0);
        assert_eq!(acc.get(0, 14), 30.0);
        assert_eq!(acc.get(0, 15), 1.0);
    }

    #[test]
    fn test_set_rejects_non_finite_item() {
        let mut buf = floats(2);
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 1, 0, 2, ComponentEncoding::Float32, false).unwrap();
        let mut view = Vector2Array::new(acc).unwrap();

        assert!(view.set(0, Vec2::new(1.0, f32::NAN)).is_err());
        assert_eq!(view.get(0), Vec2::ZERO);
    }

    #[test]
    fn test_fill_and_copy() {
        let mut buf = floats(3);
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 3, 0, 1, ComponentEncoding::Float32, false).unwrap();
        let mut view = ScalarArray::new(acc).unwrap();

        // longer source stops at view length
        assert_eq!(view.fill(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 3);
        assert_eq!(view.to_vec(), vec![1.0, 2.0, 3.0]);

        // a bad value anywhere leaves everything untouched
        assert!(view.fill(&[9.0, f32::INFINITY]).is_err());
        assert_eq!(view.to_vec(), vec![1.0, 2.0, 3.0]);

        let mut dst = [0.0f32; 2];
        assert_eq!(view.copy_to(&mut dst), 2);
        assert_eq!(dst, [1.0, 2.0]);
    }

    #[test]
    fn test_quaternion_over_snorm16() {
        let mut buf = vec![0u8; 8];
        let acc = StridedNumericAccessor::new(&mut buf[..], 0, 1, 0, 4, ComponentEncoding::Int16, true).unwrap();
        let mut view = QuaternionArray::new(acc).unwrap();

        let q = Quat::from_rotation_z(1.0);
        view.set(0, q).unwrap();
        let back = view.get(0);
        for (a, b) in back.to_array().iter().zip(q.to_array()) {
            assert!((a - b).abs() <= 1.0 / 32767.0);
        }
    }

    #[test]
    fn test_iter_reverse() {
        let values = [1.0f32, 2.0, 3.0];
        let buf: &[u8] = bytemuck::cast_slice(&values);
        let acc = StridedNumericAccessor::new(buf, 0, 3, 0, 1, ComponentEncoding::Float32, false).unwrap();
        let view = ScalarArray::new(acc).unwrap();
        assert_eq!(view.iter().rev().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
        assert_eq!(view.iter().len(), 3);
    }
}
