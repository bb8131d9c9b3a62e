//! Immutable, element-typed, rank-N containers of decoded values.

use std::io::Cursor;

use ndarray::{ArrayD, IxDyn};
use num_traits::cast;
use paste::paste;

use crate::{
    errors::{Error, Result},
    extio::ExtendedRead,
    index::{element_count, linear_offset},
};

/// The primitive element types stored by the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl DataType {
    /// Size of one element, in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 => 4,
            Self::I64 => 8,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

/// A single element of any type.
///
/// Reads always yield the exact stored type; conversion only happens
/// through the explicit `to_*` methods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

macro_rules! value_casts {
    ($($type:ident),*) => {
        paste! {
            impl Value {
                $(
                    /// Cast to the named type, if the value is representable there.
                    pub fn [<to_ $type>](&self) -> Option<$type> {
                        match *self {
                            Self::I8(value) => cast(value),
                            Self::I16(value) => cast(value),
                            Self::I32(value) => cast(value),
                            Self::I64(value) => cast(value),
                            Self::F32(value) => cast(value),
                            Self::F64(value) => cast(value),
                        }
                    }
                )*
            }
        }
    };
}

value_casts!(i8, i16, i32, i64, f32, f64);

/// An immutable rank-N array of decoded values, one variant per element
/// type. Each decode produces a fresh instance whose storage is shared
/// with nothing else.
#[derive(Debug, PartialEq)]
pub enum TypedArray {
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

macro_rules! typed_array {
    ($variant:ident, $type:ident) => {
        paste! {
            /// Build an array from values laid out in row-major order.
            pub fn [<new_ $type>](shape: &[usize], values: Vec<$type>) -> Result<Self> {
                if values.len() != element_count(shape) {
                    return Err(Error::ShapeMismatch(format!(
                        "{} values for shape {:?} holding {} elements",
                        values.len(),
                        shape,
                        element_count(shape),
                    )));
                }

                // Length was checked, so the conversion cannot fail
                Ok(Self::$variant(
                    ArrayD::from_shape_vec(IxDyn(shape), values).expect("row-major layout"),
                ))
            }

            /// The typed backing array.
            ///
            /// Panics when called on a different variant; asking an array
            /// for the wrong type is a programming error.
            pub fn [<values_ $type>](&self) -> &ArrayD<$type> {
                match self {
                    Self::$variant(array) => array,
                    _ => panic!("Not the {} variant", stringify!($type)),
                }
            }
        }
    };
}

impl TypedArray {
    typed_array!(I8, i8);
    typed_array!(I16, i16);
    typed_array!(I32, i32);
    typed_array!(I64, i64);
    typed_array!(F32, f32);
    typed_array!(F64, f64);

    /// Decode Big Endian bytes into an array of `dtype` elements.
    pub fn decode(dtype: DataType, shape: &[usize], bytes: &[u8]) -> Result<Self> {
        let count = element_count(shape);
        if bytes.len() != count * dtype.size() {
            return Err(Error::ShapeMismatch(format!(
                "{} bytes for shape {:?} of {:?} needing {}",
                bytes.len(),
                shape,
                dtype,
                count * dtype.size(),
            )));
        }

        let mut stream = Cursor::new(bytes);

        macro_rules! decode_values {
            ($read:ident, $new:ident) => {{
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(stream.$read()?);
                }
                Self::$new(shape, values)?
            }};
        }

        Ok(match dtype {
            DataType::I8 => decode_values!(read_i8, new_i8),
            DataType::I16 => decode_values!(read_i16, new_i16),
            DataType::I32 => decode_values!(read_i32, new_i32),
            DataType::I64 => decode_values!(read_i64, new_i64),
            DataType::F32 => decode_values!(read_f32, new_f32),
            DataType::F64 => decode_values!(read_f64, new_f64),
        })
    }

    /// The element type stored.
    pub fn dtype(&self) -> DataType {
        match self {
            Self::I8(_) => DataType::I8,
            Self::I16(_) => DataType::I16,
            Self::I32(_) => DataType::I32,
            Self::I64(_) => DataType::I64,
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }

    /// The array's shape.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::I8(array) => array.shape(),
            Self::I16(array) => array.shape(),
            Self::I32(array) => array.shape(),
            Self::I64(array) => array.shape(),
            Self::F32(array) => array.shape(),
            Self::F64(array) => array.shape(),
        }
    }

    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Number of elements held.
    pub fn len(&self) -> usize {
        element_count(self.shape())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at a coordinate tuple.
    pub fn get(&self, coordinate: &[usize]) -> Result<Value> {
        let offset = linear_offset(self.shape(), coordinate)?;

        self.get_linear(offset)
    }

    /// The element at a row-major linear offset.
    pub fn get_linear(&self, offset: usize) -> Result<Value> {
        if offset >= self.len() {
            return Err(Error::Range(format!(
                "offset {offset} is out of bounds for array with {} elements",
                self.len()
            )));
        }

        macro_rules! element {
            ($array:ident, $variant:ident) => {
                Value::$variant($array.as_slice().expect("row-major layout")[offset])
            };
        }

        Ok(match self {
            Self::I8(array) => element!(array, I8),
            Self::I16(array) => element!(array, I16),
            Self::I32(array) => element!(array, I32),
            Self::I64(array) => element!(array, I64),
            Self::F32(array) => element!(array, F32),
            Self::F64(array) => element!(array, F64),
        })
    }
}
