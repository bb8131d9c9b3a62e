mod array;
mod errors;
mod extio;
mod index;
mod reader;
mod record;
mod section;
mod source;
mod variable;

#[cfg(test)]
mod testing;

pub use array::DataType;
pub use array::TypedArray;
pub use array::Value;
pub use errors::Error;
pub use errors::Result;
pub use index::coordinate;
pub use index::linear_offset;
pub use reader::ReadResult;
pub use reader::VariableReader;
pub use record::build_record_template;
pub use record::decode_range;
pub use record::Field;
pub use record::RecordTemplate;
pub use record::StructureData;
pub use section::Range;
pub use section::Section;
pub use section::SectionOffsets;
pub use source::ByteSource;
pub use variable::VarKind;
pub use variable::Variable;
