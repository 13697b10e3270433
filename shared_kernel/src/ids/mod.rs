pub mod string_ids;
pub mod uuid;
