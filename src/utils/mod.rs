pub mod fields;
pub mod validation;
