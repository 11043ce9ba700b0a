pub mod value;
pub mod variable;
