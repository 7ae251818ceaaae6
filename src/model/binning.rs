pub mod contrast;
pub mod partition;
pub mod umcc;
pub mod value;
