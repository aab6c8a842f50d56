
// Value model: conversions and rendering
pub mod value;


// Fixture context: per-case scope and suite variables
pub mod context;
