// Feature definitions, schema and model artifact formats
pub mod ml;

// Boundary range checks
pub mod validation;

// Domain-specific error types
pub mod errors;
