pub mod annotation;
pub mod dataset;
pub mod image;
