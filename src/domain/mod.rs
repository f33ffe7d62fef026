pub mod datatype;
pub mod entity;
pub mod service;
mod transform;
