pub mod region;
pub mod surface;
