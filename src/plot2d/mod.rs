pub mod curves;
pub mod region;
