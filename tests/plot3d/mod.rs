mod region;
mod surface;
