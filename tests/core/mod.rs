mod expressions;
mod sampling;
