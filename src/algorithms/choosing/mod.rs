pub mod minmax;
