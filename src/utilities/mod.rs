pub mod drng;
