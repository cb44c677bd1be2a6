pub mod theta;
