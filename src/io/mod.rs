pub mod instance_reader;
pub mod optima;
pub mod result_reader;
