pub mod request_reader;
pub mod results_writer;
pub mod voter_writer;
