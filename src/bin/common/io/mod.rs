pub mod readers;
pub mod writers;
