pub mod analyzers;
pub mod charts;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
