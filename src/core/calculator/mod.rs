pub mod aggregation;
pub mod grouping;
