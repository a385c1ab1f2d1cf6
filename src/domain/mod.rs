// Domain layer - Sales records, aggregation results and styled insight text
pub mod analysis;
pub mod insight;
pub mod sales;
