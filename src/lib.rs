pub mod aggregators;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod table;
