pub mod category;
pub mod ids;
#[cfg(test)]
pub mod memory;
pub mod products;
pub mod seed;
pub mod store;
