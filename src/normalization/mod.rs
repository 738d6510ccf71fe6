pub mod price;
pub mod sku;
pub mod slug;
