//! Product catalogue: models and the product state slice

pub mod model;
pub mod slice;

pub use model::{Product, ProductDraft, Version};
pub use slice::{ProductSlice, ProductState};
