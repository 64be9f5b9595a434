pub mod client;
pub mod error;
pub mod files;
pub mod normalize;
pub mod pagination;
mod rate_limit;
pub mod types;

pub use client::{admin_origin, CatalogClient, API_VERSION, PAGE_LIMIT};
pub use error::ShopifyError;
pub use files::{FilesUploader, UploadSettings};
pub use normalize::normalize_product;
