//! Feed generation: field mappings evaluated per variant, assembled into an
//! RSS-shaped document and written as XML plus a gzip companion.

pub mod availability;
pub mod builder;
pub mod error;
pub mod extract;
pub mod field;
pub mod path;
pub mod publish;
pub mod reader;
pub mod template;
pub mod writer;

pub use availability::{availability, variant_options};
pub use builder::{build_feed, build_item, FeedDocument, FeedHeader, Item, SHOPPING_FEED_CHANNEL};
pub use error::FeedError;
pub use extract::{build_context, extract_field_value};
pub use field::{ChannelMapping, FieldSpec, MappedField};
pub use publish::copy_to_public;
pub use reader::{parse_feed, read_feed, read_feed_gz, ParsedFeed};
pub use template::{evaluate_template, Context, ContextValue, Expression};
pub use writer::{render_feed, write_feed, WriteReport};
