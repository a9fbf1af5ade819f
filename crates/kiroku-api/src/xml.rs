//! Mapping between the service's XML dialect and the domain records.

pub mod decode;
pub mod encode;
pub mod fields;
mod wire;

pub use decode::{decode_list_summary, decode_search_results, decode_user};
pub use encode::encode_update;
