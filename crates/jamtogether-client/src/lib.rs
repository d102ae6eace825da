pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::JamClient;
pub use error::ClientError;
pub use normalize::normalize_room;
pub use types::{AllStudiosResponse, RoomAvailabilityRaw, SearchResponse};
