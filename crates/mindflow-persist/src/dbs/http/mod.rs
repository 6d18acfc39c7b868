pub mod client;

pub use client::OWNER_HEADER;
#[cfg(feature = "http")]
pub use client::HttpThreadStore;
