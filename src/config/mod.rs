pub mod settings;

pub use settings::{Peer, Settings};
