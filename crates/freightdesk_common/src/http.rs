// Client construction shared by every crate that talks HTTP.
pub mod client;
