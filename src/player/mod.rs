pub mod ai;
pub mod channel;
pub mod controller;

pub use ai::{MinimaxAI, RandomAI};
pub use channel::ChannelController;
pub use controller::PlayerController;
