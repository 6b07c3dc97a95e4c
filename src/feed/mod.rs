pub mod draws;
pub mod rules;
pub mod settings;
pub mod simulator;

pub use draws::{Draws, RandomDraws};
pub use rules::{advance, Probabilities, Transition};
pub use settings::FeedSettings;
pub use simulator::{LiveMatchSimulator, MatchChange, PassReport};
