pub mod catalog;
pub mod payoff;
