pub mod noisy;
pub mod scenarios;
