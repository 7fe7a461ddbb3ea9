pub mod clock;
pub mod generator;
pub mod location;
pub mod point;
pub mod simulator;
pub mod sink;
