//! Problem data: cities, the depot and the validated instance.

mod city;
mod instance;

pub use city::{City, CityId, Position};
pub use instance::Instance;
