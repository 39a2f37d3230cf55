//! Physical quantities for halo and galaxy bookkeeping.
//!
//! Thin f64 newtypes with fixed base units: solar masses, years, km/s and
//! solar masses per year, plus redshift with its scale-factor conversions.

pub mod mass;
pub mod mass_rate;
pub mod redshift;
pub mod time;
pub mod velocity;


pub use mass::Mass;
pub use mass_rate::MassRate;
pub use redshift::Redshift;
pub use time::Time;
pub use velocity::Velocity;
