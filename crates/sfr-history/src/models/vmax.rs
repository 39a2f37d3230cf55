//! Maximum circular velocity of a halo from its mass.

use units::{Mass, Redshift, Velocity};

/// Scale factor at which the two power laws of the pivot mass cross
const PIVOT_SCALE_FACTOR: f64 = 0.378;

/// Normalisation of the pivot mass in M☉
const PIVOT_MASS_NORM: f64 = 1.64e12;

/// Velocity of a halo sitting exactly at the pivot mass, in km/s
const PIVOT_VELOCITY: f64 = 200.0;

/// Halo mass with `vmax = 200 km/s` at scale factor `a`.
pub fn pivot_mass(a: f64) -> Mass {
    let x = a / PIVOT_SCALE_FACTOR;
    Mass::from_solar_masses(PIVOT_MASS_NORM / (x.powf(-0.142) + x.powf(-1.79)))
}

/// `vmax = 200 km/s * (M / M_pivot(a))^(1/3)`
///
/// A negative halo mass produces NaN; physically valid inputs never do.
pub fn vmax_at_z(halo_mass: Mass, z: Redshift) -> Velocity {
    let mpivot = pivot_mass(z.scale_factor());
    Velocity::from_km_per_sec(PIVOT_VELOCITY * (halo_mass / mpivot).powf(1.0 / 3.0))
}
