//! Integrator configuration.

use serde::{Deserialize, Serialize};

/// Execution options for [`crate::integrator::StellarMassIntegrator`].
///
/// Neither option changes the numbers that are produced, only how and
/// whether they are produced.
///
/// # Examples
///
/// ```
/// use sfr_history::config::IntegratorConfig;
///
/// let config: IntegratorConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
/// assert!(config.parallel);
/// assert!(config.require_final_output);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// Spread halos over the rayon thread pool.
    ///
    /// Time still advances sequentially within each halo; output is
    /// bit-identical to the sequential path.
    #[serde(default)]
    pub parallel: bool,

    /// Reject output schedules that do not end on the last grid step.
    ///
    /// Without the final step the stellar mass integrated over the tail of
    /// the grid is computed and then thrown away.
    #[serde(default = "default_require_final_output")]
    pub require_final_output: bool,
}

fn default_require_final_output() -> bool {
    true
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            require_final_output: default_require_final_output(),
        }
    }
}

impl IntegratorConfig {
    /// Default configuration with halo-parallel execution enabled
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IntegratorConfig::default();
        assert!(!config.parallel);
        assert!(config.require_final_output);
    }

    #[test]
    fn empty_json_is_default() {
        let config: IntegratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IntegratorConfig::default());
    }

    #[test]
    fn partial_override() {
        let config: IntegratorConfig =
            serde_json::from_str(r#"{"require_final_output": false}"#).unwrap();
        assert!(!config.parallel);
        assert!(!config.require_final_output);
    }

    #[test]
    fn parallel_constructor() {
        let config = IntegratorConfig::parallel();
        assert!(config.parallel);
        assert!(config.require_final_output);
    }
}
