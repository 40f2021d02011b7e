/// Settings for the CSRF protection layer.
///
/// ```toml
/// [csrf]
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsrfConfig {
    /// If true, state-changing requests must prove same-site origin and
    /// carry a valid session token before their handler runs.
    pub enabled: bool,
}
