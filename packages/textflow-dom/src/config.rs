use smol_str::SmolStr;

/// Options for a [`DirectionSync`](crate::DirectionSync) instance.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Location of the external right-to-left stylesheet toggled by the
    /// applicator.
    pub rtl_stylesheet_href: String,
    /// The `id` attribute identifying the stylesheet link element, used to
    /// make insertion idempotent.
    pub rtl_stylesheet_id: SmolStr,
    /// Locale assumed when neither root nor container declares one.
    pub default_locale: SmolStr,
    /// Delay before the reentrancy guard is released after an apply, giving
    /// the applicator's own mutations time to drain through the observer.
    pub guard_release_ms: u64,
    /// How long announcement nodes stay in the tree. Long enough for screen
    /// readers to pick up, short enough not to accumulate stale nodes.
    pub announcement_ttl_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            rtl_stylesheet_href: "assets/css/rtl.css".to_string(),
            rtl_stylesheet_id: SmolStr::new_static("rtl-stylesheet"),
            default_locale: SmolStr::new_static("en"),
            guard_release_ms: 50,
            announcement_ttl_ms: 3000,
        }
    }
}
