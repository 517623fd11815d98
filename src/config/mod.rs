mod defaults;
mod loader;
mod model;

pub use loader::{
    FileSystem, LOCAL_CONFIG_NAME, LoadResult, OverlayFormat, RealFileSystem, RuleSetLoader,
    apply_overlay, parse_overlay,
};
pub use model::{
    AntiPatternConfig, LocationRule, Manifest, ManifestEntry, NamingRule, RuleSet, SizeThresholds,
};
