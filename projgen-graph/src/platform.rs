use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform a target is built for.
///
/// Declaration order is significant: generated schemes are emitted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS")]
    MacOs,
    #[serde(rename = "tvOS")]
    TvOs,
    #[serde(rename = "watchOS")]
    WatchOs,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Ios,
        Platform::MacOs,
        Platform::TvOs,
        Platform::WatchOs,
    ];

    /// Identifier used in scheme names, e.g. `A-Project-iOS`.
    pub fn identifier(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::MacOs => "macOS",
            Platform::TvOs => "tvOS",
            Platform::WatchOs => "watchOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Product type produced by a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    UnitTests,
    UiTests,
    Bundle,
    AppExtension,
    WatchApp,
    WatchExtension,
    CommandLineTool,
}

impl Product {
    /// True for products that run as part of a test action.
    pub fn is_test(self) -> bool {
        matches!(self, Product::UnitTests | Product::UiTests)
    }
}
