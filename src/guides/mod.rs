//! Bundled OpenFeature SDK install guides.
//!
//! Guide texts are embedded at build time from `guides/*.md` and never change
//! at run time. Provider documentation links live in [`providers`].

pub mod install;
pub mod providers;

pub use install::{inject_providers, install_guide, render_provider_block};
pub use providers::Provider;

/// Start delimiter of the region that receives provider instructions.
pub const PROVIDERS_START_MARKER: &str = "<!-- PROVIDERS:START -->";
/// End delimiter of the region that receives provider instructions.
pub const PROVIDERS_END_MARKER: &str = "<!-- PROVIDERS:END -->";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuideError {
    #[error("Unrecognized guide: {0}")]
    UnknownGuide(String),
    #[error("Unrecognized provider: {0}")]
    UnknownProvider(String),
}

/// An SDK ecosystem with a bundled install guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Guide {
    Android,
    Angular,
    Dotnet,
    Go,
    Ios,
    Java,
    Javascript,
    Nestjs,
    Nodejs,
    Php,
    Python,
    React,
    Ruby,
}

impl Guide {
    pub const ALL: [Guide; 13] = [
        Guide::Android,
        Guide::Angular,
        Guide::Dotnet,
        Guide::Go,
        Guide::Ios,
        Guide::Java,
        Guide::Javascript,
        Guide::Nestjs,
        Guide::Nodejs,
        Guide::Php,
        Guide::Python,
        Guide::React,
        Guide::Ruby,
    ];

    pub fn parse(id: &str) -> Result<Self, GuideError> {
        Self::ALL
            .into_iter()
            .find(|g| g.id() == id)
            .ok_or_else(|| GuideError::UnknownGuide(id.to_string()))
    }

    /// Identifier used in tool arguments.
    pub fn id(self) -> &'static str {
        match self {
            Guide::Android => "android",
            Guide::Angular => "angular",
            Guide::Dotnet => "dotnet",
            Guide::Go => "go",
            Guide::Ios => "ios",
            Guide::Java => "java",
            Guide::Javascript => "javascript",
            Guide::Nestjs => "nestjs",
            Guide::Nodejs => "nodejs",
            Guide::Php => "php",
            Guide::Python => "python",
            Guide::React => "react",
            Guide::Ruby => "ruby",
        }
    }

    /// Human-readable SDK name, as it appears in provider instructions.
    pub fn display_name(self) -> &'static str {
        match self {
            Guide::Android => "Android (Kotlin)",
            Guide::Angular => "Angular",
            Guide::Dotnet => ".NET",
            Guide::Go => "Go",
            Guide::Ios => "iOS (Swift)",
            Guide::Java => "Java",
            Guide::Javascript => "JavaScript (web)",
            Guide::Nestjs => "NestJS",
            Guide::Nodejs => "Node.js",
            Guide::Php => "PHP",
            Guide::Python => "Python",
            Guide::React => "React",
            Guide::Ruby => "Ruby",
        }
    }

    /// The bundled markdown text of this guide.
    pub fn markdown(self) -> &'static str {
        match self {
            Guide::Android => include_str!("../../guides/android.md"),
            Guide::Angular => include_str!("../../guides/angular.md"),
            Guide::Dotnet => include_str!("../../guides/dotnet.md"),
            Guide::Go => include_str!("../../guides/go.md"),
            Guide::Ios => include_str!("../../guides/ios.md"),
            Guide::Java => include_str!("../../guides/java.md"),
            Guide::Javascript => include_str!("../../guides/javascript.md"),
            Guide::Nestjs => include_str!("../../guides/nestjs.md"),
            Guide::Nodejs => include_str!("../../guides/nodejs.md"),
            Guide::Php => include_str!("../../guides/php.md"),
            Guide::Python => include_str!("../../guides/python.md"),
            Guide::React => include_str!("../../guides/react.md"),
            Guide::Ruby => include_str!("../../guides/ruby.md"),
        }
    }
}

impl std::fmt::Display for Guide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
