use super::{Guide, GuideError};

/// A feature-flag backend with an OpenFeature provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    Configcat,
    Devcycle,
    Flagd,
    Flagsmith,
    Flipt,
    Gofeatureflag,
    Launchdarkly,
    Posthog,
    Split,
    Unleash,
}

impl Provider {
    pub const ALL: [Provider; 10] = [
        Provider::Configcat,
        Provider::Devcycle,
        Provider::Flagd,
        Provider::Flagsmith,
        Provider::Flipt,
        Provider::Gofeatureflag,
        Provider::Launchdarkly,
        Provider::Posthog,
        Provider::Split,
        Provider::Unleash,
    ];

    pub fn parse(id: &str) -> Result<Self, GuideError> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| GuideError::UnknownProvider(id.to_string()))
    }

    pub fn id(self) -> &'static str {
        match self {
            Provider::Configcat => "configcat",
            Provider::Devcycle => "devcycle",
            Provider::Flagd => "flagd",
            Provider::Flagsmith => "flagsmith",
            Provider::Flipt => "flipt",
            Provider::Gofeatureflag => "gofeatureflag",
            Provider::Launchdarkly => "launchdarkly",
            Provider::Posthog => "posthog",
            Provider::Split => "split",
            Provider::Unleash => "unleash",
        }
    }

    /// Documentation URL for using this provider with `guide`'s SDK, if one
    /// is known.
    pub fn doc_url(self, guide: Guide) -> Option<&'static str> {
        DOC_INDEX
            .iter()
            .find(|(p, g, _)| *p == self && *g == guide)
            .map(|(_, _, url)| *url)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

// Providers without an entry for a guide fall back to a web search hint.
const DOC_INDEX: &[(Provider, Guide, &str)] = &[
    (
        Provider::Configcat,
        Guide::Dotnet,
        "https://configcat.com/docs/sdk-reference/openfeature/dotnet/",
    ),
    (Provider::Configcat, Guide::Go, "https://configcat.com/docs/sdk-reference/openfeature/go/"),
    (
        Provider::Configcat,
        Guide::Java,
        "https://configcat.com/docs/sdk-reference/openfeature/java/",
    ),
    (
        Provider::Configcat,
        Guide::Javascript,
        "https://configcat.com/docs/sdk-reference/openfeature/js/",
    ),
    (
        Provider::Configcat,
        Guide::Nodejs,
        "https://configcat.com/docs/sdk-reference/openfeature/node/",
    ),
    (
        Provider::Configcat,
        Guide::Python,
        "https://configcat.com/docs/sdk-reference/openfeature/python/",
    ),
    (
        Provider::Devcycle,
        Guide::Android,
        "https://docs.devcycle.com/sdk/client-side-sdks/android/android-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Dotnet,
        "https://docs.devcycle.com/sdk/server-side-sdks/dotnet/dotnet-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Go,
        "https://docs.devcycle.com/sdk/server-side-sdks/go/go-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Ios,
        "https://docs.devcycle.com/sdk/client-side-sdks/ios/ios-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Java,
        "https://docs.devcycle.com/sdk/server-side-sdks/java/java-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Javascript,
        "https://docs.devcycle.com/sdk/client-side-sdks/javascript/javascript-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Nestjs,
        "https://docs.devcycle.com/sdk/server-side-sdks/nestjs/nestjs-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Nodejs,
        "https://docs.devcycle.com/sdk/server-side-sdks/node/node-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Python,
        "https://docs.devcycle.com/sdk/server-side-sdks/python/python-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::React,
        "https://docs.devcycle.com/sdk/client-side-sdks/react/react-openfeature",
    ),
    (
        Provider::Devcycle,
        Guide::Ruby,
        "https://docs.devcycle.com/sdk/server-side-sdks/ruby/ruby-openfeature",
    ),
    (Provider::Flagd, Guide::Dotnet, "https://flagd.dev/providers/dotnet/"),
    (Provider::Flagd, Guide::Go, "https://flagd.dev/providers/go/"),
    (Provider::Flagd, Guide::Java, "https://flagd.dev/providers/java/"),
    (Provider::Flagd, Guide::Javascript, "https://flagd.dev/providers/web/"),
    (Provider::Flagd, Guide::Nodejs, "https://flagd.dev/providers/nodejs/"),
    (Provider::Flagd, Guide::Php, "https://flagd.dev/providers/php/"),
    (Provider::Flagd, Guide::Python, "https://flagd.dev/providers/python/"),
    (Provider::Flagsmith, Guide::Java, "https://docs.flagsmith.com/integrations/openfeature"),
    (Provider::Flagsmith, Guide::Nodejs, "https://docs.flagsmith.com/integrations/openfeature"),
    (Provider::Flagsmith, Guide::Python, "https://docs.flagsmith.com/integrations/openfeature"),
    (Provider::Flipt, Guide::Go, "https://docs.flipt.io/integration/openfeature"),
    (Provider::Flipt, Guide::Java, "https://docs.flipt.io/integration/openfeature"),
    (
        Provider::Gofeatureflag,
        Guide::Android,
        "https://gofeatureflag.org/docs/sdk/client_providers/openfeature_android",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Dotnet,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_dotnet",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Go,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_go",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Ios,
        "https://gofeatureflag.org/docs/sdk/client_providers/openfeature_swift",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Java,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_java",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Javascript,
        "https://gofeatureflag.org/docs/sdk/client_providers/openfeature_javascript",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Nodejs,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_javascript",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Php,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_php",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Python,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_python",
    ),
    (
        Provider::Gofeatureflag,
        Guide::Ruby,
        "https://gofeatureflag.org/docs/sdk/server_providers/openfeature_ruby",
    ),
    (Provider::Launchdarkly, Guide::Dotnet, "https://launchdarkly.com/docs/sdk/openfeature/dotnet"),
    (Provider::Launchdarkly, Guide::Go, "https://launchdarkly.com/docs/sdk/openfeature/go"),
    (Provider::Launchdarkly, Guide::Java, "https://launchdarkly.com/docs/sdk/openfeature/java"),
    (
        Provider::Launchdarkly,
        Guide::Javascript,
        "https://launchdarkly.com/docs/sdk/openfeature/javascript",
    ),
    (
        Provider::Launchdarkly,
        Guide::Nodejs,
        "https://launchdarkly.com/docs/sdk/openfeature/node-js",
    ),
    (Provider::Launchdarkly, Guide::Php, "https://launchdarkly.com/docs/sdk/openfeature/php"),
    (Provider::Launchdarkly, Guide::Python, "https://launchdarkly.com/docs/sdk/openfeature/python"),
    (Provider::Launchdarkly, Guide::Ruby, "https://launchdarkly.com/docs/sdk/openfeature/ruby"),
    (Provider::Posthog, Guide::Nodejs, "https://posthog.com/docs/libraries/openfeature"),
    (
        Provider::Split,
        Guide::Java,
        "https://help.split.io/hc/en-us/articles/360051734572-OpenFeature-Java-provider",
    ),
    (
        Provider::Split,
        Guide::Nodejs,
        "https://help.split.io/hc/en-us/articles/360052195952-OpenFeature-Node-js-provider",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_index_has_no_duplicate_pairs() {
        for (i, (p, g, _)) in DOC_INDEX.iter().enumerate() {
            let dup = DOC_INDEX[i + 1..].iter().any(|(p2, g2, _)| p == p2 && g == g2);
            assert!(!dup, "duplicate doc entry for {p}/{g}");
        }
    }

    #[test]
    fn unmapped_pair_has_no_url() {
        assert_eq!(Provider::Unleash.doc_url(Guide::Go), None);
        assert_eq!(Provider::Flagd.doc_url(Guide::Go), Some("https://flagd.dev/providers/go/"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert_eq!(
            Provider::parse("acme"),
            Err(GuideError::UnknownProvider("acme".to_string()))
        );
    }
}
