//! Configuration file support.

use kestrel_syntax::Options;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Script,
    Module,
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::Script
    }
}

/// Parser options in a form which can be loaded from a config file.
///
/// ```toml
/// sourceType = "module"
/// ranges = true
/// webCompat = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    pub source_type: SourceKind,
    pub strict: bool,
    pub raw: bool,
    pub ranges: bool,
    pub loc: bool,
    pub web_compat: bool,
    pub global_return: bool,
}

impl ParserConfig {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::MODULE, self.source_type == SourceKind::Module);
        options.set(Options::STRICT, self.strict);
        options.set(Options::RAW, self.raw);
        options.set(Options::RANGES, self.ranges);
        options.set(Options::LOC, self.loc);
        options.set(Options::WEB_COMPAT, self.web_compat);
        options.set(Options::GLOBAL_RETURN, self.global_return);
        options
    }
}

impl From<Options> for ParserConfig {
    fn from(options: Options) -> Self {
        Self {
            source_type: if options.contains(Options::MODULE) {
                SourceKind::Module
            } else {
                SourceKind::Script
            },
            strict: options.contains(Options::STRICT),
            raw: options.contains(Options::RAW),
            ranges: options.contains(Options::RANGES),
            loc: options.contains(Options::LOC),
            web_compat: options.contains(Options::WEB_COMPAT),
            global_return: options.contains(Options::GLOBAL_RETURN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_a_sloppy_script() {
        let config = ParserConfig::from_toml("").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.options(), Options::empty());
    }

    #[test]
    fn camel_case_keys() {
        let config = ParserConfig::from_toml(
            r#"
            sourceType = "module"
            webCompat = true
            globalReturn = true
            ranges = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.options(),
            Options::MODULE | Options::WEB_COMPAT | Options::GLOBAL_RETURN | Options::RANGES
        );
    }

    #[test]
    fn unknown_source_type_is_an_error() {
        assert!(ParserConfig::from_toml(r#"sourceType = "json""#).is_err());
    }

    #[test]
    fn options_survive_a_toml_trip() {
        let options = Options::STRICT | Options::LOC | Options::RAW;
        let text = toml::to_string(&ParserConfig::from(options)).unwrap();
        assert_eq!(ParserConfig::from_toml(&text).unwrap().options(), options);
    }
}
