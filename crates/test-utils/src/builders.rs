#![allow(dead_code)]

use mystem_bridge::config::{ConfigFile, EngineSection, OptionsSection, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(engine_path: &str) -> Self {
        Self {
            config: RawConfigFile {
                engine: EngineSection {
                    path: engine_path.to_string(),
                    encoding: None,
                    timeout: None,
                },
                options: OptionsSection::default(),
            },
        }
    }

    pub fn encoding(mut self, label: &str) -> Self {
        self.config.engine.encoding = Some(label.to_string());
        self
    }

    pub fn timeout(mut self, duration: &str) -> Self {
        self.config.engine.timeout = Some(duration.to_string());
        self
    }

    pub fn one_word_per_line(mut self, val: bool) -> Self {
        self.config.options.one_word_per_line = val;
        self
    }

    pub fn grammar_info(mut self, val: bool) -> Self {
        self.config.options.grammar_info = val;
        self
    }

    pub fn disambiguate(mut self, val: bool) -> Self {
        self.config.options.disambiguate = val;
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}
