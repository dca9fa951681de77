// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Voltia.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Fluent based translations for the Voltia report.
//!
//! Translations are embedded in the binary, one `main.ftl` per language.

use fluent::{FluentArgs, FluentResource};
use fluent_bundle::concurrent::FluentBundle;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Supported languages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    English,
    /// Spanish
    Spanish,
}

impl Language {
    /// List all supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// Get the language identifier string (e.g., "en", "es")
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Español",
        }
    }

    /// Parse language from string code
    ///
    /// # Errors
    ///
    /// Returns `I18nError::UnsupportedLanguage` if the language code is not supported.
    pub fn from_code(code: &str) -> Result<Self, I18nError> {
        match code.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Self::Spanish),
            _ => Err(I18nError::UnsupportedLanguage(code.to_owned())),
        }
    }

    fn ftl_source(self) -> &'static str {
        match self {
            Self::English => include_str!("../locales/en/main.ftl"),
            Self::Spanish => include_str!("../locales/es/main.ftl"),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = I18nError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Translation errors
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Translation key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to load translation resource: {0}")]
    LoadError(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to format translation: {0}")]
    FormatError(String),
}

/// Translation lookup for a single language.
pub struct I18n {
    bundle: FluentBundle<FluentResource>,
    language: Language,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("language", &self.language)
            .field("bundle", &"<FluentBundle>")
            .finish()
    }
}

impl I18n {
    /// Create a new i18n instance for the specified language
    ///
    /// # Errors
    ///
    /// Returns `I18nError::LoadError` if the embedded translations fail to parse.
    pub fn new(language: Language) -> Result<Self, I18nError> {
        let resource = FluentResource::try_new(language.ftl_source().to_owned())
            .map_err(|(_, e)| I18nError::LoadError(format!("Failed to parse main.ftl: {e:?}")))?;

        let lang_id: LanguageIdentifier = language
            .code()
            .parse()
            .map_err(|e| I18nError::LoadError(format!("Invalid language ID: {e}")))?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Output goes to a terminal, bidi isolation marks would show up as noise.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|e| I18nError::LoadError(format!("Failed to add resource: {e:?}")))?;

        Ok(Self { bundle, language })
    }

    /// Get a translated string by key
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found.
    pub fn get(&self, key: &str) -> Result<String, I18nError> {
        self.format(key, None)
    }

    /// Format a translated string with arguments
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found.
    /// Returns `I18nError::FormatError` if formatting fails.
    pub fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> Result<String, I18nError> {
        let pattern = self
            .bundle
            .get_message(key)
            .and_then(|msg| msg.value())
            .ok_or_else(|| I18nError::KeyNotFound(key.to_owned()))?;

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            return Err(I18nError::FormatError(format!(
                "Formatting errors in {key}: {errors:?}"
            )));
        }

        Ok(value.into_owned())
    }

    /// Format a message whose variables are all plain strings.
    ///
    /// # Errors
    ///
    /// Same as [`I18n::format`].
    pub fn format_with(&self, key: &str, vars: &[(&str, &str)]) -> Result<String, I18nError> {
        let mut args = FluentArgs::new();
        for (name, value) in vars {
            args.set(*name, *value);
        }
        self.format(key, Some(&args))
    }

    /// Whether the loaded bundle has a message for `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }
}
