// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Utilities for deriving URL slugs from display text such as city names.
//!
//! Slugs produced by this module contain only lowercase ASCII alphanumeric
//! characters separated by single hyphens. Accented letters are decomposed and
//! their diacritic marks dropped, so `"São Paulo"` becomes `"sao-paulo"`.
//! Normalizing an existing slug returns it unchanged.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Builder for slug strings used as URL path segments.
#[derive(Debug, Clone, Copy,)]
pub struct SlugStrategy<'input,>
{
    source: &'input str,
}

impl<'input,> SlugStrategy<'input,>
{
    /// Creates a new slug builder for the provided string slice.
    ///
    /// The builder retains a borrowed view of the source to avoid allocations
    /// until [`build`](Self::build) is invoked.
    pub fn builder(source: &'input str,) -> Self
    {
        Self {
            source,
        }
    }

    /// Builds a slug from the source string.
    ///
    /// Whitespace and hyphen runs collapse into a single hyphen, any other
    /// character outside `[a-z0-9]` (after lowercasing and diacritic removal)
    /// is discarded without introducing a separator. Empty or
    /// separator-only input yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use aniver_links::SlugStrategy;
    ///
    /// let slug = SlugStrategy::builder(" Ribeirão  Preto ",).build();
    /// assert_eq!(slug, "ribeirao-preto");
    /// ```
    pub fn build(self,) -> String
    {
        let mut slug = String::with_capacity(self.source.len(),);
        let mut pending_hyphen = false;

        for candidate in self.source.nfd().filter(|ch| !is_combining_mark(*ch,),) {
            if candidate.is_whitespace() || candidate == '-' {
                pending_hyphen = true;
                continue;
            }

            for lowered in candidate.to_lowercase() {
                if !lowered.is_ascii_alphanumeric() {
                    continue;
                }
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-',);
                }
                pending_hyphen = false;
                slug.push(lowered,);
            }
        }

        slug
    }
}

/// Converts arbitrary display text into a URL-safe slug.
///
/// Shorthand for [`SlugStrategy::builder`] followed by
/// [`build`](SlugStrategy::build).
///
/// # Examples
///
/// ```
/// use aniver_links::normalize;
///
/// assert_eq!(normalize("São Paulo",), "sao-paulo");
/// assert_eq!(normalize("",), "");
/// assert_eq!(normalize("  A   B  ",), "a-b");
/// ```
pub fn normalize(text: &str,) -> String
{
    SlugStrategy::builder(text,).build()
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::{SlugStrategy, normalize};

    proptest! {
        #[test]
        fn slug_contains_only_allowed_characters(input in "\\PC{0,48}") {
            let slug = normalize(&input);
            prop_assert!(slug.chars().all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-')));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn normalize_is_idempotent(input in "\\PC{0,64}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn strips_portuguese_diacritics()
    {
        assert_eq!(normalize("São Paulo",), "sao-paulo");
        assert_eq!(normalize("Florianópolis",), "florianopolis");
        assert_eq!(normalize("Maceió",), "maceio");
        assert_eq!(normalize("Vitória da Conquista",), "vitoria-da-conquista");
        assert_eq!(normalize("Açailândia",), "acailandia");
        assert_eq!(normalize("Goiânia",), "goiania");
        assert_eq!(normalize("Jaraguá do Sul",), "jaragua-do-sul");
        assert_eq!(normalize("Itaú",), "itau");
        assert_eq!(normalize("Pôrto Alegre",), "porto-alegre");
        assert_eq!(normalize("ÀÉÎÕÜÇ",), "aeiouc");
    }

    #[test]
    fn empty_input_yields_empty_slug()
    {
        assert_eq!(normalize("",), "");
        assert_eq!(normalize("   ",), "");
        assert_eq!(normalize("***",), "");
    }

    #[test]
    fn collapses_whitespace_and_trims()
    {
        assert_eq!(normalize("  A   B  ",), "a-b");
        assert_eq!(normalize("word\twith\nbreaks",), "word-with-breaks");
    }

    #[test]
    fn collapses_hyphen_runs_and_mixed_separators()
    {
        assert_eq!(normalize("Multi--Separator - Value",), "multi-separator-value");
        assert_eq!(normalize("---test---",), "test");
    }

    #[test]
    fn removes_punctuation_without_adding_separators()
    {
        assert_eq!(normalize("Bar & Grill",), "bar-grill");
        assert_eq!(normalize("D'Ávila",), "davila");
        assert_eq!(normalize("snake_case.name",), "snakecasename");
        assert_eq!(normalize("test!@#$%^&*()",), "test");
    }

    #[test]
    fn keeps_digits()
    {
        assert_eq!(normalize("Loja 24 Horas",), "loja-24-horas");
    }

    #[test]
    fn drops_non_latin_characters()
    {
        assert_eq!(normalize("hello-世界-test",), "hello-test");
    }

    #[test]
    fn existing_slug_is_unchanged()
    {
        assert_eq!(normalize("sao-paulo",), "sao-paulo");
    }

    #[test]
    fn slug_strategy_copy_trait()
    {
        let builder1 = SlugStrategy::builder("Niterói",);
        let builder2 = builder1;
        assert_eq!(builder1.build(), builder2.build());
    }
}
