//! Canonical phrase synthesis.
//!
//! Converts a property identifier (plus optional externally collected
//! label candidates) into a categorized set of phrase templates, keyed by
//! grammatical role. The classification is deterministic given the tag
//! set; see [`crate::pos`] for the tagging capability.
//!
//! A template is literal text with an optional single `#` placeholder
//! standing for the property's value.

use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::model::{CanonicalRecord, PhraseRole, SemanticType};

use crate::pos::PosTagger;

/// Synthesizes canonical phrase records for properties.
pub struct CanonicalSynthesizer<'a> {
    config: &'a ResolverConfig,
    tagger: &'a dyn PosTagger,
}

impl<'a> CanonicalSynthesizer<'a> {
    /// Creates a synthesizer over the given configuration and tagger.
    #[must_use]
    pub fn new(config: &'a ResolverConfig, tagger: &'a dyn PosTagger) -> Self {
        Self { config, tagger }
    }

    /// Synthesizes the canonical record for one property.
    ///
    /// Manual overrides short-circuit; otherwise each candidate phrase is
    /// cleaned, pluralized for array types, and run through the
    /// classification rules in priority order.
    #[must_use]
    pub fn synthesize(
        &self,
        property_name: &str,
        semantic_type: &SemanticType,
        external_candidates: Option<&[String]>,
    ) -> CanonicalRecord {
        if self.config.manual_mode {
            if let Some(record) = self.config.manual_canonical_overrides.get(property_name) {
                return record.clone();
            }
        }
        if let Some(record) = self.config.canonical_overrides.get(property_name) {
            return record.clone();
        }

        let candidates: Vec<String> = match external_candidates {
            Some(labels) => {
                let mut seen = Vec::new();
                for label in labels {
                    let lowered = label.to_lowercase();
                    if !seen.contains(&lowered) {
                        seen.push(lowered);
                    }
                }
                seen
            }
            None => vec![phrase_from_identifier(property_name)],
        };

        let mut record = CanonicalRecord::new();
        for candidate in candidates {
            if !is_clean_phrase(&candidate) {
                continue;
            }
            let candidate = if semantic_type.is_array() {
                pluralize_last_word(&candidate)
            } else {
                candidate
            };
            self.classify(&candidate, semantic_type, &mut record);
        }

        if record.is_empty() && self.config.always_base_canonical {
            record.push(PhraseRole::Base, property_name);
        }
        record
    }

    /// Applies the classification rules to one candidate phrase,
    /// accumulating templates into `record`.
    fn classify(&self, phrase: &str, semantic_type: &SemanticType, record: &mut CanonicalRecord) {
        // Rule 1: measured "<name> content" properties.
        if let Some(name) = phrase.strip_suffix(" content") {
            if semantic_type.is_measure() {
                record.push(PhraseRole::Verb, "contains #");
                record.push(PhraseRole::Base, format!("{name} content"));
                record.push(PhraseRole::Base, name);
                record.push(PhraseRole::Base, format!("{name} amount"));
                return;
            }
        }

        // Rule 2: "has X" names the thing had.
        if let Some(rest) = phrase.strip_prefix("has ") {
            record.push(PhraseRole::Base, rest);
            return;
        }

        // Rule 3: "is X" is either a relation noun or a predicate.
        if let Some(rest) = phrase.strip_prefix("is ") {
            let words: Vec<&str> = rest.split(' ').collect();
            let tags = self.tagger.tag(&words);
            let (Some(first), Some(last)) = (tags.first(), tags.last()) else {
                return;
            };
            if last.is_noun() || rest.ends_with(" of") {
                record.push(PhraseRole::ReverseProperty, rest);
            } else if first.is_participle_or_adjective() {
                record.push(PhraseRole::PassiveVerb, rest);
            }
            return;
        }

        // Rule 4: classify by the tag shape of the whole phrase.
        let words: Vec<&str> = phrase.split(' ').collect();
        let tags = self.tagger.tag(&words);
        let (Some(first), Some(last)) = (tags.first(), tags.last()) else {
            return;
        };
        if first.is_present_verb() && words.len() == 2 && tags[1].is_noun() {
            record.push(PhraseRole::Verb, format!("{} # {}", words[0], words[1]));
            record.push(PhraseRole::Base, words[1]);
        } else if first.is_verb() {
            record.push(PhraseRole::Verb, phrase);
        } else if phrase.ends_with(" of") {
            record.push(PhraseRole::ReverseProperty, phrase);
        } else if first.is_participle_or_adjective() && !last.is_noun() {
            record.push(PhraseRole::PassiveVerb, phrase);
        } else {
            record.push(PhraseRole::Base, phrase);
        }
    }
}

/// Derives the single candidate phrase from a property identifier: words
/// split at camel-case and punctuation boundaries, lower-cased, joined
/// with spaces, with one trailing " value" suffix trimmed.
#[must_use]
pub fn phrase_from_identifier(identifier: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in identifier.chars() {
        if ch.is_uppercase() {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
            current.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() {
            current.push(ch);
        } else if !current.is_empty() {
            words.push(current.clone());
            current.clear();
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    let phrase = words.join(" ");
    match phrase.strip_suffix(" value") {
        Some(stripped) => stripped.to_owned(),
        None => phrase,
    }
}

/// A candidate phrase survives only if it is entirely lowercase letters
/// and spaces; numerals and punctuation disqualify it silently.
fn is_clean_phrase(phrase: &str) -> bool {
    !phrase.is_empty() && phrase.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
}

/// Particles left alone by pluralization; a trailing "works for" stays
/// "works for", while a trailing noun inflects normally.
const PARTICLES: &[&str] = &["at", "by", "for", "from", "in", "of", "on", "to", "with"];

/// Pluralizes the final word of a phrase.
fn pluralize_last_word(phrase: &str) -> String {
    let Some((head, last)) = phrase.rsplit_once(' ') else {
        return pluralize(phrase);
    };
    if PARTICLES.contains(&last) {
        return phrase.to_owned();
    }
    format!("{head} {}", pluralize(last))
}

/// Regular English pluralization.
fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pos::LexiconTagger;
    use lexigen_vocab::model::SemanticType;

    fn synthesize(
        config: &ResolverConfig,
        name: &str,
        semantic: &SemanticType,
        external: Option<&[String]>,
    ) -> CanonicalRecord {
        let tagger = LexiconTagger;
        CanonicalSynthesizer::new(config, &tagger).synthesize(name, semantic, external)
    }

    #[test]
    fn identifier_splitting() {
        assert_eq!(phrase_from_identifier("worksFor"), "works for");
        assert_eq!(phrase_from_identifier("ratingValue"), "rating");
        assert_eq!(phrase_from_identifier("aggregate_rating"), "aggregate rating");
        assert_eq!(phrase_from_identifier("name"), "name");
    }

    #[test]
    fn verb_initial_two_word_phrase_splits_into_verb_and_base() {
        let config = ResolverConfig::default();
        let semantic =
            SemanticType::Array(Box::new(SemanticType::Entity("Organization".to_owned())));
        let record = synthesize(&config, "worksFor", &semantic, None);
        assert_eq!(record.get(PhraseRole::Verb), ["works # for"]);
        assert_eq!(record.get(PhraseRole::Base), ["for"]);
    }

    #[test]
    fn is_prefix_with_adjective_becomes_passive_verb() {
        let config = ResolverConfig::default();
        let record = synthesize(&config, "isAvailable", &SemanticType::Boolean, None);
        assert_eq!(record.get(PhraseRole::PassiveVerb), ["available"]);
        assert!(record.get(PhraseRole::ReverseProperty).is_empty());
    }

    #[test]
    fn is_prefix_with_noun_becomes_reverse_property() {
        let config = ResolverConfig::default();
        let record = synthesize(
            &config,
            "isPartOf",
            &SemanticType::Entity("CreativeWork".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::ReverseProperty), ["part of"]);
    }

    #[test]
    fn has_prefix_becomes_base() {
        let config = ResolverConfig::default();
        let record = synthesize(
            &config,
            "hasMenu",
            &SemanticType::Entity("Menu".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::Base), ["menu"]);
    }

    #[test]
    fn measured_content_property_expands() {
        let config = ResolverConfig::default();
        let record = synthesize(
            &config,
            "alcoholContent",
            &SemanticType::Measure("ml".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::Verb), ["contains #"]);
        assert_eq!(
            record.get(PhraseRole::Base),
            ["alcohol content", "alcohol", "alcohol amount"]
        );
    }

    #[test]
    fn content_suffix_without_measure_type_is_plain_base() {
        let config = ResolverConfig::default();
        let record = synthesize(&config, "educationalContent", &SemanticType::String, None);
        assert_eq!(record.get(PhraseRole::Base), ["educational content"]);
        assert!(record.get(PhraseRole::Verb).is_empty());
    }

    #[test]
    fn array_type_pluralizes_noun_candidates() {
        let config = ResolverConfig::default();
        let semantic = SemanticType::Array(Box::new(SemanticType::String));
        let record = synthesize(&config, "award", &semantic, None);
        assert_eq!(record.get(PhraseRole::Base), ["awards"]);
    }

    #[test]
    fn ends_in_of_becomes_reverse_property() {
        let config = ResolverConfig::default();
        let record = synthesize(
            &config,
            "authorOf",
            &SemanticType::Entity("CreativeWork".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::ReverseProperty), ["author of"]);
    }

    #[test]
    fn unclean_identifier_falls_back_to_raw_base() {
        let config = ResolverConfig::default();
        let record = synthesize(&config, "gtin13", &SemanticType::String, None);
        assert_eq!(record.get(PhraseRole::Base), ["gtin13"]);
        assert!(record.get(PhraseRole::Verb).is_empty());
    }

    #[test]
    fn no_fallback_when_flag_disabled() {
        let config = ResolverConfig {
            always_base_canonical: false,
            ..ResolverConfig::default()
        };
        let record = synthesize(&config, "gtin13", &SemanticType::String, None);
        assert!(record.is_empty());
    }

    #[test]
    fn external_candidates_replace_identifier_and_deduplicate() {
        let config = ResolverConfig::default();
        let labels = vec![
            "employer".to_owned(),
            "Employer".to_owned(),
            "works for".to_owned(),
        ];
        let record = synthesize(
            &config,
            "worksFor",
            &SemanticType::Entity("Organization".to_owned()),
            Some(&labels),
        );
        assert_eq!(record.get(PhraseRole::Base), ["employer", "for"]);
        assert_eq!(record.get(PhraseRole::Verb), ["works # for"]);
    }

    #[test]
    fn canonical_override_short_circuits() {
        let mut config = ResolverConfig::default();
        config.canonical_overrides.insert(
            "worksFor".to_owned(),
            CanonicalRecord::from_pairs([(PhraseRole::Verb, vec!["is employed by #"])]),
        );
        let record = synthesize(
            &config,
            "worksFor",
            &SemanticType::Entity("Organization".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::Verb), ["is employed by #"]);
        assert!(record.get(PhraseRole::Base).is_empty());
    }

    #[test]
    fn manual_override_wins_only_in_manual_mode() {
        let mut config = ResolverConfig::default();
        config.canonical_overrides.insert(
            "datePublished".to_owned(),
            CanonicalRecord::from_pairs([(PhraseRole::Base, vec!["publication date"])]),
        );
        config.manual_canonical_overrides.insert(
            "datePublished".to_owned(),
            CanonicalRecord::from_pairs([(PhraseRole::PassiveVerb, vec!["published on #"])]),
        );

        let record = synthesize(&config, "datePublished", &SemanticType::Date, None);
        assert_eq!(record.get(PhraseRole::Base), ["publication date"]);

        let config = ResolverConfig {
            manual_mode: true,
            ..config
        };
        let record = synthesize(&config, "datePublished", &SemanticType::Date, None);
        assert_eq!(record.get(PhraseRole::PassiveVerb), ["published on #"]);
    }

    #[test]
    fn gerund_initial_phrase_is_a_verb_phrase() {
        let config = ResolverConfig::default();
        let record = synthesize(
            &config,
            "starring",
            &SemanticType::Entity("Person".to_owned()),
            None,
        );
        assert_eq!(record.get(PhraseRole::Verb), ["starring"]);
    }

    #[test]
    fn pluralization_rules() {
        assert_eq!(pluralize("award"), "awards");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize_last_word("works for"), "works for");
        assert_eq!(pluralize_last_word("serves cuisine"), "serves cuisines");
    }
}
