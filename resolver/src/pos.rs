//! Part-of-speech tagging capability.
//!
//! The canonical phrase classifier only consumes word-class tags; where the
//! tags come from is a pluggable capability. Any implementation of
//! [`PosTagger`] — statistical, learned, or the rule-based default below —
//! can be substituted without touching the classification rules.

/// Standard word-class tags consumed by the phrase classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    /// Singular noun.
    NounSingular,
    /// Plural noun.
    NounPlural,
    /// Verb, base form.
    VerbBase,
    /// Verb, present tense.
    VerbPresent,
    /// Verb, past participle.
    VerbPastParticiple,
    /// Verb, gerund.
    VerbGerund,
    /// Adjective.
    Adjective,
    /// Preposition.
    Preposition,
}

impl PosTag {
    /// Returns true for a noun form.
    #[must_use]
    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::NounSingular | PosTag::NounPlural)
    }

    /// Returns true for any verb form.
    #[must_use]
    pub fn is_verb(self) -> bool {
        matches!(
            self,
            PosTag::VerbBase | PosTag::VerbPresent | PosTag::VerbPastParticiple | PosTag::VerbGerund
        )
    }

    /// Returns true for a present-tense verb form.
    #[must_use]
    pub fn is_present_verb(self) -> bool {
        self == PosTag::VerbPresent
    }

    /// Returns true for a past participle or adjective.
    #[must_use]
    pub fn is_participle_or_adjective(self) -> bool {
        matches!(self, PosTag::VerbPastParticiple | PosTag::Adjective)
    }
}

/// Sequence-of-tokens to sequence-of-tags capability.
pub trait PosTagger {
    /// Tags each word; the returned sequence has the same length as the
    /// input.
    fn tag(&self, words: &[&str]) -> Vec<PosTag>;
}

/// Deterministic lexicon + suffix tagger, the default implementation.
///
/// Function words without a lexicon entry fall back to the singular-noun
/// tag; the classifier's string-based checks (the " of" suffix rules)
/// carry the weight for particles.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

/// Base forms of verbs commonly found in property identifiers. Present
/// tense is recognized by stripping the `-s`/`-es` inflection back to one
/// of these.
const VERB_BASES: &[&str] = &[
    "accept", "act", "appear", "broadcast", "carry", "contain", "cover", "create", "deliver",
    "direct", "employ", "feature", "follow", "fund", "have", "host", "include", "know", "offer",
    "operate", "own", "perform", "play", "produce", "provide", "publish", "read", "record",
    "require", "sell", "serve", "speak", "sponsor", "star", "track", "work", "write",
];

/// Irregular past participles; the regular `-ed` form is recognized by
/// suffix.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "born", "begun", "broken", "built", "chosen", "drawn", "driven", "found", "frozen", "given",
    "held", "hidden", "known", "made", "paid", "read", "seen", "shown", "sold", "spoken", "sung",
    "taken", "won", "worn", "written",
];

/// Adjectives commonly found in flag-style property identifiers.
const ADJECTIVES: &[&str] = &[
    "accessible", "active", "alcoholic", "available", "free", "live", "official", "open",
    "optional", "public", "smoking", "valid", "vegetarian",
];

/// Irregular plural nouns.
const IRREGULAR_PLURALS: &[&str] = &["children", "media", "men", "people", "women"];

impl LexiconTagger {
    fn tag_word(word: &str) -> PosTag {
        if word == "of" {
            return PosTag::Preposition;
        }
        if ADJECTIVES.contains(&word) {
            return PosTag::Adjective;
        }
        if IRREGULAR_PARTICIPLES.contains(&word) {
            return PosTag::VerbPastParticiple;
        }
        if IRREGULAR_PLURALS.contains(&word) {
            return PosTag::NounPlural;
        }
        if word == "has" || word == "is" || word == "does" {
            return PosTag::VerbPresent;
        }
        if VERB_BASES.contains(&word) {
            return PosTag::VerbBase;
        }
        if word.len() > 4 && word.ends_with("ing") {
            return PosTag::VerbGerund;
        }
        if word.len() > 3 && word.ends_with("ed") {
            return PosTag::VerbPastParticiple;
        }
        if word.len() > 2 && word.ends_with('s') && !word.ends_with("ss") {
            if let Some(stem) = strip_inflection(word) {
                if VERB_BASES.contains(&stem.as_str()) {
                    return PosTag::VerbPresent;
                }
            }
            return PosTag::NounPlural;
        }
        PosTag::NounSingular
    }
}

/// Strips the `-s`/`-es`/`-ies` inflection back to a candidate stem.
fn strip_inflection(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        return Some(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with('x') || stem.ends_with('z') || stem.ends_with("ch") || stem.ends_with("sh")
        {
            return Some(stem.to_owned());
        }
    }
    word.strip_suffix('s').map(str::to_owned)
}

impl PosTagger for LexiconTagger {
    fn tag(&self, words: &[&str]) -> Vec<PosTag> {
        words.iter().map(|w| Self::tag_word(w)).collect()
    }
}
