use crate::error::{Result, UniqlistError};
use rand::Rng;

/// A score range mapped to display phrases and a style token
#[derive(Debug, Clone, Copy)]
pub struct PhraseBucket {
    pub upper_bound: f64,
    pub phrases: &'static [&'static str],
    pub style: &'static str,
}

/// Selected commentary for a classified value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commentary {
    pub phrase: &'static str,
    pub style: &'static str,
}

/// Uniqueness commentary, keyed on the 0..=100 display scale
pub const SCORE_BUCKETS: &[PhraseBucket] = &[
    PhraseBucket {
        upper_bound: 20.0,
        phrases: &[
            "Oh, this is so mainstream!",
            "Your playlist is like déjà vu — I've heard this before!",
            "Well, it's kinda...",
        ],
        style: "#FF0000",
    },
    PhraseBucket {
        upper_bound: 40.0,
        phrases: &[
            "Well, it's could be worse",
            "It's like turning on the radio during rush hour",
        ],
        style: "#FF6347",
    },
    PhraseBucket {
        upper_bound: 60.0,
        phrases: &[
            "A mix of old and new",
            "You've got both classics and trends here",
        ],
        style: "#FFD700",
    },
    PhraseBucket {
        upper_bound: 80.0,
        phrases: &[
            "A playlist for true connoisseurs!",
            "With this playlist, you're definitely on trend",
            "Cool, but not 100%",
        ],
        style: "#32CD32",
    },
    PhraseBucket {
        upper_bound: 100.0,
        phrases: &[
            "Wow! A playlist like a rare butterfly!",
            "As unique as a fingerprint!",
            "Now you're definitely not a normal guy!",
        ],
        style: "#00FF7F",
    },
];

/// Commentary on playlist size, shown while an analysis is in flight.
/// The last bound matches the provider's 10k tracks-per-playlist limit.
pub const TRACK_COUNT_BUCKETS: &[PhraseBucket] = &[
    PhraseBucket {
        upper_bound: 5.0,
        phrases: &[
            "Your playlist has a cozy number of tracks! (◠‿◠✿)",
            "Look at that, just a few tracks! Time to get the party started! ヾ(＾-＾)ノ",
            "Ooh la la, that's a nice little playlist you've got there! (≧◡≦)",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 10.0,
        phrases: &[
            "Wow, your playlist is really getting groovy! ヽ(✿ﾟ▽ﾟ)ノ",
            "Nifty, your collection is growing nicely! (◕‿◕)✧",
            "Cool beans, time to crank up the volume! ᕕ( ᐛ )ᕗ",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 20.0,
        phrases: &[
            "Niiice, you're building up quite the collection! (☞ﾟ∀ﾟ)☞",
            "Impressive, your music game is on point! ヾ(◍°∇°◍)ﾉ",
            "Rockin', you're quite the audiophile, aren't you? ୧(＾ 〰 ＾)୨",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 40.0,
        phrases: &[
            "Incredible, you must be a music maven! (◠‿◠✨)",
            "Whoa, your playlist is out of this world! (⊙_⊙)",
            "Holy moly, you're a true music connoisseur! (≧▽≦)",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 80.0,
        phrases: &[
            "Woah, you're a music marathon runner! ᕙ(⇀‸↼‶)ᕗ",
            "Incredible, you must listen to music all day long! (◍•ᴗ•◍)❤",
            "Your playlist is massive, you're the soundtrack of our lives! ٩(◕‿◕)۶",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 100.0,
        phrases: &[
            "Whoa, you must have the ultimate playlist! ୧(＾ 〰 ＾)୨",
            "Holy cow, you're a true audiophile and then some! (⊙_☉)",
            "Unbelievable, your music collection is out of this world! ᕦ(ò_óˇ)ᕤ",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 200.0,
        phrases: &[
            "Jaw-dropping, you must have the mother of all playlists! ୧(＾ 〰 ＾)୨",
            "Inconceivable, you're a musical legend in the making! (⊙_⊙)",
            "Unfathomable, your music knowledge is off the charts! ᕦ(ò_óˇ)ᕤ",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 500.0,
        phrases: &[
            "Mind-blowing, you must be the Spotify CEO in disguise! (─‿‿─)",
            "Unreal, you're a musical savant, plain and simple! (⊙_☉)",
            "Inconceivable, your playlist could rival the Billboard Top 100! (☆▽☆)",
        ],
        style: "#FFFFFF",
    },
    PhraseBucket {
        upper_bound: 10000.0,
        phrases: &[
            "Transcendent, your music collection is beyond comprehension! (￣▽￣*)ゞ",
            "Legendary, your playlist is the stuff of musical lore! (＾▽＾)",
            "Godlike, your musical domain knows no bounds! ᕙ(⇀‸↼‶)ᕗ",
        ],
        style: "#FFFFFF",
    },
];

/// Maps a numeric value into a phrase bucket.
///
/// The bucket table is injected at construction and must cover the full
/// valid input range in ascending order; empty buckets are a configuration
/// defect caught by the table tests below.
#[derive(Debug, Clone)]
pub struct PhraseClassifier<'a> {
    buckets: &'a [PhraseBucket],
}

impl Default for PhraseClassifier<'static> {
    fn default() -> Self {
        Self::new(SCORE_BUCKETS)
    }
}

impl<'a> PhraseClassifier<'a> {
    pub fn new(buckets: &'a [PhraseBucket]) -> Self {
        Self { buckets }
    }

    /// Classify a value into its bucket and pick one phrase at random.
    ///
    /// Ascending scan, first bucket whose bound covers the value wins; a
    /// value exactly on a bound selects that bucket, not the next. The
    /// bucket lookup is deterministic; only the phrase choice consumes
    /// randomness.
    pub fn classify<R: Rng>(&self, value: f64, rng: &mut R) -> Result<Commentary> {
        let bucket = self
            .buckets
            .iter()
            .find(|b| value <= b.upper_bound)
            .ok_or(UniqlistError::NoMatchingBucket(value))?;

        debug_assert!(!bucket.phrases.is_empty());
        let phrase = bucket.phrases[rng.gen_range(0..bucket.phrases.len())];
        Ok(Commentary {
            phrase,
            style: bucket.style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn well_formed(buckets: &[PhraseBucket]) {
        assert!(!buckets.is_empty());
        for bucket in buckets {
            assert!(!bucket.phrases.is_empty());
            assert!(!bucket.style.is_empty());
        }
        for pair in buckets.windows(2) {
            assert!(pair[0].upper_bound < pair[1].upper_bound);
        }
    }

    #[test]
    fn score_table_is_well_formed() {
        well_formed(SCORE_BUCKETS);
        // Full display-scale coverage
        assert_eq!(SCORE_BUCKETS.last().unwrap().upper_bound, 100.0);
    }

    #[test]
    fn track_count_table_is_well_formed() {
        well_formed(TRACK_COUNT_BUCKETS);
        assert_eq!(TRACK_COUNT_BUCKETS.last().unwrap().upper_bound, 10000.0);
    }

    #[test]
    fn boundary_value_selects_lower_bucket() {
        let classifier = PhraseClassifier::default();
        let mut rng = StdRng::seed_from_u64(7);
        let commentary = classifier.classify(80.0, &mut rng).unwrap();
        assert_eq!(commentary.style, "#32CD32");

        let commentary = classifier.classify(80.01, &mut rng).unwrap();
        assert_eq!(commentary.style, "#00FF7F");
    }

    #[test]
    fn style_is_stable_across_random_sources() {
        let classifier = PhraseClassifier::default();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let commentary = classifier.classify(73.4, &mut rng).unwrap();
            assert_eq!(commentary.style, "#32CD32");
            assert!(
                SCORE_BUCKETS[3].phrases.contains(&commentary.phrase),
                "phrase must come from the matched bucket"
            );
        }
    }

    #[test]
    fn phrase_choice_is_deterministic_under_a_seed() {
        let classifier = PhraseClassifier::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            classifier.classify(12.0, &mut a).unwrap(),
            classifier.classify(12.0, &mut b).unwrap()
        );
    }

    #[test]
    fn value_above_every_bound_is_an_error() {
        let classifier = PhraseClassifier::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = classifier.classify(100.5, &mut rng).unwrap_err();
        assert!(matches!(err, UniqlistError::NoMatchingBucket(_)));
    }

    #[test]
    fn zero_selects_first_bucket() {
        let classifier = PhraseClassifier::default();
        let mut rng = StdRng::seed_from_u64(3);
        let commentary = classifier.classify(0.0, &mut rng).unwrap();
        assert_eq!(commentary.style, "#FF0000");
    }
}
