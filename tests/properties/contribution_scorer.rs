//! Property tests for the research and administrative contribution scorer.

use proptest::prelude::*;

use appraisal::domain::services::{score_counts, ContributionCounts};

fn counts() -> impl Strategy<Value = ContributionCounts> {
    (0u32..6, 0u32..6, 0u32..6, 0u32..6, 0u32..6, 0u32..6, 0u32..6, 0u32..6).prop_map(
        |(journal, conference, book, other_research, committee, coordination, mentoring, other_admin)| {
            ContributionCounts {
                journal,
                conference,
                book,
                other_research,
                committee,
                coordination,
                mentoring,
                other_admin,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Both suggestions stay within 4..=10.
    #[test]
    fn property_scores_are_bounded(c in counts()) {
        let scores = score_counts(&c);
        prop_assert!((4.0..=10.0).contains(&scores.research));
        prop_assert!((4.0..=10.0).contains(&scores.admin));
    }

    /// PROPERTY: One more journal article never lowers the research score.
    #[test]
    fn property_more_research_never_scores_lower(c in counts()) {
        let more = ContributionCounts { journal: c.journal + 1, ..c };
        prop_assert!(score_counts(&more).research >= score_counts(&c).research);
        prop_assert_eq!(score_counts(&more).admin, score_counts(&c).admin);
    }

    /// PROPERTY: The same counts always produce the same reasoning text.
    #[test]
    fn property_reasoning_is_deterministic(c in counts()) {
        let first = score_counts(&c);
        let second = score_counts(&c);
        prop_assert_eq!(&first.reasoning, &second.reasoning);
        prop_assert!(first.reasoning.ends_with('.'));
    }
}
