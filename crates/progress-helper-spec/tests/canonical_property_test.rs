use progress_helper_spec::{canonical, parse};
use proptest::collection::vec;
use proptest::prelude::*;

fn token_strategy() -> BoxedStrategy<String> {
    let item = prop_oneof![
        (1u32..50).prop_map(|n| n.to_string()),
        (1u32..20, 0u32..5).prop_map(|(a, span)| format!("{}-{}", a, a + span)),
    ];

    prop_oneof![
        (1u32..100).prop_map(|n| n.to_string()),
        (1u32..20, 0u32..5).prop_map(|(a, span)| format!("{}-{}", a, a + span)),
        vec(1u32..100, 2..5).prop_map(|ns| {
            ns.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",")
        }),
        (1u32..100, vec(item, 1..4)).prop_map(|(n, items)| format!("{}:{}", n, items.join(","))),
        Just("junk".to_string()),
    ]
    .boxed()
}

fn spec_strategy() -> BoxedStrategy<String> {
    vec(token_strategy(), 0..6)
        .prop_map(|tokens| tokens.join(";"))
        .boxed()
}

proptest! {
    #[test]
    fn canonical_form_parses_to_same_directives(spec in spec_strategy()) {
        let directives = parse(&spec);
        let rendered = canonical(&directives);
        prop_assert_eq!(parse(&rendered), directives);
    }

    #[test]
    fn parse_never_panics(input in ".{0,64}") {
        let _ = parse(&input);
    }

    #[test]
    fn section_range_equals_section_list(start in 1u32..200, span in 1u32..10) {
        let end = start + span;
        let list = (start..=end).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        prop_assert_eq!(parse(&format!("{}-{}", start, end)), parse(&list));
    }
}
