#![forbid(unsafe_code)]

//! Property tests over classification, the scale search, and decoration.

use proptest::prelude::*;

use tcard_dom::ContentTree;
use tcard_fit::{
    LayoutCategory, LayoutProbe, PaddingDensity, PassReport, ScaleBounds, ScaleVerdict, classify,
    run_pass, run_scale_search,
};
use tcard_harness::{ScriptedProbe, SlideBuilder};

#[derive(Debug, Clone)]
enum Block {
    Heading(String),
    Paragraph(String),
    Quote(Vec<String>),
    Code(String),
    ListItem(String),
    Figure,
    BareImage,
    ImageParagraph,
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10}){0,12}"
}

fn code_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,40}(\n[ -~]{0,40}){0,4}"
}

fn block_strategy() -> impl Strategy<Value = Block> {
    prop_oneof![
        text_strategy().prop_map(Block::Heading),
        text_strategy().prop_map(Block::Paragraph),
        proptest::collection::vec(text_strategy(), 1..3).prop_map(Block::Quote),
        code_strategy().prop_map(Block::Code),
        text_strategy().prop_map(Block::ListItem),
        Just(Block::Figure),
        Just(Block::BareImage),
        Just(Block::ImageParagraph),
    ]
}

fn slide_strategy() -> impl Strategy<Value = ContentTree> {
    proptest::collection::vec(block_strategy(), 0..6).prop_map(|blocks| {
        let mut builder = SlideBuilder::new();
        for block in blocks {
            builder = match block {
                Block::Heading(text) => builder.heading(&text),
                Block::Paragraph(text) => builder.paragraph(&text),
                Block::Quote(paragraphs) => {
                    let refs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
                    builder.quote(&refs)
                }
                Block::Code(source) => builder.code(&source),
                Block::ListItem(text) => builder.list_item(&text),
                Block::Figure => builder.figure(),
                Block::BareImage => builder.bare_image(),
                Block::ImageParagraph => builder.image_in_paragraph(),
            };
        }
        builder.build()
    })
}

fn category_strategy() -> impl Strategy<Value = LayoutCategory> {
    proptest::sample::select(vec![
        LayoutCategory::Quote,
        LayoutCategory::Image,
        LayoutCategory::Title,
        LayoutCategory::Hero,
        LayoutCategory::Default,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn final_scale_stays_in_bounds(
        overflow_at in proptest::option::of(1u32..=500),
        word_break_at in proptest::option::of(1u32..=500),
        category in category_strategy(),
        has_code in any::<bool>(),
    ) {
        let mut probe = ScriptedProbe::new();
        if let Some(t) = overflow_at {
            probe = probe.overflow_at(t);
        }
        if let Some(t) = word_break_at {
            probe = probe.word_break_at(t);
        }
        let bounds = ScaleBounds::for_slide(category, has_code);
        let tree = SlideBuilder::new().heading("h").build();

        let outcome = run_scale_search(&tree, &mut probe, bounds);

        prop_assert!(outcome.state.in_bounds());
        prop_assert_eq!(probe.scale(), outcome.state.current);

        let sweep = (bounds.max - bounds.min).div_ceil(bounds.step);
        prop_assert!(outcome.iterations <= sweep + 2);
        prop_assert_eq!(outcome.iterations as usize, probe.applied().len());

        // Wherever the search settles above the floor, it settles on a
        // scale that does not overflow.
        if outcome.verdict != ScaleVerdict::FloorOverflow {
            prop_assert!(!probe.is_overflowing(&tree));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn exactly_one_category_class_is_committed(tree in slide_strategy()) {
        let mut tree = tree;
        let classification = classify(&tree).unwrap();
        classification.annotate(&mut tree);

        let root = tree.root().unwrap();
        let committed = ["quote", "image", "title", "hero", "default"]
            .into_iter()
            .filter(|&class| tree.has_class(root, class))
            .count();
        prop_assert_eq!(committed, 1);
        prop_assert!(tree.has_class(root, classification.category.class_name()));
    }

    #[test]
    fn committed_scale_matches_final_probe_application(
        tree in slide_strategy(),
        overflow_at in proptest::option::of(1u32..=400),
    ) {
        let mut tree = tree;
        let mut probe = ScriptedProbe::new();
        if let Some(t) = overflow_at {
            probe = probe.overflow_at(t);
        }

        if let Some(report) = run_pass(&mut tree, &mut probe) {
            prop_assert_eq!(tree.scale_percent(), Some(report.scale.state.current));
            prop_assert_eq!(probe.scale(), report.scale.state.current);
        }
    }

    #[test]
    fn compact_extra_always_implies_compact(
        lines in proptest::collection::vec("[ -~]{0,60}", 1..5),
        char_px in 0.5f64..20.0,
        container_px in 50.0f64..1500.0,
    ) {
        let source = lines.join("\n");
        let mut tree = SlideBuilder::new().code(&source).build();
        let mut probe = ScriptedProbe::new()
            .line_px_per_char(char_px)
            .container_px(container_px);

        let report = run_pass(&mut tree, &mut probe).unwrap();
        for decoration in &report.decorations {
            let container = tree.node(decoration.block).parent().unwrap();
            let compact = tree.has_class(container, "compact");
            let extra = tree.has_class(container, "compact-extra");
            prop_assert!(!extra || compact);
            match decoration.padding {
                PaddingDensity::Normal => prop_assert!(!compact && !extra),
                PaddingDensity::Compact => prop_assert!(compact && !extra),
                PaddingDensity::CompactExtra => prop_assert!(compact && extra),
            }
        }
    }

    #[test]
    fn pass_report_round_trips_through_json(tree in slide_strategy()) {
        let mut tree = tree;
        let mut probe = ScriptedProbe::new();
        if let Some(report) = run_pass(&mut tree, &mut probe) {
            let json = serde_json::to_string(&report).unwrap();
            let back: PassReport = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, report);
        }
    }
}
