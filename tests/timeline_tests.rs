use glam::dvec2;
use timeline_cards::layout::gaps;
use timeline_cards::{
    ColumnSpan, Element, Length, Milestone, SizingConfig, SlotIndex, SpaceBounds, build_path,
    compute_layout, locate,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn leaf() -> Element {
    Element::item(Milestone::captioned("title", "subtitle"))
}

fn group(children: usize) -> Element {
    Element::group(
        Milestone::captioned("group", ""),
        (0..children).map(|i| Milestone::captioned(format!("child {i}"), "")).collect(),
    )
}

/// A spread of trees covering leaves, groups, empty groups and overflowing
/// custom content in various orders.
fn corpus() -> Vec<Vec<Element>> {
    vec![
        vec![],
        vec![leaf()],
        vec![leaf(), leaf(), leaf()],
        vec![group(2)],
        vec![group(2), leaf()],
        vec![leaf(), group(1)],
        vec![group(0)],
        vec![group(0), leaf(), group(0)],
        vec![group(3), group(1)],
        vec![
            Element::item(Milestone::custom(Length(95.0))),
            Element::group(
                Milestone::custom(Length(120.0)),
                vec![Milestone::custom(Length(5.0)), Milestone::custom(Length(64.0))],
            ),
            Element::item(Milestone::bare()),
        ],
    ]
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn three_leaves() {
    init_tracing();
    let config = SizingConfig::default();
    let plan = compute_layout(&[leaf(), leaf(), leaf()], &config);
    // top margin + 3 * 40 + 2 * spacing + bottom margin
    assert_eq!(plan.total_height, Length(20.0 + 120.0 + 20.0 + 20.0));
}

#[test]
fn group_alone_has_no_exit_spacing() {
    init_tracing();
    let config = SizingConfig::default();
    let plan = compute_layout(&[group(2)], &config);
    // 20 + 50 group + 10 entry + 40 + 10 + 40 + 20
    assert_eq!(plan.total_height, Length(190.0));
}

#[test]
fn group_followed_by_leaf_gets_exit_spacing() {
    init_tracing();
    let config = SizingConfig::default();
    let plan = compute_layout(&[group(2), leaf()], &config);
    assert_eq!(plan.total_height, Length(270.0));
    assert_eq!(plan.icon_spaces[1].origin, Length(210.0));
}

#[test]
fn leaf_before_group_uses_around_group_spacing() {
    let config = SizingConfig::default();
    let plan = compute_layout(&[leaf(), group(1)], &config);
    assert_eq!(plan.icon_spaces[1].origin, Length(20.0 + 40.0 + 40.0));
}

#[test]
fn tall_content_lengthens_following_segment() {
    init_tracing();
    let config = SizingConfig::default();
    let elements = vec![Element::item(Milestone::custom(Length(90.0))), leaf()];
    let plan = compute_layout(&elements, &config);
    let path = build_path(&elements, &plan, &config);

    assert_eq!(plan.description_spaces[0].height, Length(90.0));
    assert_eq!(plan.icon_spaces[0].height, Length(40.0));
    // overflow 50 + spacing 10
    assert_eq!(path.segments[0].length(), 60.0);
}

#[test]
fn custom_spacing_is_honoured() {
    let config = SizingConfig::builder()
        .padding_between_items(4.0)
        .margins(0.0, 8.0, 0.0, 2.0)
        .build()
        .unwrap();
    let plan = compute_layout(&[leaf(), leaf()], &config);
    assert_eq!(plan.total_height, Length(8.0 + 40.0 + 4.0 + 40.0 + 2.0));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn total_height_covers_margins_and_slots() {
    let config = SizingConfig::default();
    for elements in corpus() {
        let plan = compute_layout(&elements, &config);
        let minimum: Length = gaps::walk(&elements, &config).iter().map(|v| v.slot_height).sum();
        let floor = config.margins.top + config.margins.bottom + minimum;
        assert!(plan.total_height >= floor, "{} < {}", plan.total_height, floor);
    }
}

#[test]
fn slot_sequences_mirror_the_tree() {
    let config = SizingConfig::default();
    for elements in corpus() {
        let plan = compute_layout(&elements, &config);
        assert_eq!(plan.icon_spaces.len(), elements.len());
        assert_eq!(plan.description_spaces.len(), elements.len());

        for (i, element) in elements.iter().enumerate() {
            let icon: &SpaceBounds = &plan.icon_spaces[i];
            let description = &plan.description_spaces[i];
            assert_eq!(icon.children.is_some(), element.is_group());
            assert_eq!(icon.children().len(), element.children().len());
            assert_eq!(description.children().len(), element.children().len());
        }
    }
}

#[test]
fn layout_is_idempotent() {
    let config = SizingConfig::default();
    for elements in corpus() {
        assert_eq!(compute_layout(&elements, &config), compute_layout(&elements, &config));
    }
}

#[test]
fn segments_span_the_gap_between_icon_slots() {
    let config = SizingConfig::default();
    for elements in corpus() {
        let plan = compute_layout(&elements, &config);
        let path = build_path(&elements, &plan, &config);
        let slots: Vec<SlotIndex> = plan.slots().collect();

        assert_eq!(path.segments.len(), slots.len().saturating_sub(1));
        for (segment, pair) in path.segments.iter().zip(slots.windows(2)) {
            let prev = plan.icon_bounds(pair[0]).unwrap();
            let next = plan.icon_bounds(pair[1]).unwrap();
            let expected = next.origin - prev.end();
            assert!(
                (segment.length() - expected.raw()).abs() < 1e-9,
                "segment {:?} -> {:?}: {} != {}",
                pair[0],
                pair[1],
                segment.length(),
                expected
            );
        }
    }
}

#[test]
fn segment_lengths_follow_overflow_and_spacing_rules() {
    let config = SizingConfig::default();
    let elements = vec![
        Element::item(Milestone::custom(Length(95.0))),
        Element::group(
            Milestone::custom(Length(120.0)),
            vec![Milestone::custom(Length(5.0)), Milestone::custom(Length(64.0))],
        ),
        Element::item(Milestone::bare()),
    ];
    let plan = compute_layout(&elements, &config);
    let path = build_path(&elements, &plan, &config);
    let lengths: Vec<f64> = path.segments.iter().map(|s| s.length()).collect();

    assert_eq!(
        lengths,
        vec![
            // leaf into a group: overflow 55 + around-group 40
            95.0,
            // group into its first child: overflow 70 + entry 10
            80.0,
            // sibling to sibling: no overflow + between sub-items 10
            10.0,
            // last child out of the group: overflow 34 + around-group 40
            74.0,
        ]
    );
}

#[test]
fn group_followed_by_group_gets_around_group_spacing() {
    let config = SizingConfig::default();
    let plan = compute_layout(&[group(1), group(1)], &config);
    let child = &plan.icon_spaces[0].children()[0];
    let child_extent = plan.description_spaces[0].children()[0].end();

    // 20 + 50 group + 10 entry, child 80..120, then 40 around the group
    assert_eq!(child.origin, Length(80.0));
    assert_eq!(plan.icon_spaces[1].origin - child_extent, config.padding_around_group);
    assert_eq!(plan.icon_spaces[1].origin, Length(160.0));
    // no trailing spacing after the last group
    assert_eq!(plan.total_height, Length(160.0 + 50.0 + 10.0 + 40.0 + 20.0));
}

#[test]
fn markers_land_on_icon_slots() {
    let config = SizingConfig::default();
    for elements in corpus() {
        let plan = compute_layout(&elements, &config);
        let path = build_path(&elements, &plan, &config);
        for slot in plan.slots() {
            let stamp = path.stamp(slot).unwrap();
            let bounds = plan.icon_bounds(slot).unwrap();
            assert!((stamp.center.y - bounds.center().raw()).abs() < 1e-9);
        }
    }
}

#[test]
fn centers_resolve_to_their_slot() {
    let config = SizingConfig::default();
    let icons = ColumnSpan::new(
        config.margins.left.raw(),
        (config.icon_column_width() + config.column_gap).raw(),
    );
    let descriptions =
        ColumnSpan::new(config.description_column_x(), config.description_width(320.0));

    for elements in corpus() {
        let plan = compute_layout(&elements, &config);
        for slot in plan.slots() {
            let icon = icons.rect(plan.icon_bounds(slot).unwrap());
            assert_eq!(locate(icon.center(), &plan, icons, descriptions), Some(slot));
        }
        assert_eq!(locate(dvec2(-500.0, -500.0), &plan, icons, descriptions), None);
        assert_eq!(locate(dvec2(10_000.0, 10_000.0), &plan, icons, descriptions), None);
    }
}

#[test]
fn description_centers_resolve_when_icons_miss() {
    let config = SizingConfig::default();
    let icons = ColumnSpan::new(config.margins.left.raw(), config.icon_column_width().raw());
    let descriptions =
        ColumnSpan::new(config.description_column_x(), config.description_width(320.0));
    let elements = vec![group(2), leaf()];
    let plan = compute_layout(&elements, &config);

    for slot in plan.slots() {
        let rect = descriptions.rect(plan.description_bounds(slot).unwrap());
        assert_eq!(locate(rect.center(), &plan, icons, descriptions), Some(slot));
    }
    assert_eq!(
        locate(dvec2(150.0, plan.icon_spaces[1].center().raw()), &plan, icons, descriptions),
        Some(SlotIndex::top(1))
    );
}
