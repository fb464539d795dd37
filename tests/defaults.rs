use pretty_values::{
    get_defaults, pformat, set_defaults, ConfigError, DefaultsUpdate, RenderOptions,
};

// The defaults are process-wide, so everything that changes them is in one test.
#[test]
fn set_defaults_merges_and_validates() {
    let initial = get_defaults();
    assert_eq!(initial.max_width, 79);
    assert_eq!(initial.ribbon_width, 71);
    assert_eq!(initial.indent, 4);
    assert_eq!(initial.max_seq_len, Some(1000));
    assert!(!initial.sort_keys);

    let items = (1..=12).collect::<Vec<i32>>();
    assert_eq!(
        pformat(&items).unwrap(),
        "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]"
    );

    // Narrowing the width alone would leave the ribbon wider than it.
    assert_eq!(
        set_defaults(DefaultsUpdate {
            max_width: Some(20),
            ..DefaultsUpdate::default()
        }),
        Err(ConfigError::RibbonTooWide {
            ribbon_width: 71,
            max_width: 20
        })
    );
    assert_eq!(get_defaults().max_width, 79);

    set_defaults(DefaultsUpdate {
        max_width: Some(20),
        ribbon_width: Some(20),
        indent: Some(2),
        max_seq_len: Some(Some(3)),
        ..DefaultsUpdate::default()
    })
    .unwrap();
    let updated = get_defaults();
    assert_eq!(updated.max_width, 20);
    assert_eq!(updated.ribbon_width, 20);
    assert_eq!(updated.indent, 2);
    assert!(!updated.sort_keys);
    assert_eq!(
        pformat(&items).unwrap(),
        "[\n  1,\n  2,\n  3,\n  # ...and 9 more\n  # elements\n]"
    );

    let rejected = set_defaults(DefaultsUpdate {
        ribbon_width: Some(30),
        ..DefaultsUpdate::default()
    });
    assert_eq!(
        rejected,
        Err(ConfigError::RibbonTooWide {
            ribbon_width: 30,
            max_width: 20
        })
    );
    assert_eq!(get_defaults().ribbon_width, 20);

    assert_eq!(
        set_defaults(DefaultsUpdate {
            max_width: Some(0),
            ..DefaultsUpdate::default()
        }),
        Err(ConfigError::ZeroWidth)
    );

    // Widening leaves the ribbon and everything else that was not supplied alone.
    set_defaults(DefaultsUpdate {
        max_width: Some(100),
        ..DefaultsUpdate::default()
    })
    .unwrap();
    let widened = get_defaults();
    assert_eq!(
        (widened.max_width, widened.ribbon_width, widened.indent, widened.max_seq_len),
        (100, 20, 2, Some(3))
    );

    set_defaults(DefaultsUpdate {
        max_width: Some(79),
        ribbon_width: Some(71),
        indent: Some(4),
        max_seq_len: Some(Some(1000)),
        ..DefaultsUpdate::default()
    })
    .unwrap();
    let restored = get_defaults();
    let fresh = RenderOptions::default();
    assert_eq!(
        (restored.max_width, restored.ribbon_width, restored.indent, restored.max_seq_len),
        (fresh.max_width, fresh.ribbon_width, fresh.indent, fresh.max_seq_len)
    );
}
