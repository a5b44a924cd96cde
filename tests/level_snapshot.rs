//! Exact snapshot of the built-in meadow at the default seed
//!
//! Bottom tiles are encoded one character per cell:
//! `.` flat, `,` tufts, `"` flowers, `:` stones, and the dirt 9-slice on the
//! numeric keypad (`7 8 9` / `4 5 6` / `1 2 3`).

use pxtile::level::{Level, LevelLayout, TopTile, DEFAULT_SEED};

const BOTTOM: [&str; 17] = [
    r#",.:,":...".."".,,,"""#,
    r#",:.:..",,,....789",."#,
    r#"".78889.".....456,"."#,
    r#",,45556..:."",123".,"#,
    r#",,45556."......",:"."#,
    r#"",12223,...,,.".","""#,
    r#"..",,.."",.,:"".,.,,"#,
    r#"..:....:"...",."..,:"#,
    r#".""",.".,..,788889.."#,
    r#"...................."#,
    r#",.".",,,,,..455556,."#,
    r#".,:.,,."":",455556.,"#,
    r#"..,,",."".""122223,,"#,
    r#"",.."":.......,:,.,."#,
    r#"":"".",.:,:,.,,"..","#,
    r#",...":."."..,,,".,,."#,
    r#""."....:,.",,"..".","#,
];

fn decode(code: char) -> &'static str {
    match code {
        '.' => "grass_flat",
        ',' => "grass_tufts",
        '"' => "grass_flowers",
        ':' => "grass_stones",
        '7' => "dirt_top_left",
        '8' => "dirt_top",
        '9' => "dirt_top_right",
        '4' => "dirt_left",
        '5' => "dirt_middle",
        '6' => "dirt_right",
        '1' => "dirt_bottom_left",
        '2' => "dirt_bottom",
        '3' => "dirt_bottom_right",
        other => panic!("unknown snapshot code {:?}", other),
    }
}

fn expected_bottom() -> Vec<Vec<String>> {
    BOTTOM.iter().map(|row| row.chars().map(|c| decode(c).to_string()).collect()).collect()
}

fn expected_top() -> Vec<TopTile> {
    [
        ("mushrooms", 1, 1),
        ("bush", 18, 2),
        ("mushrooms", 6, 3),
        ("tree_top", 9, 3),
        ("tree_bottom", 9, 4),
        ("tree_top", 1, 5),
        ("tree_bottom", 1, 6),
        ("tree_top", 17, 8),
        ("tree_bottom", 17, 9),
        ("tree_top", 5, 12),
        ("tree_bottom", 5, 13),
        ("bush", 16, 13),
        ("tree_top", 15, 14),
        ("tree_bottom", 15, 15),
        ("tree_top", 3, 16),
    ]
    .into_iter()
    .map(|(name, x, y)| TopTile { name: name.to_string(), x, y })
    .collect()
}

#[test]
fn test_meadow_bottom_layer_snapshot() {
    let level = Level::generate(&LevelLayout::meadow(), DEFAULT_SEED);
    let actual = level.get_bottom_layer_tiles();
    let expected = expected_bottom();
    for (y, (got, want)) in actual.iter().zip(&expected).enumerate() {
        assert_eq!(got, want, "bottom layer row {} differs", y);
    }
    assert_eq!(actual.len(), expected.len());
}

#[test]
fn test_meadow_top_layer_snapshot() {
    let level = Level::generate(&LevelLayout::meadow(), DEFAULT_SEED);
    assert_eq!(level.get_top_layer_tiles(), expected_top());
}

#[test]
fn test_meadow_snapshot_is_stable_across_runs() {
    let layout = LevelLayout::meadow();
    let mut level: Level = Level::new(20, 17, "grass_flat");
    for _ in 0..3 {
        level.procedural_generate_level(&layout, DEFAULT_SEED);
        assert_eq!(level.get_bottom_layer_tiles(), expected_bottom());
        assert_eq!(level.get_top_layer_tiles(), expected_top());
    }
}

#[test]
fn test_meadow_solid_cells_are_trees() {
    let level = Level::generate(&LevelLayout::meadow(), DEFAULT_SEED);
    for y in 0..17 {
        for x in 0..20 {
            let tile = level.get_tile(x, y).unwrap();
            let is_tree = matches!(tile.top_tile.as_deref(), Some("tree_top") | Some("tree_bottom"));
            assert_eq!(tile.solid, is_tree, "solid flag at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_meadow_path_clears_small_decorations() {
    let level = Level::generate(&LevelLayout::meadow(), DEFAULT_SEED);
    // bush at (4, 9) and mushrooms at (10, 5) sit on the path
    assert_eq!(level.get_tile(4, 9).unwrap().top_tile, None);
    assert_eq!(level.get_tile(10, 5).unwrap().top_tile, None);
    // the tree trunk at (17, 9) survives the path
    assert_eq!(level.get_tile(17, 9).unwrap().top_tile.as_deref(), Some("tree_bottom"));
    assert_eq!(level.get_tile(17, 9).unwrap().bottom_tile, "grass_flat");
}
