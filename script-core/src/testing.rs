//! Testing utilities: story fixtures and small tree builders.
//!
//! The fixtures mirror the example scripts shipped with the editor's help
//! panels, so tests exercise the same shapes users are shown.

use crate::story::{Branch, Outcome, StoryTree};

/// A terminal outcome.
pub fn terminal(name: &str) -> Outcome {
    Outcome::Terminal(name.to_string())
}

/// A nested branch opening a single new event.
pub fn nested(event: &str, options: Branch) -> Outcome {
    let mut tree = StoryTree::new();
    tree.insert(event, options);
    Outcome::Nested(tree)
}

/// Build a branch from `(option, outcome)` pairs, in order.
pub fn options(pairs: Vec<(&str, Outcome)>) -> Branch {
    pairs
        .into_iter()
        .map(|(option, outcome)| (option.to_string(), outcome))
        .collect()
}

/// The default script seeded into a fresh document: one starting event with
/// two direct endings and two nested branches that share endings.
pub fn sample_tree() -> StoryTree {
    let mut tree = StoryTree::new();
    tree.insert(
        "故事起点",
        options(vec![
            ("选项 A", terminal("结局 A")),
            ("选项 B", terminal("结局 B")),
            (
                "选项 C",
                nested(
                    "故事新分支",
                    options(vec![
                        ("选项 E", terminal("结局 C")),
                        ("选项 F", terminal("结局 A")),
                    ]),
                ),
            ),
            (
                "选项 D",
                nested(
                    "故事新分支",
                    options(vec![
                        ("选项 G", terminal("结局 A")),
                        ("选项 H", terminal("结局 D")),
                    ]),
                ),
            ),
        ]),
    );
    tree
}

/// The single-event example from the help panel.
pub fn homework_tree() -> StoryTree {
    let mut tree = StoryTree::new();
    tree.insert(
        "小明准备去上课时发现自己忘记写作业了",
        options(vec![
            ("开摆", terminal("挂科啦")),
            ("和老师解释", terminal("补交作业")),
            ("装病", terminal("被要求开医院证明")),
        ]),
    );
    tree
}

/// The two-branch nesting example from the help panel.
pub fn nested_example_tree() -> StoryTree {
    let mut tree = StoryTree::new();
    tree.insert(
        "起点",
        options(vec![
            (
                "选项 A",
                nested(
                    "分支 A",
                    options(vec![
                        ("选项 C", terminal("结束")),
                        ("选项 D", terminal("结束")),
                    ]),
                ),
            ),
            (
                "选项 B",
                nested(
                    "分支 B",
                    options(vec![
                        ("选项 E", terminal("结束")),
                        ("选项 F", terminal("结束")),
                    ]),
                ),
            ),
        ]),
    );
    tree
}
